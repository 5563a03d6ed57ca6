//! Calendar month-grid builder
//!
//! Buckets catalog entries into day cells of a 7-column month grid. An event
//! is shown only in the cell of its start date, never on intermediate or end
//! days. Weeks are Sunday-first; leading cells are padded from the prior
//! month and trailing cells complete the final week.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::event::CatalogEntry;

/// One cell of the month grid
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for padding cells that belong to an adjacent month
    pub in_month: bool,
    pub events: Vec<CatalogEntry>,
}

/// A month of day cells, in rows of seven
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<DayCell>>,
}

/// Build the grid for a reference month from the loaded, filtered event list
pub fn month_grid(year: i32, month: u32, events: &[CatalogEntry]) -> Option<MonthGrid> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let (next_year, next_month) = next_month(year, month);
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;

    let leading = first.weekday().num_days_from_sunday() as i64;
    let mut cursor = first - Duration::days(leading);

    // The cursor starts on a Sunday, so rows always come out complete
    let mut weeks = Vec::new();
    while cursor < first_of_next {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            week.push(DayCell {
                date: cursor,
                in_month: cursor.year() == year && cursor.month() == month,
                events: events_on(cursor, events),
            });
            cursor += Duration::days(1);
        }
        weeks.push(week);
    }

    Some(MonthGrid { year, month, weeks })
}

/// Events whose start date falls on this calendar day (year/month/day
/// equality, not a time-range containment test)
fn events_on(day: NaiveDate, events: &[CatalogEntry]) -> Vec<CatalogEntry> {
    events
        .iter()
        .filter(|e| e.start_time.date_naive() == day)
        .cloned()
        .collect()
}

/// Move the reference month back by one. No bounds.
pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Move the reference month forward by one. No bounds.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn entry(id: i64, title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> CatalogEntry {
        CatalogEntry {
            id,
            title: title.to_string(),
            description: None,
            start_time: start,
            end_time: end,
            location: "Main Hall".to_string(),
            image_url: None,
            capacity: None,
            tags: None,
            category_id: None,
            organizer_id: 1,
            video_urls: None,
            attendee_count: 0,
            category_label: None,
            category_color: None,
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_event_appears_in_exactly_one_cell_on_start_day() {
        // Multi-day event: starts March 15, ends March 18
        let events = vec![entry(1, "Hackathon", utc(2025, 3, 15, 9), utc(2025, 3, 18, 17))];
        let grid = month_grid(2025, 3, &events).unwrap();

        let mut hits = Vec::new();
        for week in &grid.weeks {
            for cell in week {
                if !cell.events.is_empty() {
                    hits.push(cell.date);
                }
            }
        }

        assert_eq!(hits, vec![NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()]);
    }

    #[test]
    fn test_leading_padding_aligns_first_day_to_weekday() {
        // March 1, 2025 is a Saturday: six leading cells from February
        let grid = month_grid(2025, 3, &[]).unwrap();
        let first_week = &grid.weeks[0];

        assert_eq!(first_week.len(), 7);
        assert_eq!(first_week[0].date, NaiveDate::from_ymd_opt(2025, 2, 23).unwrap());
        assert!(!first_week[0].in_month);
        assert_eq!(first_week[6].date, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(first_week[6].in_month);
    }

    #[test]
    fn test_every_week_has_seven_cells_and_month_is_covered() {
        let grid = month_grid(2025, 3, &[]).unwrap();
        let mut in_month_days = 0;
        for week in &grid.weeks {
            assert_eq!(week.len(), 7);
            in_month_days += week.iter().filter(|c| c.in_month).count();
        }
        assert_eq!(in_month_days, 31);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_leading_padding() {
        // June 1, 2025 is a Sunday
        let grid = month_grid(2025, 6, &[]).unwrap();
        let first_cell = &grid.weeks[0][0];
        assert_eq!(first_cell.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert!(first_cell.in_month);
    }

    #[test]
    fn test_navigation_wraps_year_boundaries() {
        assert_eq!(prev_month(2025, 1), (2024, 12));
        assert_eq!(next_month(2025, 12), (2026, 1));
        assert_eq!(prev_month(2025, 7), (2025, 6));
        assert_eq!(next_month(2025, 7), (2025, 8));
    }

    #[test]
    fn test_event_in_padding_cell_is_still_bucketed() {
        // Event on Feb 28 shows up in March's leading padding
        let events = vec![entry(2, "Late Feb", utc(2025, 2, 28, 19), utc(2025, 2, 28, 21))];
        let grid = month_grid(2025, 3, &events).unwrap();
        let cell = grid.weeks[0]
            .iter()
            .find(|c| c.date == NaiveDate::from_ymd_opt(2025, 2, 28).unwrap())
            .unwrap();
        assert_eq!(cell.events.len(), 1);
        assert!(!cell.in_month);
    }

    #[test]
    fn test_invalid_month_yields_none() {
        assert!(month_grid(2025, 13, &[]).is_none());
    }
}
