//! Registration and favorite reconciliation
//!
//! Keeps the locally cached membership sets and displayed counts consistent
//! with the store. Every toggle performs exactly one remote mutation; the
//! local ledger is patched only after the mutation is confirmed, so the
//! cached view never runs ahead of remote state. A request-scoped in-flight
//! guard rejects a second toggle for the same (user, event) pair while the
//! first is unresolved.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::database::DatabaseService;
use crate::utils::errors::{CampusHubError, Result};
use crate::utils::logging::log_toggle;

/// Direction a registration toggle will take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePlan {
    Register,
    Unregister,
}

/// Direction a favorite toggle will take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritePlan {
    Add,
    Remove,
}

/// Result of a confirmed registration toggle, for patching the caller's view
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleOutcome {
    pub event_id: i64,
    pub active: bool,
    pub attendee_count: i64,
}

/// Result of a confirmed favorite toggle. Favorites do not affect attendee
/// counts, so no count is reported.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FavoriteOutcome {
    pub event_id: i64,
    pub active: bool,
}

/// Derived, non-authoritative view state: per-user membership sets plus the
/// displayed attendee counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationLedger {
    registered: HashSet<i64>,
    favorited: HashSet<i64>,
    counts: HashMap<i64, i64>,
}

impl RegistrationLedger {
    pub fn new(registered: HashSet<i64>, favorited: HashSet<i64>) -> Self {
        Self {
            registered,
            favorited,
            counts: HashMap::new(),
        }
    }

    pub fn is_registered(&self, event_id: i64) -> bool {
        self.registered.contains(&event_id)
    }

    pub fn is_favorited(&self, event_id: i64) -> bool {
        self.favorited.contains(&event_id)
    }

    /// Overwrite the displayed count with a freshly loaded remote value
    pub fn seed_count(&mut self, event_id: i64, count: i64) {
        self.counts.insert(event_id, count);
    }

    pub fn displayed_count(&self, event_id: i64) -> i64 {
        self.counts.get(&event_id).copied().unwrap_or(0)
    }

    /// Decide the direction of a registration toggle. Registering into an
    /// event whose count has reached its capacity is rejected before any
    /// remote call.
    pub fn plan_registration(
        &self,
        event_id: i64,
        capacity: Option<i32>,
        current_count: i64,
    ) -> Result<TogglePlan> {
        if self.is_registered(event_id) {
            return Ok(TogglePlan::Unregister);
        }

        if let Some(capacity) = capacity {
            if current_count >= capacity as i64 {
                return Err(CampusHubError::CapacityReached { event_id });
            }
        }

        Ok(TogglePlan::Register)
    }

    /// Patch membership and count after the remote mutation confirmed.
    /// Counts are floored at zero.
    pub fn apply_registration(&mut self, event_id: i64, plan: TogglePlan) {
        match plan {
            TogglePlan::Register => {
                self.registered.insert(event_id);
                let count = self.displayed_count(event_id) + 1;
                self.counts.insert(event_id, count);
            }
            TogglePlan::Unregister => {
                self.registered.remove(&event_id);
                let count = (self.displayed_count(event_id) - 1).max(0);
                self.counts.insert(event_id, count);
            }
        }
    }

    /// Decide the direction of a favorite toggle. No capacity check.
    pub fn plan_favorite(&self, event_id: i64) -> FavoritePlan {
        if self.is_favorited(event_id) {
            FavoritePlan::Remove
        } else {
            FavoritePlan::Add
        }
    }

    /// Patch the favorite set after the remote mutation confirmed
    pub fn apply_favorite(&mut self, event_id: i64, plan: FavoritePlan) {
        match plan {
            FavoritePlan::Add => {
                self.favorited.insert(event_id);
            }
            FavoritePlan::Remove => {
                self.favorited.remove(&event_id);
            }
        }
    }

    pub fn registered_ids(&self) -> &HashSet<i64> {
        &self.registered
    }

    pub fn favorited_ids(&self) -> &HashSet<i64> {
        &self.favorited
    }
}

/// Tracks (user, event) pairs with an unresolved toggle
type InFlightSet = Arc<Mutex<HashSet<(i64, i64)>>>;

/// Releases the in-flight slot when the toggle resolves, success or not
#[derive(Debug)]
struct InFlightGuard {
    set: InFlightSet,
    key: (i64, i64),
}

impl InFlightGuard {
    fn acquire(set: &InFlightSet, user_id: i64, event_id: i64) -> Result<Self> {
        let key = (user_id, event_id);
        // A poisoned lock only means a panicked holder; the set is still usable
        let mut pairs = match set.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !pairs.insert(key) {
            return Err(CampusHubError::OperationInFlight { event_id });
        }
        Ok(Self {
            set: Arc::clone(set),
            key,
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if let Ok(mut pairs) = self.set.lock() {
            pairs.remove(&self.key);
        }
    }
}

/// Applies toggles against the store and reconciles the session ledger
#[derive(Debug, Clone)]
pub struct ReconcilerService {
    db: DatabaseService,
    in_flight: InFlightSet,
}

impl ReconcilerService {
    pub fn new(db: DatabaseService) -> Self {
        Self {
            db,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Toggle a user's registration for an event. Performs exactly one remote
    /// mutation and patches the ledger only after it succeeds.
    pub async fn toggle_registration(
        &self,
        ledger: &mut RegistrationLedger,
        user_id: i64,
        event_id: i64,
    ) -> Result<ToggleOutcome> {
        let _guard = InFlightGuard::acquire(&self.in_flight, user_id, event_id)?;

        let entry = self
            .db
            .events
            .catalog_entry(event_id)
            .await?
            .ok_or(CampusHubError::EventNotFound { event_id })?;

        let plan = ledger
            .plan_registration(event_id, entry.capacity, entry.attendee_count)
            .map_err(|e| {
                log_toggle(user_id, event_id, "register", false);
                e
            })?;

        match plan {
            TogglePlan::Register => {
                self.db.attendance.register(event_id, user_id).await?;
            }
            TogglePlan::Unregister => {
                self.db.attendance.unregister(event_id, user_id).await?;
            }
        }

        // Remote mutation confirmed: patch the derived view
        ledger.seed_count(event_id, entry.attendee_count);
        ledger.apply_registration(event_id, plan);

        let outcome = ToggleOutcome {
            event_id,
            active: ledger.is_registered(event_id),
            attendee_count: ledger.displayed_count(event_id),
        };

        info!(
            user_id = user_id,
            event_id = event_id,
            registered = outcome.active,
            attendee_count = outcome.attendee_count,
            "Registration toggled"
        );

        Ok(outcome)
    }

    /// Toggle a user's favorite for an event. Same pattern, no capacity check.
    pub async fn toggle_favorite(
        &self,
        ledger: &mut RegistrationLedger,
        user_id: i64,
        event_id: i64,
    ) -> Result<FavoriteOutcome> {
        let _guard = InFlightGuard::acquire(&self.in_flight, user_id, event_id)?;

        if self.db.events.find_by_id(event_id).await?.is_none() {
            return Err(CampusHubError::EventNotFound { event_id });
        }

        let plan = ledger.plan_favorite(event_id);
        match plan {
            FavoritePlan::Add => {
                self.db.favorites.add(event_id, user_id).await?;
            }
            FavoritePlan::Remove => {
                self.db.favorites.remove(event_id, user_id).await?;
            }
        }

        ledger.apply_favorite(event_id, plan);

        let outcome = FavoriteOutcome {
            event_id,
            active: ledger.is_favorited(event_id),
        };

        debug!(
            user_id = user_id,
            event_id = event_id,
            favorited = outcome.active,
            "Favorite toggled"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_toggle_twice_restores_original_state_and_count() {
        let mut ledger = RegistrationLedger::default();
        ledger.seed_count(1, 5);

        let plan = ledger.plan_registration(1, Some(10), 5).unwrap();
        assert_eq!(plan, TogglePlan::Register);
        ledger.apply_registration(1, plan);
        assert!(ledger.is_registered(1));
        assert_eq!(ledger.displayed_count(1), 6);

        let plan = ledger.plan_registration(1, Some(10), 6).unwrap();
        assert_eq!(plan, TogglePlan::Unregister);
        ledger.apply_registration(1, plan);
        assert!(!ledger.is_registered(1));
        assert_eq!(ledger.displayed_count(1), 5);
    }

    #[test]
    fn test_register_rejected_when_count_reaches_capacity() {
        let ledger = RegistrationLedger::default();

        let result = ledger.plan_registration(7, Some(20), 20);
        assert_matches!(result, Err(CampusHubError::CapacityReached { event_id: 7 }));
    }

    #[test]
    fn test_unregister_allowed_even_when_event_is_full() {
        let mut registered = HashSet::new();
        registered.insert(7);
        let ledger = RegistrationLedger::new(registered, HashSet::new());

        let plan = ledger.plan_registration(7, Some(20), 20).unwrap();
        assert_eq!(plan, TogglePlan::Unregister);
    }

    #[test]
    fn test_no_capacity_means_no_limit() {
        let ledger = RegistrationLedger::default();
        let plan = ledger.plan_registration(3, None, 1_000_000).unwrap();
        assert_eq!(plan, TogglePlan::Register);
    }

    #[test]
    fn test_count_is_floored_at_zero() {
        let mut registered = HashSet::new();
        registered.insert(4);
        let mut ledger = RegistrationLedger::new(registered, HashSet::new());
        // Count was never seeded, so unregistering would go negative
        ledger.apply_registration(4, TogglePlan::Unregister);
        assert_eq!(ledger.displayed_count(4), 0);
    }

    #[test]
    fn test_favorite_toggle_round_trip() {
        let mut ledger = RegistrationLedger::default();

        let plan = ledger.plan_favorite(9);
        assert_eq!(plan, FavoritePlan::Add);
        ledger.apply_favorite(9, plan);
        assert!(ledger.is_favorited(9));

        let plan = ledger.plan_favorite(9);
        assert_eq!(plan, FavoritePlan::Remove);
        ledger.apply_favorite(9, plan);
        assert!(!ledger.is_favorited(9));
    }

    #[test]
    fn test_favorite_outcome_reports_membership_without_a_count() {
        let outcome = FavoriteOutcome {
            event_id: 9,
            active: true,
        };
        let value = serde_json::to_value(outcome).unwrap();
        assert_eq!(value, serde_json::json!({ "event_id": 9, "active": true }));
    }

    #[test]
    fn test_in_flight_guard_rejects_overlapping_toggle() {
        let set: InFlightSet = Arc::new(Mutex::new(HashSet::new()));

        let guard = InFlightGuard::acquire(&set, 1, 42).unwrap();
        let second = InFlightGuard::acquire(&set, 1, 42);
        assert_matches!(second, Err(CampusHubError::OperationInFlight { event_id: 42 }));

        // A different user or event is unaffected
        assert!(InFlightGuard::acquire(&set, 2, 42).is_ok());
        assert!(InFlightGuard::acquire(&set, 1, 43).is_ok());

        drop(guard);
        assert!(InFlightGuard::acquire(&set, 1, 42).is_ok());
    }
}
