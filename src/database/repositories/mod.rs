//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod event;
pub mod attendance;
pub mod favorite;
pub mod discussion;
pub mod profile;
pub mod category;

// Re-export repositories
pub use event::EventRepository;
pub use attendance::AttendanceRepository;
pub use favorite::FavoriteRepository;
pub use discussion::DiscussionRepository;
pub use profile::ProfileRepository;
pub use category::CategoryRepository;
