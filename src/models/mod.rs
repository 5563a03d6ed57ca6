//! Data models module

pub mod event;
pub mod profile;
pub mod category;
pub mod attendance;
pub mod discussion;

pub use event::{Event, CatalogEntry, CreateEventRequest, UpdateEventRequest};
pub use profile::{Profile, Role, UpsertProfileRequest};
pub use category::Category;
pub use attendance::{Attendance, Favorite, AttendeeProfile};
pub use discussion::{DiscussionComment, CommentWithAuthor, CreateCommentRequest};
