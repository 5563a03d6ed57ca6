//! Session state management module

pub mod context;
pub mod session_store;

pub use context::{SessionContext, Capability};
pub use session_store::SessionStore;
