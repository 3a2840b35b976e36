//! Session management.
//!
//! Sessions are held in memory for the lifetime of the process. A session
//! grants access to exactly one service.

pub mod policy;
pub mod store;
pub mod types;

pub use policy::SessionPolicy;
pub use store::SessionStore;
