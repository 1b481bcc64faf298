//! Authentication session lifecycle.

mod manager;

pub use manager::SessionManager;
