//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the authentication state machine and its read model
//! - `request`: request bodies and response payloads of the auth endpoints
//! - `route`: redirect decisions derived from the session

mod model;
mod request;
mod route;

pub use model::{AuthState, SessionSnapshot};
pub use request::{AuthPayload, Credentials, Registration};
pub use route::{NavigationDecision, Route, RouteAccess};
