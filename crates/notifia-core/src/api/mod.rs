//! Remote REST API port.
//!
//! # Module Structure
//!
//! - `request`: transport-neutral request/response values
//! - `transport`: the [`HttpTransport`] trait implemented by the infrastructure layer
//! - `envelope`: the `{success, message, data}` wrapper every endpoint returns

mod envelope;
mod request;
mod transport;

pub use envelope::Envelope;
pub use request::{ApiRequest, ApiResponse, Method};
pub use transport::HttpTransport;
