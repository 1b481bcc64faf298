//! HTTP transport port.

use async_trait::async_trait;

use super::request::{ApiRequest, ApiResponse};
use crate::error::Result;

/// Sends requests to the remote API.
///
/// Implementations attach the ambient credentials (session cookies) to every
/// request; callers never handle tokens. Any received response, whatever its
/// status, is `Ok`. Only transport failures are errors, reported as
/// [`NotifiaError::Network`](crate::error::NotifiaError::Network).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}
