//! The `{success, message, data}` response wrapper.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::request::ApiResponse;
use crate::error::{NotifiaError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Checks the status and parses the body.
    ///
    /// Non-2xx responses become [`NotifiaError::Http`]; an unparsable 2xx body
    /// is a serialization error.
    pub fn from_response(response: ApiResponse) -> Result<Self> {
        response.error_for_status()?.json()
    }
}

impl<T> Envelope<T> {
    /// `data` of a successful envelope.
    ///
    /// `success: false` or a missing `data` becomes [`NotifiaError::Rejected`]
    /// with the server's message, or `fallback` when it sent none.
    pub fn into_data(self, fallback: &str) -> Result<T> {
        let message = self.message.filter(|m| !m.is_empty());
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(NotifiaError::rejected(
                message.unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }

    /// `data` regardless of the `success` flag, or the default when absent.
    ///
    /// Used by the read-only feed endpoints.
    pub fn data_or_default(self) -> T
    where
        T: Default,
    {
        self.data.unwrap_or_default()
    }
}
