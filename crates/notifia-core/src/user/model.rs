//! User domain model.

use serde::{Deserialize, Serialize};

/// An authenticated account as returned by the auth endpoints.
///
/// The same JSON shape is persisted under the session storage key, so a
/// record written by one run deserializes unchanged in the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_server_payload() {
        let json = r#"{"id":7,"email":"ana@example.com","name":"Ana","role":"admin"}"#;
        let parsed: User = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.role, "admin");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
    }
}
