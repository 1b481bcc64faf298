//! Auth endpoint request bodies and response payloads.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Hand-written so the password never reaches a log line.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `data` section of a successful login/register envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("ana@example.com", "hunter2");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("ana@example.com"));
        assert!(!rendered.contains("hunter2"));

        let reg = Registration::new("Ana", "ana@example.com", "hunter2");
        assert!(!format!("{:?}", reg).contains("hunter2"));
    }

    #[test]
    fn test_registration_body_shape() {
        let body = serde_json::to_value(Registration::new("Ana", "a@b.c", "pw")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Ana", "email": "a@b.c", "password": "pw"})
        );
    }
}
