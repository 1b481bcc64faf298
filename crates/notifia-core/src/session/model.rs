//! Authentication state machine.

use serde::Serialize;

use crate::user::User;

/// The process-wide authentication state.
///
/// ```text
/// Initializing ──restore──▶ Unauthenticated ◀──sign_out── Authenticated(user)
///       │                         │                              ▲
///       └────────restore──────────┴─────────sign_in/sign_up──────┘
/// ```
///
/// There is no terminal state; the machine cycles for the life of the process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Restoring the persisted user record.
    #[default]
    Initializing,
    Unauthenticated,
    Authenticated(User),
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Flattens the state into the `{authenticated, user, loading}` read model.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: self.is_authenticated(),
            user: self.user().cloned(),
            loading: self.is_loading(),
        }
    }
}

/// Read model handed to the UI/navigation layer.
///
/// `authenticated` and `user` are meaningless while `loading` is true.
/// Once loading completes, `authenticated == user.is_some()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub user: Option<User>,
    pub loading: bool,
}

impl From<&AuthState> for SessionSnapshot {
    fn from(state: &AuthState) -> Self {
        state.snapshot()
    }
}
