use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use notifia_core::api::{ApiRequest, Envelope, HttpTransport};
use notifia_core::error::{NotifiaError, Result};
use notifia_core::session::{
    AuthPayload, AuthState, Credentials, NavigationDecision, Registration, Route, SessionSnapshot,
};
use notifia_core::storage::{KeyValueStore, keys};
use notifia_core::user::User;
use serde::Serialize;
use tokio::sync::watch;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const LOGOUT_PATH: &str = "/auth/logout";

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Owns the process-wide authentication state.
///
/// `SessionManager` is responsible for:
/// - Restoring the persisted user record on startup
/// - Signing in, signing up and signing out against the auth endpoints
/// - Persisting the signed-in user so the session survives a restart
/// - Publishing every state change to subscribers
///
/// The session cookie itself lives in the HTTP transport; this type only
/// tracks who the client believes is signed in.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    transport: Arc<dyn HttpTransport>,
    state: watch::Sender<AuthState>,
    restore_started: AtomicBool,
}

impl SessionManager {
    /// Creates a manager in the `Initializing` state.
    ///
    /// Call [`restore`](Self::restore) (or use [`start`](Self::start)) to
    /// leave it.
    pub fn new(store: Arc<dyn KeyValueStore>, transport: Arc<dyn HttpTransport>) -> Self {
        let (state, _) = watch::channel(AuthState::Initializing);
        Self {
            store,
            transport,
            state,
            restore_started: AtomicBool::new(false),
        }
    }

    /// Creates a manager and restores the persisted session.
    pub async fn start(store: Arc<dyn KeyValueStore>, transport: Arc<dyn HttpTransport>) -> Self {
        let manager = Self::new(store, transport);
        manager.restore().await;
        manager
    }

    /// Loads the persisted user record and leaves `Initializing`.
    ///
    /// A missing, unreadable or corrupt record yields `Unauthenticated`.
    /// Runs at most once; later calls return immediately. If a sign-in
    /// completed while the record was being read, its result wins.
    pub async fn restore(&self) {
        if self.restore_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let restored = match self.store.get(keys::USER).await {
            Ok(Some(record)) => match serde_json::from_str::<User>(&record) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!("[Session] Ignoring corrupt session record: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::error!("[Session] Failed to read session record: {}", e);
                None
            }
        };

        match &restored {
            Some(user) => tracing::info!("[Session] Restored session for {}", user.email),
            None => tracing::debug!("[Session] No session to restore"),
        }

        self.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = match restored {
                Some(user) => AuthState::Authenticated(user),
                None => AuthState::Unauthenticated,
            };
            true
        });
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Waits until the session has been restored.
    pub async fn wait_until_ready(&self) -> SessionSnapshot {
        let mut receiver = self.subscribe();
        let ready = receiver
            .wait_for(|state| !state.is_loading())
            .await
            .map(|state| state.snapshot());
        ready.unwrap_or_else(|_| self.snapshot())
    }

    /// Decides whether `route` may be shown in the current state.
    pub fn navigate(&self, route: &Route) -> NavigationDecision {
        route.resolve(&self.snapshot())
    }

    /// Signs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`NotifiaError::Authentication`] with the server's message
    /// (or "Login failed") if the server rejects the credentials or cannot be
    /// reached. The state is left untouched in that case.
    ///
    /// Returns a storage error if the sign-in succeeded but the user record
    /// could not be persisted. The state is `Authenticated` regardless; only
    /// the next restart is affected.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User> {
        tracing::info!("[Session] Signing in as {}", email);
        let credentials = Credentials::new(email, password);
        let user = self
            .authenticate(LOGIN_PATH, &credentials, LOGIN_FAILED)
            .await?;
        self.establish(user).await
    }

    /// Registers a new account and signs it in.
    ///
    /// # Errors
    ///
    /// Same as [`sign_in`](Self::sign_in), with "Registration failed" as
    /// the fallback message.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<User> {
        tracing::info!("[Session] Registering {}", email);
        let registration = Registration::new(name, email, password);
        let user = self
            .authenticate(REGISTER_PATH, &registration, REGISTRATION_FAILED)
            .await?;
        self.establish(user).await
    }

    /// Signs out. Never fails.
    ///
    /// The logout request is best effort: whatever the server answers, the
    /// local session is cleared and the persisted record removed.
    pub async fn sign_out(&self) {
        match self.transport.send(ApiRequest::post(LOGOUT_PATH)).await {
            Ok(response) if !response.is_success() => {
                tracing::warn!("[Session] Logout returned HTTP {}", response.status);
            }
            Ok(_) => {}
            Err(e) => tracing::error!("[Session] Logout request failed: {}", e),
        }

        self.state.send_replace(AuthState::Unauthenticated);

        if let Err(e) = self.store.remove(keys::USER).await {
            tracing::error!("[Session] Failed to remove session record: {}", e);
        }

        tracing::info!("[Session] Signed out");
    }

    /// Posts `body` to an auth endpoint and extracts the user.
    ///
    /// Every failure is reduced to an authentication error whose message is
    /// safe to show.
    async fn authenticate<B>(&self, path: &str, body: &B, fallback: &str) -> Result<User>
    where
        B: Serialize + Sync,
    {
        let request = ApiRequest::post(path).with_json(body).map_err(|e| {
            tracing::error!("[Session] Failed to encode {} request: {}", path, e);
            NotifiaError::authentication(fallback)
        })?;

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::error!("[Session] {} request failed: {}", path, e);
            NotifiaError::authentication(fallback)
        })?;

        if !response.is_success() {
            let message = response.message().unwrap_or_else(|| fallback.to_string());
            tracing::warn!(
                "[Session] {} returned HTTP {}: {}",
                path,
                response.status,
                message
            );
            return Err(NotifiaError::authentication(message));
        }

        let envelope: Envelope<AuthPayload> = response.json().map_err(|e| {
            tracing::error!("[Session] Unreadable {} response: {}", path, e);
            NotifiaError::authentication(fallback)
        })?;

        envelope
            .into_data(fallback)
            .map(|payload| payload.user)
            .map_err(|e| {
                let message = e.user_message().unwrap_or(fallback).to_string();
                tracing::warn!("[Session] {} rejected: {}", path, message);
                NotifiaError::authentication(message)
            })
    }

    /// Moves to `Authenticated(user)` and persists the record.
    async fn establish(&self, user: User) -> Result<User> {
        let record = serde_json::to_string(&user)?;

        self.state.send_replace(AuthState::Authenticated(user.clone()));
        tracing::info!("[Session] Signed in as {}", user.email);

        if let Err(e) = self.store.set(keys::USER, &record).await {
            tracing::error!(
                "[Session] Signed in as {} but failed to persist the session: {}",
                user.email,
                e
            );
            return Err(e);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FlakyStore, ScriptedTransport, auth_body, user};
    use notifia_core::api::Method;
    use notifia_infrastructure::MemoryKeyValueStore;
    use serde_json::json;

    fn manager_with(
        store: Arc<dyn KeyValueStore>,
        transport: ScriptedTransport,
    ) -> (SessionManager, Arc<ScriptedTransport>) {
        let transport = Arc::new(transport);
        (SessionManager::new(store, transport.clone()), transport)
    }

    fn login_ok() -> ScriptedTransport {
        ScriptedTransport::new().respond(Method::Post, LOGIN_PATH, 200, auth_body(&user()))
    }

    #[tokio::test]
    async fn test_starts_initializing() {
        let (manager, _) = manager_with(Arc::new(MemoryKeyValueStore::new()), login_ok());

        assert!(manager.is_loading());
        assert_eq!(manager.navigate(&Route::Bookmarks), NavigationDecision::Wait);

        manager.restore().await;
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert_eq!(
            manager.navigate(&Route::Bookmarks),
            NavigationDecision::Redirect(Route::Login)
        );
    }

    #[tokio::test]
    async fn test_sign_in_persists_and_survives_restart() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let (manager, transport) = manager_with(store.clone(), login_ok());
        manager.restore().await;

        let signed_in = manager.sign_in("ana@example.com", "secret").await.unwrap();
        assert_eq!(signed_in, user());
        assert_eq!(manager.current_user(), Some(user()));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body,
            Some(json!({"email": "ana@example.com", "password": "secret"}))
        );

        // A fresh manager over the same store restores the user.
        let restarted = SessionManager::start(store, Arc::new(ScriptedTransport::new())).await;
        assert_eq!(restarted.state(), AuthState::Authenticated(user()));
    }

    #[tokio::test]
    async fn test_rejected_sign_in_keeps_state() {
        let transport = ScriptedTransport::new().respond(
            Method::Post,
            LOGIN_PATH,
            401,
            json!({"success": false, "message": "Invalid credentials"}),
        );
        let store = Arc::new(MemoryKeyValueStore::new());
        let (manager, _) = manager_with(store.clone(), transport);
        manager.restore().await;

        let err = manager.sign_in("ana@example.com", "wrong").await.unwrap_err();
        assert_eq!(err, NotifiaError::authentication("Invalid credentials"));
        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(store.get(keys::USER).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_in_failure_messages() {
        let transport = ScriptedTransport::new()
            .respond(Method::Post, LOGIN_PATH, 200, json!({"success": false}))
            .fail(Method::Post, REGISTER_PATH);
        let (manager, _) = manager_with(Arc::new(MemoryKeyValueStore::new()), transport);
        manager.restore().await;

        let err = manager.sign_in("ana@example.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "Login failed");

        let err = manager
            .sign_up("Ana", "ana@example.com", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Registration failed");
        assert!(!manager.is_authenticated());
    }

    #[tokio::test]
    async fn test_unparsable_success_body() {
        let transport =
            ScriptedTransport::new().respond_raw(Method::Post, LOGIN_PATH, 200, "<html></html>");
        let (manager, _) = manager_with(Arc::new(MemoryKeyValueStore::new()), transport);
        manager.restore().await;

        let err = manager.sign_in("ana@example.com", "pw").await.unwrap_err();
        assert_eq!(err, NotifiaError::authentication("Login failed"));
    }

    #[tokio::test]
    async fn test_sign_up_authenticates() {
        let transport = ScriptedTransport::new().respond(
            Method::Post,
            REGISTER_PATH,
            201,
            auth_body(&user()),
        );
        let (manager, transport) = manager_with(Arc::new(MemoryKeyValueStore::new()), transport);
        manager.restore().await;

        manager
            .sign_up("Ana", "ana@example.com", "secret")
            .await
            .unwrap();
        assert!(manager.is_authenticated());
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"name": "Ana", "email": "ana@example.com", "password": "secret"}))
        );
        assert_eq!(
            manager.navigate(&Route::Login),
            NavigationDecision::Redirect(Route::Home)
        );
    }

    #[tokio::test]
    async fn test_sign_out_clears_even_when_logout_fails() {
        let transport = login_ok().fail(Method::Post, LOGOUT_PATH);
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryKeyValueStore::new());
        let (manager, _) = manager_with(store.clone(), transport);
        manager.restore().await;
        manager.sign_in("ana@example.com", "secret").await.unwrap();

        manager.sign_out().await;

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(store.get(keys::USER).await.unwrap().is_none());

        let restarted = SessionManager::start(store, Arc::new(ScriptedTransport::new())).await;
        assert_eq!(restarted.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_sign_out_tolerates_storage_failure() {
        let store = Arc::new(FlakyStore::new());
        let (manager, _) = manager_with(store.clone(), login_ok());
        manager.restore().await;
        manager.sign_in("ana@example.com", "secret").await.unwrap();

        store.fail_remove.store(true, Ordering::SeqCst);
        manager.sign_out().await;

        assert_eq!(manager.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_corrupt_record_restores_unauthenticated() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(keys::USER, "{not json").await.unwrap();

        let manager = SessionManager::start(store, Arc::new(ScriptedTransport::new())).await;

        assert_eq!(manager.state(), AuthState::Unauthenticated);
        assert!(!manager.snapshot().loading);
    }

    #[tokio::test]
    async fn test_unreadable_store_restores_unauthenticated() {
        let store = FlakyStore::new();
        store.fail_get.store(true, Ordering::SeqCst);

        let manager =
            SessionManager::start(Arc::new(store), Arc::new(ScriptedTransport::new())).await;

        assert_eq!(manager.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_session_in_memory() {
        let store = Arc::new(FlakyStore::failing_writes());
        let (manager, _) = manager_with(store, login_ok());
        manager.restore().await;

        let err = manager.sign_in("ana@example.com", "secret").await.unwrap_err();

        assert!(err.is_storage());
        assert_eq!(manager.state(), AuthState::Authenticated(user()));
    }

    #[tokio::test]
    async fn test_restore_runs_once_and_sign_in_wins() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let (manager, _) = manager_with(store, login_ok());

        // Sign-in while still initializing.
        manager.sign_in("ana@example.com", "secret").await.unwrap();
        manager.restore().await;
        assert_eq!(manager.state(), AuthState::Authenticated(user()));

        manager.sign_out().await;
        manager.restore().await;
        assert_eq!(manager.state(), AuthState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let (manager, _) = manager_with(Arc::new(MemoryKeyValueStore::new()), login_ok());
        let manager = Arc::new(manager);
        let mut receiver = manager.subscribe();

        let waiter = {
            let manager = manager.clone();
            tokio::spawn(async move { manager.wait_until_ready().await })
        };

        manager.restore().await;
        let snapshot = waiter.await.unwrap();
        assert!(!snapshot.loading);
        assert!(!snapshot.authenticated);

        receiver.borrow_and_update();
        manager.sign_in("ana@example.com", "secret").await.unwrap();
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().is_authenticated());
    }
}
