//! Test doubles for the storage and HTTP ports.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use notifia_core::api::{ApiRequest, ApiResponse, HttpTransport, Method};
use notifia_core::error::{NotifiaError, Result};
use notifia_core::storage::KeyValueStore;
use notifia_core::user::User;
use notifia_infrastructure::MemoryKeyValueStore;
use serde_json::{Value, json};

pub fn user() -> User {
    User {
        id: 7,
        email: "ana@example.com".to_string(),
        name: "Ana".to_string(),
        role: "user".to_string(),
    }
}

pub fn auth_body(user: &User) -> Value {
    json!({ "success": true, "data": { "user": user } })
}

enum Scripted {
    Respond(ApiResponse),
    Fail(String),
}

/// Answers requests from a fixed table keyed by method and path.
///
/// Unscripted requests fail with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.routes.lock().unwrap().insert(
            (method, path.to_string()),
            Scripted::Respond(ApiResponse::new(status, body.to_string())),
        );
        self
    }

    pub fn respond_raw(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.routes.lock().unwrap().insert(
            (method, path.to_string()),
            Scripted::Respond(ApiResponse::new(status, body)),
        );
        self
    }

    pub fn fail(self, method: Method, path: &str) -> Self {
        self.routes.lock().unwrap().insert(
            (method, path.to_string()),
            Scripted::Fail(format!("connection refused: {}", path)),
        );
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let key = (request.method, request.path.clone());
        self.requests.lock().unwrap().push(request);
        match self.routes.lock().unwrap().get(&key) {
            Some(Scripted::Respond(response)) => Ok(response.clone()),
            Some(Scripted::Fail(message)) => Err(NotifiaError::network(message.clone())),
            None => Err(NotifiaError::network(format!("unscripted request: {}", key.1))),
        }
    }
}

/// An in-memory store whose operations can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryKeyValueStore,
    pub fail_get: AtomicBool,
    pub fail_set: AtomicBool,
    pub fail_remove: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_writes() -> Self {
        let store = Self::default();
        store.fail_set.store(true, Ordering::SeqCst);
        store.fail_remove.store(true, Ordering::SeqCst);
        store
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(NotifiaError::storage(format!("{} failed: disk full", op)));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Self::check(&self.fail_get, "get")?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        Self::check(&self.fail_set, "set")?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        Self::check(&self.fail_remove, "remove")?;
        self.inner.remove(key).await
    }
}
