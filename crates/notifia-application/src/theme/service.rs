use std::sync::Arc;

use notifia_core::storage::{KeyValueStore, keys};
use notifia_core::theme::ThemeMode;
use tokio::sync::watch;

/// Holds the light/dark preference and persists it as a JSON boolean.
pub struct ThemeService {
    store: Arc<dyn KeyValueStore>,
    mode: watch::Sender<ThemeMode>,
}

impl ThemeService {
    /// Creates a service in light mode. Call [`load`](Self::load) to read
    /// the saved preference.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (mode, _) = watch::channel(ThemeMode::default());
        Self { store, mode }
    }

    /// Reads the saved preference. Anything unreadable leaves light mode.
    pub async fn load(&self) -> ThemeMode {
        let mode = match self.store.get(keys::DARK_THEME).await {
            Ok(Some(raw)) => match serde_json::from_str::<bool>(&raw) {
                Ok(is_dark) => ThemeMode::from_dark(is_dark),
                Err(e) => {
                    tracing::warn!("[Theme] Ignoring invalid theme preference: {}", e);
                    ThemeMode::default()
                }
            },
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::error!("[Theme] Error loading theme: {}", e);
                ThemeMode::default()
            }
        };
        self.mode.send_replace(mode);
        mode
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.mode.subscribe()
    }

    /// Switches between light and dark and saves the choice.
    ///
    /// The new mode applies even if it cannot be saved.
    pub async fn toggle(&self) -> ThemeMode {
        let mode = self.mode().toggled();
        self.mode.send_replace(mode);

        let raw = if mode.is_dark() { "true" } else { "false" };
        if let Err(e) = self.store.set(keys::DARK_THEME, raw).await {
            tracing::error!("[Theme] Error saving theme: {}", e);
        }
        mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FlakyStore;
    use notifia_infrastructure::MemoryKeyValueStore;

    #[tokio::test]
    async fn test_defaults_to_light() {
        let service = ThemeService::new(Arc::new(MemoryKeyValueStore::new()));
        assert_eq!(service.load().await, ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_toggle_persists() {
        let store = Arc::new(MemoryKeyValueStore::new());
        let service = ThemeService::new(store.clone());

        assert_eq!(service.toggle().await, ThemeMode::Dark);
        assert_eq!(
            store.get(keys::DARK_THEME).await.unwrap().as_deref(),
            Some("true")
        );

        let reloaded = ThemeService::new(store);
        assert_eq!(reloaded.load().await, ThemeMode::Dark);
        assert_eq!(reloaded.toggle().await, ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_invalid_preference_is_light() {
        let store = Arc::new(MemoryKeyValueStore::new());
        store.set(keys::DARK_THEME, "maybe").await.unwrap();

        let service = ThemeService::new(store);
        assert_eq!(service.load().await, ThemeMode::Light);
    }

    #[tokio::test]
    async fn test_toggle_applies_when_save_fails() {
        let service = ThemeService::new(Arc::new(FlakyStore::failing_writes()));
        let mut receiver = service.subscribe();

        assert_eq!(service.toggle().await, ThemeMode::Dark);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), ThemeMode::Dark);
    }
}
