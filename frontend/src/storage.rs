//! `localStorage`-backed [`SessionStore`]. Values are stored JSON-encoded.

use gloo::storage::{LocalStorage, Storage};
use wallet_session::SessionStore;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl SessionStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = LocalStorage::set(key, value) {
            log::warn!("Failed to persist {}: {}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}
