//! Durable storage for the last connected wallet type.

use crate::wallet::WalletType;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Default key under which the wallet type is persisted.
pub const WALLET_TYPE_KEY: &str = "walletType";

/// Minimal string key/value store (browser `localStorage` in production).
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Read the persisted wallet type. Unknown values are discarded.
pub fn load_wallet_type(store: &dyn SessionStore, key: &str) -> Option<WalletType> {
    let raw = store.get(key)?;
    match raw.parse() {
        Ok(wallet) => Some(wallet),
        Err(e) => {
            log::warn!("Ignoring stored wallet type: {}", e);
            None
        }
    }
}

pub fn save_wallet_type(store: &dyn SessionStore, key: &str, wallet: WalletType) {
    store.set(key, wallet.as_str());
}

/// In-memory store, shared between clones.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_type_roundtrips_through_store() {
        let store = MemoryStore::new();
        assert_eq!(load_wallet_type(&store, WALLET_TYPE_KEY), None);

        save_wallet_type(&store, WALLET_TYPE_KEY, WalletType::TronLink);
        assert_eq!(store.get(WALLET_TYPE_KEY).as_deref(), Some("tronlink"));
        assert_eq!(
            load_wallet_type(&store, WALLET_TYPE_KEY),
            Some(WalletType::TronLink)
        );

        store.remove(WALLET_TYPE_KEY);
        assert!(store.is_empty());
    }

    #[test]
    fn garbage_value_is_ignored() {
        let store = MemoryStore::new();
        store.set(WALLET_TYPE_KEY, "coinbase");
        assert_eq!(load_wallet_type(&store, WALLET_TYPE_KEY), None);
    }
}
