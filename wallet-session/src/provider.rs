//! Provider interface implemented once per chain family.
//!
//! Browser builds implement [`WalletProvider`] on top of the injected
//! `window.ethereum` / `window.tronWeb` / `window.solana` objects; tests use
//! [`crate::mock::MockProvider`].

use crate::error::ProviderError;
use crate::network::NetworkId;
use crate::wallet::WalletType;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Something that happened inside the extension after connecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    /// New account list; empty means the site lost access.
    AccountsChanged(Vec<String>),
    /// The extension switched network.
    ChainChanged(String),
    Disconnected,
}

/// Callback a provider invokes for each event.
pub type EventSink = Rc<dyn Fn(ProviderEvent)>;

/// Registered listeners. Dropping the subscription unregisters them.
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    /// A subscription with nothing to unregister.
    pub fn empty() -> Self {
        Self { unsubscribe: None }
    }

    /// Combine several subscriptions into one.
    pub fn merge(subscriptions: Vec<Subscription>) -> Self {
        Self::new(move || drop(subscriptions))
    }

    pub fn unsubscribe(mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.unsubscribe.take() {
            f();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// One wallet extension as seen by the session.
#[async_trait(?Send)]
pub trait WalletProvider {
    fn wallet_type(&self) -> WalletType;

    /// The injected object and its marker field are present.
    fn is_available(&self) -> bool;

    /// Account the extension already exposes without prompting, if any.
    fn selected_account(&self) -> Option<String>;

    /// Ask the user for account access.
    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError>;

    /// Native balance in the chain's smallest unit.
    async fn get_balance(&self, address: &str) -> Result<u128, ProviderError>;

    async fn network(&self) -> Result<NetworkId, ProviderError>;

    /// Register account/chain/disconnect listeners.
    fn subscribe(&self, sink: EventSink) -> Subscription;

    /// Native disconnect, for extensions that have one.
    async fn disconnect(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    /// Hand a native transfer to the extension for signing; returns the
    /// transaction id.
    async fn send_transfer(
        &self,
        _from: &str,
        _to: &str,
        _amount: u128,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::new("transfers are not supported"))
    }

    fn supports_transfer(&self) -> bool {
        false
    }
}

/// The providers a session may connect to, keyed by wallet type.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<WalletType, Rc<dyn WalletProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Rc<dyn WalletProvider>) {
        self.providers.insert(provider.wallet_type(), provider);
    }

    pub fn with(mut self, provider: Rc<dyn WalletProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, wallet: WalletType) -> Option<Rc<dyn WalletProvider>> {
        self.providers.get(&wallet).cloned()
    }

    /// Registered providers in [`WalletType::all`] order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<dyn WalletProvider>> {
        WalletType::all()
            .iter()
            .filter_map(move |wallet| self.providers.get(wallet))
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|p| p.wallet_type()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscription_unregisters_on_drop() {
        let removed = Rc::new(Cell::new(0));
        {
            let removed = removed.clone();
            let _sub = Subscription::new(move || removed.set(removed.get() + 1));
        }
        assert_eq!(removed.get(), 1);
    }

    #[test]
    fn explicit_unsubscribe_runs_once() {
        let removed = Rc::new(Cell::new(0));
        let sub = {
            let removed = removed.clone();
            Subscription::new(move || removed.set(removed.get() + 1))
        };
        sub.unsubscribe();
        assert_eq!(removed.get(), 1);
    }

    #[test]
    fn merged_subscriptions_drop_together() {
        let removed = Rc::new(Cell::new(0));
        let subs = (0..3)
            .map(|_| {
                let removed = removed.clone();
                Subscription::new(move || removed.set(removed.get() + 1))
            })
            .collect();
        let merged = Subscription::merge(subs);
        assert_eq!(removed.get(), 0);
        drop(merged);
        assert_eq!(removed.get(), 3);
    }
}
