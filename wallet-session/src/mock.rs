//! Scriptable in-memory provider.

use crate::config::DEFAULT_SOLANA_RPC;
use crate::error::ProviderError;
use crate::network::NetworkId;
use crate::provider::{EventSink, ProviderEvent, Subscription, WalletProvider};
use crate::wallet::WalletType;
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

struct MockState {
    available: bool,
    selected_account: Option<String>,
    accounts: Result<Vec<String>, ProviderError>,
    balance: Result<u128, ProviderError>,
    network: Result<NetworkId, ProviderError>,
    transfer: Result<String, ProviderError>,
    supports_transfer: bool,
    listeners: Vec<(u64, EventSink)>,
    next_listener_id: u64,
    request_calls: usize,
    disconnect_calls: usize,
    transfers: Vec<(String, String, u128)>,
}

/// A provider whose responses are set by the test. Clones share state, so a
/// test can keep one handle while the session owns another.
#[derive(Clone)]
pub struct MockProvider {
    wallet: WalletType,
    state: Rc<RefCell<MockState>>,
}

impl MockProvider {
    /// An installed, unlocked extension with one account and no balance.
    pub fn new(wallet: WalletType) -> Self {
        let (account, network) = match wallet {
            WalletType::MetaMask => (
                "0x9858effd232b4033e47d90003d41ec34ecaeda94",
                NetworkId::EvmChain("0x1".to_string()),
            ),
            WalletType::TronLink => (
                "TJCnKsPa7y5okkXvQAidZBzqx3QyQ6sxMW",
                NetworkId::TronNode("https://api.trongrid.io".to_string()),
            ),
            WalletType::SolanaPhantom => (
                "83astBRguLMdt2h5U1Tpdq5tjFoJ6noeGwaY3mDLVcri",
                NetworkId::SolanaCluster(DEFAULT_SOLANA_RPC.to_string()),
            ),
        };
        Self {
            wallet,
            state: Rc::new(RefCell::new(MockState {
                available: true,
                selected_account: None,
                accounts: Ok(vec![account.to_string()]),
                balance: Ok(0),
                network: Ok(network),
                transfer: Ok("0xfeed".to_string()),
                supports_transfer: wallet == WalletType::MetaMask,
                listeners: Vec::new(),
                next_listener_id: 0,
                request_calls: 0,
                disconnect_calls: 0,
                transfers: Vec::new(),
            })),
        }
    }

    pub fn into_rc(self) -> Rc<dyn WalletProvider> {
        Rc::new(self)
    }

    pub fn set_available(&self, available: bool) {
        self.state.borrow_mut().available = available;
    }

    pub fn set_selected_account(&self, account: Option<&str>) {
        self.state.borrow_mut().selected_account = account.map(str::to_string);
    }

    pub fn set_accounts(&self, accounts: &[&str]) {
        self.state.borrow_mut().accounts = Ok(accounts.iter().map(|a| a.to_string()).collect());
    }

    pub fn fail_accounts(&self, err: ProviderError) {
        self.state.borrow_mut().accounts = Err(err);
    }

    pub fn set_balance(&self, balance: u128) {
        self.state.borrow_mut().balance = Ok(balance);
    }

    pub fn fail_balance(&self, err: ProviderError) {
        self.state.borrow_mut().balance = Err(err);
    }

    pub fn set_network(&self, network: NetworkId) {
        self.state.borrow_mut().network = Ok(network);
    }

    pub fn fail_network(&self, err: ProviderError) {
        self.state.borrow_mut().network = Err(err);
    }

    pub fn set_transfer_result(&self, result: Result<String, ProviderError>) {
        self.state.borrow_mut().transfer = result;
    }

    /// Deliver an event to every registered listener.
    pub fn emit(&self, event: ProviderEvent) {
        let sinks: Vec<EventSink> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(_, sink)| sink.clone())
            .collect();
        for sink in sinks {
            sink(event.clone());
        }
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn request_calls(&self) -> usize {
        self.state.borrow().request_calls
    }

    pub fn disconnect_calls(&self) -> usize {
        self.state.borrow().disconnect_calls
    }

    /// Transfers handed to the provider as `(from, to, amount)`.
    pub fn transfers(&self) -> Vec<(String, String, u128)> {
        self.state.borrow().transfers.clone()
    }
}

#[async_trait(?Send)]
impl WalletProvider for MockProvider {
    fn wallet_type(&self) -> WalletType {
        self.wallet
    }

    fn is_available(&self) -> bool {
        self.state.borrow().available
    }

    fn selected_account(&self) -> Option<String> {
        self.state.borrow().selected_account.clone()
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let mut state = self.state.borrow_mut();
        state.request_calls += 1;
        state.accounts.clone()
    }

    async fn get_balance(&self, _address: &str) -> Result<u128, ProviderError> {
        self.state.borrow().balance.clone()
    }

    async fn network(&self) -> Result<NetworkId, ProviderError> {
        self.state.borrow().network.clone()
    }

    fn subscribe(&self, sink: EventSink) -> Subscription {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.push((id, sink));
            id
        };
        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state
                    .borrow_mut()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        self.state.borrow_mut().disconnect_calls += 1;
        Ok(())
    }

    async fn send_transfer(
        &self,
        from: &str,
        to: &str,
        amount: u128,
    ) -> Result<String, ProviderError> {
        let mut state = self.state.borrow_mut();
        state
            .transfers
            .push((from.to_string(), to.to_string(), amount));
        state.transfer.clone()
    }

    fn supports_transfer(&self) -> bool {
        self.state.borrow().supports_transfer
    }
}
