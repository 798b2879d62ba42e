//! The wallet session: connection state plus the connect, disconnect and
//! event-handling procedures that mutate it.
//!
//! A [`WalletSession`] is a cheap handle around shared state. Operations are
//! `async` and take `&self`; no borrow is held across a provider call, so a
//! provider event can be handled while a `connect` is still in flight.

use crate::config::SessionConfig;
use crate::error::WalletError;
use crate::provider::{EventSink, ProviderEvent, ProviderRegistry, Subscription, WalletProvider};
use crate::state::{SessionState, WalletInfo};
use crate::storage::{load_wallet_type, save_wallet_type, SessionStore};
use crate::units::{format_units, parse_units};
use crate::wallet::WalletType;
use futures_channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Called with a snapshot after every state change.
pub type StateObserver = Rc<dyn Fn(&SessionState)>;

/// A provider event tagged with the wallet that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub wallet: WalletType,
    pub event: ProviderEvent,
}

/// What [`WalletSession::handle_event`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Address and balance were refreshed in place
    Refreshed,
    /// The session went back to Disconnected
    Reset,
    /// The network changed; the page must be reloaded
    ReloadRequired,
    Ignored,
}

struct Inner {
    state: SessionState,
    subscription: Option<Subscription>,
    observer: Option<StateObserver>,
    events: Option<UnboundedReceiver<SessionEvent>>,
    /// Connects, restores and transfers still awaiting a provider
    in_flight: usize,
}

#[derive(Clone)]
pub struct WalletSession {
    providers: ProviderRegistry,
    store: Rc<dyn SessionStore>,
    config: Rc<SessionConfig>,
    events_tx: UnboundedSender<SessionEvent>,
    inner: Rc<RefCell<Inner>>,
}

impl WalletSession {
    pub fn new(
        providers: ProviderRegistry,
        store: Rc<dyn SessionStore>,
        config: SessionConfig,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded();
        Self {
            providers,
            store,
            config: Rc::new(config),
            events_tx,
            inner: Rc::new(RefCell::new(Inner {
                state: SessionState::default(),
                subscription: None,
                observer: None,
                events: Some(events_rx),
                in_flight: 0,
            })),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.borrow().state.clone()
    }

    pub fn set_observer(&self, observer: StateObserver) {
        self.inner.borrow_mut().observer = Some(observer);
    }

    /// The queue provider listeners write into. Can be taken once; the
    /// owner feeds each item to [`handle_event`](Self::handle_event).
    pub fn take_events(&self) -> Option<UnboundedReceiver<SessionEvent>> {
        self.inner.borrow_mut().events.take()
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        let (snapshot, observer) = {
            let mut inner = self.inner.borrow_mut();
            f(&mut inner.state);
            (inner.state.clone(), inner.observer.clone())
        };
        if let Some(observer) = observer {
            observer(&snapshot);
        }
    }

    fn replace_subscription(&self, subscription: Option<Subscription>) {
        let previous = std::mem::replace(&mut self.inner.borrow_mut().subscription, subscription);
        // Unregister outside the borrow; providers may call back synchronously.
        drop(previous);
    }

    /// Mark an operation as started; `is_loading` stays set until every
    /// started operation has ended.
    fn begin_operation(&self, clear_error: bool) {
        self.inner.borrow_mut().in_flight += 1;
        self.update(|state| {
            state.is_loading = true;
            if clear_error {
                state.last_error = None;
            }
        });
    }

    /// Returns whether other operations are still running.
    fn end_operation(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.in_flight = inner.in_flight.saturating_sub(1);
        inner.in_flight > 0
    }

    fn is_busy(&self) -> bool {
        self.inner.borrow().in_flight > 0
    }

    fn event_sink(&self, wallet: WalletType) -> EventSink {
        let tx = self.events_tx.clone();
        Rc::new(move |event| {
            if tx.unbounded_send(SessionEvent { wallet, event }).is_err() {
                log::debug!("Dropping {} event after teardown", wallet);
            }
        })
    }

    fn format_balance(&self, wallet: WalletType, raw: u128) -> String {
        format!(
            "{} {}",
            format_units(raw, wallet.decimals(), self.config.display_decimals),
            wallet.symbol()
        )
    }

    /// Whether the extension for `wallet` is installed in this page.
    pub fn check_availability(&self, wallet: WalletType) -> bool {
        self.providers
            .get(wallet)
            .map(|provider| provider.is_available())
            .unwrap_or(false)
    }

    pub fn availability(&self) -> Vec<(WalletType, bool)> {
        WalletType::all()
            .iter()
            .map(|wallet| (*wallet, self.check_availability(*wallet)))
            .collect()
    }

    /// Connect to `wallet`. On failure the previous state is kept and
    /// `last_error` describes what went wrong.
    pub async fn connect(&self, wallet: WalletType) -> bool {
        log::info!("Connecting to {}", wallet);
        self.begin_operation(true);

        match self.establish(wallet).await {
            Ok((info, provider)) => {
                self.finish_connect(info, provider.as_ref());
                true
            }
            Err(err) => {
                log::warn!("Failed to connect to {}: {}", wallet, err);
                self.fail(err);
                false
            }
        }
    }

    /// Connect by wallet name as it appears in storage or the view.
    pub async fn connect_named(&self, name: &str) -> bool {
        match name.parse::<WalletType>() {
            Ok(wallet) => self.connect(wallet).await,
            Err(err) => {
                log::warn!("{}", err);
                self.update(|state| state.last_error = Some(err.to_last_error()));
                false
            }
        }
    }

    fn fail(&self, err: WalletError) {
        let busy = self.end_operation();
        self.update(|state| {
            state.is_loading = busy;
            state.last_error = Some(err.to_last_error());
        });
    }

    async fn establish(
        &self,
        wallet: WalletType,
    ) -> Result<(WalletInfo, Rc<dyn WalletProvider>), WalletError> {
        let provider = self
            .providers
            .get(wallet)
            .filter(|provider| provider.is_available())
            .ok_or(WalletError::NotFound(wallet))?;

        let accounts = provider
            .request_accounts()
            .await
            .map_err(|e| WalletError::from_connect(wallet, e))?;
        let address = accounts
            .into_iter()
            .next()
            .filter(|address| !address.is_empty())
            .ok_or(WalletError::NoAccounts(wallet))?;

        let balance = provider
            .get_balance(&address)
            .await
            .map_err(|e| WalletError::from_connect(wallet, e))?;
        let network = provider
            .network()
            .await
            .map_err(|e| WalletError::from_connect(wallet, e))?;

        let info = WalletInfo {
            wallet_type: wallet,
            address,
            balance_display: Some(self.format_balance(wallet, balance)),
            network_label: network.label(),
            network,
        };
        Ok((info, provider))
    }

    fn finish_connect(&self, info: WalletInfo, provider: &dyn WalletProvider) {
        let wallet = info.wallet_type;
        // Drop listeners from any earlier connection before registering new ones.
        self.replace_subscription(None);
        let subscription = provider.subscribe(self.event_sink(wallet));
        self.replace_subscription(Some(subscription));

        log::info!(
            "Connected to {} as {} on {}",
            wallet,
            info.address,
            info.network_label
        );
        let busy = self.end_operation();
        self.update(|state| {
            state.set_connected(info);
            state.is_loading = busy;
        });
        save_wallet_type(self.store.as_ref(), &self.config.storage_key, wallet);
    }

    /// Drop listeners, reset, then disconnect natively where supported.
    /// A no-op when not connected.
    ///
    /// State and storage are cleared before the native call; a connect that
    /// completes while it is pending is kept.
    pub async fn disconnect(&self) {
        let wallet = self.inner.borrow().state.wallet_type();
        let Some(wallet) = wallet else {
            log::debug!("Disconnect requested while not connected");
            return;
        };
        self.replace_subscription(None);
        let busy = self.is_busy();
        self.update(|state| {
            state.reset();
            state.is_loading = busy;
        });
        self.store.remove(&self.config.storage_key);

        if wallet.has_native_disconnect() {
            if let Some(provider) = self.providers.get(wallet) {
                if let Err(e) = provider.disconnect().await {
                    log::warn!("Error disconnecting {}: {}", wallet, e);
                }
            }
        }
        log::info!("Disconnected from {}", wallet);
    }

    /// Reconnect without a user gesture if a provider already exposes an
    /// account or storage remembers a wallet. Failures are only logged.
    pub async fn restore(&self) -> bool {
        if !self.config.auto_reconnect {
            return false;
        }
        let candidate = self
            .providers
            .iter()
            .find(|provider| provider.is_available() && provider.selected_account().is_some())
            .map(|provider| provider.wallet_type())
            .or_else(|| load_wallet_type(self.store.as_ref(), &self.config.storage_key));
        let Some(wallet) = candidate else {
            return false;
        };

        log::info!("Restoring {} session", wallet);
        self.begin_operation(false);
        match self.establish(wallet).await {
            Ok((info, provider)) => {
                self.finish_connect(info, provider.as_ref());
                true
            }
            Err(err) => {
                log::debug!("Silent reconnect to {} failed: {}", wallet, err);
                let busy = self.end_operation();
                self.update(|state| state.is_loading = busy);
                false
            }
        }
    }

    /// Apply an event from the connected provider.
    pub async fn handle_event(&self, event: SessionEvent) -> EventOutcome {
        let Some(info) = self.inner.borrow().state.wallet_info().cloned() else {
            log::debug!("Ignoring {:?} while disconnected", event.event);
            return EventOutcome::Ignored;
        };
        if info.wallet_type != event.wallet {
            log::debug!(
                "Ignoring {:?} from {} while connected to {}",
                event.event,
                event.wallet,
                info.wallet_type
            );
            return EventOutcome::Ignored;
        }

        match event.event {
            ProviderEvent::AccountsChanged(accounts) => match accounts.into_iter().next() {
                None => {
                    log::info!("{} revoked account access", info.wallet_type);
                    self.disconnect().await;
                    EventOutcome::Reset
                }
                Some(address) if address == info.address => EventOutcome::Ignored,
                Some(address) => {
                    self.switch_account(info.wallet_type, address).await;
                    EventOutcome::Refreshed
                }
            },
            ProviderEvent::ChainChanged(chain) => {
                log::info!("{} switched network to {}", info.wallet_type, chain);
                EventOutcome::ReloadRequired
            }
            ProviderEvent::Disconnected => {
                self.disconnect().await;
                EventOutcome::Reset
            }
        }
    }

    async fn switch_account(&self, wallet: WalletType, address: String) {
        log::info!("{} switched account to {}", wallet, address);
        self.update(|state| {
            if let Some(connection) = state.connection_mut() {
                connection.address = address.clone();
                connection.balance_display = None;
            }
        });
        if let Err(e) = self.refresh_balance().await {
            log::warn!("Failed to refresh balance for {}: {}", address, e);
        }
    }

    /// Re-query the connected account's balance.
    pub async fn refresh_balance(&self) -> Result<String, WalletError> {
        let info = self
            .inner
            .borrow()
            .state
            .wallet_info()
            .cloned()
            .ok_or(WalletError::NotConnected)?;
        let provider = self
            .providers
            .get(info.wallet_type)
            .ok_or(WalletError::NotFound(info.wallet_type))?;

        let raw = provider
            .get_balance(&info.address)
            .await
            .map_err(|e| WalletError::from_connect(info.wallet_type, e))?;
        let display = self.format_balance(info.wallet_type, raw);

        self.update(|state| {
            if let Some(connection) = state.connection_mut() {
                // The account may have changed while the query was in flight.
                if connection.address == info.address {
                    connection.balance_display = Some(display.clone());
                }
            }
        });
        Ok(display)
    }

    /// Whether the connected extension accepts transfers from this page.
    pub fn can_transfer(&self) -> bool {
        self.inner
            .borrow()
            .state
            .wallet_type()
            .and_then(|wallet| self.providers.get(wallet))
            .map(|provider| provider.supports_transfer())
            .unwrap_or(false)
    }

    /// Hand a native transfer of `amount` (display units) to `to` to the
    /// connected extension. Returns the transaction id.
    pub async fn send_transfer(&self, to: &str, amount: &str) -> Result<String, WalletError> {
        self.begin_operation(true);

        match self.try_transfer(to, amount).await {
            Ok(tx) => {
                log::info!("Submitted transfer {}", tx);
                let busy = self.end_operation();
                self.update(|state| state.is_loading = busy);
                if let Err(e) = self.refresh_balance().await {
                    log::warn!("Failed to refresh balance after transfer: {}", e);
                }
                Ok(tx)
            }
            Err(err) => {
                log::warn!("Transfer failed: {}", err);
                self.fail(err.clone());
                Err(err)
            }
        }
    }

    async fn try_transfer(&self, to: &str, amount: &str) -> Result<String, WalletError> {
        let info = self
            .inner
            .borrow()
            .state
            .wallet_info()
            .cloned()
            .ok_or(WalletError::NotConnected)?;
        let wallet = info.wallet_type;
        let provider = self
            .providers
            .get(wallet)
            .ok_or(WalletError::NotFound(wallet))?;
        if !provider.supports_transfer() {
            return Err(WalletError::Unsupported {
                wallet,
                operation: "transfers",
            });
        }

        let to = to.trim();
        if to.is_empty() || to.chars().any(char::is_whitespace) {
            return Err(WalletError::InvalidRecipient(to.to_string()));
        }
        let value = parse_units(amount, wallet.decimals())?;
        if value == 0 {
            return Err(WalletError::InvalidAmount(amount.to_string()));
        }

        provider
            .send_transfer(&info.address, to, value)
            .await
            .map_err(|e| WalletError::from_transfer(wallet, e))
    }

    /// Release listeners and close the event queue. Used when the owning
    /// view unmounts.
    pub fn teardown(&self) {
        self.replace_subscription(None);
        self.events_tx.close_channel();
        self.inner.borrow_mut().observer = None;
    }
}

impl PartialEq for WalletSession {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("providers", &self.providers)
            .field("state", &self.inner.borrow().state)
            .finish()
    }
}
