//! Hooks that own the page's [`WalletSession`] and expose it to components.

use crate::config::load_config;
use crate::providers::browser_registry;
use crate::storage::LocalStore;
use crate::utils;
use futures_util::StreamExt;
use std::rc::Rc;
use wallet_session::{EventOutcome, SessionState, WalletSession, WalletType};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// What components get from [`use_wallet`].
#[derive(Clone, PartialEq)]
pub struct WalletContext {
    pub session: WalletSession,
    /// Latest snapshot; a new value re-renders consumers
    pub state: SessionState,
}

impl WalletContext {
    pub fn connect(&self, wallet: WalletType) {
        let session = self.session.clone();
        spawn_local(async move {
            session.connect(wallet).await;
        });
    }

    pub fn disconnect(&self) {
        let session = self.session.clone();
        spawn_local(async move {
            session.disconnect().await;
        });
    }

    pub fn refresh_balance(&self) {
        let session = self.session.clone();
        spawn_local(async move {
            if let Err(e) = session.refresh_balance().await {
                log::warn!("Balance refresh failed: {}", e);
            }
        });
    }
}

/// Create the session for this page, mirror its state into Yew, pump
/// provider events and attempt a silent reconnect. The session is torn down
/// when the calling component unmounts.
#[hook]
pub fn use_wallet_session() -> WalletContext {
    let session = use_memo((), |_| {
        let config = load_config();
        WalletSession::new(browser_registry(&config), Rc::new(LocalStore), config)
    });
    let state = use_state(SessionState::default);

    {
        let session = (*session).clone();
        let setter = state.setter();
        use_effect_with((), move |_| {
            session.set_observer(Rc::new(move |snapshot: &SessionState| {
                setter.set(snapshot.clone())
            }));

            if let Some(mut events) = session.take_events() {
                let session = session.clone();
                spawn_local(async move {
                    while let Some(event) = events.next().await {
                        if session.handle_event(event).await == EventOutcome::ReloadRequired {
                            utils::reload_page();
                        }
                    }
                    log::debug!("Wallet event queue closed");
                });
            }

            {
                let session = session.clone();
                spawn_local(async move {
                    session.restore().await;
                });
            }

            move || session.teardown()
        });
    }

    WalletContext {
        session: (*session).clone(),
        state: (*state).clone(),
    }
}

/// Access the wallet context provided by `WalletContextProvider`.
#[hook]
pub fn use_wallet() -> WalletContext {
    use_context::<WalletContext>().expect("use_wallet must be called inside WalletContextProvider")
}

/// Which extensions are installed, re-checked every `availability_poll_ms`
/// since extensions may inject after the page loads.
#[hook]
pub fn use_wallet_availability(session: &WalletSession) -> Vec<(WalletType, bool)> {
    let availability = use_state_eq(|| session.availability());

    {
        let session = session.clone();
        let availability = availability.clone();
        use_effect_with((), move |_| {
            let poll_ms = session.config().availability_poll_ms;
            let interval = gloo::timers::callback::Interval::new(poll_ms, move || {
                availability.set(session.availability());
            });
            move || drop(interval)
        });
    }

    (*availability).clone()
}
