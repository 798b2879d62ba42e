//! Wallet-extension session management.
//!
//! This crate holds everything about connecting a browser wallet that does
//! not touch the DOM: the provider interface, the session lifecycle, unit
//! conversion, network labels and the persisted wallet type. The `frontend`
//! crate supplies browser implementations of [`WalletProvider`] and
//! [`SessionStore`].

pub mod compat;
pub mod config;
pub mod error;
pub mod network;
pub mod provider;
pub mod session;
pub mod state;
pub mod storage;
pub mod units;
pub mod wallet;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use compat::{classify_browser, Browser, Compatibility, Os};
pub use config::SessionConfig;
pub use error::{ErrorKind, LastError, ProviderError, WalletError, USER_REJECTED_CODE};
pub use network::{evm_chain_label, explorer_url, NetworkId};
pub use provider::{EventSink, ProviderEvent, ProviderRegistry, Subscription, WalletProvider};
pub use session::{EventOutcome, SessionEvent, StateObserver, WalletSession};
pub use state::{ConnectionPhase, SessionState, WalletInfo};
pub use storage::{MemoryStore, SessionStore, WALLET_TYPE_KEY};
pub use units::{format_units, parse_hex_quantity, parse_units, to_hex_quantity};
pub use wallet::{shorten_address, WalletType};
