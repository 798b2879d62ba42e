//! Custom Yew hooks for the frontend application.

mod use_wallet;

pub use use_wallet::{use_wallet, use_wallet_availability, use_wallet_session, WalletContext};
