//! Session state rendered by the view layer.

use crate::error::LastError;
use crate::network::{explorer_url, NetworkId};
use crate::wallet::{shorten_address, WalletType};

/// Everything known about the connected account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletInfo {
    pub wallet_type: WalletType,
    pub address: String,
    /// e.g. `1.5000 ETH`; `None` when the last balance query failed
    pub balance_display: Option<String>,
    pub network: NetworkId,
    pub network_label: String,
}

impl WalletInfo {
    pub fn short_address(&self) -> String {
        shorten_address(&self.address)
    }

    pub fn explorer_url(&self) -> String {
        explorer_url(self.wallet_type, &self.network, &self.address)
    }
}

/// Coarse lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    Disconnected,
    Connecting,
    Connected,
    /// Disconnected with an error waiting to be shown
    Error,
}

/// Connection state. Address and wallet type are only reachable through the
/// connected [`WalletInfo`], so "connected" and "has an address" can't
/// disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    connection: Option<WalletInfo>,
    pub is_loading: bool,
    pub last_error: Option<LastError>,
}

impl SessionState {
    pub fn connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn wallet_info(&self) -> Option<&WalletInfo> {
        self.connection.as_ref()
    }

    pub fn wallet_type(&self) -> Option<WalletType> {
        self.connection.as_ref().map(|c| c.wallet_type)
    }

    pub fn address(&self) -> Option<&str> {
        self.connection.as_ref().map(|c| c.address.as_str())
    }

    pub fn balance_display(&self) -> Option<&str> {
        self.connection
            .as_ref()
            .and_then(|c| c.balance_display.as_deref())
    }

    pub fn network_label(&self) -> Option<&str> {
        self.connection.as_ref().map(|c| c.network_label.as_str())
    }

    pub fn phase(&self) -> ConnectionPhase {
        match (&self.connection, self.is_loading, &self.last_error) {
            (_, true, _) => ConnectionPhase::Connecting,
            (Some(_), false, _) => ConnectionPhase::Connected,
            (None, false, Some(_)) => ConnectionPhase::Error,
            (None, false, None) => ConnectionPhase::Disconnected,
        }
    }

    pub(crate) fn set_connected(&mut self, info: WalletInfo) {
        self.connection = Some(info);
        self.last_error = None;
    }

    pub(crate) fn connection_mut(&mut self) -> Option<&mut WalletInfo> {
        self.connection.as_mut()
    }

    pub(crate) fn reset(&mut self) {
        *self = SessionState::default();
    }
}
