use crate::storage::WALLET_TYPE_KEY;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOLANA_RPC: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Storage key for the last connected wallet type
    pub storage_key: String,
    /// Fractional digits shown for balances
    pub display_decimals: u32,
    /// Reconnect silently on page load
    pub auto_reconnect: bool,
    /// JSON-RPC endpoint for Solana balances when Phantom exposes no connection
    pub solana_rpc_endpoint: String,
    /// How often the view re-checks which extensions are installed
    pub availability_poll_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: WALLET_TYPE_KEY.to_string(),
            display_decimals: 4,
            auto_reconnect: true,
            solana_rpc_endpoint: DEFAULT_SOLANA_RPC.to_string(),
            availability_poll_ms: 3000,
        }
    }
}

impl SessionConfig {
    /// Parse a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            SessionConfig::from_json(r#"{"display_decimals": 2, "auto_reconnect": false}"#)
                .unwrap();
        assert_eq!(config.display_decimals, 2);
        assert!(!config.auto_reconnect);
        assert_eq!(config.storage_key, "walletType");
        assert_eq!(config.solana_rpc_endpoint, DEFAULT_SOLANA_RPC);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SessionConfig::from_json(r#"{"display_decimals": "four"}"#).is_err());
    }
}
