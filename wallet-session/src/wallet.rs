//! Supported wallet extensions and their per-chain constants.

use crate::error::WalletError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The wallet extensions a session can connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletType {
    #[serde(rename = "metamask")]
    MetaMask,
    #[serde(rename = "tronlink")]
    TronLink,
    #[serde(rename = "solana")]
    SolanaPhantom,
}

impl WalletType {
    pub fn all() -> &'static [WalletType] {
        &[
            WalletType::MetaMask,
            WalletType::TronLink,
            WalletType::SolanaPhantom,
        ]
    }

    /// Canonical string form, also used as the persisted value.
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletType::MetaMask => "metamask",
            WalletType::TronLink => "tronlink",
            WalletType::SolanaPhantom => "solana",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WalletType::MetaMask => "MetaMask",
            WalletType::TronLink => "TronLink",
            WalletType::SolanaPhantom => "Phantom (Solana)",
        }
    }

    /// Native token symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            WalletType::MetaMask => "ETH",
            WalletType::TronLink => "TRX",
            WalletType::SolanaPhantom => "SOL",
        }
    }

    /// Number of decimals between the smallest unit (wei/sun/lamport) and
    /// the display unit.
    pub fn decimals(&self) -> u32 {
        match self {
            WalletType::MetaMask => 18,
            WalletType::TronLink => 6,
            WalletType::SolanaPhantom => 9,
        }
    }

    /// Prefix used for provider-specific error codes, e.g. `METAMASK`.
    pub fn error_prefix(&self) -> &'static str {
        match self {
            WalletType::MetaMask => "METAMASK",
            WalletType::TronLink => "TRONLINK",
            WalletType::SolanaPhantom => "SOLANA",
        }
    }

    /// `window` property the extension injects.
    pub fn injected_global(&self) -> &'static str {
        match self {
            WalletType::MetaMask => "ethereum",
            WalletType::TronLink => "tronWeb",
            WalletType::SolanaPhantom => "solana",
        }
    }

    /// Boolean field that identifies the extension among other wallets
    /// injecting the same global. TronLink has none.
    pub fn marker_flag(&self) -> Option<&'static str> {
        match self {
            WalletType::MetaMask => Some("isMetaMask"),
            WalletType::TronLink => None,
            WalletType::SolanaPhantom => Some("isPhantom"),
        }
    }

    /// Whether an injected object is this extension. `flag` reports whether
    /// a field of the object is truthy.
    pub fn recognizes(&self, flag: impl Fn(&str) -> bool) -> bool {
        self.marker_flag().map_or(true, flag)
    }

    /// Whether the extension has a real disconnect call. MetaMask and
    /// TronLink keep the site authorized after a client-side disconnect.
    pub fn has_native_disconnect(&self) -> bool {
        matches!(self, WalletType::SolanaPhantom)
    }

    /// Extension store page for installing the wallet.
    pub fn install_url(&self, firefox: bool) -> &'static str {
        match (self, firefox) {
            (WalletType::MetaMask, true) => {
                "https://addons.mozilla.org/en-US/firefox/addon/ether-metamask/"
            }
            (WalletType::MetaMask, false) => {
                "https://chrome.google.com/webstore/detail/metamask/nkbihfbeogaeaoehlefnkodbefgpgknn"
            }
            (WalletType::TronLink, true) => {
                "https://addons.mozilla.org/en-US/firefox/addon/tronlink/"
            }
            (WalletType::TronLink, false) => {
                "https://chrome.google.com/webstore/detail/tronlink/ibnejdfjmmkpcnlpebklmnkoeoihofec"
            }
            (WalletType::SolanaPhantom, true) => {
                "https://addons.mozilla.org/en-US/firefox/addon/phantom-app/"
            }
            (WalletType::SolanaPhantom, false) => {
                "https://chrome.google.com/webstore/detail/phantom/bfnaelmomeimhlpmgjnjophhpkkoljpa"
            }
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WalletType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metamask" => Ok(WalletType::MetaMask),
            "tronlink" | "tron" => Ok(WalletType::TronLink),
            "solana" | "phantom" => Ok(WalletType::SolanaPhantom),
            _ => Err(WalletError::InvalidWallet(s.to_string())),
        }
    }
}

/// Shorten an address for display (`0x1234...abcd`).
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let start: String = chars[..6].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", start, end)
}
