//! Error types for wallet sessions

use crate::wallet::WalletType;
use std::fmt;

/// Error code providers use when the user dismisses a request (EIP-1193).
pub const USER_REJECTED_CODE: i64 = 4001;

/// A failure reported by an injected provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn rejected() -> Self {
        Self::with_code(USER_REJECTED_CODE, "User rejected the request")
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(USER_REJECTED_CODE)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} (code {})", self.message, code),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Errors surfaced by session operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WalletError {
    #[error("{0} is not installed. Please install the {0} extension first.")]
    NotFound(WalletType),

    #[error("User rejected the request")]
    UserRejected(WalletType),

    #[error("No accounts found. Please unlock your {0} wallet.")]
    NoAccounts(WalletType),

    #[error("{message}")]
    Connection { wallet: WalletType, message: String },

    #[error("Unsupported wallet type: {0:?}")]
    InvalidWallet(String),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid recipient address: {0:?}")]
    InvalidRecipient(String),

    #[error("{wallet} does not support {operation}")]
    Unsupported {
        wallet: WalletType,
        operation: &'static str,
    },

    #[error("{message}")]
    Transfer { wallet: WalletType, message: String },
}

impl WalletError {
    /// Map a provider failure during connection to the taxonomy.
    pub fn from_connect(wallet: WalletType, err: ProviderError) -> Self {
        if err.is_user_rejection() {
            WalletError::UserRejected(wallet)
        } else {
            WalletError::Connection {
                wallet,
                message: if err.message.is_empty() {
                    format!("Failed to connect to {}", wallet)
                } else {
                    err.message
                },
            }
        }
    }

    /// Map a provider failure during a transfer to the taxonomy.
    pub fn from_transfer(wallet: WalletType, err: ProviderError) -> Self {
        if err.is_user_rejection() {
            WalletError::UserRejected(wallet)
        } else {
            WalletError::Transfer {
                wallet,
                message: err.message,
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::NotFound(_) => ErrorKind::WalletNotFound,
            WalletError::UserRejected(_) => ErrorKind::UserRejected,
            WalletError::NoAccounts(_) => ErrorKind::NoAccounts,
            WalletError::Connection { wallet, .. } => ErrorKind::ConnectionError(*wallet),
            WalletError::InvalidWallet(_) => ErrorKind::InvalidWallet,
            WalletError::NotConnected => ErrorKind::NotConnected,
            WalletError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            WalletError::InvalidRecipient(_) => ErrorKind::InvalidRecipient,
            WalletError::Unsupported { .. } => ErrorKind::UnsupportedOperation,
            WalletError::Transfer { wallet, .. } => ErrorKind::TransferError(*wallet),
        }
    }

    pub fn to_last_error(&self) -> LastError {
        LastError {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

/// Error category shown to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    WalletNotFound,
    NoAccounts,
    UserRejected,
    ConnectionError(WalletType),
    InvalidWallet,
    NotConnected,
    InvalidAmount,
    InvalidRecipient,
    UnsupportedOperation,
    TransferError(WalletType),
}

impl ErrorKind {
    /// Stable upper-case code, e.g. `USER_REJECTED` or `METAMASK_CONNECTION_ERROR`.
    pub fn code(&self) -> String {
        match self {
            ErrorKind::WalletNotFound => "WALLET_NOT_FOUND".to_string(),
            ErrorKind::NoAccounts => "NO_ACCOUNTS".to_string(),
            ErrorKind::UserRejected => "USER_REJECTED".to_string(),
            ErrorKind::ConnectionError(wallet) => {
                format!("{}_CONNECTION_ERROR", wallet.error_prefix())
            }
            ErrorKind::InvalidWallet => "INVALID_WALLET".to_string(),
            ErrorKind::NotConnected => "NOT_CONNECTED".to_string(),
            ErrorKind::InvalidAmount => "INVALID_AMOUNT".to_string(),
            ErrorKind::InvalidRecipient => "INVALID_RECIPIENT".to_string(),
            ErrorKind::UnsupportedOperation => "UNSUPPORTED_OPERATION".to_string(),
            ErrorKind::TransferError(wallet) => {
                format!("{}_TRANSFER_ERROR", wallet.error_prefix())
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// The most recent failure, kept in session state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    pub kind: ErrorKind,
    pub message: String,
}
