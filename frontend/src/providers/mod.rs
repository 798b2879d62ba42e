//! Browser implementations of [`wallet_session::WalletProvider`].

mod ethereum;
mod solana;
mod tron;

pub use ethereum::MetaMaskProvider;
pub use solana::PhantomProvider;
pub use tron::TronLinkProvider;

use std::rc::Rc;
use wallet_session::{ProviderRegistry, SessionConfig};

/// Registry with one provider per supported extension.
pub fn browser_registry(config: &SessionConfig) -> ProviderRegistry {
    ProviderRegistry::new()
        .with(Rc::new(MetaMaskProvider))
        .with(Rc::new(TronLinkProvider))
        .with(Rc::new(PhantomProvider::new(config.solana_rpc_endpoint.clone())))
}
