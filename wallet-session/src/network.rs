//! Network identification and block-explorer links.

use crate::wallet::WalletType;

/// What a provider reports about the network it is pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkId {
    /// EVM chain id as returned by `eth_chainId` (hex string)
    EvmChain(String),
    /// TRON full-node host
    TronNode(String),
    /// Solana RPC endpoint
    SolanaCluster(String),
}

const EVM_CHAINS: &[(&str, &str)] = &[
    ("0x1", "Ethereum Mainnet"),
    ("0x3", "Ropsten Testnet"),
    ("0x4", "Rinkeby Testnet"),
    ("0x5", "Goerli Testnet"),
    ("0x2a", "Kovan Testnet"),
    ("0xaa36a7", "Sepolia Testnet"),
    ("0x89", "Polygon Mainnet"),
    ("0xa86a", "Avalanche Mainnet"),
];

impl NetworkId {
    /// Human-readable network name.
    pub fn label(&self) -> String {
        match self {
            NetworkId::EvmChain(chain_id) => evm_chain_label(chain_id),
            NetworkId::TronNode(host) => {
                let host = host.to_ascii_lowercase();
                if host.contains("shasta") {
                    "Shasta Testnet".to_string()
                } else if host.contains("nile") {
                    "Nile Testnet".to_string()
                } else {
                    "TRON Mainnet".to_string()
                }
            }
            NetworkId::SolanaCluster(endpoint) => match solana_cluster(endpoint) {
                Some("devnet") => "Solana Devnet".to_string(),
                Some("testnet") => "Solana Testnet".to_string(),
                _ => "Solana Mainnet".to_string(),
            },
        }
    }
}

/// Map a hex chain id to its name, or `Chain ID: <id>` when unknown.
pub fn evm_chain_label(chain_id: &str) -> String {
    let normalized = chain_id.trim().to_ascii_lowercase();
    EVM_CHAINS
        .iter()
        .find(|(id, _)| *id == normalized)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Chain ID: {}", chain_id.trim()))
}

fn solana_cluster(endpoint: &str) -> Option<&'static str> {
    let endpoint = endpoint.to_ascii_lowercase();
    if endpoint.contains("devnet") {
        Some("devnet")
    } else if endpoint.contains("testnet") {
        Some("testnet")
    } else {
        None
    }
}

/// Block-explorer page for an address on the given network.
pub fn explorer_url(wallet: WalletType, network: &NetworkId, address: &str) -> String {
    match wallet {
        WalletType::MetaMask => {
            let label = network.label();
            if label.contains("Polygon") {
                format!("https://polygonscan.com/address/{}", address)
            } else if label.contains("Avalanche") {
                format!("https://snowtrace.io/address/{}", address)
            } else {
                format!("https://etherscan.io/address/{}", address)
            }
        }
        WalletType::TronLink => format!("https://tronscan.org/#/address/{}", address),
        WalletType::SolanaPhantom => {
            let cluster = match network {
                NetworkId::SolanaCluster(endpoint) => solana_cluster(endpoint),
                _ => None,
            };
            match cluster {
                Some(cluster) => format!(
                    "https://explorer.solana.com/address/{}?cluster={}",
                    address, cluster
                ),
                None => format!("https://explorer.solana.com/address/{}", address),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_chain_ids() {
        assert_eq!(evm_chain_label("0x1"), "Ethereum Mainnet");
        assert_eq!(evm_chain_label("0x89"), "Polygon Mainnet");
        assert_eq!(evm_chain_label("0xA86A"), "Avalanche Mainnet");
    }

    #[test]
    fn unknown_chain_id_falls_back_to_literal() {
        let label = evm_chain_label("0x7a69");
        assert_eq!(label, "Chain ID: 0x7a69");
        assert!(label.contains("0x7a69"));
    }

    #[test]
    fn tron_hosts() {
        let label = |host: &str| NetworkId::TronNode(host.to_string()).label();
        assert_eq!(label("https://api.shasta.trongrid.io"), "Shasta Testnet");
        assert_eq!(label("https://nile.trongrid.io"), "Nile Testnet");
        assert_eq!(label("https://api.trongrid.io"), "TRON Mainnet");
    }

    #[test]
    fn solana_endpoints() {
        let label = |url: &str| NetworkId::SolanaCluster(url.to_string()).label();
        assert_eq!(label("https://api.devnet.solana.com"), "Solana Devnet");
        assert_eq!(label("https://api.testnet.solana.com"), "Solana Testnet");
        assert_eq!(label("https://api.mainnet-beta.solana.com"), "Solana Mainnet");
    }

    #[test]
    fn explorer_links() {
        let addr = "0xabc";
        assert_eq!(
            explorer_url(WalletType::MetaMask, &NetworkId::EvmChain("0x1".into()), addr),
            "https://etherscan.io/address/0xabc"
        );
        assert_eq!(
            explorer_url(WalletType::MetaMask, &NetworkId::EvmChain("0x89".into()), addr),
            "https://polygonscan.com/address/0xabc"
        );
        assert_eq!(
            explorer_url(
                WalletType::TronLink,
                &NetworkId::TronNode("https://api.trongrid.io".into()),
                "TXyz"
            ),
            "https://tronscan.org/#/address/TXyz"
        );
        assert_eq!(
            explorer_url(
                WalletType::SolanaPhantom,
                &NetworkId::SolanaCluster("https://api.devnet.solana.com".into()),
                "So1"
            ),
            "https://explorer.solana.com/address/So1?cluster=devnet"
        );
    }
}
