//! MetaMask via the injected EIP-1193 `window.ethereum`.

use crate::js;
use async_trait::async_trait;
use wallet_session::{
    parse_hex_quantity, to_hex_quantity, EventSink, NetworkId, ProviderError, ProviderEvent,
    Subscription, WalletProvider, WalletType,
};
use wasm_bindgen::JsValue;

#[derive(Debug, Default)]
pub struct MetaMaskProvider;

impl MetaMaskProvider {
    fn ethereum(&self) -> Result<JsValue, ProviderError> {
        js::global("ethereum").ok_or_else(|| ProviderError::new("window.ethereum is not available"))
    }

    async fn request_string(&self, method: &str, params: &[JsValue]) -> Result<String, ProviderError> {
        let ethereum = self.ethereum()?;
        js::request(&ethereum, method, params)
            .await?
            .as_string()
            .ok_or_else(|| ProviderError::new(format!("{} returned a non-string result", method)))
    }
}

#[async_trait(?Send)]
impl WalletProvider for MetaMaskProvider {
    fn wallet_type(&self) -> WalletType {
        WalletType::MetaMask
    }

    fn is_available(&self) -> bool {
        js::injected(WalletType::MetaMask).is_some()
    }

    fn selected_account(&self) -> Option<String> {
        js::global("ethereum").and_then(|ethereum| js::get_string(&ethereum, "selectedAddress"))
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let ethereum = self.ethereum()?;
        let accounts = js::request(&ethereum, "eth_requestAccounts", &[]).await?;
        Ok(js::string_array(&accounts))
    }

    async fn get_balance(&self, address: &str) -> Result<u128, ProviderError> {
        let hex = self
            .request_string(
                "eth_getBalance",
                &[JsValue::from_str(address), JsValue::from_str("latest")],
            )
            .await?;
        parse_hex_quantity(&hex)
            .ok_or_else(|| ProviderError::new(format!("Malformed balance: {}", hex)))
    }

    async fn network(&self) -> Result<NetworkId, ProviderError> {
        let chain_id = self.request_string("eth_chainId", &[]).await?;
        Ok(NetworkId::EvmChain(chain_id))
    }

    fn subscribe(&self, sink: EventSink) -> Subscription {
        let Some(ethereum) = js::global("ethereum") else {
            return Subscription::empty();
        };

        let accounts_sink = sink.clone();
        let accounts = js::listen(&ethereum, "accountsChanged", move |value| {
            accounts_sink(ProviderEvent::AccountsChanged(js::string_array(&value)));
        });

        let chain_sink = sink.clone();
        let chain = js::listen(&ethereum, "chainChanged", move |value| {
            let chain_id = value.as_string().unwrap_or_default();
            chain_sink(ProviderEvent::ChainChanged(chain_id));
        });

        let disconnect = js::listen(&ethereum, "disconnect", move |_| {
            sink(ProviderEvent::Disconnected);
        });

        Subscription::merge(vec![accounts, chain, disconnect])
    }

    fn supports_transfer(&self) -> bool {
        true
    }

    async fn send_transfer(&self, from: &str, to: &str, amount: u128) -> Result<String, ProviderError> {
        let tx = js::object(&[
            ("from", JsValue::from_str(from)),
            ("to", JsValue::from_str(to)),
            ("value", JsValue::from_str(&to_hex_quantity(amount))),
        ]);
        self.request_string("eth_sendTransaction", &[tx.into()]).await
    }
}
