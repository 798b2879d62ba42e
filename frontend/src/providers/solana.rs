//! Phantom via `window.solana`.
//!
//! Balances come from `window.solana.connection` when Phantom exposes one,
//! otherwise from a JSON-RPC `getBalance` call against the configured
//! endpoint.

use crate::js;
use async_trait::async_trait;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use serde_json::json;
use wallet_session::{
    EventSink, NetworkId, ProviderError, ProviderEvent, Subscription, WalletProvider, WalletType,
};
use wasm_bindgen::JsValue;

#[derive(Debug, Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u32,
    method: &'static str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<BalanceResult>,
    error: Option<RpcError>,
}

/// `getBalance` wraps the lamports in a context envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BalanceResult {
    WithContext { value: u64 },
    Bare(u64),
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

fn balance_request(address: &str) -> RpcRequest {
    RpcRequest {
        jsonrpc: "2.0",
        id: 1,
        method: "getBalance",
        params: json!([address]),
    }
}

/// Lamports from a `getBalance` response body.
pub(crate) fn parse_balance_response(body: &str) -> Result<u128, ProviderError> {
    let response: RpcResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::new(format!("Invalid RPC response: {}", e)))?;
    if let Some(error) = response.error {
        return Err(ProviderError::with_code(error.code, error.message));
    }
    match response.result {
        Some(BalanceResult::WithContext { value }) | Some(BalanceResult::Bare(value)) => {
            Ok(value as u128)
        }
        None => Err(ProviderError::new("RPC response has no result")),
    }
}

/// Phantom's `connection.getBalance` takes a `PublicKey`, which we can only
/// get for the account Phantom currently exposes. Any other address goes
/// through JSON-RPC.
fn queries_wallet_connection(current_key: Option<&str>, address: &str) -> bool {
    current_key == Some(address)
}

pub struct PhantomProvider {
    rpc_endpoint: String,
}

impl PhantomProvider {
    pub fn new(rpc_endpoint: impl Into<String>) -> Self {
        Self {
            rpc_endpoint: rpc_endpoint.into(),
        }
    }

    fn solana(&self) -> Result<JsValue, ProviderError> {
        js::global("solana").ok_or_else(|| ProviderError::new("window.solana is not available"))
    }

    fn endpoint(&self) -> String {
        js::global("solana")
            .and_then(|solana| js::get_path(&solana, &["connection", "rpcEndpoint"]))
            .and_then(|endpoint| endpoint.as_string())
            .unwrap_or_else(|| self.rpc_endpoint.clone())
    }

    async fn rpc_balance(&self, address: &str) -> Result<u128, ProviderError> {
        let response = Request::post(&self.rpc_endpoint)
            .json(&balance_request(address))
            .map_err(|e| ProviderError::new(e.to_string()))?
            .send()
            .await
            .map_err(|e| ProviderError::new(e.to_string()))?;
        if !response.ok() {
            return Err(ProviderError::new(format!(
                "RPC endpoint returned HTTP {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::new(e.to_string()))?;
        parse_balance_response(&body)
    }

    fn public_key(solana: &JsValue) -> Option<String> {
        js::get(solana, "publicKey").and_then(|key| js::display_string(&key))
    }
}

impl std::fmt::Debug for PhantomProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhantomProvider")
            .field("rpc_endpoint", &self.rpc_endpoint)
            .finish()
    }
}

#[async_trait(?Send)]
impl WalletProvider for PhantomProvider {
    fn wallet_type(&self) -> WalletType {
        WalletType::SolanaPhantom
    }

    fn is_available(&self) -> bool {
        js::injected(WalletType::SolanaPhantom).is_some()
    }

    fn selected_account(&self) -> Option<String> {
        let solana = js::global("solana")?;
        if !js::is_truthy(&solana, "isConnected") {
            return None;
        }
        Self::public_key(&solana)
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        let solana = self.solana()?;
        let response = js::call(&solana, "connect", &[]).await?;
        let key = js::get(&response, "publicKey")
            .and_then(|key| js::display_string(&key))
            .or_else(|| Self::public_key(&solana));
        Ok(key.into_iter().collect())
    }

    async fn get_balance(&self, address: &str) -> Result<u128, ProviderError> {
        let solana = self.solana()?;
        let connection = js::get(&solana, "connection");
        let key = js::get(&solana, "publicKey");
        let current = key.as_ref().and_then(js::display_string);
        let (Some(connection), Some(key)) = (connection, key) else {
            return self.rpc_balance(address).await;
        };
        if !queries_wallet_connection(current.as_deref(), address) {
            return self.rpc_balance(address).await;
        }
        let lamports = js::call(&connection, "getBalance", &[key]).await?;
        lamports
            .as_f64()
            .filter(|lamports| lamports.is_finite() && *lamports >= 0.0)
            .map(|lamports| lamports as u128)
            .ok_or_else(|| ProviderError::new("Malformed SOL balance"))
    }

    async fn network(&self) -> Result<NetworkId, ProviderError> {
        Ok(NetworkId::SolanaCluster(self.endpoint()))
    }

    fn subscribe(&self, sink: EventSink) -> Subscription {
        let Some(solana) = js::global("solana") else {
            return Subscription::empty();
        };

        let account_sink = sink.clone();
        let account = js::listen(&solana, "accountChanged", move |key| {
            // Phantom passes null when the user revokes access.
            let accounts = js::display_string(&key).into_iter().collect();
            account_sink(ProviderEvent::AccountsChanged(accounts));
        });

        let disconnect = js::listen(&solana, "disconnect", move |_| {
            sink(ProviderEvent::Disconnected);
        });

        Subscription::merge(vec![account, disconnect])
    }

    async fn disconnect(&self) -> Result<(), ProviderError> {
        let solana = self.solana()?;
        js::call(&solana, "disconnect", &[]).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_request_body() {
        let body = serde_json::to_value(balance_request("83astBRguLMdt2h5U1Tpdq5tjFoJ6noeGwaY3mDLVcri")).unwrap();
        assert_eq!(
            body,
            json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "getBalance",
                "params": ["83astBRguLMdt2h5U1Tpdq5tjFoJ6noeGwaY3mDLVcri"],
            })
        );
    }

    #[test]
    fn balance_with_context() {
        let body = r#"{"jsonrpc":"2.0","result":{"context":{"slot":1},"value":1500000000},"id":1}"#;
        assert_eq!(parse_balance_response(body).unwrap(), 1_500_000_000);
    }

    #[test]
    fn bare_balance() {
        let body = r#"{"jsonrpc":"2.0","result":42,"id":1}"#;
        assert_eq!(parse_balance_response(body).unwrap(), 42);
    }

    #[test]
    fn rpc_error_keeps_code() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid param: WrongSize"},"id":1}"#;
        let err = parse_balance_response(body).unwrap_err();
        assert_eq!(err.code, Some(-32602));
        assert_eq!(err.message, "Invalid param: WrongSize");
    }

    #[test]
    fn balance_source_follows_requested_address() {
        let current = "83astBRguLMdt2h5U1Tpdq5tjFoJ6noeGwaY3mDLVcri";
        assert!(queries_wallet_connection(Some(current), current));
        assert!(!queries_wallet_connection(
            Some(current),
            "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM"
        ));
        assert!(!queries_wallet_connection(None, current));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(parse_balance_response("<html>").is_err());
        assert!(parse_balance_response(r#"{"jsonrpc":"2.0","id":1}"#).is_err());
    }
}
