//! TronLink via `window.tronWeb` / `window.tronLink`.
//!
//! TronLink does not expose an `on()` API; it posts `message` events to the
//! window instead, e.g.
//! `{"isTronLink":true,"message":{"action":"setAccount","data":{"address":"T..."}}}`.

use crate::js;
use async_trait::async_trait;
use gloo::events::EventListener;
use serde::Deserialize;
use wallet_session::{
    EventSink, NetworkId, ProviderError, ProviderEvent, Subscription, WalletProvider, WalletType,
    USER_REJECTED_CODE,
};
use wasm_bindgen::{JsCast, JsValue};

/// Status TronLink returns from `tron_requestAccounts` on success.
const TRONLINK_OK: i64 = 200;

#[derive(Debug, Deserialize)]
struct TronLinkEnvelope {
    message: Option<TronLinkMessage>,
}

#[derive(Debug, Deserialize)]
struct TronLinkMessage {
    action: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Translate a posted TronLink message (as JSON) into a provider event.
pub(crate) fn tron_event(json: &str) -> Option<ProviderEvent> {
    let envelope: TronLinkEnvelope = serde_json::from_str(json).ok()?;
    let message = envelope.message?;
    match message.action.as_str() {
        "accountsChanged" | "setAccount" => {
            let accounts = message
                .data
                .get("address")
                .and_then(|address| address.as_str())
                .filter(|address| !address.is_empty())
                .map(|address| vec![address.to_string()])
                .unwrap_or_default();
            Some(ProviderEvent::AccountsChanged(accounts))
        }
        "setNode" => {
            let host = message
                .data
                .pointer("/node/fullNode")
                .and_then(|node| node.as_str())
                .unwrap_or_default();
            Some(ProviderEvent::ChainChanged(host.to_string()))
        }
        "disconnect" | "disconnectWeb" => Some(ProviderEvent::Disconnected),
        _ => None,
    }
}

#[derive(Debug, Default)]
pub struct TronLinkProvider;

impl TronLinkProvider {
    fn tron_web(&self) -> Result<JsValue, ProviderError> {
        js::global("tronWeb").ok_or_else(|| ProviderError::new("window.tronWeb is not available"))
    }

    fn default_address(&self) -> Option<String> {
        let tron_web = js::global("tronWeb")?;
        let default_address = js::get(&tron_web, "defaultAddress")?;
        js::get_string(&default_address, "base58")
    }

    async fn ask_for_access(&self) -> Result<(), ProviderError> {
        let Some(tron_link) = js::global("tronLink") else {
            // Older TronLink builds only inject tronWeb and unlock by themselves.
            return Ok(());
        };
        let response = js::request(&tron_link, "tron_requestAccounts", &[]).await?;
        let code = js::get(&response, "code")
            .and_then(|code| code.as_f64())
            .map(|code| code as i64);
        match code {
            None | Some(TRONLINK_OK) => Ok(()),
            Some(USER_REJECTED_CODE) => Err(ProviderError::rejected()),
            Some(code) => {
                let message = js::get_string(&response, "message")
                    .unwrap_or_else(|| format!("TronLink returned code {}", code));
                Err(ProviderError::with_code(code, message))
            }
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for TronLinkProvider {
    fn wallet_type(&self) -> WalletType {
        WalletType::TronLink
    }

    fn is_available(&self) -> bool {
        js::injected(WalletType::TronLink).is_some()
    }

    fn selected_account(&self) -> Option<String> {
        self.default_address()
    }

    async fn request_accounts(&self) -> Result<Vec<String>, ProviderError> {
        if self.default_address().is_none() {
            self.ask_for_access().await?;
        }
        Ok(self.default_address().into_iter().collect())
    }

    async fn get_balance(&self, address: &str) -> Result<u128, ProviderError> {
        let tron_web = self.tron_web()?;
        let trx = js::get(&tron_web, "trx")
            .ok_or_else(|| ProviderError::new("tronWeb.trx is not available"))?;
        let balance = js::call(&trx, "getBalance", &[JsValue::from_str(address)]).await?;
        balance
            .as_f64()
            .filter(|sun| sun.is_finite() && *sun >= 0.0)
            .map(|sun| sun as u128)
            .ok_or_else(|| ProviderError::new("Malformed TRX balance"))
    }

    async fn network(&self) -> Result<NetworkId, ProviderError> {
        let tron_web = self.tron_web()?;
        let host = js::get_path(&tron_web, &["fullNode", "host"])
            .and_then(|host| host.as_string())
            .unwrap_or_default();
        Ok(NetworkId::TronNode(host))
    }

    fn subscribe(&self, sink: EventSink) -> Subscription {
        let Some(window) = web_sys::window() else {
            return Subscription::empty();
        };
        let listener = EventListener::new(&window, "message", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::MessageEvent>() else {
                return;
            };
            let data = event.data();
            if !js::is_truthy(&data, "isTronLink") {
                return;
            }
            let Some(json) = js_sys::JSON::stringify(&data)
                .ok()
                .and_then(|json| json.as_string())
            else {
                return;
            };
            if let Some(event) = tron_event(&json) {
                sink(event);
            }
        });
        Subscription::new(move || drop(listener))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_messages() {
        let event = tron_event(
            r#"{"isTronLink":true,"message":{"action":"setAccount","data":{"address":"TJCnKsPa7y5okkXvQAidZBzqx3QyQ6sxMW"}}}"#,
        );
        assert_eq!(
            event,
            Some(ProviderEvent::AccountsChanged(vec![
                "TJCnKsPa7y5okkXvQAidZBzqx3QyQ6sxMW".to_string()
            ]))
        );

        // Locking the wallet reports `address: false`
        let event = tron_event(
            r#"{"isTronLink":true,"message":{"action":"accountsChanged","data":{"address":false}}}"#,
        );
        assert_eq!(event, Some(ProviderEvent::AccountsChanged(vec![])));
    }

    #[test]
    fn node_and_disconnect_messages() {
        let event = tron_event(
            r#"{"message":{"action":"setNode","data":{"node":{"fullNode":"https://api.shasta.trongrid.io"}}}}"#,
        );
        assert_eq!(
            event,
            Some(ProviderEvent::ChainChanged(
                "https://api.shasta.trongrid.io".to_string()
            ))
        );

        let event = tron_event(r#"{"message":{"action":"disconnectWeb"}}"#);
        assert_eq!(event, Some(ProviderEvent::Disconnected));
    }

    #[test]
    fn unrelated_messages_are_ignored() {
        assert_eq!(tron_event(r#"{"message":{"action":"tabReply"}}"#), None);
        assert_eq!(tron_event(r#"{"type":"webpackOk"}"#), None);
        assert_eq!(tron_event("not json"), None);
    }
}
