//! Helpers for talking to injected provider objects through `js_sys::Reflect`.

use js_sys::{Array, Function, Object, Promise, Reflect};
use wallet_session::{ProviderError, Subscription, WalletType};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// `window[name]`, unless missing, `undefined` or `null`.
pub fn global(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    get(&window, name)
}

/// The object `wallet` injects into `window`, if present and carrying the
/// wallet's marker flag.
pub fn injected(wallet: WalletType) -> Option<JsValue> {
    let object = global(wallet.injected_global())?;
    wallet
        .recognizes(|flag| is_truthy(&object, flag))
        .then_some(object)
}

/// `target[key]`, unless missing, `undefined` or `null`.
pub fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

pub fn get_path(target: &JsValue, path: &[&str]) -> Option<JsValue> {
    path.iter()
        .try_fold(target.clone(), |value, key| get(&value, key))
}

/// Non-empty string at `target[key]`. Locked wallets often report `false`.
pub fn get_string(target: &JsValue, key: &str) -> Option<String> {
    get(target, key)
        .and_then(|value| value.as_string())
        .filter(|value| !value.is_empty())
}

pub fn is_truthy(target: &JsValue, key: &str) -> bool {
    get(target, key)
        .map(|value| value.is_truthy())
        .unwrap_or(false)
}

fn set(target: &Object, key: &str, value: &JsValue) {
    if Reflect::set(target, &JsValue::from_str(key), value).is_err() {
        log::warn!("Failed to set {} on request object", key);
    }
}

/// Build a plain object from string pairs.
pub fn object(entries: &[(&str, JsValue)]) -> Object {
    let object = Object::new();
    for (key, value) in entries {
        set(&object, key, value);
    }
    object
}

/// String form of a JS value, using its own `toString` for objects such as
/// Solana `PublicKey`.
pub fn display_string(value: &JsValue) -> Option<String> {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<Object>()
                .map(|object| String::from(object.to_string()))
        })
        .filter(|s| !s.is_empty())
}

/// Strings in a JS array; anything else yields an empty list.
pub fn string_array(value: &JsValue) -> Vec<String> {
    if !Array::is_array(value) {
        return Vec::new();
    }
    Array::from(value)
        .iter()
        .filter_map(|item| item.as_string())
        .collect()
}

/// Convert a thrown value or rejected promise into a [`ProviderError`].
pub fn provider_error(value: JsValue) -> ProviderError {
    let code = get(&value, "code")
        .and_then(|code| code.as_f64())
        .map(|code| code as i64);
    let message = get(&value, "message")
        .and_then(|message| message.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    ProviderError { code, message }
}

fn function(target: &JsValue, method: &str) -> Result<Function, ProviderError> {
    get(target, method)
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| ProviderError::new(format!("{} is not a function", method)))
}

/// Call `target[method](...args)` without awaiting the result.
pub fn call_sync(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, ProviderError> {
    let args: Array = args.iter().collect();
    function(target, method)?
        .apply(target, &args)
        .map_err(provider_error)
}

/// Call `target[method](...args)` and await the result if it is a promise.
pub async fn call(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, ProviderError> {
    let result = call_sync(target, method, args)?;
    JsFuture::from(Promise::resolve(&result))
        .await
        .map_err(provider_error)
}

/// EIP-1193 style `provider.request({ method, params })`.
pub async fn request(
    provider: &JsValue,
    method: &str,
    params: &[JsValue],
) -> Result<JsValue, ProviderError> {
    let mut entries = vec![("method", JsValue::from_str(method))];
    if !params.is_empty() {
        let params: Array = params.iter().collect();
        entries.push(("params", params.into()));
    }
    call(provider, "request", &[object(&entries).into()]).await
}

/// Register `handler` with `target.on(event, handler)`. Dropping the
/// returned subscription removes it again via `removeListener` or `off`.
pub fn listen(
    target: &JsValue,
    event: &str,
    handler: impl FnMut(JsValue) + 'static,
) -> Subscription {
    let closure = Closure::<dyn FnMut(JsValue)>::new(handler);
    let callback: JsValue = closure.as_ref().clone();
    if let Err(e) = call_sync(target, "on", &[JsValue::from_str(event), callback.clone()]) {
        log::warn!("Failed to register {} listener: {}", event, e);
        return Subscription::empty();
    }

    let target = target.clone();
    let event = event.to_string();
    Subscription::new(move || {
        let remover = ["removeListener", "off"]
            .into_iter()
            .find(|method| get(&target, method).is_some_and(|f| f.is_function()));
        match remover {
            Some(method) => {
                if let Err(e) = call_sync(&target, method, &[JsValue::from_str(&event), callback]) {
                    log::warn!("Failed to remove {} listener: {}", event, e);
                }
                drop(closure);
            }
            None => {
                // The provider keeps a reference we can't revoke.
                log::debug!("No way to remove {} listener", event);
                closure.forget();
            }
        }
    })
}
