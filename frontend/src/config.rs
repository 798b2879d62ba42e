//! Page-level configuration from `window.__WALLET_CONFIG__`.

use crate::js;
use wallet_session::SessionConfig;

const CONFIG_GLOBAL: &str = "__WALLET_CONFIG__";

/// Load the session config, falling back to defaults when the page sets
/// none or sets something unreadable.
pub fn load_config() -> SessionConfig {
    let Some(value) = js::global(CONFIG_GLOBAL) else {
        log::info!("No {} found, using defaults", CONFIG_GLOBAL);
        return SessionConfig::default();
    };

    let json = match js_sys::JSON::stringify(&value) {
        Ok(json) => json.as_string().unwrap_or_default(),
        Err(_) => {
            log::warn!("{} is not serializable, using defaults", CONFIG_GLOBAL);
            return SessionConfig::default();
        }
    };

    match SessionConfig::from_json(&json) {
        Ok(config) => {
            log::info!("Loaded wallet config from {}", CONFIG_GLOBAL);
            config
        }
        Err(e) => {
            log::warn!("Invalid {}: {}, using defaults", CONFIG_GLOBAL, e);
            SessionConfig::default()
        }
    }
}
