use wallet_session::{classify_browser, Compatibility};
use web_sys::window;

/// Reload the page, e.g. after the wallet switched network.
pub fn reload_page() {
    let window = window().expect("no global window");
    if let Err(e) = window.location().reload() {
        log::error!("Failed to reload page: {:?}", e);
    }
}

/// Open `url` in a new tab (explorer and install links).
pub fn open_in_new_tab(url: &str) {
    let window = window().expect("no global window");
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        log::error!("Failed to open {}: {:?}", url, e);
    }
}

fn user_agent() -> String {
    window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default()
}

fn platform() -> String {
    window()
        .and_then(|w| w.navigator().platform().ok())
        .unwrap_or_default()
}

/// Install links differ for Firefox add-ons.
pub fn is_firefox() -> bool {
    user_agent().to_ascii_lowercase().contains("firefox")
}

pub fn browser_compatibility() -> Compatibility {
    classify_browser(&user_agent(), &platform())
}
