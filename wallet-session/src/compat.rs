//! Browser and OS detection from `navigator.userAgent` / `navigator.platform`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Opera,
    Brave,
}

impl Browser {
    pub fn label(&self) -> &'static str {
        match self {
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
            Browser::Safari => "Safari",
            Browser::Edge => "Edge",
            Browser::Opera => "Opera",
            Browser::Brave => "Brave",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    MacOs,
    Linux,
    Android,
    Ios,
}

impl Os {
    pub fn label(&self) -> &'static str {
        match self {
            Os::Windows => "Windows",
            Os::MacOs => "macOS",
            Os::Linux => "Linux",
            Os::Android => "Android",
            Os::Ios => "iOS",
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, Os::Android | Os::Ios)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compatibility {
    pub compatible: bool,
    pub message: String,
    pub browser: Option<Browser>,
    pub os: Option<Os>,
    /// Wallet extensions may be unavailable on mobile
    pub mobile: bool,
}

fn detect_browser(ua: &str) -> Option<Browser> {
    if ua.contains("brave/") {
        Some(Browser::Brave)
    } else if ua.contains("opr/") {
        Some(Browser::Opera)
    } else if ua.contains("edg") {
        Some(Browser::Edge)
    } else if ua.contains("chrome") || ua.contains("chromium") || ua.contains("crios") {
        Some(Browser::Chrome)
    } else if ua.contains("firefox") || ua.contains("fxios") {
        Some(Browser::Firefox)
    } else if ua.contains("safari") {
        Some(Browser::Safari)
    } else {
        None
    }
}

fn detect_os(ua: &str, platform: &str) -> Option<Os> {
    // Mobile first: Android reports a Linux platform, iPadOS a Mac one.
    if ua.contains("android") {
        Some(Os::Android)
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        Some(Os::Ios)
    } else if platform.contains("win") {
        Some(Os::Windows)
    } else if platform.contains("mac") {
        Some(Os::MacOs)
    } else if platform.contains("linux") {
        Some(Os::Linux)
    } else {
        None
    }
}

/// Classify the current browser for wallet-extension support.
pub fn classify_browser(user_agent: &str, platform: &str) -> Compatibility {
    let ua = user_agent.to_ascii_lowercase();
    let platform = platform.to_ascii_lowercase();
    let browser = detect_browser(&ua);
    let os = detect_os(&ua, &platform);

    let Some(browser) = browser else {
        return Compatibility {
            compatible: false,
            message: "Unsupported browser detected. Please use Chrome, Firefox, Safari, Edge, Opera, or Brave.".to_string(),
            browser: None,
            os,
            mobile: false,
        };
    };
    let Some(os) = os else {
        return Compatibility {
            compatible: false,
            message: "Unsupported operating system detected. Please use Windows, macOS, Linux, Android, or iOS.".to_string(),
            browser: Some(browser),
            os: None,
            mobile: false,
        };
    };

    if os.is_mobile() {
        return Compatibility {
            compatible: true,
            message: "Mobile device detected. Some wallet features may be limited.".to_string(),
            browser: Some(browser),
            os: Some(os),
            mobile: true,
        };
    }

    Compatibility {
        compatible: true,
        message: format!(
            "{} on {} is compatible with all wallet features.",
            browser.label(),
            os.label()
        ),
        browser: Some(browser),
        os: Some(os),
        mobile: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_WIN: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    const FIREFOX_LINUX: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
    const EDGE_MAC: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.2210.91";
    const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1";

    #[test]
    fn desktop_browsers() {
        let compat = classify_browser(CHROME_WIN, "Win32");
        assert!(compat.compatible);
        assert_eq!(compat.browser, Some(Browser::Chrome));
        assert_eq!(compat.os, Some(Os::Windows));
        assert!(!compat.mobile);

        let compat = classify_browser(FIREFOX_LINUX, "Linux x86_64");
        assert_eq!(compat.browser, Some(Browser::Firefox));
        assert_eq!(compat.os, Some(Os::Linux));

        let compat = classify_browser(EDGE_MAC, "MacIntel");
        assert_eq!(compat.browser, Some(Browser::Edge));
        assert_eq!(compat.os, Some(Os::MacOs));
    }

    #[test]
    fn mobile_is_compatible_with_warning() {
        let compat = classify_browser(SAFARI_IPHONE, "iPhone");
        assert!(compat.compatible);
        assert!(compat.mobile);
        assert_eq!(compat.browser, Some(Browser::Safari));
        assert_eq!(compat.os, Some(Os::Ios));
        assert!(compat.message.contains("limited"));
    }

    #[test]
    fn unknown_browser_is_incompatible() {
        let compat = classify_browser("curl/8.4.0", "Linux x86_64");
        assert!(!compat.compatible);
        assert_eq!(compat.browser, None);
        assert!(compat.message.starts_with("Unsupported browser"));
    }

    #[test]
    fn unknown_os_is_incompatible() {
        let compat = classify_browser(FIREFOX_LINUX.replace("Linux", "Haiku").as_str(), "Haiku");
        assert!(!compat.compatible);
        assert_eq!(compat.os, None);
    }
}
