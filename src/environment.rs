/// Coarse browser identity derived from a user-agent string.
///
/// Purely informational; feeds the cosmetic theming and the landing-screen
/// info table, never game logic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Other,
}

impl BrowserKind {
    /// Ordered substring checks; user-agent strings are not mutually
    /// exclusive, so Edge is checked before Chrome and Chrome before
    /// Safari.
    pub fn identify(user_agent: &str) -> Self {
        if user_agent.contains("Edg/") {
            BrowserKind::Edge
        } else if user_agent.contains("Chrome/") && !user_agent.contains("Chromium") {
            BrowserKind::Chrome
        } else if user_agent.contains("Firefox/") {
            BrowserKind::Firefox
        } else if user_agent.contains("Safari/") && !user_agent.contains("Chrome/") {
            BrowserKind::Safari
        } else {
            BrowserKind::Other
        }
    }

    /// Theming token stored in the session snapshot.
    pub fn bg_class(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome-bg",
            BrowserKind::Firefox => "firefox-bg",
            BrowserKind::Safari => "safari-bg",
            BrowserKind::Edge => "edge-bg",
            BrowserKind::Other => "other-bg",
        }
    }
}

/// Current-location fields split out of a URL string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlInfo {
    pub href: String,
    pub origin: String,
    pub host: String,
    pub hostname: String,
    pub port: String,
    pub protocol: String,
}

impl UrlInfo {
    pub fn parse(href: &str) -> Self {
        let (protocol, rest) = match href.find("//") {
            Some(idx) => (href[..idx].to_string(), &href[idx + 2..]),
            None => (String::new(), href),
        };
        let host = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .to_string();
        let (hostname, port) = match host.rfind(':') {
            Some(idx) => (host[..idx].to_string(), host[idx + 1..].to_string()),
            None => (host.clone(), String::new()),
        };
        let origin = if protocol.is_empty() {
            host.clone()
        } else {
            format!("{}//{}", protocol, host)
        };

        Self {
            href: href.to_string(),
            origin,
            host,
            hostname,
            port,
            protocol,
        }
    }
}

/// Injected environment snapshot source.
///
/// Values come from CLI flags first, then the `PENJAT_UA` / `LANG`
/// environment variables, then a `file://<cwd>` fallback for the URL.
/// Nothing is sniffed from a live browser, which keeps every consumer
/// deterministic under test.
#[derive(Debug, Clone)]
pub struct EnvProbe {
    pub user_agent: String,
    pub language: String,
    pub url: UrlInfo,
}

impl EnvProbe {
    pub fn detect(
        user_agent: Option<String>,
        url: Option<String>,
        language: Option<String>,
    ) -> Self {
        let user_agent =
            user_agent.unwrap_or_else(|| std::env::var("PENJAT_UA").unwrap_or_default());
        let language = language.unwrap_or_else(|| std::env::var("LANG").unwrap_or_default());
        let href = url.unwrap_or_else(|| {
            let cwd = std::env::current_dir().unwrap_or_default();
            format!("file://{}", cwd.display())
        });

        Self {
            user_agent,
            language,
            url: UrlInfo::parse(&href),
        }
    }

    pub fn browser(&self) -> BrowserKind {
        BrowserKind::identify(&self.user_agent)
    }
}
