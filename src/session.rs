use crate::environment::EnvProbe;
use crate::storage::{Lifetime, Storage, CONFIG_KEY};
use serde::{Deserialize, Serialize};

/// Environment snapshot written once when the landing screen submits and
/// read by the game screen for cosmetic theming. Field names keep the
/// stored wire shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnvSnapshot {
    pub lang: String,
    /// The derived browser label, not the raw agent string.
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    pub url: String,
    #[serde(rename = "bgColorClass")]
    pub bg_color_class: String,
}

impl EnvSnapshot {
    pub fn capture(probe: &EnvProbe) -> Self {
        let browser = probe.browser();
        Self {
            lang: probe.language.clone(),
            user_agent: browser.to_string(),
            url: probe.url.origin.clone(),
            bg_color_class: browser.bg_class().to_string(),
        }
    }

    pub fn save(&self, storage: &Storage) {
        let _ = storage.put(Lifetime::Ephemeral, CONFIG_KEY, self);
    }

    pub fn load(storage: &Storage) -> Option<Self> {
        storage.get(Lifetime::Ephemeral, CONFIG_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIREFOX_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

    fn probe() -> EnvProbe {
        EnvProbe::detect(
            Some(FIREFOX_UA.to_string()),
            Some("http://localhost:8080/index.html".to_string()),
            Some("ca-ES".to_string()),
        )
    }

    #[test]
    fn capture_stores_the_label_not_the_agent_string() {
        let snapshot = EnvSnapshot::capture(&probe());
        assert_eq!(snapshot.user_agent, "Firefox");
        assert_eq!(snapshot.bg_color_class, "firefox-bg");
        assert_eq!(snapshot.lang, "ca-ES");
        assert_eq!(snapshot.url, "http://localhost:8080");
    }

    #[test]
    fn snapshot_roundtrips_through_ephemeral_storage() {
        let storage = Storage::in_memory();
        let snapshot = EnvSnapshot::capture(&probe());
        snapshot.save(&storage);
        assert_eq!(EnvSnapshot::load(&storage), Some(snapshot));
    }

    #[test]
    fn wire_field_names_are_preserved() {
        let snapshot = EnvSnapshot::capture(&probe());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"userAgent\""));
        assert!(json.contains("\"bgColorClass\""));
    }
}
