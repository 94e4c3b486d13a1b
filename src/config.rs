use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User-facing strings. The defaults keep the original Catalan texts; any
/// of them can be overridden from `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Messages {
    pub empty_word: String,
    pub short_word: String,
    pub digit_word: String,
    pub empty_player: String,
    pub confirm_leave: String,
    pub confirm_clear: String,
    pub no_high_score: String,
    pub reveal_prefix: String,
    pub won_banner: String,
    pub lost_banner: String,
    pub default_player: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty_word: "Has d'introduir una paraula.".to_string(),
            short_word: "La paraula ha de tenir almenys 4 lletres.".to_string(),
            digit_word: "La paraula no pot contenir números.".to_string(),
            empty_player: "Has d'informar el nom d'un jugador.".to_string(),
            confirm_leave: "Estàs segur que vols deixar la partida?".to_string(),
            confirm_clear: "Vols esborrar la puntuació màxima?".to_string(),
            no_high_score: "No hi ha puntuació actual.".to_string(),
            reveal_prefix: "Paraula: ".to_string(),
            won_banner: "Has guanyat!".to_string(),
            lost_banner: "Has perdut!".to_string(),
            default_player: "Jugador".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub cookie_ttl_days: i64,
    pub messages: Messages,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookie_ttl_days: 7,
            messages: Messages::default(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "penjat") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("penjat_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_messages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            cookie_ttl_days: 30,
            messages: Messages {
                empty_word: "You need to enter a word.".into(),
                won_banner: "You won!".into(),
                ..Messages::default()
            },
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nope.json"));
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"cookie_ttl_days": 1}"#).unwrap();
        let store = FileConfigStore::with_path(&path);
        let loaded = store.load();
        assert_eq!(loaded.cookie_ttl_days, 1);
        assert_eq!(loaded.messages, Messages::default());
    }
}
