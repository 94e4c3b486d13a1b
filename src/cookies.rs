use crate::app_dirs::AppDirs;
use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Cookie carrying the player display name between screens and visits.
pub const PLAYER_COOKIE: &str = "player";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct CookieRecord {
    value: String,
    expires: Option<DateTime<Local>>,
}

impl CookieRecord {
    fn is_expired(&self, now: DateTime<Local>) -> bool {
        matches!(self.expires, Some(at) if at <= now)
    }
}

/// File-backed name/value jar with day-granularity TTLs.
///
/// Independent of the two storage lifetimes; a malformed jar file reads as
/// empty rather than failing.
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: PathBuf,
}

impl CookieJar {
    pub fn open_default() -> Self {
        let path = AppDirs::cookie_path().unwrap_or_else(|| PathBuf::from("penjat_cookies.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    fn load_map(&self) -> HashMap<String, CookieRecord> {
        if let Ok(raw) = fs::read_to_string(&self.path) {
            if let Ok(map) = serde_json::from_str(&raw) {
                return map;
            }
        }
        HashMap::new()
    }

    fn store_map(&self, map: &HashMap<String, CookieRecord>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(map)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, data)
    }

    pub fn set(&self, name: &str, value: &str, ttl_days: Option<i64>) -> io::Result<()> {
        let mut map = self.load_map();
        let expires = ttl_days.map(|days| Local::now() + Duration::days(days));
        map.insert(
            name.to_string(),
            CookieRecord {
                value: value.to_string(),
                expires,
            },
        );
        self.store_map(&map)
    }

    /// Expired or missing cookies read as absent; expired entries are
    /// dropped from the jar on the way out.
    pub fn get(&self, name: &str) -> Option<String> {
        let mut map = self.load_map();
        let now = Local::now();
        let expired = map.get(name).map(|r| r.is_expired(now))?;
        if expired {
            map.remove(name);
            let _ = self.store_map(&map);
            return None;
        }
        map.get(name).map(|r| r.value.clone())
    }

    pub fn delete(&self, name: &str) -> io::Result<()> {
        let mut map = self.load_map();
        if map.remove(name).is_some() {
            self.store_map(&map)?;
        }
        Ok(())
    }
}
