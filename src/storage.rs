use crate::app_dirs::AppDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Ephemeral key under which the landing screen leaves its environment
/// snapshot for the game screen.
pub const CONFIG_KEY: &str = "config";
/// Durable key for the single best-scoring player record.
pub const SCORE_KEY: &str = "highScore";
/// Durable key for the cumulative played/won/best-game record.
pub const TOTALS_KEY: &str = "totals";

/// Which of the two stores a value lives in.
///
/// `Ephemeral` survives the current process only; `Durable` survives
/// across visits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifetime {
    Ephemeral,
    Durable,
}

/// Raw text storage; serialization happens in [`Storage`] so backends stay
/// object-safe.
pub trait KvBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, text: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn write(&self, key: &str, text: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), text)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// Process-lifetime map; doubles as the deterministic test backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, text: &str) -> io::Result<()> {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), text.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        if let Ok(mut map) = self.map.lock() {
            map.remove(key);
        }
        Ok(())
    }
}

/// Typed facade over the two stores.
pub struct Storage {
    ephemeral: Box<dyn KvBackend>,
    durable: Box<dyn KvBackend>,
}

impl Storage {
    pub fn new(ephemeral: Box<dyn KvBackend>, durable: Box<dyn KvBackend>) -> Self {
        Self { ephemeral, durable }
    }

    /// Durable snapshots on disk, ephemeral values in memory.
    pub fn open_default() -> Self {
        let dir = AppDirs::store_dir().unwrap_or_else(|| PathBuf::from("penjat_store"));
        Self::new(
            Box::new(MemoryBackend::new()),
            Box::new(FileBackend::new(dir)),
        )
    }

    /// Both stores in memory; what the tests use.
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(MemoryBackend::new()),
            Box::new(MemoryBackend::new()),
        )
    }

    fn backend(&self, lifetime: Lifetime) -> &dyn KvBackend {
        match lifetime {
            Lifetime::Ephemeral => self.ephemeral.as_ref(),
            Lifetime::Durable => self.durable.as_ref(),
        }
    }

    pub fn put<T: Serialize>(&self, lifetime: Lifetime, key: &str, value: &T) -> io::Result<()> {
        let text = serde_json::to_string(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.backend(lifetime).write(key, &text)
    }

    /// Read a stored value, treating anything malformed as absent.
    ///
    /// Stored text is only parsed when it starts with an object or array
    /// opener; everything else (including text that then fails to parse)
    /// comes back as `None` rather than an error.
    pub fn get<T: DeserializeOwned>(&self, lifetime: Lifetime, key: &str) -> Option<T> {
        let raw = self.backend(lifetime).read(key)?;
        let first = raw.trim_start().chars().next()?;
        if first != '{' && first != '[' {
            return None;
        }
        serde_json::from_str(&raw).ok()
    }

    pub fn remove(&self, lifetime: Lifetime, key: &str) -> io::Result<()> {
        self.backend(lifetime).remove(key)
    }
}
