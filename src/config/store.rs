use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::file::{load_config_file, ConfigFormat};
use super::flatten::flatten;
use super::source::override_files;
use super::ConfigError;
use crate::Value;

/// Directory searched when none is given, relative to the working directory.
pub const DEFAULT_DIRECTORY: &str = "config/autoload";

/// Lazily populated cache of dotted configuration keys.
///
/// Values come from layered override files in a single directory. Looking
/// up `db.pool.size` loads, in order, `db.global`, `db.local`,
/// `db.pool.global`, `db.pool.local`, `db.pool.size.global` and
/// `db.pool.size.local`. Later files override earlier ones, so `local` beats
/// `global` and deeper prefixes beat shallower ones.
///
/// ## Example
///
/// ```no_run
/// use layer_fnd::ConfigStore;
///
/// let mut config = ConfigStore::new().with_directory("config/autoload");
///
/// // Reads config/autoload/db.global.toml, then db.local.toml, ...
/// let host = config.get_str("db.host")?.unwrap_or("localhost").to_string();
///
/// // In-memory only, never written back.
/// config.set("db.host", "127.0.0.1");
/// # Ok::<(), layer_fnd::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct ConfigStore {
    directory: PathBuf,
    format: ConfigFormat,
    cache: HashMap<String, Value>,
    /// Override files already merged by `get`; each is read at most once.
    loaded: HashSet<PathBuf>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Creates an empty store reading TOML files from [`DEFAULT_DIRECTORY`].
    pub fn new() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            format: ConfigFormat::default(),
            cache: HashMap::new(),
            loaded: HashSet::new(),
        }
    }

    #[must_use]
    pub fn with_directory(mut self, directory: impl AsRef<Path>) -> Self {
        self.init(directory);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ConfigFormat) -> Self {
        self.format = format;
        self
    }

    /// Points the store at another configuration directory.
    ///
    /// Values already cached are kept.
    pub fn init(&mut self, directory: impl AsRef<Path>) {
        self.directory = directory.as_ref().to_path_buf();
    }

    /// Points the store back at [`DEFAULT_DIRECTORY`].
    pub fn init_default(&mut self) {
        self.init(DEFAULT_DIRECTORY);
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    /// Forgets every cached value and every file read so far.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.loaded.clear();
    }

    /// Resolves a dotted key, loading override files on a cache miss.
    ///
    /// `Ok(None)` means the key is unset. Missing files are skipped; files
    /// that exist but cannot be read or parsed are reported as errors.
    pub fn get(&mut self, key: &str) -> Result<Option<&Value>, ConfigError> {
        if self.cache.contains_key(key) {
            trace!(key, "config cache hit");
            return Ok(self.cache.get(key));
        }

        for file in override_files(&self.directory, key, self.format) {
            if self.loaded.contains(&file.path) {
                continue;
            }
            self.load_file(&file.path, &file.prefix)?;
            self.loaded.insert(file.path);
        }

        Ok(self.cache.get(key))
    }

    pub fn get_str(&mut self, key: &str) -> Result<Option<&str>, ConfigError> {
        Ok(self.get(key)?.and_then(Value::as_str))
    }

    pub fn get_i64(&mut self, key: &str) -> Result<Option<i64>, ConfigError> {
        Ok(self.get(key)?.and_then(Value::as_i64))
    }

    pub fn get_bool(&mut self, key: &str) -> Result<Option<bool>, ConfigError> {
        Ok(self.get(key)?.and_then(Value::as_bool))
    }

    /// Returns a cached value without touching the filesystem.
    pub fn cached(&self, key: &str) -> Option<&Value> {
        self.cache.get(key)
    }

    /// Stores a value for the lifetime of this store, replacing any cached one.
    pub fn set(&mut self, key: impl KeyPath, value: impl Into<Value>) {
        self.cache.insert(key.into_key(), value.into());
    }

    /// Merges an override file into the cache under `key_prefix`.
    ///
    /// A missing file is a no-op. The format follows the file's extension,
    /// falling back to the store's format.
    pub fn load_file(&mut self, path: impl AsRef<Path>, key_prefix: &str) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).unwrap_or(self.format);

        match load_config_file(path, format)? {
            Some(value) => {
                self.set_array(&value, key_prefix)?;
                debug!(path = %path.display(), prefix = key_prefix, "merged config file");
            }
            None => trace!(path = %path.display(), "config file not present"),
        }
        Ok(())
    }

    /// Stores every scalar leaf of `input` under `key_prefix` plus its dotted path.
    ///
    /// Later leaves overwrite earlier ones with the same key.
    pub fn set_array(&mut self, input: &Value, key_prefix: &str) -> Result<(), ConfigError> {
        if input.is_scalar() {
            return Err(ConfigError::NotAMapping(
                key_prefix.trim_end_matches('.').to_string(),
            ));
        }

        for (key, value) in flatten(input, key_prefix) {
            self.set(key, value);
        }
        Ok(())
    }
}

/// A configuration key: either already dotted or a list of segments.
pub trait KeyPath {
    fn into_key(self) -> String;
}

impl KeyPath for &str {
    fn into_key(self) -> String {
        self.to_string()
    }
}

impl KeyPath for String {
    fn into_key(self) -> String {
        self
    }
}

impl KeyPath for &String {
    fn into_key(self) -> String {
        self.clone()
    }
}

impl<S: AsRef<str>> KeyPath for &[S] {
    fn into_key(self) -> String {
        self.iter().map(|s| s.as_ref()).collect::<Vec<&str>>().join(".")
    }
}

impl<S: AsRef<str>, const N: usize> KeyPath for [S; N] {
    fn into_key(self) -> String {
        self.as_slice().into_key()
    }
}

impl<S: AsRef<str>> KeyPath for Vec<S> {
    fn into_key(self) -> String {
        self.as_slice().into_key()
    }
}
