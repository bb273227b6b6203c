//! Typed configuration store.
//!
//! This module provides [`ConfigStore`], the main entry point for loading,
//! reading, and mutating a keyed configuration file. The store owns one
//! [`Document`] plus an in-memory cache of validated values, keyed by a
//! closed [`ConfigKey`] shape.
//!
//! # Overview
//!
//! The store:
//!
//! - Reads the backing TOML file once at construction
//! - Validates every key of the shape against its declared kind on [`load`](ConfigStore::load)
//! - Falls back to the key's declared default (with a sink warning) on any
//!   invalid or missing value
//! - Serves all reads from the cache
//! - Writes mutations through to the document and synchronously persists it
//!
//! # Example
//!
//! ```rust,no_run
//! use keyed_config::{ConfigKeys, ConfigStore};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, ConfigKeys)]
//! enum AppKey {
//!     #[key(path = "general.prefix", kind = "string", default = "&7[app] ")]
//!     Prefix,
//!     #[key(path = "general.max-retries", kind = "int", default = 3)]
//!     MaxRetries,
//! }
//!
//! fn main() -> Result<(), keyed_config::Error> {
//!     let mut store = ConfigStore::<AppKey>::open("config.toml")?;
//!     store.load("general");
//!
//!     // Reads come from the cache and always yield a well-typed value.
//!     let prefix = store.get_string(AppKey::Prefix)?;
//!     println!("prefix: {prefix}");
//!
//!     // Writes update the cache and persist the whole document.
//!     store.set(AppKey::MaxRetries, 5i64)?;
//!     Ok(())
//! }
//! ```

use std::{
    collections::HashMap,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use toml::Value;

use crate::{
    document::Document,
    error::Error,
    key::{ConfigKey, KeyDescriptor},
    sink::{LogSink, TracingSink},
    transform::{self, MessageTransform},
    value::{ConfigValue, ValueKind},
};

/// A typed configuration store over one backing TOML file.
///
/// # Lifecycle
///
/// 1. **Open**: construct with [`open`](ConfigStore::open) or through
///    [`builder`](ConfigStore::builder) to inject a transform or log sink
/// 2. **Load**: validate and cache the shape with [`load`](ConfigStore::load)
/// 3. **Read**: [`get`](ConfigStore::get) and the typed getter family
/// 4. **Mutate**: [`set`](ConfigStore::set) writes through and persists
///
/// The store owns its file exclusively; pointing two stores at the same
/// file is not a supported mode.
///
/// # Example
///
/// ```rust,no_run
/// use keyed_config::{ConfigKeys, ConfigStore};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, ConfigKeys)]
/// enum MessageKey {
///     #[key(path = "messages.greeting", kind = "string", default = "&aWelcome!")]
///     Greeting,
///     #[key(path = "messages.motd", kind = "string_list", default = ["&aHello", "enjoy"])]
///     Motd,
/// }
///
/// # fn main() -> Result<(), keyed_config::Error> {
/// let mut store = ConfigStore::<MessageKey>::open("messages.toml")?;
/// store.load("messages");
///
/// for line in store.get_string_list(MessageKey::Motd)? {
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct ConfigStore<K: ConfigKey> {
    /// The backing file, fully rewritten on every successful persist.
    path: PathBuf,

    document: Document,

    /// Validated values; after a `load` against a present section, every
    /// key of the shape has exactly one entry.
    values: HashMap<K, ConfigValue>,

    /// Section last passed to `load`, used by `reload`.
    section: Option<String>,

    transform: Box<MessageTransform>,
    sink: Box<dyn LogSink>,
}

impl<K: ConfigKey> ConfigStore<K> {
    /// Starts building a store, for injecting a custom message transform or
    /// log sink before opening the backing file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use keyed_config::{ConfigKeys, ConfigStore};
    ///
    /// #[derive(Clone, Copy, PartialEq, Eq, Hash, ConfigKeys)]
    /// enum AppKey {
    ///     #[key(path = "app.name", kind = "string", default = "app")]
    ///     Name,
    /// }
    ///
    /// # fn main() -> Result<(), keyed_config::Error> {
    /// let store = ConfigStore::<AppKey>::builder()
    ///     .transform(|raw| raw.to_uppercase())
    ///     .open("config.toml")?;
    /// # let _ = store;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> ConfigStoreBuilder<K> {
        ConfigStoreBuilder::new()
    }

    /// Opens a store with the default transform and log sink.
    ///
    /// The backing file is read once here; a missing file yields an empty
    /// document, so every subsequent [`get`](ConfigStore::get) serves the
    /// declared defaults. Unparseable TOML is returned as an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::builder().open(path)
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates the whole shape against the document and rebuilds the cache.
    ///
    /// The cache is cleared unconditionally. If the document has no table at
    /// `section`, a warning goes to the sink and the cache stays empty;
    /// reads then fall back to per-key defaults. Otherwise every key is
    /// probed independently at its declared path: a present, correctly-typed
    /// value is post-processed and cached, anything else warns and caches
    /// the key's declared default.
    ///
    /// Per-kind post-processing:
    ///
    /// - `string`: the message transform is applied
    /// - `string_list`: the transform is applied element-wise
    /// - `int_list`: non-numeric elements are filtered out and the rest
    ///   coerced to `i64`; an empty result counts as invalid
    /// - `int`, `bool`, `double`: taken as-is
    ///
    /// `load` never fails; every failure degrades to a default plus a
    /// warning.
    pub fn load(&mut self, section: &str) {
        self.values.clear();
        self.section = Some(section.to_string());

        if !self.document.has_table(section) {
            self.sink.warn(&format!(
                "no '{}' section found in {}; using defaults",
                section,
                self.path.display()
            ));
            return;
        }

        for key in K::all() {
            let descriptor = key.descriptor();
            let value = match self.read_value(&descriptor) {
                Some(value) => value,
                None => {
                    self.sink.warn(&format!(
                        "invalid or missing value for '{}'; using default: {:?}",
                        descriptor.path, descriptor.default
                    ));
                    descriptor.default
                }
            };
            self.values.insert(*key, value);
        }
    }

    /// Re-reads the document from the backing file and, when a section has
    /// been loaded before, re-validates the cache against it.
    pub fn reload(&mut self) -> Result<(), Error> {
        self.document = Document::read_from(&self.path)?;
        if let Some(section) = self.section.clone() {
            self.load(&section);
        }
        Ok(())
    }

    /// Returns the cached value for `key`, or the key's declared default
    /// when the cache has no entry. Never fails and never reads the
    /// document.
    ///
    /// The returned [`ConfigValue`] is a tagged union; callers that know the
    /// declared kind should prefer the typed getter family.
    pub fn get(&self, key: K) -> ConfigValue {
        self.values
            .get(&key)
            .cloned()
            .unwrap_or_else(|| key.descriptor().default)
    }

    /// Like [`get`](ConfigStore::get), but fails with
    /// [`Error::TypeMismatch`] when the key's declared kind differs from
    /// `expected`. This guards call sites that assume a fixed shape.
    pub fn get_checked(&self, key: K, expected: ValueKind) -> Result<ConfigValue, Error> {
        let descriptor = key.descriptor();
        if descriptor.kind != expected {
            return Err(Error::TypeMismatch {
                key: descriptor.path.to_string(),
                expected,
                actual: descriptor.kind,
            });
        }
        Ok(self
            .values
            .get(&key)
            .cloned()
            .unwrap_or(descriptor.default))
    }

    /// Typed getter for `string` keys.
    pub fn get_string(&self, key: K) -> Result<String, Error> {
        match self.get_checked(key, ValueKind::String)? {
            ConfigValue::String(value) => Ok(value),
            other => Err(Self::mismatch(key, ValueKind::String, &other)),
        }
    }

    /// Typed getter for `string_list` keys.
    pub fn get_string_list(&self, key: K) -> Result<Vec<String>, Error> {
        match self.get_checked(key, ValueKind::StringList)? {
            ConfigValue::StringList(items) => Ok(items),
            other => Err(Self::mismatch(key, ValueKind::StringList, &other)),
        }
    }

    /// Typed getter for `int` keys.
    pub fn get_int(&self, key: K) -> Result<i64, Error> {
        match self.get_checked(key, ValueKind::Int)? {
            ConfigValue::Int(value) => Ok(value),
            other => Err(Self::mismatch(key, ValueKind::Int, &other)),
        }
    }

    /// Typed getter for `int_list` keys.
    pub fn get_int_list(&self, key: K) -> Result<Vec<i64>, Error> {
        match self.get_checked(key, ValueKind::IntList)? {
            ConfigValue::IntList(items) => Ok(items),
            other => Err(Self::mismatch(key, ValueKind::IntList, &other)),
        }
    }

    /// Typed getter for `bool` keys.
    pub fn get_bool(&self, key: K) -> Result<bool, Error> {
        match self.get_checked(key, ValueKind::Bool)? {
            ConfigValue::Bool(value) => Ok(value),
            other => Err(Self::mismatch(key, ValueKind::Bool, &other)),
        }
    }

    /// Typed getter for `double` keys.
    pub fn get_double(&self, key: K) -> Result<f64, Error> {
        match self.get_checked(key, ValueKind::Double)? {
            ConfigValue::Double(value) => Ok(value),
            other => Err(Self::mismatch(key, ValueKind::Double, &other)),
        }
    }

    /// Writes `value` for `key` into the document and the cache, then
    /// persists the whole document to the backing file.
    ///
    /// The value is not checked against the key's declared kind; the caller
    /// is trusted. A later typed getter on a key holding an off-kind value
    /// reports [`Error::TypeMismatch`].
    ///
    /// On persist failure the error is returned and a warning goes to the
    /// sink, but the cache and the in-memory document keep the new value:
    /// memory and backing file stay diverged until a successful
    /// [`save`](ConfigStore::save), a successful later `set`, or a
    /// [`reload`](ConfigStore::reload). Treat an `Err` as "retry or accept
    /// drift", not as a no-op.
    pub fn set(&mut self, key: K, value: impl Into<ConfigValue>) -> Result<(), Error> {
        let value = value.into();
        let descriptor = key.descriptor();

        self.document.set(descriptor.path, Value::from(&value));
        self.values.insert(key, value);

        if let Err(err) = self.save() {
            self.sink.warn(&format!(
                "failed to save {}: {err}",
                self.path.display()
            ));
            return Err(err);
        }
        Ok(())
    }

    /// Persists the current document to the backing file.
    pub fn save(&self) -> Result<(), Error> {
        self.document.write_to(&self.path)
    }

    /// Applies the store's message transform to `raw`.
    pub fn process_message(&self, raw: &str) -> String {
        (self.transform)(raw)
    }

    fn read_value(&self, descriptor: &KeyDescriptor) -> Option<ConfigValue> {
        let path = descriptor.path;
        match descriptor.kind {
            ValueKind::String => self
                .document
                .get_str(path)
                .map(|raw| ConfigValue::String((self.transform)(raw))),
            ValueKind::StringList => self.document.get_string_list(path).map(|items| {
                ConfigValue::StringList(
                    items.iter().map(|item| (self.transform)(item)).collect(),
                )
            }),
            ValueKind::Int => self.document.get_int(path).map(ConfigValue::Int),
            ValueKind::IntList => self.document.get_array(path).and_then(|items| {
                let ints: Vec<i64> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Integer(n) => Some(*n),
                        Value::Float(f) => Some(*f as i64),
                        _ => None,
                    })
                    .collect();
                if ints.is_empty() {
                    None
                } else {
                    Some(ConfigValue::IntList(ints))
                }
            }),
            ValueKind::Bool => self.document.get_bool(path).map(ConfigValue::Bool),
            ValueKind::Double => self.document.get_float(path).map(ConfigValue::Double),
        }
    }

    fn mismatch(key: K, expected: ValueKind, actual: &ConfigValue) -> Error {
        Error::TypeMismatch {
            key: key.descriptor().path.to_string(),
            expected,
            actual: actual.kind(),
        }
    }
}

/// Builds a [`ConfigStore`] with an injected message transform and log sink.
pub struct ConfigStoreBuilder<K: ConfigKey> {
    transform: Box<MessageTransform>,
    sink: Box<dyn LogSink>,
    _keys: PhantomData<K>,
}

impl<K: ConfigKey> ConfigStoreBuilder<K> {
    fn new() -> Self {
        Self {
            transform: Box::new(transform::legacy_color_codes),
            sink: Box::new(TracingSink),
            _keys: PhantomData,
        }
    }

    /// Replaces the message transform applied to string-typed values.
    pub fn transform(
        mut self,
        transform: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.transform = Box::new(transform);
        self
    }

    /// Replaces the warning sink.
    pub fn log_sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Reads the backing file and finishes the store. A missing file yields
    /// an empty document; unparseable TOML is an error.
    pub fn open(self, path: impl AsRef<Path>) -> Result<ConfigStore<K>, Error> {
        let path = path.as_ref().to_path_buf();
        let document = Document::read_from(&path)?;

        Ok(ConfigStore {
            path,
            document,
            values: HashMap::new(),
            section: None,
            transform: self.transform,
            sink: self.sink,
        })
    }
}

impl<K: ConfigKey> Default for ConfigStoreBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}
