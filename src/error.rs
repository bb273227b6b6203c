use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML Serialization: {0}")]
    TomlSerialization(#[from] toml::ser::Error),

    #[error("TOML Deserialization: {0}")]
    TomlDeserialization(#[from] toml::de::Error),

    /// A type-checked accessor was called with the wrong expected kind.
    ///
    /// This is returned either when the key's declared kind differs from the
    /// accessor's expected kind, or when an untyped [`set`](crate::ConfigStore::set)
    /// previously stored a value whose kind differs from the declaration.
    /// It signals a caller programming error, not bad data in the document.
    #[error("key '{key}' holds {actual:?}, expected {expected:?}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        actual: ValueKind,
    },
}
