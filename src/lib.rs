pub mod document;
pub mod error;
pub mod key;
pub mod sink;
pub mod store;
pub mod transform;
pub mod value;

pub use document::Document;
pub use error::Error;
pub use key::{ConfigKey, KeyDescriptor};
pub use sink::{LogSink, TracingSink};
pub use store::{ConfigStore, ConfigStoreBuilder};
pub use transform::legacy_color_codes;
pub use value::{ConfigValue, ValueKind};

// re-export derive
pub use keyed_config_macros::ConfigKeys;
