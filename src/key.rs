use std::hash::Hash;

use crate::value::{ConfigValue, ValueKind};

/// Static metadata identifying one configurable setting: where it lives in
/// the document, what kind of value it holds, and what to fall back to.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyDescriptor {
    /// Dot-delimited location in the document, absolute from the root.
    pub path: &'static str,
    pub kind: ValueKind,
    /// Fallback used whenever the document has no valid value at `path`.
    /// Must match `kind`.
    pub default: ConfigValue,
}

/// A closed, enumerable set of configuration keys.
///
/// A shape is normally a fieldless enum with one variant per setting,
/// generated by [`#[derive(ConfigKeys)]`](crate::ConfigKeys):
///
/// ```rust
/// use keyed_config::ConfigKeys;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, ConfigKeys)]
/// enum AppKey {
///     #[key(path = "general.prefix", kind = "string", default = "&7[app] ")]
///     Prefix,
///     #[key(path = "general.max-retries", kind = "int", default = 3)]
///     MaxRetries,
/// }
/// ```
///
/// Hand implementations are fine too; the only requirement is that
/// `descriptor` is pure and that the descriptor's default matches its kind.
pub trait ConfigKey: Copy + Eq + Hash + 'static {
    /// Resolves the full descriptor for this key.
    fn descriptor(&self) -> KeyDescriptor;

    /// Every key of the shape, in declaration order.
    fn all() -> &'static [Self];
}
