//! The string transform applied to string-typed values during load.

/// Signature of the transform a store applies to loaded strings.
pub type MessageTransform = dyn Fn(&str) -> String + Send + Sync;

/// Default transform: replaces every legacy `&` color-code sigil with the
/// platform's native `§` sigil. Blank input collapses to the empty string.
/// Input without legacy markers passes through unchanged.
pub fn legacy_color_codes(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    raw.replace('&', "§")
}
