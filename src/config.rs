//! Caller-controlled decode limits and policies.
//!
//! There is no module-level configuration. A [`DecodeConfig`] travels with every
//! [`Cursor`](crate::Cursor), so two decodes running side by side can use different
//! limits without coordinating.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_COLLECTION_LEN;

/// Limits and policies applied while decoding.
///
/// The defaults are lenient about compact-integer canonicality and strict about
/// trailing bytes:
///
/// ```rust
/// use scalecodec::DecodeConfig;
///
/// let config = DecodeConfig::default()
///     .with_max_collection_len(1024)
///     .canonical(true);
/// assert_eq!(config.max_collection_len, 1024);
/// assert!(config.canonical_compact);
/// assert!(!config.allow_trailing_bytes);
/// ```
///
/// The struct is serde-friendly so services can carry it in their own config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Largest element count a collection length prefix may declare.
    pub max_collection_len: usize,
    /// Reject compact integers that are not encoded in their minimal mode.
    pub canonical_compact: bool,
    /// Accept input left unconsumed after a top-level decode.
    pub allow_trailing_bytes: bool,
}

impl DecodeConfig {
    /// Creates the default configuration.
    pub const fn new() -> Self {
        Self {
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            canonical_compact: false,
            allow_trailing_bytes: false,
        }
    }

    /// Sets the collection length cap.
    #[must_use]
    pub const fn with_max_collection_len(mut self, max: usize) -> Self {
        self.max_collection_len = max;
        self
    }

    /// Enables or disables strict compact-integer validation.
    #[must_use]
    pub const fn canonical(mut self, enabled: bool) -> Self {
        self.canonical_compact = enabled;
        self
    }

    /// Enables or disables acceptance of trailing bytes.
    #[must_use]
    pub const fn allow_trailing(mut self, enabled: bool) -> Self {
        self.allow_trailing_bytes = enabled;
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let config: DecodeConfig =
            serde_json::from_str(r#"{ "canonical_compact": true }"#).expect("valid json");
        assert!(config.canonical_compact);
        assert_eq!(config.max_collection_len, DEFAULT_MAX_COLLECTION_LEN);
        assert!(!config.allow_trailing_bytes);
    }

    #[test]
    fn builder_setters_compose() {
        let config = DecodeConfig::new()
            .with_max_collection_len(3)
            .allow_trailing(true);
        assert_eq!(config.max_collection_len, 3);
        assert!(config.allow_trailing_bytes);
        assert!(!config.canonical_compact);
    }
}
