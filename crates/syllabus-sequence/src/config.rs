//! Sequencing policies

use serde::{Deserialize, Serialize};

/// What `detach` does when no matching link exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetachPolicy {
    /// Treat as nothing to do
    #[default]
    Lenient,
    /// Report [`crate::SequenceError::LinkNotFound`]
    Strict,
}

/// Whether a resource may be attached to the same activity twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Each attach creates a new link
    #[default]
    Allow,
    /// Report [`crate::SequenceError::AlreadyAttached`]
    Reject,
}

/// Sequence manager configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceConfig {
    /// Missing-link handling for detach
    pub detach: DetachPolicy,
    /// Duplicate-link handling for attach
    pub duplicates: DuplicatePolicy,
    /// Log a warning when reorder input and current links disagree
    pub warn_on_partial_reorder: bool,
}

impl SequenceConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With detach policy
    #[inline]
    #[must_use]
    pub fn with_detach(mut self, detach: DetachPolicy) -> Self {
        self.detach = detach;
        self
    }

    /// With duplicate policy
    #[inline]
    #[must_use]
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// With or without the partial reorder warning
    #[inline]
    #[must_use]
    pub fn with_partial_reorder_warnings(mut self, warn: bool) -> Self {
        self.warn_on_partial_reorder = warn;
        self
    }

    /// Strict on every edge case
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
            .with_detach(DetachPolicy::Strict)
            .with_duplicates(DuplicatePolicy::Reject)
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            detach: DetachPolicy::Lenient,
            duplicates: DuplicatePolicy::Allow,
            warn_on_partial_reorder: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient() {
        let config = SequenceConfig::default();
        assert_eq!(config.detach, DetachPolicy::Lenient);
        assert_eq!(config.duplicates, DuplicatePolicy::Allow);
        assert!(config.warn_on_partial_reorder);
    }

    #[test]
    fn parses_partial_toml() {
        let config: SequenceConfig = toml::from_str("detach = \"strict\"").unwrap();
        assert_eq!(config.detach, DetachPolicy::Strict);
        assert_eq!(config.duplicates, DuplicatePolicy::Allow);
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<SequenceConfig>("detatch = \"strict\"").is_err());
    }
}
