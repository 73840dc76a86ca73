//! Configuration
//!
//! ```toml
//! max_depth = 32
//!
//! [sequence]
//! detach = "strict"
//! duplicates = "allow"
//!
//! [log]
//! level = "debug"
//! json = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use syllabus_sequence::SequenceConfig;
use syllabus_tree::TraversalLimits;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Logging configuration, applied by the binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Top level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyllabusConfig {
    /// Deepest activity nesting a traversal may reach
    pub max_depth: usize,
    /// Sequencing policies
    pub sequence: SequenceConfig,
    /// Logging
    pub log: LogConfig,
}

impl SyllabusConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With max depth
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// With sequencing policies
    #[inline]
    #[must_use]
    pub fn with_sequence(mut self, sequence: SequenceConfig) -> Self {
        self.sequence = sequence;
        self
    }

    /// Traversal limits derived from this configuration
    #[inline]
    #[must_use]
    pub fn traversal_limits(&self) -> TraversalLimits {
        TraversalLimits::default().with_max_depth(self.max_depth)
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns error on syntax errors, unknown keys or a zero `max_depth`
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SyllabusConfig {
    fn default() -> Self {
        Self {
            max_depth: TraversalLimits::default().max_depth,
            sequence: SequenceConfig::default(),
            log: LogConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use syllabus_sequence::{DetachPolicy, DuplicatePolicy};

    #[test]
    fn empty_text_gives_defaults() {
        let config = SyllabusConfig::from_toml_str("").unwrap();
        assert_eq!(config, SyllabusConfig::default());
        assert_eq!(config.max_depth, 64);
    }

    #[test]
    fn parses_nested_tables() {
        let config = SyllabusConfig::from_toml_str(
            r#"
            max_depth = 8

            [sequence]
            detach = "strict"
            duplicates = "reject"

            [log]
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(config.traversal_limits().max_depth, 8);
        assert_eq!(config.sequence.detach, DetachPolicy::Strict);
        assert_eq!(config.sequence.duplicates, DuplicatePolicy::Reject);
        assert!(config.log.json);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SyllabusConfig::from_toml_str("max_dept = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_zero_depth() {
        let err = SyllabusConfig::from_toml_str("max_depth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth = 5").unwrap();
        let config = SyllabusConfig::from_path(file.path()).unwrap();
        assert_eq!(config.max_depth, 5);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SyllabusConfig::from_path(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
