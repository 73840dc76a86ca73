//! Course documents
//!
//! A course document lists resources under short keys and the links between
//! them. Links are attached in document order through the sequence manager,
//! so positions follow the document and the usual cycle and duplicate rules
//! apply. Keys and explicit ids must be unique within a document. Kind names
//! are case-insensitive (`"Activity"` and `"activity"` are the same kind);
//! names outside the built-in set are kept lowercased as custom kinds.
//!
//! ```toml
//! [[resources]]
//! key = "week1"
//! kind = "activity"
//! name = "Week 1"
//! instructions = "Watch the video, then take the quiz."
//!
//! [[resources]]
//! key = "video"
//! kind = "file"
//!
//! [[links]]
//! activity = "week1"
//! resource = "video"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use syllabus_model::{ResourceId, ResourceKind, ResourceNode};
use syllabus_sequence::{SequenceConfig, SequenceError, SequenceManager};
use syllabus_store::{ActivityStore, StoreError};

/// Course document errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// File could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is neither `.json` nor `.toml`
    #[error("unsupported course document format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Invalid JSON
    #[error("invalid JSON course document: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid TOML
    #[error("invalid TOML course document: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two resources share a key
    #[error("duplicate resource key: {0}")]
    DuplicateKey(String),

    /// Two resources with different keys declare the same id
    #[error("resource id {id} of key {key} is already used by another key")]
    DuplicateId { key: String, id: ResourceId },

    /// A link refers to an undeclared key
    #[error("link refers to unknown resource key: {0}")]
    UnknownKey(String),

    /// Linking failed (cycle, duplicate, non-activity owner)
    #[error("cannot link {resource} into {activity}: {source}")]
    Link {
        activity: String,
        resource: String,
        #[source]
        source: SequenceError,
    },

    /// Repository failure
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// One declared resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceEntry {
    /// Document-local key
    pub key: String,
    /// Resource kind
    pub kind: ResourceKind,
    /// Display name, defaults to the key
    #[serde(default)]
    pub name: Option<String>,
    /// Activity instructions or resource description
    #[serde(default)]
    pub instructions: Option<String>,
    /// Fixed id, generated when absent
    #[serde(default)]
    pub id: Option<ResourceId>,
}

impl ResourceEntry {
    fn to_node(&self, id: ResourceId) -> ResourceNode {
        let name = self.name.clone().unwrap_or_else(|| self.key.clone());
        let node = ResourceNode::with_id(id, self.kind.clone(), name);
        match &self.instructions {
            Some(text) => node.with_description(text.clone()),
            None => node,
        }
    }
}

/// One declared link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkEntry {
    /// Key of the owning activity
    pub activity: String,
    /// Key of the linked resource
    pub resource: String,
}

/// Resources and links of a course
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseDocument {
    #[serde(default)]
    pub resources: Vec<ResourceEntry>,
    #[serde(default)]
    pub links: Vec<LinkEntry>,
}

impl CourseDocument {
    /// Parse JSON text
    ///
    /// # Errors
    /// Returns error on malformed JSON
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns error on malformed TOML
    pub fn from_toml_str(text: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(text)?)
    }

    /// Read a `.json` or `.toml` file
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has another extension or
    /// does not parse
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, DocumentError> = match extension.as_deref() {
            Some("json") => Self::from_json_str,
            Some("toml") => Self::from_toml_str,
            _ => return Err(DocumentError::UnsupportedFormat(path.to_path_buf())),
        };
        let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&text)
    }

    /// Store every resource, then attach every link in document order
    ///
    /// # Errors
    /// Returns error on duplicate or unknown keys, store failures, or links
    /// the sequence manager refuses
    pub fn load_into<S: ActivityStore + ?Sized>(
        &self,
        store: &S,
        sequence: SequenceConfig,
    ) -> Result<CourseIndex, DocumentError> {
        let mut keys = IndexMap::with_capacity(self.resources.len());
        let mut ids = HashSet::with_capacity(self.resources.len());
        for entry in &self.resources {
            if keys.contains_key(&entry.key) {
                return Err(DocumentError::DuplicateKey(entry.key.clone()));
            }
            let id = entry.id.unwrap_or_default();
            if !ids.insert(id) {
                return Err(DocumentError::DuplicateId {
                    key: entry.key.clone(),
                    id,
                });
            }
            keys.insert(entry.key.clone(), id);
        }
        // validated before anything is written
        for (entry, id) in self.resources.iter().zip(keys.values()) {
            store.save_resource(entry.to_node(*id))?;
        }

        let index = CourseIndex { keys };
        let manager = SequenceManager::new(store, sequence);
        for link in &self.links {
            let activity = index.require(&link.activity)?;
            let resource = index.require(&link.resource)?;
            manager
                .attach(activity, resource)
                .map_err(|source| DocumentError::Link {
                    activity: link.activity.clone(),
                    resource: link.resource.clone(),
                    source,
                })?;
        }
        store.flush()?;

        tracing::info!(
            resources = self.resources.len(),
            links = self.links.len(),
            "Loaded course document"
        );
        Ok(index)
    }

    /// Keys of activities no other activity links to
    #[must_use]
    pub fn root_keys(&self) -> Vec<&str> {
        let linked: HashSet<&str> = self.links.iter().map(|l| l.resource.as_str()).collect();
        self.resources
            .iter()
            .filter(|r| r.kind.is_activity() && !linked.contains(r.key.as_str()))
            .map(|r| r.key.as_str())
            .collect()
    }
}

/// Key → id mapping produced by [`CourseDocument::load_into`]
#[derive(Debug, Clone, Default)]
pub struct CourseIndex {
    keys: IndexMap<String, ResourceId>,
}

impl CourseIndex {
    /// Id of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ResourceId> {
        self.keys.get(key).copied()
    }

    /// Id of `key`, or [`DocumentError::UnknownKey`]
    ///
    /// # Errors
    /// Returns error for undeclared keys
    pub fn require(&self, key: &str) -> Result<ResourceId, DocumentError> {
        self.get(key)
            .ok_or_else(|| DocumentError::UnknownKey(key.to_string()))
    }

    /// Number of declared resources
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no resources were declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
