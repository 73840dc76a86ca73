//! Syllabus Core
//!
//! Facade over the activity tree crates:
//! - Builds the views an activity player renders (left menu, player, instructions)
//! - Routes attach / detach / reorder through the sequence manager
//! - Loads configuration and course documents
//!
//! # Example
//!
//! ```rust,ignore
//! use syllabus_core::{ActivityService, SyllabusConfig};
//! use syllabus_store::InMemoryStore;
//!
//! let service = ActivityService::new(InMemoryStore::new(), SyllabusConfig::default());
//! let week = service.register(Activity::new("Week 1").into_node())?;
//! let page = service.register(ResourceNode::new(ResourceKind::Text, "Welcome"))?;
//! service.attach(week, page)?;
//!
//! let menu = service.left_menu(week)?;
//! assert_eq!(menu.total_steps, 1);
//! assert_eq!(menu.total_items, 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod document;
pub mod error;
pub mod service;
pub mod views;

pub use config::{ConfigError, LogConfig, SyllabusConfig};
pub use document::{CourseDocument, CourseIndex, DocumentError, LinkEntry, ResourceEntry};
pub use error::SyllabusError;
pub use service::ActivityService;
pub use views::{InstructionsView, LeftMenu, PlayerView};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with Syllabus
    pub use crate::{ActivityService, CourseDocument, LeftMenu, SyllabusConfig, SyllabusError};
    pub use syllabus_model::prelude::*;
    pub use syllabus_sequence::{DetachPolicy, DuplicatePolicy, ReorderReport, SequenceConfig};
    pub use syllabus_store::{ActivityStore, InMemoryStore};
    pub use syllabus_tree::NavigationEntry;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
