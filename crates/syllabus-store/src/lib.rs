//! Syllabus Store
//!
//! Persistence seam for activity trees.
//!
//! # Overview
//!
//! - [`ResourceRepository`]: lookup and lifecycle of resource nodes
//! - [`LinkRepository`]: the query shapes traversal and sequencing need
//! - [`InMemoryStore`]: thread-safe implementation of both
//!
//! Traversal and sequencing code is written against the traits only, so it
//! can run against the in-memory store in tests and against a database
//! adapter in production.
//!
//! # Example
//!
//! ```rust
//! use syllabus_model::{Activity, ResourceKind, ResourceNode};
//! use syllabus_store::{InMemoryStore, LinkRepository, ResourceRepository};
//!
//! let store = InMemoryStore::new();
//! let activity = Activity::new("Week 1");
//! let page = ResourceNode::new(ResourceKind::Text, "Welcome");
//! store.save_resource(activity.node().clone()).unwrap();
//! store.save_resource(page.clone()).unwrap();
//!
//! let link = store.append_link(activity.id(), page.id()).unwrap();
//! assert_eq!(link.position().get(), 0);
//! assert_eq!(store.count_links_of(activity.id()).unwrap(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod memory;
mod repository;

pub use error::StoreError;
pub use memory::InMemoryStore;
pub use repository::{ActivityStore, LinkRepository, ResourceRepository};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
