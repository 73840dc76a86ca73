//! Syllabus Tree
//!
//! Read-only traversal of activity trees.
//!
//! # Core Concepts
//!
//! - [`ActivityTreeWalker`]: step count, item count and navigation tree
//! - [`NavigationEntry`]: one visited link with its running step number
//! - [`TraversalLimits`]: depth guard against cyclic data
//!
//! A *step* is a linked leaf resource. An *item* is any linked node, leaf or
//! nested activity. Steps in the navigation tree are numbered by a single
//! counter threaded through the whole depth-first walk.
//!
//! # Example
//!
//! ```rust,ignore
//! use syllabus_tree::ActivityTreeWalker;
//!
//! let walker = ActivityTreeWalker::new(&store);
//! let steps = walker.count_steps(activity_id)?;
//! let (entries, last_step) = walker.build_navigation(activity_id, 1)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod navigation;
mod walker;

pub use error::TreeError;
pub use navigation::{NavigationEntry, ResourceSummary};
pub use walker::{ordered_links, ActivityTreeWalker, TraversalLimits};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
