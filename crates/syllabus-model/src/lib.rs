//! Syllabus Model
//!
//! Data types for activity trees.
//!
//! # Core Concepts
//!
//! - [`ResourceNode`]: An addressable content item tagged with a [`ResourceKind`]
//! - [`Activity`]: A resource node of kind `activity` that sequences children
//! - [`ActivityLink`]: Ordered association between an activity and a child resource
//! - [`Position`]: Zero-indexed sequence position of a link within its activity
//!
//! # Example
//!
//! ```rust
//! use syllabus_model::{Activity, ActivityLink, Position, ResourceKind, ResourceNode};
//!
//! let chapter = ResourceNode::new(ResourceKind::Activity, "Chapter 1");
//! let video = ResourceNode::new(ResourceKind::File, "intro.mp4");
//!
//! let activity = Activity::try_from(chapter).unwrap();
//! let link = ActivityLink::new(activity.id(), video.id(), Position::new(0));
//! assert_eq!(link.position().get(), 0);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod ids;
mod link;
mod resource;

pub use error::ModelError;
pub use ids::{LinkId, ResourceId};
pub use link::{ActivityLink, Position};
pub use resource::{Activity, CustomKind, ResourceKind, ResourceNode};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the model
    pub use crate::{
        Activity, ActivityLink, LinkId, ModelError, Position, ResourceId, ResourceKind,
        ResourceNode,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
