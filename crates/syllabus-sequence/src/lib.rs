//! Syllabus Sequence
//!
//! Caller-controlled ordering of the links inside an activity.
//!
//! # Core Concepts
//!
//! - [`SequenceManager`]: attach, detach and reorder
//! - [`SequenceConfig`]: strict or lenient handling of the edge cases
//! - [`ContainmentGraph`]: activity-in-activity edges used to refuse cycles
//! - [`ReorderReport`]: what a best-effort reorder did and did not touch
//!
//! # Example
//!
//! ```rust,ignore
//! use syllabus_sequence::{SequenceConfig, SequenceManager};
//!
//! let manager = SequenceManager::new(&store, SequenceConfig::default());
//! manager.attach(week, video)?;
//! manager.attach(week, quiz)?;
//! let report = manager.reorder(week, &[quiz, video])?;
//! assert!(report.is_complete());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod config;
mod containment;
mod error;
mod manager;
mod report;

pub use config::{DetachPolicy, DuplicatePolicy, SequenceConfig};
pub use containment::ContainmentGraph;
pub use error::SequenceError;
pub use manager::SequenceManager;
pub use report::ReorderReport;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
