//! Activity links
//!
//! An [`ActivityLink`] binds an activity to one child resource and carries an
//! explicit [`Position`] controlling traversal order within the activity.

use crate::ids::{LinkId, ResourceId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-indexed sequence position of a link within its activity
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// First position
    pub const FIRST: Self = Self(0);

    /// Create position
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Numeric value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Position from a list index, saturating at `u32::MAX`
    #[inline]
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Ordered association between an activity and a child resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLink {
    id: LinkId,
    activity: ResourceId,
    resource: ResourceId,
    position: Position,
}

impl ActivityLink {
    /// Create link with a fresh id
    #[must_use]
    pub fn new(activity: ResourceId, resource: ResourceId, position: Position) -> Self {
        Self {
            id: LinkId::new(),
            activity,
            resource,
            position,
        }
    }

    /// Link id
    #[inline]
    #[must_use]
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Owning activity
    #[inline]
    #[must_use]
    pub fn activity(&self) -> ResourceId {
        self.activity
    }

    /// Linked child resource
    #[inline]
    #[must_use]
    pub fn resource(&self) -> ResourceId {
        self.resource
    }

    /// Sequence position
    #[inline]
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the link to another position
    #[inline]
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Whether this link binds `resource` into `activity`
    #[inline]
    #[must_use]
    pub fn binds(&self, activity: ResourceId, resource: ResourceId) -> bool {
        self.activity == activity && self.resource == resource
    }
}
