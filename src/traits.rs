use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Stable identifier of a group (an alphabetical bucket, an album, ...).
///
/// Cheap to clone: headers, position maps and scroll requests all carry one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(Arc<str>);

impl GroupId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for GroupId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

/// Anything the list can show as a leaf or inside a grid row.
///
/// The id is what renderers key their widgets by, so it must stay the same
/// for the same underlying entity across relayouts.
pub trait Entity {
    type Id: Clone + Eq + Hash + fmt::Debug;

    fn entity_id(&self) -> Self::Id;
}

/// An ordered bucket of entities sharing a label.
///
/// Groups are immutable from the engine's point of view; a membership change
/// means handing the list a new `Vec<Group<T>>`.
#[derive(Debug, Clone)]
pub struct Group<T> {
    pub id: GroupId,
    /// Display label; an empty label never gets a header.
    pub label: String,
    pub members: Vec<T>,
}

impl<T> Group<T> {
    pub fn new(id: impl Into<GroupId>, label: impl Into<String>, members: Vec<T>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            members,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Entity for u64 {
    type Id = u64;

    fn entity_id(&self) -> u64 {
        *self
    }
}
