//! Group model
//!
//! A [`Group`] is an entity that can hold memberships and be referenced by
//! content through the audience relation. Groups are tagged with a
//! [`GroupKind`]; role sets are defined per kind and copied onto each group
//! at registration.

use crate::id::GroupId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Named permission bundle attachable to a membership
///
/// Role names are not globally unique; they are defined per group kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleName(String);

impl RoleName {
    /// Create role name
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Role name as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for RoleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Entity-type/bundle tag identifying a family of groups
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKind {
    /// Entity type the group lives under (e.g. "node")
    pub entity_type: String,

    /// Bundle within the entity type
    pub bundle: String,
}

impl GroupKind {
    /// Create group kind
    #[inline]
    #[must_use]
    pub fn new(entity_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            bundle: bundle.into(),
        }
    }
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.entity_type, self.bundle)
    }
}

/// A group: holds memberships, owns a role set, is referenced by content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Stable identifier
    pub id: GroupId,

    /// Kind tag
    pub kind: GroupKind,

    /// Roles attachable to memberships of this group (insertion-ordered)
    pub roles: IndexSet<RoleName>,
}

impl Group {
    /// Create group of the given kind with an empty role set
    #[inline]
    #[must_use]
    pub fn new(kind: GroupKind) -> Self {
        Self {
            id: GroupId::new(),
            kind,
            roles: IndexSet::new(),
        }
    }

    /// Add a role to the group's role set (builder style)
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: impl Into<RoleName>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Check whether the group defines a role
    #[inline]
    #[must_use]
    pub fn has_role(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }
}
