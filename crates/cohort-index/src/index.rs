//! Audience index
//!
//! Forward links (content → groups) are the source of truth; reverse links
//! (group → contents) exist for fast reverse lookup and are maintained
//! alongside. Updating one content item's reference set is atomic; the
//! reclamation side re-checks forward references at processing time, so
//! reverse reads are snapshots, not live views.

use cohort_types::{ContentId, GroupId};
use dashmap::DashMap;
use indexmap::IndexSet;
use tracing::debug;

/// Audience index error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The content item has never been indexed
    #[error("content {content} is not indexed")]
    NotIndexed {
        /// The unknown content item
        content: ContentId,
    },
}

/// Result of removing a group from the index
///
/// Partition of the content that referenced the deleted group: `orphaned`
/// items lost their last reference and are deletion candidates; `detached`
/// items keep at least one reference and only had the stale one dropped.
#[derive(Debug, Clone)]
pub struct GroupRemoval {
    /// The removed group
    pub group: GroupId,

    /// Content whose audience set became empty
    pub orphaned: Vec<ContentId>,

    /// Content still referencing at least one other group
    pub detached: Vec<ContentId>,
}

impl GroupRemoval {
    /// Total number of content items that referenced the group
    #[inline]
    #[must_use]
    pub fn affected(&self) -> usize {
        self.orphaned.len() + self.detached.len()
    }
}

/// Index of audience relations between content and groups
#[derive(Debug, Default)]
pub struct AudienceIndex {
    /// content -> groups it references (insertion-ordered)
    forward: DashMap<ContentId, IndexSet<GroupId>>,

    /// group -> content referencing it (for reverse lookup)
    by_group: DashMap<GroupId, Vec<ContentId>>,
}

impl AudienceIndex {
    /// Create empty index
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            forward: DashMap::new(),
            by_group: DashMap::new(),
        }
    }

    /// Register or replace the audience set of a content item
    ///
    /// Called when content is created or updated. Forward and reverse links
    /// are updated; the forward update is atomic per content item.
    pub fn index_content(&self, content: ContentId, group_refs: &[GroupId]) {
        let new_refs: IndexSet<GroupId> = group_refs.iter().copied().collect();

        let old_refs = self
            .forward
            .insert(content, new_refs.clone())
            .unwrap_or_default();

        // Reverse maintenance: drop stale links, add new ones.
        for group in old_refs.difference(&new_refs) {
            if let Some(mut contents) = self.by_group.get_mut(group) {
                contents.retain(|c| *c != content);
            }
        }
        for group in new_refs.difference(&old_refs) {
            let mut contents = self.by_group.entry(*group).or_default();
            if !contents.contains(&content) {
                contents.push(content);
            }
        }
    }

    /// Content currently referencing a group
    ///
    /// Point-in-time snapshot; finite and safe to re-enumerate after
    /// mutation settles.
    #[must_use]
    pub fn content_referencing(&self, group: GroupId) -> Vec<ContentId> {
        self.by_group
            .get(&group)
            .map(|contents| contents.value().clone())
            .unwrap_or_default()
    }

    /// Audience set of a content item, if indexed
    #[must_use]
    pub fn groups_of(&self, content: ContentId) -> Option<IndexSet<GroupId>> {
        self.forward
            .get(&content)
            .map(|refs| refs.value().clone())
    }

    /// Drop one group reference from a content item
    ///
    /// Returns the number of references remaining after the removal.
    ///
    /// # Errors
    /// Returns [`IndexError::NotIndexed`] when the content is unknown.
    pub fn detach_group(&self, content: ContentId, group: GroupId) -> Result<usize, IndexError> {
        let remaining = {
            let mut refs = self
                .forward
                .get_mut(&content)
                .ok_or(IndexError::NotIndexed { content })?;
            refs.shift_remove(&group);
            refs.len()
        };

        if let Some(mut contents) = self.by_group.get_mut(&group) {
            contents.retain(|c| *c != content);
        }

        Ok(remaining)
    }

    /// Remove a content item from the index entirely
    ///
    /// Called when content is deleted. Clears forward and reverse links.
    pub fn remove_content(&self, content: ContentId) {
        if let Some((_, refs)) = self.forward.remove(&content) {
            for group in &refs {
                if let Some(mut contents) = self.by_group.get_mut(group) {
                    contents.retain(|c| *c != content);
                }
            }
        }
    }

    /// Remove a deleted group from the index
    ///
    /// Must be called exactly once per group deletion, after the group's
    /// own removal is durable. Drops the stale forward reference from every
    /// content item that referenced the group (atomic per item) and
    /// partitions the affected content into orphaned and detached.
    pub fn on_group_deleted(&self, group: GroupId) -> GroupRemoval {
        let affected = self
            .by_group
            .remove(&group)
            .map(|(_, contents)| contents)
            .unwrap_or_default();

        let mut orphaned = Vec::new();
        let mut detached = Vec::new();

        for content in affected {
            let Some(mut refs) = self.forward.get_mut(&content) else {
                continue;
            };
            refs.shift_remove(&group);
            if refs.is_empty() {
                // Entry stays indexed (with an empty audience) until a
                // reclamation strategy deletes the content.
                orphaned.push(content);
            } else {
                detached.push(content);
            }
        }

        debug!(
            %group,
            orphaned = orphaned.len(),
            detached = detached.len(),
            "group removed from audience index"
        );

        GroupRemoval {
            group,
            orphaned,
            detached,
        }
    }

    /// Number of indexed content items
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if index is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_reverse_lookup() {
        let index = AudienceIndex::new();
        let group = GroupId::new();
        let content = ContentId::new();

        index.index_content(content, &[group]);

        assert_eq!(index.content_referencing(group), vec![content]);
        assert!(index.groups_of(content).unwrap().contains(&group));
    }

    #[test]
    fn reindex_replaces_audience() {
        let index = AudienceIndex::new();
        let g1 = GroupId::new();
        let g2 = GroupId::new();
        let content = ContentId::new();

        index.index_content(content, &[g1]);
        index.index_content(content, &[g2]);

        assert!(index.content_referencing(g1).is_empty());
        assert_eq!(index.content_referencing(g2), vec![content]);
    }

    #[test]
    fn group_deletion_partitions_content() {
        let index = AudienceIndex::new();
        let g1 = GroupId::new();
        let g2 = GroupId::new();

        let sole = ContentId::new();
        let shared = ContentId::new();
        index.index_content(sole, &[g1]);
        index.index_content(shared, &[g1, g2]);

        let removal = index.on_group_deleted(g1);

        assert_eq!(removal.orphaned, vec![sole]);
        assert_eq!(removal.detached, vec![shared]);
        assert_eq!(removal.affected(), 2);

        // Shared content keeps only its remaining reference.
        let refs = index.groups_of(shared).unwrap();
        assert_eq!(refs.len(), 1);
        assert!(refs.contains(&g2));

        // Orphan stays indexed with an empty audience until reclaimed.
        assert!(index.groups_of(sole).unwrap().is_empty());
    }

    #[test]
    fn group_deletion_of_unreferenced_group() {
        let index = AudienceIndex::new();
        let removal = index.on_group_deleted(GroupId::new());
        assert_eq!(removal.affected(), 0);
    }

    #[test]
    fn detach_group_reports_remaining() {
        let index = AudienceIndex::new();
        let g1 = GroupId::new();
        let g2 = GroupId::new();
        let content = ContentId::new();
        index.index_content(content, &[g1, g2]);

        assert_eq!(index.detach_group(content, g1).unwrap(), 1);
        assert_eq!(index.detach_group(content, g1).unwrap(), 1);
        assert_eq!(index.detach_group(content, g2).unwrap(), 0);
    }

    #[test]
    fn detach_unknown_content_errors() {
        let index = AudienceIndex::new();
        let result = index.detach_group(ContentId::new(), GroupId::new());
        assert!(matches!(result, Err(IndexError::NotIndexed { .. })));
    }

    #[test]
    fn remove_content_clears_links() {
        let index = AudienceIndex::new();
        let group = GroupId::new();
        let content = ContentId::new();
        index.index_content(content, &[group]);

        index.remove_content(content);

        assert!(index.groups_of(content).is_none());
        assert!(index.content_referencing(group).is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn snapshot_does_not_track_later_mutation() {
        let index = AudienceIndex::new();
        let group = GroupId::new();
        let content = ContentId::new();
        index.index_content(content, &[group]);

        let snapshot = index.content_referencing(group);
        index.remove_content(content);

        assert_eq!(snapshot, vec![content]);
        assert!(index.content_referencing(group).is_empty());
    }
}
