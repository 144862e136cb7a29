//! Orphan candidate queue
//!
//! Durable FIFO of content identifiers awaiting reclamation. Consumers
//! work in claim/commit chunks: `claim` reads up to `max` identifiers from
//! the front without removing them, `commit` advances past them once the
//! chunk fully succeeded. An uncommitted chunk is handed out again by the
//! next `claim`, so a failed chunk is retried in full and no
//! partial-chunk state is ever visible in the queue.

use cohort_types::ContentId;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// FIFO of orphan-candidate content identifiers
#[derive(Debug, Default)]
pub struct OrphanQueue {
    items: Mutex<VecDeque<ContentId>>,
}

impl OrphanQueue {
    /// Create empty queue
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Append one candidate
    pub fn enqueue(&self, content: ContentId) {
        self.items.lock().push_back(content);
    }

    /// Append candidates in order
    pub fn enqueue_all(&self, contents: impl IntoIterator<Item = ContentId>) {
        let mut items = self.items.lock();
        items.extend(contents);
    }

    /// Read up to `max` candidates from the front without removing them
    #[must_use]
    pub fn claim(&self, max: usize) -> Vec<ContentId> {
        let items = self.items.lock();
        items.iter().take(max).copied().collect()
    }

    /// Advance past the first `n` candidates
    ///
    /// Returns the number actually removed.
    pub fn commit(&self, n: usize) -> usize {
        let mut items = self.items.lock();
        let n = n.min(items.len());
        items.drain(..n);
        n
    }

    /// Number of queued candidates
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Check if queue is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}
