//! Bounded, URL-deduplicated mention retention.

use brandpulse_core::Mention;

/// Maximum number of mentions retained after any mutation.
pub const MAX_RETAINED: usize = 100;

/// Ordered set of classified mentions for the active brand,
/// most-recent-first by merge order (not by timestamp).
///
/// Retained mentions have unique `url`s; the bound is [`MAX_RETAINED`].
/// Mutations are synchronous and non-suspending — atomicity toward
/// concurrent readers is the tracker's job.
#[derive(Debug, Default)]
pub struct MentionStore {
    mentions: Vec<Mention>,
}

impl MentionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mentions(&self) -> &[Mention] {
        &self.mentions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mentions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty()
    }

    /// Discard all prior content and install `mentions` wholesale.
    ///
    /// No dedup is applied: a monitor-start batch comes from distinct
    /// providers and is trusted to be distinct. The retention bound still
    /// holds.
    pub fn replace(&mut self, mentions: Vec<Mention>) {
        self.mentions = mentions;
        self.mentions.truncate(MAX_RETAINED);
    }

    /// Merge candidates into the store, front-inserting each one (in input
    /// order) unless a retained mention already has its `url`, then trim to
    /// the retention bound. Returns how many candidates were actually added.
    ///
    /// An empty candidate list is a no-op.
    pub fn merge_incoming(&mut self, candidates: Vec<Mention>) -> usize {
        let mut added = 0;
        for candidate in candidates {
            let exists = self.mentions.iter().any(|m| m.url == candidate.url);
            if !exists {
                self.mentions.insert(0, candidate);
                added += 1;
            }
        }
        self.mentions.truncate(MAX_RETAINED);
        added
    }
}
