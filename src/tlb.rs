//! Translation lookaside buffer with first-in, first-out replacement.

use std::collections::VecDeque;

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlbEntry {
    pub page: usize,
    pub frame: usize,
}

/// Fixed-capacity FIFO cache of page -> frame mappings.
///
/// A hit does not reorder anything; when full, the entry inserted earliest
/// is the one evicted, however recently it was used.
#[derive(Debug, Clone)]
pub struct Tlb {
    entries: VecDeque<TlbEntry>,
    capacity: usize,
}

impl Tlb {
    pub fn new(capacity: usize) -> Self {
        Tlb {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Look up the frame cached for `page`
    pub fn lookup(&self, page: usize) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.page == page)
            .map(|entry| entry.frame)
    }

    /// Insert a mapping, evicting the oldest entry when full.
    ///
    /// Returns the evicted entry, if any. Inserting a page that is already
    /// cached leaves the cache unchanged.
    pub fn insert(&mut self, page: usize, frame: usize) -> Option<TlbEntry> {
        debug_assert!(self.lookup(page).is_none(), "page {} already cached", page);
        if self.capacity == 0 || self.lookup(page).is_some() {
            return None;
        }

        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        if let Some(old) = evicted {
            trace!("tlb evicted page {} (frame {})", old.page, old.frame);
        }

        self.entries.push_back(TlbEntry { page, frame });
        evicted
    }

    /// Entries in insertion order, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &TlbEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
