use crate::constants::PT_SIZE;
use crate::error::{Result, VmError};

/// A single page table slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageTableEntry {
    #[default]
    Unmapped,
    Frame(usize),
}

impl PageTableEntry {
    #[inline]
    pub fn frame(&self) -> Option<usize> {
        match self {
            PageTableEntry::Frame(frame) => Some(*frame),
            PageTableEntry::Unmapped => None,
        }
    }
}

/// Direct-mapped page table: one entry per page number.
///
/// Entries are written once, on the page's first fault, and stay fixed for
/// the rest of the session.
pub struct PageTable {
    entries: Box<[PageTableEntry; PT_SIZE]>,
}

impl PageTable {
    pub fn new() -> Self {
        PageTable {
            entries: Box::new([PageTableEntry::Unmapped; PT_SIZE]),
        }
    }

    pub fn get(&self, page: usize) -> Result<PageTableEntry> {
        self.entries
            .get(page)
            .copied()
            .ok_or(VmError::PageOutOfRange(page))
    }

    /// Map `page` to `frame`. Remapping an already mapped page is rejected.
    pub fn set(&mut self, page: usize, frame: usize) -> Result<()> {
        let entry = self
            .entries
            .get_mut(page)
            .ok_or(VmError::PageOutOfRange(page))?;

        if let PageTableEntry::Frame(existing) = *entry {
            return Err(VmError::AlreadyMapped {
                page,
                frame: existing,
            });
        }

        *entry = PageTableEntry::Frame(frame);
        Ok(())
    }

    /// Number of pages currently mapped to a frame
    pub fn mapped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, PageTableEntry::Frame(_)))
            .count()
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initially_unmapped() {
        let pt = PageTable::new();
        assert_eq!(pt.mapped_count(), 0);
        for page in 0..PT_SIZE {
            assert_eq!(pt.get(page).unwrap(), PageTableEntry::Unmapped);
        }
    }

    #[test]
    fn test_set_then_get() {
        let mut pt = PageTable::new();
        pt.set(66, 3).unwrap();

        assert_eq!(pt.get(66).unwrap(), PageTableEntry::Frame(3));
        assert_eq!(pt.get(66).unwrap().frame(), Some(3));
        assert_eq!(pt.get(65).unwrap().frame(), None);
        assert_eq!(pt.mapped_count(), 1);
    }

    #[test]
    fn test_frame_zero_is_a_valid_mapping() {
        let mut pt = PageTable::new();
        pt.set(0, 0).unwrap();
        assert_eq!(pt.get(0).unwrap(), PageTableEntry::Frame(0));
    }

    #[test]
    fn test_remap_rejected() {
        let mut pt = PageTable::new();
        pt.set(10, 1).unwrap();

        assert!(matches!(
            pt.set(10, 2),
            Err(VmError::AlreadyMapped { page: 10, frame: 1 })
        ));
        // original mapping survives
        assert_eq!(pt.get(10).unwrap(), PageTableEntry::Frame(1));
    }

    #[test]
    fn test_bounds_checked() {
        let mut pt = PageTable::new();
        assert!(matches!(pt.get(256), Err(VmError::PageOutOfRange(256))));
        assert!(matches!(pt.set(300, 0), Err(VmError::PageOutOfRange(300))));
        assert!(pt.get(255).is_ok());
    }
}
