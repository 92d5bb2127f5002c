use std::fmt;

use crate::constants::*;
use crate::error::{Result, VmError};

/// Represents the decomposed components of a logical address.
///
/// Only [`LogicalAddress::new`] builds one, so `page < PT_SIZE` and
/// `offset < PAGE_SIZE` always hold:
///
/// ```compile_fail
/// use vmm_sim::LogicalAddress;
/// let la = LogicalAddress { raw: 7, page: 0, offset: 300 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalAddress {
    raw: u32,
    page: usize,
    offset: usize,
}

impl LogicalAddress {
    /// Decompose a raw address into page number and offset.
    /// Fails if the value does not fit the 16-bit address space.
    pub fn new(raw: u32) -> Result<Self> {
        if raw > MAX_LOGICAL_ADDRESS {
            return Err(VmError::InvalidAddress(raw));
        }

        let page = ((raw >> PAGE_SHIFT) & PAGE_MASK) as usize;
        let offset = (raw & OFFSET_MASK) as usize;

        Ok(LogicalAddress { raw, page, offset })
    }

    #[inline]
    pub fn raw(&self) -> u32 {
        self.raw
    }

    #[inline]
    pub fn page(&self) -> usize {
        self.page
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for LogicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LA({}) = (p={}, d={})", self.raw, self.page, self.offset)
    }
}

/// Where a translation was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TlbHit,
    PageTableHit,
    PageFault,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::TlbHit => "TLB hit",
            Outcome::PageTableHit => "page table hit",
            Outcome::PageFault => "page fault",
        };
        f.write_str(s)
    }
}

/// Result of translating one logical address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub logical: LogicalAddress,
    pub frame: usize,
    pub physical: usize,
    /// byte stored at the physical address, as a signed value
    pub value: i8,
    pub outcome: Outcome,
}

impl Translation {
    /// PA = frame * FRAME_SIZE + offset
    #[inline]
    pub fn physical_address(frame: usize, offset: usize) -> usize {
        frame * FRAME_SIZE + offset
    }
}

/// One output line per translated address
impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Logical Address: {}, Physical Address: {}, Value: {}",
            self.logical.raw(), self.physical, self.value
        )
    }
}
