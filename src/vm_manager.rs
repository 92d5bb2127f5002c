use std::fs::File;
use std::io::{Read, Seek};

use log::{debug, info};

use crate::backing_store::BackingStore;
use crate::constants::*;
use crate::error::{Result, VmError};
use crate::memory::{FrameAllocator, PhysicalMemory};
use crate::page_table::{PageTable, PageTableEntry};
use crate::stats::Stats;
use crate::tlb::Tlb;
use crate::translation::{LogicalAddress, Outcome, Translation};

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// consult a TLB before the page table
    pub tlb_enabled: bool,
    pub tlb_entries: usize,
    /// number of physical frames, at most `NUM_FRAMES`
    pub frame_count: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        VmConfig {
            tlb_enabled: true,
            tlb_entries: TLB_ENTRIES,
            frame_count: NUM_FRAMES,
        }
    }
}

impl VmConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tlb_enabled && self.tlb_entries == 0 {
            return Err(VmError::InvalidConfig(
                "TLB must hold at least one entry".to_string(),
            ));
        }
        if self.frame_count == 0 || self.frame_count > NUM_FRAMES {
            return Err(VmError::InvalidConfig(format!(
                "frame count {} outside 1..={}",
                self.frame_count, NUM_FRAMES
            )));
        }
        Ok(())
    }
}

/// A translation session: owns physical memory, the page table, the TLB,
/// the backing store and the statistics for one run.
pub struct VmManager<S = File> {
    pm: PhysicalMemory,
    disk: BackingStore<S>,
    page_table: PageTable,
    frames: FrameAllocator,
    tlb: Option<Tlb>,
    stats: Stats,
}

impl<S: Read + Seek> VmManager<S> {
    pub fn new(disk: BackingStore<S>, config: &VmConfig) -> Result<Self> {
        config.validate()?;

        info!(
            "starting session: {} frames, TLB {}, backing store {} bytes",
            config.frame_count,
            if config.tlb_enabled {
                format!("{} entries", config.tlb_entries)
            } else {
                "disabled".to_string()
            },
            disk.len()
        );

        Ok(VmManager {
            pm: PhysicalMemory::with_frames(config.frame_count),
            disk,
            page_table: PageTable::new(),
            frames: FrameAllocator::new(config.frame_count),
            tlb: config.tlb_enabled.then(|| Tlb::new(config.tlb_entries)),
            stats: Stats::new(),
        })
    }

    /// Translate a raw logical address
    pub fn translate(&mut self, raw: u32) -> Result<Translation> {
        let la = LogicalAddress::new(raw)?;
        self.translate_address(la)
    }

    /// Resolve `la` through TLB -> page table -> backing store and read the
    /// byte it refers to.
    pub fn translate_address(&mut self, la: LogicalAddress) -> Result<Translation> {
        let (frame, outcome) = self.resolve(la.page())?;

        let physical = Translation::physical_address(frame, la.offset());
        let value = self.pm.read(physical)? as i8;

        self.stats.record(outcome);
        debug!("{} -> PA {} [frame {}, {}]", la, physical, frame, outcome);

        Ok(Translation {
            logical: la,
            frame,
            physical,
            value,
            outcome,
        })
    }

    /// Translate a batch of raw addresses in order, stopping at the first error
    pub fn translate_all<I>(&mut self, addresses: I) -> Result<Vec<Translation>>
    where
        I: IntoIterator<Item = u32>,
    {
        addresses
            .into_iter()
            .map(|raw| self.translate(raw))
            .collect()
    }

    fn resolve(&mut self, page: usize) -> Result<(usize, Outcome)> {
        if let Some(frame) = self.tlb.as_ref().and_then(|tlb| tlb.lookup(page)) {
            return Ok((frame, Outcome::TlbHit));
        }

        let (frame, outcome) = match self.page_table.get(page)? {
            PageTableEntry::Frame(frame) => (frame, Outcome::PageTableHit),
            PageTableEntry::Unmapped => (self.handle_page_fault(page)?, Outcome::PageFault),
        };

        if let Some(tlb) = self.tlb.as_mut() {
            tlb.insert(page, frame);
        }

        Ok((frame, outcome))
    }

    /// Load `page` from the backing store into a fresh frame and map it
    fn handle_page_fault(&mut self, page: usize) -> Result<usize> {
        self.disk.check_page(page)?;
        let frame = self.frames.allocate()?;
        self.disk.read_page(page, self.pm.frame_mut(frame)?)?;
        self.page_table.set(page, frame)?;

        debug!("page {} loaded into frame {}", page, frame);
        Ok(frame)
    }
}

impl<S> VmManager<S> {
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn tlb(&self) -> Option<&Tlb> {
        self.tlb.as_ref()
    }

    #[inline]
    pub fn tlb_enabled(&self) -> bool {
        self.tlb.is_some()
    }

    pub fn physical_memory(&self) -> &PhysicalMemory {
        &self.pm
    }

    /// Frames handed out so far
    pub fn frames_in_use(&self) -> usize {
        self.frames.allocated()
    }
}
