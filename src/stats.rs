use std::fmt;

use crate::translation::Outcome;

/// Running counts of translation outcomes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub tlb_hits: usize,
    pub page_table_hits: usize,
    pub page_faults: usize,
    pub total: usize,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::TlbHit => self.tlb_hits += 1,
            Outcome::PageTableHit => self.page_table_hits += 1,
            Outcome::PageFault => self.page_faults += 1,
        }
        self.total += 1;
    }

    /// Page faults as a percentage of addresses processed
    pub fn page_fault_rate(&self) -> f64 {
        percentage(self.page_faults, self.total)
    }

    /// TLB hits as a percentage of addresses processed
    pub fn tlb_hit_rate(&self) -> f64 {
        percentage(self.tlb_hits, self.total)
    }

    /// Summary block printed after the last result line.
    /// TLB figures are only included when the TLB was in use.
    pub fn summary(&self, tlb_enabled: bool) -> Summary<'_> {
        Summary {
            stats: self,
            tlb_enabled,
        }
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

pub struct Summary<'a> {
    stats: &'a Stats,
    tlb_enabled: bool,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Page Faults: {}", self.stats.page_faults)?;
        write!(f, "Page Fault Rate: {:.2}%", self.stats.page_fault_rate())?;
        if self.tlb_enabled {
            writeln!(f)?;
            writeln!(f)?;
            writeln!(f, "TLB Hits: {}", self.stats.tlb_hits)?;
            write!(f, "TLB Hit Rate: {:.2}%", self.stats.tlb_hit_rate())?;
        }
        Ok(())
    }
}
