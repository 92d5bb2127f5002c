//! Property-based tests for the translation session.
//!
//! Uses proptest to check the session invariants across random address streams.

use std::collections::HashSet;
use std::io::Cursor;

use proptest::prelude::*;

use vmm_sim::backing_store::BackingStore;
use vmm_sim::page_table::PageTableEntry;
use vmm_sim::tlb::Tlb;
use vmm_sim::{Outcome, VmConfig, VmManager, VmError, PAGE_SIZE, PT_SIZE};

// ============================================================================
// Helpers
// ============================================================================

fn session(config: &VmConfig) -> VmManager<Cursor<Vec<u8>>> {
    let data: Vec<u8> = (0..PT_SIZE * PAGE_SIZE)
        .map(|i| (i.wrapping_mul(31) ^ (i >> 8)) as u8)
        .collect();
    VmManager::new(BackingStore::new(Cursor::new(data)).unwrap(), config).unwrap()
}

fn any_config() -> impl Strategy<Value = VmConfig> {
    (any::<bool>(), 1usize..32).prop_map(|(tlb_enabled, tlb_entries)| VmConfig {
        tlb_enabled,
        tlb_entries,
        ..VmConfig::default()
    })
}

/// Addresses drawn from a small set of pages so hits are common
fn address_stream() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec((0u32..40, 0u32..256).prop_map(|(p, d)| p * 256 + d), 0..400)
}

// ============================================================================
// Session Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_outcomes_are_conserved(config in any_config(), addresses in address_stream()) {
        let mut vm = session(&config);
        vm.translate_all(addresses.iter().copied()).unwrap();

        let s = vm.stats();
        prop_assert_eq!(s.total, addresses.len());
        prop_assert_eq!(s.tlb_hits + s.page_table_hits + s.page_faults, s.total);
        if !config.tlb_enabled {
            prop_assert_eq!(s.tlb_hits, 0);
        }
    }

    #[test]
    fn prop_each_page_faults_once(config in any_config(), addresses in address_stream()) {
        let mut vm = session(&config);
        let results = vm.translate_all(addresses.iter().copied()).unwrap();

        let mut seen = HashSet::new();
        for t in &results {
            let first = seen.insert(t.logical.page());
            prop_assert_eq!(t.outcome == Outcome::PageFault, first);
        }
        prop_assert_eq!(vm.stats().page_faults, seen.len());
        prop_assert_eq!(vm.frames_in_use(), seen.len());
    }

    #[test]
    fn prop_mappings_never_change(config in any_config(), addresses in address_stream()) {
        let mut vm = session(&config);
        let results = vm.translate_all(addresses.iter().copied()).unwrap();

        for t in &results {
            prop_assert_eq!(
                vm.page_table().get(t.logical.page()).unwrap(),
                PageTableEntry::Frame(t.frame)
            );
            prop_assert_eq!(t.physical, t.frame * PAGE_SIZE + t.logical.offset());
        }
    }

    #[test]
    fn prop_replay_is_deterministic(config in any_config(), addresses in address_stream()) {
        let mut a = session(&config);
        let mut b = session(&config);

        let ra = a.translate_all(addresses.iter().copied()).unwrap();
        let rb = b.translate_all(addresses.iter().copied()).unwrap();
        prop_assert_eq!(ra, rb);
        prop_assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn prop_tlb_results_match_page_table_only(addresses in address_stream()) {
        let mut with_tlb = session(&VmConfig::default());
        let mut without = session(&VmConfig { tlb_enabled: false, ..VmConfig::default() });

        let ra = with_tlb.translate_all(addresses.iter().copied()).unwrap();
        let rb = without.translate_all(addresses.iter().copied()).unwrap();
        for (a, b) in ra.iter().zip(&rb) {
            prop_assert_eq!(a.physical, b.physical);
            prop_assert_eq!(a.value, b.value);
        }
        prop_assert_eq!(with_tlb.stats().page_faults, without.stats().page_faults);
    }

    #[test]
    fn prop_exhaustion_is_reported(frames in 1usize..16, extra in 1usize..8) {
        let config = VmConfig { frame_count: frames, ..VmConfig::default() };
        let mut vm = session(&config);

        for page in 0..frames as u32 {
            vm.translate(page * 256).unwrap();
        }
        for page in frames..frames + extra {
            let is_exhausted = matches!(
                vm.translate(page as u32 * 256),
                Err(VmError::FramesExhausted { .. })
            );
            prop_assert!(is_exhausted);
        }
        for page in 0..frames {
            prop_assert_eq!(vm.page_table().get(page).unwrap(), PageTableEntry::Frame(page));
        }
    }
}

// ============================================================================
// TLB Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_tlb_keeps_last_inserted_pages(capacity in 1usize..20, count in 0usize..60) {
        let mut tlb = Tlb::new(capacity);
        for page in 0..count {
            tlb.insert(page, page * 2);
        }

        let kept: Vec<usize> = tlb.entries().map(|e| e.page).collect();
        let expected: Vec<usize> = (count.saturating_sub(capacity)..count).collect();
        prop_assert_eq!(kept, expected);
        prop_assert!(tlb.len() <= capacity);
    }
}
