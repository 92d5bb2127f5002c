pub const OFFSET_BITS: u32 = 8;
pub const PAGE_BITS: u32 = 8;

pub const PAGE_SIZE: usize = 1 << OFFSET_BITS;
pub const PT_SIZE: usize = 1 << PAGE_BITS;

pub const FRAME_SIZE: usize = PAGE_SIZE;
pub const NUM_FRAMES: usize = 256;
pub const PM_SIZE: usize = NUM_FRAMES * FRAME_SIZE;

pub const TLB_ENTRIES: usize = 16;

// largest value a logical address may take (16-bit address space)
pub const MAX_LOGICAL_ADDRESS: u32 = (1 << (PAGE_BITS + OFFSET_BITS)) - 1;

pub const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;
pub const PAGE_MASK: u32 = (1 << PAGE_BITS) - 1;
pub const PAGE_SHIFT: u32 = OFFSET_BITS;
