use crate::constants::*;
use crate::error::{Result, VmError};

/// Physical memory - a pool of fixed-size frames
pub struct PhysicalMemory {
    data: Box<[u8]>,
    frames: usize,
}

impl PhysicalMemory {
    /// Create a physical memory of `NUM_FRAMES` frames initialized to all zeros
    pub fn new() -> Self {
        Self::with_frames(NUM_FRAMES)
    }

    /// Create a physical memory holding `frames` frames
    pub fn with_frames(frames: usize) -> Self {
        // Use vec! to allocate on heap
        let data = vec![0u8; frames * FRAME_SIZE].into_boxed_slice();
        PhysicalMemory { data, frames }
    }

    /// Number of frames in the pool
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    /// Total size in bytes
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Read a byte from physical memory
    pub fn read(&self, address: usize) -> Result<u8> {
        self.data
            .get(address)
            .copied()
            .ok_or(VmError::FrameOutOfRange(address / FRAME_SIZE))
    }

    /// Get a frame's contents
    pub fn frame(&self, frame: usize) -> Result<&[u8]> {
        let start = Self::frame_to_address(frame);
        self.data
            .get(start..start + FRAME_SIZE)
            .ok_or(VmError::FrameOutOfRange(frame))
    }

    /// Get mutable access to a frame (for loading a page into it)
    pub fn frame_mut(&mut self, frame: usize) -> Result<&mut [u8; FRAME_SIZE]> {
        let start = Self::frame_to_address(frame);
        self.data
            .get_mut(start..start + FRAME_SIZE)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(VmError::FrameOutOfRange(frame))
    }

    /// Calculate the starting address of a frame
    #[inline]
    pub fn frame_to_address(frame: usize) -> usize {
        frame * FRAME_SIZE
    }
}

impl Default for PhysicalMemory {
    fn default() -> Self {
        Self::new()
    }
}

/// Hands out frames of the physical pool in order, each at most once.
///
/// There is no way to give a frame back: once every frame has been issued,
/// further allocations fail with [`VmError::FramesExhausted`].
#[derive(Debug, Clone)]
pub struct FrameAllocator {
    next: usize,
    total: usize,
}

impl FrameAllocator {
    pub fn new(total: usize) -> Self {
        FrameAllocator { next: 0, total }
    }

    /// Take the next free frame
    pub fn allocate(&mut self) -> Result<usize> {
        if self.next >= self.total {
            return Err(VmError::FramesExhausted { frames: self.total });
        }
        let frame = self.next;
        self.next += 1;
        Ok(frame)
    }

    /// Number of frames handed out so far
    #[inline]
    pub fn allocated(&self) -> usize {
        self.next
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.total - self.next
    }

    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }
}
