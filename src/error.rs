//! Error types for the translation session.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, VmError>;

#[derive(Error, Debug)]
pub enum VmError {
    /// An address line that is not a non-negative decimal integer
    #[error("Invalid input on line {line}: {content:?}")]
    InvalidInput { line: usize, content: String },

    /// Value outside the 16-bit logical address space
    #[error("Logical address {0} is outside the address space")]
    InvalidAddress(u32),

    #[error("Page number {0} exceeds page table size")]
    PageOutOfRange(usize),

    #[error("Frame number {0} exceeds physical memory")]
    FrameOutOfRange(usize),

    /// Every frame of the pool has already been handed out
    #[error("All {frames} physical frames are in use")]
    FramesExhausted { frames: usize },

    #[error("Backing store too small for page {page}: need {required} bytes, have {available}")]
    BackingStoreTooSmall {
        page: usize,
        required: u64,
        available: u64,
    },

    #[error("Page {page} is already mapped to frame {frame}")]
    AlreadyMapped { page: usize, frame: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to open backing store file {}: {source}", .path.display())]
    OpenBackingStore {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unable to open address file {}: {source}", .path.display())]
    OpenAddressList {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
