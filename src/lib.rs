pub mod backing_store;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod stats;
pub mod tlb;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use constants::*;
pub use error::{Result, VmError};
pub use translation::{LogicalAddress, Outcome, Translation};
pub use vm_manager::{VmConfig, VmManager};
