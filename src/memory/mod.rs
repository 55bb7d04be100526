/*!
 * Memory Module
 * Block list, first-fit allocation and compaction
 */

pub mod block_list;
pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use block_list::BlockList;
pub use manager::MemoryManager;
pub use traits::*;
pub use types::*;
