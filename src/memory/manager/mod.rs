/*!
 * Memory Management
 *
 * Contiguous-allocation memory manager over a single simulated address space.
 *
 * ## Placement
 *
 * Uses **first-fit** over an address-ordered block list:
 * - The lowest-addressed free block that is large enough is chosen
 * - Oversized blocks are split; the remainder stays free right after the allocation
 * - Allocation is all-or-nothing, one contiguous region per request
 *
 * ## Reclamation
 *
 * - **Coalescing**: every deallocation merges adjacent free blocks immediately
 * - **Compaction**: on demand, all allocated blocks slide to address 0 and the
 *   free space collects into one trailing block; observers learn every move
 * - **Memory pressure tracking**: allocations log at 60%, 80% and 95% usage
 */

mod allocator;
mod compactor;

use super::block_list::BlockList;
use super::traits::{Allocator, Compactor, MemoryInfo, RelocationObserver};
use super::types::{CompactionSummary, MemoryBlock, MemoryResult, MemoryStats};
use crate::core::types::{Address, Size};
use log::info;

/// Memory manager
#[derive(Debug, Clone)]
pub struct MemoryManager {
    pub(super) blocks: BlockList,
    pub(super) total_memory: Size,
    pub(super) compactions: usize,
}

impl MemoryManager {
    /// Create memory manager with one free block spanning `total` units
    pub fn with_capacity(total: Size) -> Self {
        info!(
            "Memory manager initialized with {} units and first-fit block list allocator",
            total
        );
        Self {
            blocks: BlockList::new(total),
            total_memory: total,
            compactions: 0,
        }
    }

    /// Adopt an existing layout (useful for testing specific fragmentation patterns)
    pub fn from_blocks(blocks: Vec<MemoryBlock>, total: Size) -> MemoryResult<Self> {
        let blocks = BlockList::from_blocks(blocks, total)?;
        Ok(Self {
            blocks,
            total_memory: total,
            compactions: 0,
        })
    }

    pub fn total_memory(&self) -> Size {
        self.total_memory
    }

    pub fn block_list(&self) -> &BlockList {
        &self.blocks
    }

    /// Ordered copy of the current layout for reporting
    pub fn snapshot(&self) -> Vec<MemoryBlock> {
        self.blocks.blocks().to_vec()
    }

    pub fn total_free(&self) -> Size {
        self.blocks.total_free()
    }

    /// Number of compaction passes run so far
    pub fn compactions(&self) -> usize {
        self.compactions
    }

    /// Verify coverage and coalescing invariants
    pub fn check_integrity(&self) -> MemoryResult<()> {
        self.blocks.validate(self.total_memory)
    }

    pub fn stats(&self) -> MemoryStats {
        let available = self.blocks.total_free();
        let used = self.total_memory - available;
        let (allocated_blocks, free_blocks) =
            self.blocks.iter().fold((0, 0), |(alloc, free), b| {
                if b.is_allocated() {
                    (alloc + 1, free)
                } else {
                    (alloc, free + 1)
                }
            });

        MemoryStats {
            total_memory: self.total_memory,
            used_memory: used,
            available_memory: available,
            usage_percentage: (used as f64 / self.total_memory as f64) * 100.0,
            allocated_blocks,
            free_blocks,
            largest_free_block: self.blocks.largest_free(),
        }
    }

    pub fn info(&self) -> (Size, Size, Size) {
        let available = self.blocks.total_free();
        (
            self.total_memory,
            self.total_memory - available,
            available,
        )
    }
}

// Implement trait interfaces
impl Allocator for MemoryManager {
    fn allocate(&mut self, size: Size) -> MemoryResult<Address> {
        MemoryManager::allocate(self, size)
    }

    fn deallocate(&mut self, address: Address) -> Option<Size> {
        MemoryManager::deallocate(self, address)
    }

    fn total_free(&self) -> Size {
        self.blocks.total_free()
    }

    fn is_allocated(&self, address: Address) -> bool {
        self.blocks.find_allocated(address).is_some()
    }

    fn block_size(&self, address: Address) -> Option<Size> {
        self.blocks
            .blocks()
            .binary_search_by_key(&address, |b| b.start)
            .ok()
            .map(|idx| self.blocks.blocks()[idx].size)
    }
}

impl Compactor for MemoryManager {
    fn compact(&mut self, observer: &mut dyn RelocationObserver) -> CompactionSummary {
        MemoryManager::compact(self, observer)
    }
}

impl MemoryInfo for MemoryManager {
    fn stats(&self) -> MemoryStats {
        MemoryManager::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        MemoryManager::info(self)
    }
}
