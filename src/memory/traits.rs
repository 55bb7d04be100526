/*!
 * Memory Traits
 * Memory management abstractions
 */

use super::types::*;
use crate::core::types::{Address, Size};

/// Memory allocator interface
pub trait Allocator {
    /// Place a request of `size` units, returning the start address
    fn allocate(&mut self, size: Size) -> MemoryResult<Address>;

    /// Free the allocated block starting at `address`
    ///
    /// Unknown or already free addresses are ignored and return `None`.
    fn deallocate(&mut self, address: Address) -> Option<Size>;

    /// Sum of all free block sizes
    fn total_free(&self) -> Size;

    /// Check if an address is the start of an allocated block
    fn is_allocated(&self, address: Address) -> bool;

    /// Get the size of the block starting at `address`
    fn block_size(&self, address: Address) -> Option<Size>;
}

/// Receives block moves performed by compaction
pub trait RelocationObserver {
    fn relocate(&mut self, relocation: Relocation);
}

/// Collects relocations in order
impl RelocationObserver for Vec<Relocation> {
    fn relocate(&mut self, relocation: Relocation) {
        self.push(relocation);
    }
}

/// Whole-memory defragmentation
pub trait Compactor {
    /// Pack every allocated block to the bottom of memory
    fn compact(&mut self, observer: &mut dyn RelocationObserver) -> CompactionSummary;
}

/// Memory statistics provider
pub trait MemoryInfo {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);
}

/// Combined interface the admission queue drives
pub trait ManagedMemory: Allocator + Compactor + MemoryInfo {}

/// Implement ManagedMemory for types that implement all required traits
impl<T> ManagedMemory for T where T: Allocator + Compactor + MemoryInfo {}
