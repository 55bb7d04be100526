/*!
 * Memory Allocator Implementation
 * First-fit allocation and deallocation logic
 */

use super::MemoryManager;
use crate::core::types::{Address, Size};
use crate::memory::types::{MemoryError, MemoryPressure, MemoryResult};
use log::{debug, info, warn};

impl MemoryManager {
    /// Allocate `size` units in the first free block that fits
    ///
    /// Nothing is mutated on failure; the error tells insufficiency apart from fragmentation.
    pub fn allocate(&mut self, size: Size) -> MemoryResult<Address> {
        if size == 0 {
            return Err(MemoryError::InvalidSize(size));
        }

        let Some(index) = self.blocks.find_first_fit(size) else {
            let available = self.blocks.total_free();
            if available < size {
                debug!(
                    "OOM: requested {} units, only {} available ({} total)",
                    size, available, self.total_memory
                );
                return Err(MemoryError::OutOfMemory {
                    requested: size,
                    available,
                    used: self.total_memory - available,
                    total: self.total_memory,
                });
            }

            let largest_free = self.blocks.largest_free();
            debug!(
                "Fragmented: requested {} units, {} free but largest block is {}",
                size, available, largest_free
            );
            return Err(MemoryError::Fragmented {
                requested: size,
                available,
                largest_free,
            });
        };

        let block_size = self.blocks.blocks()[index].size;
        let address = self.blocks.split_and_mark(index, size)?;
        if block_size > size {
            debug!(
                "Split block at {}: keeping {} units, {} units remain free at {}",
                address,
                size,
                block_size - size,
                address + size
            );
        }

        let used = self.total_memory - self.blocks.total_free();
        if let Some(level) = self.check_memory_pressure(used) {
            warn!(
                "Memory pressure {}: Allocated {} units at {} ({:.1}% used: {} / {})",
                level,
                size,
                address,
                (used as f64 / self.total_memory as f64) * 100.0,
                used,
                self.total_memory
            );
        } else {
            info!("Allocated {} units at {}", size, address);
        }

        Ok(address)
    }

    /// Free the block at `address` and coalesce with free neighbours
    pub fn deallocate(&mut self, address: Address) -> Option<Size> {
        match self.blocks.deallocate(address) {
            Some(size) => {
                info!(
                    "Deallocated {} units at {} ({} units now available)",
                    size,
                    address,
                    self.blocks.total_free()
                );
                Some(size)
            }
            None => {
                debug!(
                    "Ignoring deallocation of unknown or already free address {}",
                    address
                );
                None
            }
        }
    }

    /// Check memory pressure level
    pub(super) fn check_memory_pressure(&self, used: Size) -> Option<MemoryPressure> {
        match MemoryPressure::from_ratio(used as f64 / self.total_memory as f64) {
            MemoryPressure::Low => None,
            level => Some(level),
        }
    }
}
