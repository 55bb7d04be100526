/*!
 * Block List
 * Ordered, contiguous partition of the simulated address space
 *
 * Blocks live in a `Vec` sorted by start address. Outside code never holds an
 * index across a mutation; the start address is the only stable handle.
 */

use super::types::{BlockStatus, MemoryBlock, MemoryError, MemoryResult};
use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockList {
    blocks: Vec<MemoryBlock>,
}

impl BlockList {
    /// Single free block covering `[0, total)`
    pub fn new(total: Size) -> Self {
        debug_assert!(total > 0, "memory size must be positive");
        Self {
            blocks: vec![MemoryBlock::free(0, total)],
        }
    }

    /// Build a list from explicit blocks, rejecting layouts that break coverage
    pub fn from_blocks(blocks: Vec<MemoryBlock>, total: Size) -> MemoryResult<Self> {
        let list = Self { blocks };
        list.validate_coverage(total)?;
        Ok(list)
    }

    pub fn blocks(&self) -> &[MemoryBlock] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemoryBlock> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn total_free(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .sum()
    }

    pub fn total_allocated(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_allocated())
            .map(|b| b.size)
            .sum()
    }

    pub fn largest_free(&self) -> Size {
        self.blocks
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0)
    }

    /// Index of the lowest-addressed free block holding at least `size`
    pub fn find_first_fit(&self, size: Size) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.is_free() && b.size >= size)
    }

    /// Index of the allocated block starting exactly at `start`
    pub fn find_allocated(&self, start: Address) -> Option<usize> {
        self.blocks
            .binary_search_by_key(&start, |b| b.start)
            .ok()
            .filter(|&idx| self.blocks[idx].is_allocated())
    }

    /// Carve `size` units off the front of the free block at `index` and mark them allocated
    ///
    /// Any remainder stays behind as a new free block directly after it.
    pub fn split_and_mark(&mut self, index: usize, size: Size) -> MemoryResult<Address> {
        if size == 0 {
            return Err(MemoryError::InvalidSize(size));
        }
        let block = self.blocks.get_mut(index).ok_or(MemoryError::InvalidBlock {
            index,
            reason: "index out of range",
        })?;
        if !block.is_free() {
            return Err(MemoryError::InvalidBlock {
                index,
                reason: "block is already allocated",
            });
        }
        if block.size < size {
            return Err(MemoryError::InvalidBlock {
                index,
                reason: "block is smaller than the request",
            });
        }

        let start = block.start;
        let remainder = block.size - size;
        block.size = size;
        block.status = BlockStatus::Allocated;

        if remainder > 0 {
            self.blocks
                .insert(index + 1, MemoryBlock::free(start + size, remainder));
        }
        Ok(start)
    }

    /// Coalesce every run of consecutive free blocks, returning how many blocks were absorbed
    pub fn merge_adjacent_free(&mut self) -> usize {
        let before = self.blocks.len();
        self.blocks.dedup_by(|next, prev| {
            if prev.is_free() && next.is_free() {
                prev.size += next.size;
                true
            } else {
                false
            }
        });
        before - self.blocks.len()
    }

    /// Free the allocated block at `start` and coalesce
    ///
    /// Returns the freed size, or `None` when no allocated block starts there.
    pub fn deallocate(&mut self, start: Address) -> Option<Size> {
        let idx = self.find_allocated(start)?;
        let block = &mut self.blocks[idx];
        block.status = BlockStatus::Free;
        let size = block.size;
        self.merge_adjacent_free();
        Some(size)
    }

    /// Swap in a fully built replacement list
    pub(super) fn replace(&mut self, blocks: Vec<MemoryBlock>) {
        self.blocks = blocks;
    }

    /// Check contiguity, coverage of `[0, total)` and positive sizes
    pub fn validate_coverage(&self, total: Size) -> MemoryResult<()> {
        let mut expected = 0;
        for block in &self.blocks {
            if block.start != expected {
                return Err(MemoryError::CorruptionDetected {
                    address: block.start,
                    reason: format!("expected block to start at {}", expected),
                });
            }
            if block.size == 0 {
                return Err(MemoryError::CorruptionDetected {
                    address: block.start,
                    reason: "zero-size block".to_string(),
                });
            }
            expected = block.end();
        }
        if expected != total {
            return Err(MemoryError::CorruptionDetected {
                address: expected,
                reason: format!("blocks cover {} of {} units", expected, total),
            });
        }
        Ok(())
    }

    /// Full integrity check: coverage plus maximal free blocks
    pub fn validate(&self, total: Size) -> MemoryResult<()> {
        self.validate_coverage(total)?;
        if let Some(pair) = self
            .blocks
            .windows(2)
            .find(|pair| pair[0].is_free() && pair[1].is_free())
        {
            return Err(MemoryError::CorruptionDetected {
                address: pair[1].start,
                reason: "adjacent free blocks were not coalesced".to_string(),
            });
        }
        Ok(())
    }
}
