/*!
 * Memory Compaction
 * Slides every allocated block to the bottom of memory
 */

use super::MemoryManager;
use crate::memory::traits::RelocationObserver;
use crate::memory::types::{CompactionSummary, MemoryBlock, Relocation};
use log::info;

impl MemoryManager {
    /// Pack allocated blocks from address 0 in their current order, leaving one trailing free block
    ///
    /// The replacement list is built in full before it is swapped in. Each moved block is
    /// reported to `observer` in ascending address order.
    pub fn compact(&mut self, observer: &mut dyn RelocationObserver) -> CompactionSummary {
        let mut packed: Vec<MemoryBlock> = Vec::with_capacity(self.blocks.len());
        let mut moves: Vec<Relocation> = Vec::new();
        let mut cursor = 0;

        for block in self.blocks.iter().filter(|b| b.is_allocated()) {
            if block.start != cursor {
                moves.push(Relocation {
                    from: block.start,
                    to: cursor,
                    size: block.size,
                });
            }
            packed.push(MemoryBlock::allocated(cursor, block.size));
            cursor += block.size;
        }

        let free_after = self.total_memory - cursor;
        if free_after > 0 {
            packed.push(MemoryBlock::free(cursor, free_after));
        }

        for relocation in &moves {
            observer.relocate(*relocation);
        }
        self.blocks.replace(packed);
        self.compactions += 1;

        let summary = CompactionSummary {
            moved_blocks: moves.len(),
            bytes_moved: moves.iter().map(|m| m.size).sum(),
            free_after,
        };
        info!(
            "Compaction complete: moved {} blocks ({} units), {} units free in one block",
            summary.moved_blocks, summary.bytes_moved, summary.free_after
        );
        summary
    }
}
