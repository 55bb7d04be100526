/*!
 * Resident Set
 * Processes currently occupying memory, keyed by block start address
 */

use super::types::RunningProcess;
use crate::core::types::{Address, Tick};
use crate::memory::{Allocator, MemoryBlock, MemoryError, MemoryResult, Relocation, RelocationObserver};
use ahash::RandomState;
use log::{debug, error};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ResidentSet {
    by_start: HashMap<Address, RunningProcess, RandomState>,
}

impl ResidentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, process: RunningProcess) {
        if let Some(previous) = self.by_start.insert(process.start, process) {
            error!(
                "PID {} replaced resident PID {} at address {}",
                process.pid, previous.pid, process.start
            );
        }
    }

    pub fn get(&self, start: Address) -> Option<&RunningProcess> {
        self.by_start.get(&start)
    }

    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }

    /// Residents ordered by start address
    pub fn sorted(&self) -> Vec<RunningProcess> {
        let mut residents: Vec<_> = self.by_start.values().copied().collect();
        residents.sort_by_key(|r| r.start);
        residents
    }

    /// Free and remove every process whose finish time has been reached
    ///
    /// Returned in start-address order.
    pub fn expire<A: Allocator + ?Sized>(&mut self, now: Tick, memory: &mut A) -> Vec<RunningProcess> {
        let mut finished: Vec<RunningProcess> = self
            .by_start
            .values()
            .filter(|r| r.is_finished(now))
            .copied()
            .collect();
        finished.sort_by_key(|r| r.start);

        for process in &finished {
            self.by_start.remove(&process.start);
            if memory.deallocate(process.start).is_none() {
                error!(
                    "PID {} finished but no allocated block starts at {}",
                    process.pid, process.start
                );
            }
        }
        finished
    }

    /// Verify a one-to-one match between allocated blocks and residents
    pub fn check_against(&self, blocks: &[MemoryBlock]) -> MemoryResult<()> {
        let mut matched = 0;
        for block in blocks.iter().filter(|b| b.is_allocated()) {
            match self.by_start.get(&block.start) {
                Some(resident) if resident.size == block.size => matched += 1,
                Some(resident) => {
                    return Err(MemoryError::CorruptionDetected {
                        address: block.start,
                        reason: format!(
                            "block size {} does not match PID {} size {}",
                            block.size, resident.pid, resident.size
                        ),
                    })
                }
                None => {
                    return Err(MemoryError::CorruptionDetected {
                        address: block.start,
                        reason: "allocated block has no resident process".to_string(),
                    })
                }
            }
        }
        if matched != self.by_start.len() {
            return Err(MemoryError::CorruptionDetected {
                address: 0,
                reason: format!(
                    "{} residents but only {} allocated blocks",
                    self.by_start.len(),
                    matched
                ),
            });
        }
        Ok(())
    }
}

/// Moves are delivered in ascending order and always downward, so a target
/// key is never occupied by a resident that has not moved yet.
impl RelocationObserver for ResidentSet {
    fn relocate(&mut self, relocation: Relocation) {
        match self.by_start.remove(&relocation.from) {
            Some(mut resident) => {
                debug!(
                    "PID {} relocated from {} to {}",
                    resident.pid, relocation.from, relocation.to
                );
                resident.start = relocation.to;
                self.by_start.insert(relocation.to, resident);
            }
            None => error!(
                "Compaction moved block at {} but no resident owns it",
                relocation.from
            ),
        }
    }
}
