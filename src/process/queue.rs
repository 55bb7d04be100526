/*!
 * Admission Queue
 * Processes that could not be placed on arrival, retried once per tick
 *
 * Each entry runs a small state machine per tick:
 *
 * ```text
 * Waiting -> Retrying{0} -> Retrying{1} -> Retrying{2} -> StillWaiting
 *                 |              |              |
 *                 +--------------+--------------+--> Placed
 * ```
 *
 * A round stops the machine immediately when total free memory is below the
 * request; only a fragmentation failure compacts and moves to the next round.
 */

use super::resident::ResidentSet;
use super::types::{Process, RunningProcess, WaitingProcess};
use crate::core::limits::MAX_PLACEMENT_ROUNDS;
use crate::core::types::{Address, Pid, Tick};
use crate::memory::{CompactionSummary, ManagedMemory};
use log::debug;
use serde::{Deserialize, Serialize};

/// Per-entry retry state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Waiting,
    Retrying { round: u8 },
    Placed { start: Address, rounds: u8 },
    StillWaiting,
}

/// A waiting process that found a home this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub running: RunningProcess,
    /// Rounds used within this tick (1-based)
    pub rounds: u8,
    /// Failed ticks before this one
    pub prior_attempts: u32,
}

/// Compaction triggered while retrying `pid`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggeredCompaction {
    pub pid: Pid,
    pub summary: CompactionSummary,
}

/// Result of one `retry_all` pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetryOutcome {
    pub placements: Vec<Placement>,
    pub compactions: Vec<TriggeredCompaction>,
    /// Entries left waiting, with their updated attempt counts
    pub still_waiting: Vec<WaitingProcess>,
}

#[derive(Debug, Clone, Default)]
pub struct AdmissionQueue {
    entries: Vec<WaitingProcess>,
}

impl AdmissionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the back with zero attempts
    pub fn enqueue(&mut self, process: Process) {
        debug!(
            "Process {} (size {}) added to admission queue at position {}",
            process.pid,
            process.size,
            self.entries.len()
        );
        self.entries.push(WaitingProcess::new(process));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WaitingProcess> {
        self.entries.iter()
    }

    /// Retry every entry in queue order
    ///
    /// Placed entries leave the queue and join `residents`; the rest keep their
    /// position with one more attempt recorded.
    pub fn retry_all<M: ManagedMemory + ?Sized>(
        &mut self,
        now: Tick,
        memory: &mut M,
        residents: &mut ResidentSet,
    ) -> RetryOutcome {
        let mut outcome = RetryOutcome::default();
        let entries = std::mem::take(&mut self.entries);

        for mut entry in entries {
            match Self::run_rounds(&entry, memory, residents, &mut outcome.compactions) {
                RetryState::Placed { start, rounds } => {
                    let running = RunningProcess::place(&entry.process, start, now);
                    residents.insert(running);
                    debug!(
                        "Process {} placed at {} after {} prior attempts",
                        entry.process.pid, start, entry.attempts
                    );
                    outcome.placements.push(Placement {
                        running,
                        rounds,
                        prior_attempts: entry.attempts,
                    });
                }
                _ => {
                    entry.attempts += 1;
                    outcome.still_waiting.push(entry);
                    self.entries.push(entry);
                }
            }
        }

        outcome
    }

    /// Drive one entry's state machine to a terminal state
    fn run_rounds<M: ManagedMemory + ?Sized>(
        entry: &WaitingProcess,
        memory: &mut M,
        residents: &mut ResidentSet,
        compactions: &mut Vec<TriggeredCompaction>,
    ) -> RetryState {
        let process = &entry.process;
        let mut state = RetryState::Waiting;

        loop {
            state = match state {
                RetryState::Waiting => RetryState::Retrying { round: 0 },
                RetryState::Retrying { round } if round >= MAX_PLACEMENT_ROUNDS => {
                    RetryState::StillWaiting
                }
                RetryState::Retrying { round } => {
                    let free = memory.total_free();
                    if free < process.size {
                        debug!(
                            "Process {}: insufficient total memory ({} < {})",
                            process.pid, free, process.size
                        );
                        RetryState::StillWaiting
                    } else {
                        match memory.allocate(process.size) {
                            Ok(start) => RetryState::Placed {
                                start,
                                rounds: round + 1,
                            },
                            Err(err) => {
                                debug!(
                                    "Process {} round {}: {}; compacting",
                                    process.pid,
                                    round + 1,
                                    err
                                );
                                let summary = memory.compact(residents);
                                compactions.push(TriggeredCompaction {
                                    pid: process.pid,
                                    summary,
                                });
                                RetryState::Retrying { round: round + 1 }
                            }
                        }
                    }
                }
                terminal => return terminal,
            };
        }
    }
}
