/*!
 * Simulation Driver
 * Owns all simulation state and advances the logical clock
 *
 * Every tick runs the same fixed sequence:
 * 1. Expire finished processes (deallocate, coalesce)
 * 2. Admit arrivals (reject oversized, place or enqueue)
 * 3. Retry the admission queue
 */

use super::events::{Event, EventLog, Payload};
use super::stats::{RunCounters, SimulationStats};
use crate::core::types::{Pid, Size, Tick};
use crate::memory::{MemoryBlock, MemoryManager, MemoryResult};
use crate::process::{
    AdmissionQueue, LifecycleTracker, Process, ProcessState, ResidentSet, RunningProcess,
    WaitingProcess,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span};
use uuid::Uuid;

/// State visible after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: Tick,
    pub blocks: Vec<MemoryBlock>,
    pub running: usize,
    pub waiting: usize,
}

/// Final outcome for one process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub pid: Pid,
    pub state: ProcessState,
}

/// Everything a finished run exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: String,
    pub memory_size: Size,
    /// True when the tick bound stopped the run before all work finished
    pub halted_early: bool,
    pub stats: SimulationStats,
    pub final_memory: Vec<MemoryBlock>,
    pub waiting: Vec<WaitingProcess>,
    pub outcomes: Vec<ProcessOutcome>,
    pub events: Vec<Event>,
}

pub struct Simulation {
    run_id: Uuid,
    memory: MemoryManager,
    /// Stable-sorted by arrival time
    processes: Vec<Process>,
    next_arrival: usize,
    residents: ResidentSet,
    queue: AdmissionQueue,
    lifecycle: LifecycleTracker,
    events: EventLog,
    counters: RunCounters,
    clock: Tick,
    max_ticks: Option<Tick>,
}

impl Simulation {
    pub fn new(memory_size: Size, mut processes: Vec<Process>) -> Self {
        // Vec::sort_by_key is stable, so ties keep input order
        processes.sort_by_key(|p| p.arrival_time);
        let lifecycle = LifecycleTracker::new(processes.iter().map(|p| p.pid));

        Self {
            run_id: Uuid::new_v4(),
            memory: MemoryManager::with_capacity(memory_size),
            processes,
            next_arrival: 0,
            residents: ResidentSet::new(),
            queue: AdmissionQueue::new(),
            lifecycle,
            events: EventLog::new(),
            counters: RunCounters::default(),
            clock: 0,
            max_ticks: None,
        }
    }

    /// Bound the run to `max_ticks` ticks
    pub fn with_max_ticks(mut self, max_ticks: Option<Tick>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    pub fn residents(&self) -> &ResidentSet {
        &self.residents
    }

    pub fn queue(&self) -> &AdmissionQueue {
        &self.queue
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn state_of(&self, pid: Pid) -> Option<ProcessState> {
        self.lifecycle.state(pid)
    }

    /// No arrivals left, nothing resident, nothing waiting
    pub fn is_finished(&self) -> bool {
        self.next_arrival == self.processes.len()
            && self.residents.is_empty()
            && self.queue.is_empty()
    }

    /// Check block coverage, coalescing and the block/resident correspondence
    pub fn check_invariants(&self) -> MemoryResult<()> {
        self.memory.check_integrity()?;
        self.residents.check_against(self.memory.block_list().blocks())
    }

    /// Run one tick and advance the clock
    pub fn step(&mut self) -> TickSnapshot {
        let now = self.clock;
        let _span = info_span!("tick", tick = now).entered();

        self.expire(now);
        self.admit_arrivals(now);
        self.retry_waiting(now);

        if let Err(e) = self.check_invariants() {
            error!(tick = now, error = %e, "Memory invariant violated");
        }

        self.clock += 1;
        TickSnapshot {
            tick: now,
            blocks: self.memory.snapshot(),
            running: self.residents.len(),
            waiting: self.queue.len(),
        }
    }

    /// Run to completion (or the tick bound)
    pub fn run(&mut self) -> SimulationReport {
        self.run_with(|_| {})
    }

    /// Run to completion, handing every tick's snapshot to `on_tick`
    pub fn run_with<F: FnMut(&TickSnapshot)>(&mut self, mut on_tick: F) -> SimulationReport {
        let span = info_span!("simulation", run_id = %self.run_id);
        let _guard = span.enter();
        info!(
            memory_size = self.memory.total_memory(),
            processes = self.processes.len(),
            "Simulation start"
        );

        let mut halted_early = false;
        while !self.is_finished() {
            if self.max_ticks.is_some_and(|max| self.clock >= max) {
                halted_early = true;
                info!(tick = self.clock, waiting = self.queue.len(), "Tick limit reached");
                break;
            }
            let snapshot = self.step();
            on_tick(&snapshot);
        }

        info!(ticks = self.clock, halted_early, "Simulation complete");
        self.report(halted_early)
    }

    /// Build the report for the current state
    pub fn report(&self, halted_early: bool) -> SimulationReport {
        SimulationReport {
            run_id: self.run_id.to_string(),
            memory_size: self.memory.total_memory(),
            halted_early,
            stats: SimulationStats::compute(
                &self.processes,
                self.counters,
                self.queue.len(),
                self.clock,
            ),
            final_memory: self.memory.snapshot(),
            waiting: self.queue.iter().copied().collect(),
            outcomes: self
                .lifecycle
                .iter()
                .map(|(pid, state)| ProcessOutcome { pid, state })
                .collect(),
            events: self.events.events().to_vec(),
        }
    }

    fn expire(&mut self, now: Tick) {
        for finished in self.residents.expire(now, &mut self.memory) {
            self.transition(finished.pid, ProcessState::Completed);
            self.counters.completed += 1;
            self.events.record(
                now,
                Some(finished.pid),
                Payload::Completed {
                    start: finished.start,
                    size: finished.size,
                },
            );
        }
    }

    fn admit_arrivals(&mut self, now: Tick) {
        while let Some(&process) = self
            .processes
            .get(self.next_arrival)
            .filter(|p| p.arrival_time <= now)
        {
            self.next_arrival += 1;
            self.events
                .record(now, Some(process.pid), Payload::Arrived { size: process.size });

            let total_memory = self.memory.total_memory();
            if process.size > total_memory {
                self.transition(process.pid, ProcessState::Rejected);
                self.counters.rejected += 1;
                self.events.record(
                    now,
                    Some(process.pid),
                    Payload::Rejected {
                        size: process.size,
                        total_memory,
                    },
                );
                continue;
            }

            match self.memory.allocate(process.size) {
                Ok(start) => {
                    let running = RunningProcess::place(&process, start, now);
                    self.residents.insert(running);
                    self.mark_allocated(now, running, 0);
                }
                Err(e) => {
                    self.queue.enqueue(process);
                    self.transition(process.pid, ProcessState::Waiting);
                    self.events.record(
                        now,
                        Some(process.pid),
                        Payload::Queued {
                            size: process.size,
                            reason: e.to_string(),
                        },
                    );
                }
            }
        }
    }

    fn retry_waiting(&mut self, now: Tick) {
        if self.queue.is_empty() {
            return;
        }
        let outcome = self
            .queue
            .retry_all(now, &mut self.memory, &mut self.residents);

        for compaction in &outcome.compactions {
            self.counters.compactions += 1;
            self.events.record(
                now,
                Some(compaction.pid),
                Payload::Compacted {
                    moved_blocks: compaction.summary.moved_blocks,
                    bytes_moved: compaction.summary.bytes_moved,
                    free_after: compaction.summary.free_after,
                },
            );
        }
        for placement in &outcome.placements {
            self.mark_allocated(now, placement.running, placement.prior_attempts);
        }
        // Only the first failed tick is logged; the attempt count covers the rest
        for waiting in &outcome.still_waiting {
            if waiting.attempts == 1 {
                self.events.record(
                    now,
                    Some(waiting.process.pid),
                    Payload::StillWaiting {
                        attempts: waiting.attempts,
                    },
                );
            } else {
                debug!(
                    tick = now,
                    pid = waiting.process.pid,
                    attempts = waiting.attempts,
                    "Still waiting"
                );
            }
        }
    }

    fn mark_allocated(&mut self, now: Tick, running: RunningProcess, attempts: u32) {
        self.transition(running.pid, ProcessState::Running);
        self.counters.allocated += 1;
        self.events.record(
            now,
            Some(running.pid),
            Payload::Allocated {
                start: running.start,
                size: running.size,
                finish_time: running.finish_time,
                attempts,
            },
        );
    }

    fn transition(&mut self, pid: Pid, next: ProcessState) {
        if let Err(e) = self.lifecycle.transition(pid, next) {
            error!(pid, error = %e, "Lifecycle violation");
        }
    }
}
