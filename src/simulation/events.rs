/*!
 * Event System
 * Strongly-typed record of everything a simulation run did
 */

use crate::core::types::{Address, Pid, Size, Tick};
use serde::{Deserialize, Serialize};

/// Event severity for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Severity {
    Debug = 0,
    Info = 1,
    Warn = 2,
}

/// Unified event type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub tick: Tick,
    pub severity: Severity,
    pub pid: Option<Pid>,
    pub payload: Payload,
}

/// Event payload - one variant per kind of step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Arrived {
        size: Size,
    },
    Allocated {
        start: Address,
        size: Size,
        finish_time: Tick,
        /// Failed ticks spent in the admission queue
        attempts: u32,
    },
    Queued {
        size: Size,
        reason: String,
    },
    Rejected {
        size: Size,
        total_memory: Size,
    },
    StillWaiting {
        attempts: u32,
    },
    Compacted {
        moved_blocks: usize,
        bytes_moved: Size,
        free_after: Size,
    },
    Completed {
        start: Address,
        size: Size,
    },
}

impl Payload {
    fn severity(&self) -> Severity {
        match self {
            Payload::Rejected { .. } => Severity::Warn,
            Payload::StillWaiting { .. } => Severity::Debug,
            _ => Severity::Info,
        }
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Payload::Arrived { size } => write!(f, "arrived (size {})", size),
            Payload::Allocated {
                start,
                size,
                finish_time,
                attempts,
            } => write!(
                f,
                "allocated {} at {} until t={} ({} queued ticks)",
                size, start, finish_time, attempts
            ),
            Payload::Queued { size, reason } => write!(f, "queued (size {}): {}", size, reason),
            Payload::Rejected { size, total_memory } => write!(
                f,
                "rejected: size {} exceeds total memory {}",
                size, total_memory
            ),
            Payload::StillWaiting { attempts } => write!(f, "still waiting ({} attempts)", attempts),
            Payload::Compacted {
                moved_blocks,
                bytes_moved,
                free_after,
            } => write!(
                f,
                "compaction moved {} blocks ({} units), {} free",
                moved_blocks, bytes_moved, free_after
            ),
            Payload::Completed { start, size } => write!(f, "completed, freed {} at {}", size, start),
        }
    }
}

/// Append-only event log that mirrors each event to tracing
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, pid: Option<Pid>, payload: Payload) {
        let severity = payload.severity();
        match severity {
            Severity::Debug => tracing::debug!(tick, pid, event = %payload),
            Severity::Info => tracing::info!(tick, pid, event = %payload),
            Severity::Warn => tracing::warn!(tick, pid, event = %payload),
        }
        self.events.push(Event {
            tick,
            severity,
            pid,
            payload,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events for one process in recording order
    pub fn for_pid(&self, pid: Pid) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.pid == Some(pid))
    }
}
