/*!
 * Process Types
 * Common types for process management
 */

use crate::core::types::{Address, Pid, Size, Tick};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Process not found: {0}")]
    ProcessNotFound(Pid),

    #[error("Invalid state transition for process {pid}: {from:?} -> {to:?}")]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Immutable description of one job read from the process file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pub pid: Pid,
    pub arrival_time: Tick,
    pub size: Size,
    pub burst_time: Tick,
}

impl Process {
    pub fn new(pid: Pid, arrival_time: Tick, size: Size, burst_time: Tick) -> Self {
        Self {
            pid,
            arrival_time,
            size,
            burst_time,
        }
    }
}

/// A process resident in memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningProcess {
    pub pid: Pid,
    pub start: Address,
    pub size: Size,
    pub finish_time: Tick,
}

impl RunningProcess {
    pub fn place(process: &Process, start: Address, now: Tick) -> Self {
        Self {
            pid: process.pid,
            start,
            size: process.size,
            finish_time: now.saturating_add(process.burst_time),
        }
    }

    pub fn is_finished(&self, now: Tick) -> bool {
        self.finish_time <= now
    }
}

/// A process held in the admission queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingProcess {
    pub process: Process,
    /// Ticks in which every placement round failed
    pub attempts: u32,
}

impl WaitingProcess {
    pub fn new(process: Process) -> Self {
        Self {
            process,
            attempts: 0,
        }
    }
}

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Arrival time not reached yet
    Pending,
    /// In the admission queue
    Waiting,
    /// Resident in memory
    Running,
    /// Finished and freed
    Completed,
    /// Larger than total memory, never admitted
    Rejected,
}

impl ProcessState {
    pub fn can_transition_to(self, next: ProcessState) -> bool {
        use ProcessState::*;
        matches!(
            (self, next),
            (Pending, Waiting)
                | (Pending, Running)
                | (Pending, Rejected)
                | (Waiting, Running)
                | (Running, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessState::Completed | ProcessState::Rejected)
    }
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProcessState::Pending => write!(f, "pending"),
            ProcessState::Waiting => write!(f, "waiting"),
            ProcessState::Running => write!(f, "running"),
            ProcessState::Completed => write!(f, "completed"),
            ProcessState::Rejected => write!(f, "rejected"),
        }
    }
}
