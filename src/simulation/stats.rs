/*!
 * Simulation Statistics
 * Summary figures reported when a run ends
 */

use crate::core::types::{Size, Tick};
use crate::process::Process;
use serde::{Deserialize, Serialize};

/// Counters the driver accumulates while running
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub allocated: usize,
    pub rejected: usize,
    pub completed: usize,
    pub compactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub total_processes: usize,
    /// Processes that were placed in memory at some point
    pub allocated: usize,
    pub rejected: usize,
    pub completed: usize,
    pub still_waiting: usize,
    pub compactions: usize,
    pub ticks_elapsed: Tick,
    /// Sizes over the whole input set, rejected processes included
    pub average_size: f64,
    pub largest_size: Size,
    pub smallest_size: Size,
}

impl SimulationStats {
    pub fn compute(
        processes: &[Process],
        counters: RunCounters,
        still_waiting: usize,
        ticks_elapsed: Tick,
    ) -> Self {
        let total: Size = processes.iter().map(|p| p.size).sum();
        let average_size = if processes.is_empty() {
            0.0
        } else {
            total as f64 / processes.len() as f64
        };

        Self {
            total_processes: processes.len(),
            allocated: counters.allocated,
            rejected: counters.rejected,
            completed: counters.completed,
            still_waiting,
            compactions: counters.compactions,
            ticks_elapsed,
            average_size,
            largest_size: processes.iter().map(|p| p.size).max().unwrap_or(0),
            smallest_size: processes.iter().map(|p| p.size).min().unwrap_or(0),
        }
    }
}
