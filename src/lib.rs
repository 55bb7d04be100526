/*!
 * Memory Allocation Simulator Library
 * First-fit allocation, coalescing, compaction and admission over discrete time
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod simulation;

// Re-exports
pub use crate::core::errors::{ConfigError, SimError};
pub use crate::core::types::{Address, Pid, Size, Tick};
pub use memory::{BlockList, BlockStatus, MemoryBlock, MemoryError, MemoryManager};
pub use monitoring::init_tracing;
pub use process::{AdmissionQueue, Process, ProcessState, ResidentSet};
pub use simulation::{Simulation, SimulationConfig, SimulationReport};
