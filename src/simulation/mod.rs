/*!
 * Simulation Module
 * Configuration, input loading, the tick driver and its outputs
 */

pub mod config;
pub mod driver;
pub mod events;
pub mod loader;
pub mod stats;

// Re-export for convenience
pub use config::{Command, OutputFormat, SimulationConfig};
pub use driver::{ProcessOutcome, Simulation, SimulationReport, TickSnapshot};
pub use events::{Event, EventLog, Payload, Severity};
pub use loader::{load_processes, parse_processes};
pub use stats::{RunCounters, SimulationStats};
