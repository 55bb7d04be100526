/*!
 * System Limits and Constants
 *
 * Centralized location for the simulator's fixed policy values.
 */

// =============================================================================
// ADMISSION LIMITS
// =============================================================================

/// Placement rounds a waiting process gets per tick
/// Each failed round with enough aggregate free memory triggers one compaction
pub const MAX_PLACEMENT_ROUNDS: u8 = 3;

/// Minimum number of well-formed records a process file must contain
pub const MIN_PROCESS_RECORDS: usize = 10;

// =============================================================================
// MEMORY PRESSURE THRESHOLDS
// =============================================================================

/// Usage ratio at which allocations are logged as medium pressure
pub const MEDIUM_PRESSURE_THRESHOLD: f64 = 0.60;

/// Usage ratio at which allocations are logged as high pressure
pub const WARNING_PRESSURE_THRESHOLD: f64 = 0.80;

/// Usage ratio at which allocations are logged as critical pressure
pub const CRITICAL_PRESSURE_THRESHOLD: f64 = 0.95;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Environment variable holding the total memory size
pub const ENV_MEMORY_SIZE: &str = "MEMSIM_MEMORY_SIZE";

/// Environment variable holding the process file path
pub const ENV_PROCESS_FILE: &str = "MEMSIM_PROCESS_FILE";

/// Environment variable bounding the number of simulated ticks
pub const ENV_MAX_TICKS: &str = "MEMSIM_MAX_TICKS";

/// Environment variable switching tracing output to JSON
pub const ENV_TRACE_JSON: &str = "MEMSIM_TRACE_JSON";
