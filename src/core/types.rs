/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Address type for simulated memory offsets
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Logical simulation time (one unit per tick)
pub type Tick = u64;
