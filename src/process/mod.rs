/*!
 * Process Module
 * Process descriptions, residency, lifecycle and admission
 */

pub mod lifecycle;
pub mod queue;
pub mod resident;
pub mod types;

// Re-export for convenience
pub use lifecycle::LifecycleTracker;
pub use queue::{AdmissionQueue, Placement, RetryOutcome, RetryState, TriggeredCompaction};
pub use resident::ResidentSet;
pub use types::*;
