/*!
 * Memory Types
 * Common types for memory management
 */

use crate::core::limits::{
    CRITICAL_PRESSURE_THRESHOLD, MEDIUM_PRESSURE_THRESHOLD, WARNING_PRESSURE_THRESHOLD,
};
use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Out of memory: requested {requested} units, available {available} units ({used} used / {total} total)")]
    OutOfMemory {
        requested: Size,
        available: Size,
        used: Size,
        total: Size,
    },

    #[error("Fragmented: requested {requested} units, {available} free but largest free block is {largest_free}")]
    Fragmented {
        requested: Size,
        available: Size,
        largest_free: Size,
    },

    #[error("Invalid allocation size: {0}")]
    InvalidSize(Size),

    #[error("Invalid block {index}: {reason}")]
    InvalidBlock { index: usize, reason: &'static str },

    #[error("Memory corruption detected at {address}: {reason}")]
    CorruptionDetected { address: Address, reason: String },
}

impl MemoryError {
    /// True when compaction could turn this failure into a success
    pub fn is_fragmentation(&self) -> bool {
        matches!(self, MemoryError::Fragmented { .. })
    }
}

/// Block status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockStatus {
    Free,
    Allocated,
}

impl std::fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlockStatus::Free => write!(f, "Free"),
            BlockStatus::Allocated => write!(f, "Alloc"),
        }
    }
}

/// Memory block metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryBlock {
    pub start: Address,
    pub size: Size,
    pub status: BlockStatus,
}

impl MemoryBlock {
    pub fn free(start: Address, size: Size) -> Self {
        Self {
            start,
            size,
            status: BlockStatus::Free,
        }
    }

    pub fn allocated(start: Address, size: Size) -> Self {
        Self {
            start,
            size,
            status: BlockStatus::Allocated,
        }
    }

    /// One past the last address covered by this block
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    pub fn is_free(&self) -> bool {
        self.status == BlockStatus::Free
    }

    pub fn is_allocated(&self) -> bool {
        self.status == BlockStatus::Allocated
    }
}

/// Memory statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        MemoryPressure::from_ratio(self.usage_percentage / 100.0)
    }

    /// Share of free memory that is not part of the largest free block (0.0 - 1.0)
    pub fn external_fragmentation(&self) -> f64 {
        if self.available_memory == 0 {
            return 0.0;
        }
        1.0 - self.largest_free_block as f64 / self.available_memory as f64
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl MemoryPressure {
    pub fn from_ratio(usage_ratio: f64) -> Self {
        if usage_ratio >= CRITICAL_PRESSURE_THRESHOLD {
            MemoryPressure::Critical
        } else if usage_ratio >= WARNING_PRESSURE_THRESHOLD {
            MemoryPressure::High
        } else if usage_ratio >= MEDIUM_PRESSURE_THRESHOLD {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A block moved by compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relocation {
    pub from: Address,
    pub to: Address,
    pub size: Size,
}

/// Result of a compaction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactionSummary {
    pub moved_blocks: usize,
    pub bytes_moved: Size,
    pub free_after: Size,
}
