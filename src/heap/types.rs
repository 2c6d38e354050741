/*!
 * Heap Types
 * Common types for the simulated heap
 */

use crate::core::limits::{PRESSURE_CRITICAL, PRESSURE_HIGH, PRESSURE_MEDIUM};
use crate::core::types::{Address, Size, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Heap operation result
pub type HeapResult<T> = Result<T, HeapError>;

/// Heap errors
///
/// All recoverable: a failed operation leaves the heap exactly as it was.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeapError {
    #[error("Invalid size: {0} (allocation size must be a positive integer)")]
    InvalidSize(i64),

    #[error("Out of memory: no contiguous free block of {requested} units (largest free block: {largest_free}, total free: {free})")]
    OutOfMemory {
        requested: Size,
        largest_free: Size,
        free: Size,
    },

    #[error("Invalid address: {0} does not match the start of any block")]
    InvalidAddress(Address),
}

/// A contiguous region of the simulated heap
///
/// Identity is minted at creation and retired when the block is split or
/// merged away; a retired id never comes back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub id: Uuid,
    pub start: Address,
    pub size: Size,
    pub allocated: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Block {
    pub fn new_allocated(start: Address, size: Size, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            size,
            allocated: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new_free(start: Address, size: Size, now: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            size,
            allocated: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// One-past-the-end offset of this block
    pub fn end(&self) -> Address {
        self.start + self.size
    }

    pub fn is_free(&self) -> bool {
        !self.allocated
    }
}

/// Outcome of a successful release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeOutcome {
    /// The block was allocated and has been released
    Freed { address: Address, size: Size },
    /// The block was already free; state unchanged (warning, not an error)
    AlreadyFree { address: Address },
}

/// Outcome of a compaction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefragOutcome {
    /// Allocated blocks were packed to the front of the heap
    Compacted {
        allocated_blocks: usize,
        reclaimed: Size,
    },
    /// Nothing is allocated; the heap was left untouched
    EmptyHeap,
}

/// Heap statistics, derived on demand from the block list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeapStats {
    pub total_size: Size,
    pub used_size: Size,
    pub free_size: Size,
    pub block_count: usize,
    pub largest_free_block: Size,
    pub fragmentation: f64,
}

impl HeapStats {
    pub fn usage_percentage(&self) -> f64 {
        (self.used_size as f64 / self.total_size as f64) * 100.0
    }

    pub fn pressure(&self) -> HeapPressure {
        let ratio = self.used_size as f64 / self.total_size as f64;
        if ratio >= PRESSURE_CRITICAL {
            HeapPressure::Critical
        } else if ratio >= PRESSURE_HIGH {
            HeapPressure::High
        } else if ratio >= PRESSURE_MEDIUM {
            HeapPressure::Medium
        } else {
            HeapPressure::Low
        }
    }
}

/// Heap pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeapPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for HeapPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HeapPressure::Low => write!(f, "LOW"),
            HeapPressure::Medium => write!(f, "MEDIUM"),
            HeapPressure::High => write!(f, "HIGH"),
            HeapPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Point-in-time copy of the heap handed to reporting collaborators
///
/// Snapshots are detached: the heap can be mutated again while a snapshot is
/// still being rendered or summarized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeapSnapshot {
    pub blocks: Vec<Block>,
    pub stats: HeapStats,
    pub captured_at: Timestamp,
}

impl HeapSnapshot {
    /// Render the block list as `start: size [Allocated|Free]` lines
    pub fn memory_map(&self) -> String {
        self.blocks
            .iter()
            .map(|b| {
                format!(
                    "{}: {} [{}]",
                    b.start,
                    b.size,
                    if b.allocated { "Allocated" } else { "Free" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
