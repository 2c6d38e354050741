/*!
 * Heap Management
 *
 * Simulated dynamic-memory allocator over a fixed-size abstract address
 * space. The heap is an ordered sequence of blocks partitioning
 * `[0, total_size)` with no gaps and no overlaps.
 *
 * ## Operations
 *
 * - **First-fit allocation**: scan in address order, flip an exact fit in
 *   place, split a larger block into an allocated head and a free remainder
 * - **Coalescing**: adjacent free blocks are merged after every release,
 *   including chains of three or more
 * - **Compaction**: allocated blocks can be packed to the front, leaving a
 *   single trailing free block
 *
 * Addresses are abstract integer offsets; no real memory is touched. Every
 * operation either commits a state satisfying the partition invariant or
 * leaves the heap exactly as it was.
 */

mod allocator;
mod compact;
mod stats;

use super::traits::{Allocator, HeapInfo};
use super::types::{Block, DefragOutcome, FreeOutcome, HeapResult, HeapSnapshot, HeapStats};
use crate::core::limits::TOTAL_HEAP_SIZE;
use crate::core::types::{Address, Size, Timestamp};
use log::info;
use std::time::Instant;

/// Simulated heap manager
///
/// Blocks are kept ordered by start address. The manager is the single
/// owner of the block sequence; collaborators only ever see snapshots.
#[derive(Debug, Clone)]
pub struct HeapManager {
    blocks: Vec<Block>,
    total_size: Size,
    epoch: Instant,
}

impl HeapManager {
    /// Create a heap with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(TOTAL_HEAP_SIZE)
    }

    /// Create a heap with custom capacity (useful for testing)
    pub fn with_capacity(total_size: Size) -> Self {
        assert!(total_size > 0, "heap capacity must be positive");
        let heap = Self {
            blocks: vec![Block::new_free(0, total_size, 0)],
            total_size,
            epoch: Instant::now(),
        };
        info!(
            "Heap initialized: {} units in a single free block",
            total_size
        );
        heap
    }

    /// Microseconds elapsed since heap creation
    pub(crate) fn now(&self) -> Timestamp {
        self.epoch.elapsed().as_micros() as u64
    }

    /// Blocks ordered by start address
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Replace the block sequence with a single free block. Cannot fail.
    pub fn reset(&mut self) {
        let now = self.now();
        self.blocks = vec![Block::new_free(0, self.total_size, now)];
        info!(
            "Heap reset to a single free block of {} units",
            self.total_size
        );
        self.debug_validate();
    }

    /// Point-in-time copy for reporting collaborators
    pub fn snapshot(&self) -> HeapSnapshot {
        HeapSnapshot {
            blocks: self.blocks.clone(),
            stats: self.stats(),
            captured_at: self.now(),
        }
    }

    /// Partition and coalescing invariants, checked in debug builds after
    /// every mutation
    fn debug_validate(&self) {
        debug_assert!(
            !self.blocks.is_empty(),
            "heap must contain at least one block"
        );
        debug_assert_eq!(
            self.blocks.first().map(|b| b.start),
            Some(0),
            "first block must start at offset 0"
        );
        debug_assert_eq!(
            self.blocks.last().map(Block::end),
            Some(self.total_size),
            "last block must end at the heap boundary"
        );
        debug_assert!(
            self.blocks.iter().all(|b| b.size > 0),
            "block sizes must be strictly positive"
        );
        for pair in self.blocks.windows(2) {
            debug_assert_eq!(
                pair[0].end(),
                pair[1].start,
                "blocks must form a contiguous partition"
            );
            debug_assert!(
                pair[0].allocated || pair[1].allocated,
                "adjacent blocks must not both be free"
            );
        }
    }
}

// Implement trait interfaces
impl Allocator for HeapManager {
    fn allocate(&mut self, size: Size) -> HeapResult<Address> {
        HeapManager::allocate(self, size)
    }

    fn free(&mut self, address: Address) -> HeapResult<FreeOutcome> {
        HeapManager::free(self, address)
    }

    fn defragment(&mut self) -> DefragOutcome {
        HeapManager::defragment(self)
    }

    fn reset(&mut self) {
        HeapManager::reset(self)
    }
}

impl HeapInfo for HeapManager {
    fn stats(&self) -> HeapStats {
        HeapManager::stats(self)
    }

    fn snapshot(&self) -> HeapSnapshot {
        HeapManager::snapshot(self)
    }

    fn total_size(&self) -> Size {
        self.total_size
    }
}

impl Default for HeapManager {
    fn default() -> Self {
        Self::new()
    }
}
