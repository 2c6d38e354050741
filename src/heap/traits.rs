/*!
 * Heap Traits
 * Heap management abstractions
 */

use super::types::*;
use crate::core::types::{Address, Size};

/// Heap allocator interface
///
/// Mutation goes through a single logical owner, so operations take
/// `&mut self`; there is no interior mutability to reason about.
pub trait Allocator {
    /// Allocate a block using the first-fit policy
    fn allocate(&mut self, size: Size) -> HeapResult<Address>;

    /// Free the block starting exactly at `address`
    fn free(&mut self, address: Address) -> HeapResult<FreeOutcome>;

    /// Compact allocated blocks to the front of the heap
    fn defragment(&mut self) -> DefragOutcome;

    /// Restore the heap to a single free block
    fn reset(&mut self);
}

/// Heap statistics provider
pub trait HeapInfo {
    /// Get overall heap statistics
    fn stats(&self) -> HeapStats;

    /// Take a point-in-time copy of the heap
    fn snapshot(&self) -> HeapSnapshot;

    /// Get heap capacity in abstract units
    fn total_size(&self) -> Size;

    /// Get current pressure level
    fn pressure(&self) -> HeapPressure {
        self.stats().pressure()
    }
}
