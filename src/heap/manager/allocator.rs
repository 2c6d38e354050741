/*!
 * Heap Allocator Implementation
 * First-fit allocation, release, and coalescing logic
 */

use super::super::types::{Block, FreeOutcome, HeapError, HeapResult};
use super::HeapManager;
use crate::core::limits::BLOCK_MIN_SIZE;
use crate::core::types::{Address, Size};
use log::{info, warn};
use uuid::Uuid;

impl HeapManager {
    /// Allocate `size` units using a first-fit scan in address order
    ///
    /// The first free block large enough wins, even when a tighter fit
    /// exists later in the sequence. An exact fit flips the block in place
    /// and retains its identity; a larger block is split into an allocated
    /// head and a free remainder.
    pub fn allocate(&mut self, size: Size) -> HeapResult<Address> {
        if size < BLOCK_MIN_SIZE {
            warn!("Rejected allocation of {} units: size must be positive", size);
            return Err(HeapError::InvalidSize(size as i64));
        }

        let now = self.now();
        let Some(index) = self
            .blocks
            .iter()
            .position(|b| b.is_free() && b.size >= size)
        else {
            let stats = self.stats();
            warn!(
                "Allocation failed: no contiguous free block of {} units (largest free: {}, total free: {})",
                size, stats.largest_free_block, stats.free_size
            );
            return Err(HeapError::OutOfMemory {
                requested: size,
                largest_free: stats.largest_free_block,
                free: stats.free_size,
            });
        };

        let address = self.blocks[index].start;
        if self.blocks[index].size == size {
            // Exact fit
            let block = &mut self.blocks[index];
            block.allocated = true;
            block.updated_at = now;
        } else {
            // Split: allocated head plus a free remainder. The remainder
            // keeps the original block's timestamps so the region's age is
            // continuous across the split.
            let original = self.blocks[index].clone();
            let remainder = Block {
                id: Uuid::new_v4(),
                start: address + size,
                size: original.size - size,
                allocated: false,
                created_at: original.created_at,
                updated_at: original.updated_at,
            };
            self.blocks[index] = Block::new_allocated(address, size, now);
            self.blocks.insert(index + 1, remainder);
        }

        let stats = self.stats();
        if let Some(level) = self.check_pressure(stats.used_size) {
            warn!(
                "Memory pressure {}: allocated {} units at address {} ({:.1}% used: {} / {})",
                level,
                size,
                address,
                stats.usage_percentage(),
                stats.used_size,
                stats.total_size
            );
        } else {
            info!("Allocated {} units at address {}", size, address);
        }

        self.debug_validate();
        Ok(address)
    }

    /// Free the block starting exactly at `address`
    ///
    /// The address must match a block boundary; offsets inside a block are
    /// rejected. Freeing an already-free block is a warning outcome and
    /// leaves the heap untouched.
    pub fn free(&mut self, address: Address) -> HeapResult<FreeOutcome> {
        let now = self.now();
        let Some(index) = self.blocks.iter().position(|b| b.start == address) else {
            warn!("Attempted to free invalid address: {}", address);
            return Err(HeapError::InvalidAddress(address));
        };

        if self.blocks[index].is_free() {
            warn!("Address {} is already free", address);
            return Ok(FreeOutcome::AlreadyFree { address });
        }

        let size = self.blocks[index].size;
        self.blocks[index].allocated = false;
        self.blocks[index].updated_at = now;
        self.coalesce();

        info!("Freed {} units at address {}", size, address);
        self.debug_validate();
        Ok(FreeOutcome::Freed { address, size })
    }

    /// Merge runs of adjacent free blocks until none remain
    ///
    /// The left block of each merged pair keeps its id and start. Staying on
    /// the same index after a merge lets chains of three or more free blocks
    /// collapse in a single pass.
    fn coalesce(&mut self) {
        let mut i = 0;
        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free() && self.blocks[i + 1].is_free() {
                let right = self.blocks.remove(i + 1);
                self.blocks[i].size += right.size;
            } else {
                i += 1;
            }
        }
    }
}
