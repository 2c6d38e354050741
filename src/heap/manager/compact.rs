/*!
 * Heap Compaction
 * Defragmentation by packing allocated blocks to the front
 */

use super::super::types::{Block, DefragOutcome};
use super::HeapManager;
use crate::core::types::Address;
use log::info;

impl HeapManager {
    /// Pack all allocated blocks back-to-back at the front of the heap
    ///
    /// Relative order and identities of allocated blocks are preserved; only
    /// their start offsets change. Remaining space collapses into a single
    /// trailing free block, omitted when the heap is fully allocated. With
    /// nothing allocated this is an informational no-op.
    pub fn defragment(&mut self) -> DefragOutcome {
        if self.blocks.iter().all(|b| b.is_free()) {
            info!("Heap is empty, nothing to compact");
            return DefragOutcome::EmptyHeap;
        }

        let now = self.now();
        self.blocks.retain(|b| b.allocated);

        let mut cursor: Address = 0;
        for block in &mut self.blocks {
            block.start = cursor;
            cursor += block.size;
        }

        let allocated_blocks = self.blocks.len();
        let reclaimed = self.total_size - cursor;
        if reclaimed > 0 {
            self.blocks.push(Block::new_free(cursor, reclaimed, now));
        }

        info!(
            "Compaction complete: {} allocated blocks packed, {} units in the trailing free block",
            allocated_blocks, reclaimed
        );
        self.debug_validate();
        DefragOutcome::Compacted {
            allocated_blocks,
            reclaimed,
        }
    }
}
