/*!
 * Heap Statistics
 * Derived usage and fragmentation metrics
 */

use super::super::types::{HeapPressure, HeapStats};
use super::HeapManager;
use crate::core::limits::{PRESSURE_CRITICAL, PRESSURE_HIGH, PRESSURE_MEDIUM};
use crate::core::types::Size;

impl HeapManager {
    /// Compute heap statistics from the current block list
    ///
    /// Pure and read-only; nothing is cached. Fragmentation is
    /// `1 - largest_free / free`, defined as exactly `0` when no free space
    /// remains: a single free region scores `0`, many small regions adding
    /// up to the same free total approach `1`.
    pub fn stats(&self) -> HeapStats {
        let used_size: Size = self
            .blocks()
            .iter()
            .filter(|b| b.allocated)
            .map(|b| b.size)
            .sum();
        let total_size = self.total_size;
        let free_size = total_size - used_size;
        let largest_free_block = self
            .blocks()
            .iter()
            .filter(|b| b.is_free())
            .map(|b| b.size)
            .max()
            .unwrap_or(0);

        // The partition invariant guarantees a free block whenever free
        // space remains, which keeps the division below well-defined.
        debug_assert!(
            free_size == 0 || largest_free_block > 0,
            "free space must live in at least one free block"
        );

        let fragmentation = if free_size == 0 {
            0.0
        } else {
            1.0 - largest_free_block as f64 / free_size as f64
        };

        HeapStats {
            total_size,
            used_size,
            free_size,
            block_count: self.blocks().len(),
            largest_free_block,
            fragmentation,
        }
    }

    /// Pressure level for `used` units, or `None` below the medium threshold
    pub(super) fn check_pressure(&self, used: Size) -> Option<HeapPressure> {
        let ratio = used as f64 / self.total_size as f64;
        if ratio >= PRESSURE_CRITICAL {
            Some(HeapPressure::Critical)
        } else if ratio >= PRESSURE_HIGH {
            Some(HeapPressure::High)
        } else if ratio >= PRESSURE_MEDIUM {
            Some(HeapPressure::Medium)
        } else {
            None
        }
    }
}
