/*!
 * System Limits and Constants
 *
 * Centralized location for simulator-wide limits and thresholds.
 */

use std::time::Duration;

// =============================================================================
// HEAP LIMITS
// =============================================================================

/// Total simulated heap capacity, in abstract units
/// Used as default capacity for the heap manager
pub const TOTAL_HEAP_SIZE: usize = 100;

/// Smallest allocation the heap will accept
pub const BLOCK_MIN_SIZE: usize = 1;

/// Usage ratio at which the heap reports medium pressure
pub const PRESSURE_MEDIUM: f64 = 0.60;

/// Usage ratio at which allocations start logging warnings
pub const PRESSURE_HIGH: f64 = 0.80;

/// Usage ratio treated as critical
pub const PRESSURE_CRITICAL: f64 = 0.95;

// =============================================================================
// ADVISORY SUMMARIZER
// =============================================================================

/// Request timeout for the advisory summarizer call
pub const SUMMARIZER_TIMEOUT: Duration = Duration::from_secs(30);

/// Model served by the generateContent endpoint
pub const SUMMARIZER_MODEL: &str = "gemini-2.5-flash";
