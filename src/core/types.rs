/*!
 * Core Types
 * Common types used across the simulator
 */

/// Address type: an abstract integer offset into the simulated heap
pub type Address = usize;

/// Size type for heap operations, in abstract units
pub type Size = usize;

/// Timestamp in microseconds since heap creation
pub type Timestamp = u64;
