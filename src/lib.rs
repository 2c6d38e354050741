/*!
 * MemVis Library
 * Simulated heap allocator exposed as a library
 *
 * A dynamic-memory allocator over a fixed-size abstract address space:
 * first-fit allocation, coalescing on release, and full compaction, driven
 * by a C-style terminal command surface with an optional AI-backed heap
 * analysis advisor.
 */

pub mod advisor;
pub mod core;
pub mod heap;
pub mod monitoring;
pub mod shell;

// Re-exports
pub use advisor::{GeminiSummarizer, NoopSummarizer, Summarizer};
pub use heap::{HeapManager, HeapSnapshot, HeapStats};
pub use monitoring::init_tracing;
pub use shell::{Command, LogEntry, LogLevel, Shell};
