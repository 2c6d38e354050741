/*!
 * Advisory Summarizer
 * Optional AI-backed heap analysis
 *
 * The heap core has zero dependency on this module: implementations receive
 * an owned `HeapSnapshot` and return a human-readable summary. Failures are
 * degraded to fixed fallback strings at the shell layer, never surfaced as
 * hard errors.
 */

mod gemini;

pub use gemini::GeminiSummarizer;

use crate::heap::HeapSnapshot;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Summarizer call result
pub type SummarizerResult = Result<String, SummarizerError>;

/// Advisory summarizer errors
#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("summarizer is not configured (missing API credential)")]
    NotConfigured,

    #[error("summarizer request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("summarizer returned HTTP {0}")]
    HttpStatus(u16),

    #[error("summarizer returned no usable text")]
    EmptyResponse,
}

/// Advisory heap summarizer
///
/// Object-safe so the shell can hold any implementation behind `Arc`.
pub trait Summarizer: Send + Sync {
    /// Produce a short human-readable summary of the snapshot
    fn summarize(
        &self,
        snapshot: HeapSnapshot,
    ) -> Pin<Box<dyn Future<Output = SummarizerResult> + Send + '_>>;
}

/// No-op summarizer used when no API credential is present (and in tests)
pub struct NoopSummarizer;

impl Summarizer for NoopSummarizer {
    fn summarize(
        &self,
        _snapshot: HeapSnapshot,
    ) -> Pin<Box<dyn Future<Output = SummarizerResult> + Send + '_>> {
        Box::pin(async { Err(SummarizerError::NotConfigured) })
    }
}
