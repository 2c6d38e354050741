/*!
 * Command Executor
 * Dispatches parsed commands against the heap and the advisory summarizer
 */

use super::command::{Command, ParseError, HELP_TEXT};
use super::log::LogEntry;
use crate::advisor::{Summarizer, SummarizerError};
use crate::core::types::{Address, Size};
use crate::heap::{Allocator, DefragOutcome, FreeOutcome, HeapError, HeapInfo, HeapManager};
use log::warn;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Fixed fallback shown when the summarizer credential is missing
pub const ANALYSIS_NOT_CONFIGURED: &str =
    "AI analysis is not configured. Set GEMINI_API_KEY to enable it.";

/// Fixed fallback shown when a summarizer call fails
pub const ANALYSIS_FAILED: &str = "Failed to retrieve analysis from the AI advisor.";

/// Terminal shell
///
/// Owns the heap, the log history, and the summarizer handle. Generic over
/// the allocator seam so tests can substitute the heap; the summarizer is
/// injected, so the shell works with no network capability present.
pub struct Shell<H = HeapManager> {
    heap: H,
    summarizer: Arc<dyn Summarizer>,
    events: mpsc::UnboundedSender<LogEntry>,
    history: Vec<LogEntry>,
    analysis: Option<AbortHandle>,
}

impl<H: Allocator + HeapInfo> Shell<H> {
    /// Create a shell around `heap`
    ///
    /// The returned receiver carries entries produced by background tasks
    /// (currently only `analyze` results), so slow summaries never block
    /// further commands.
    pub fn new(
        heap: H,
        summarizer: Arc<dyn Summarizer>,
    ) -> (Self, mpsc::UnboundedReceiver<LogEntry>) {
        let (events, rx) = mpsc::unbounded_channel();
        (
            Self {
                heap,
                summarizer,
                events,
                history: Vec::new(),
                analysis: None,
            },
            rx,
        )
    }

    /// Read-only access to the heap
    pub fn heap(&self) -> &H {
        &self.heap
    }

    /// Log entries accumulated since startup or the last `clear`
    pub fn history(&self) -> &[LogEntry] {
        &self.history
    }

    /// Parse and execute one line of terminal input
    pub fn execute(&mut self, line: &str) -> Vec<LogEntry> {
        let entries = match Command::parse(line) {
            Ok(command) => self.dispatch(command),
            Err(ParseError::Empty) => Vec::new(),
            Err(err) => vec![LogEntry::error(err.to_string())],
        };
        self.history.extend(entries.iter().cloned());
        entries
    }

    fn dispatch(&mut self, command: Command) -> Vec<LogEntry> {
        match command {
            Command::Malloc { size } => vec![self.malloc(size)],
            Command::Free { address } => vec![self.free(address)],
            Command::Reset => {
                self.heap.reset();
                vec![LogEntry::system("Heap reset to initial state.")]
            }
            Command::Defrag => vec![self.defrag()],
            Command::Stats => vec![self.stats()],
            Command::Map => vec![self.map()],
            Command::Analyze => self.analyze(),
            Command::Help => vec![LogEntry::system(HELP_TEXT)],
            Command::Clear => {
                // UI-only: the heap is untouched and no entry is emitted,
                // matching an emptied terminal.
                self.history.clear();
                Vec::new()
            }
        }
    }

    fn malloc(&mut self, size: i64) -> LogEntry {
        if size <= 0 {
            return LogEntry::error(HeapError::InvalidSize(size).to_string());
        }
        match self.heap.allocate(size as Size) {
            Ok(address) => {
                LogEntry::success(format!("Allocated {} units at address {}", size, address))
            }
            Err(err) => LogEntry::error(err.to_string()),
        }
    }

    fn free(&mut self, address: Address) -> LogEntry {
        match self.heap.free(address) {
            Ok(FreeOutcome::Freed { address, .. }) => {
                LogEntry::success(format!("Freed memory at address {}", address))
            }
            Ok(FreeOutcome::AlreadyFree { address }) => {
                LogEntry::warning(format!("Address {} is already free.", address))
            }
            Err(err) => LogEntry::error(err.to_string()),
        }
    }

    fn defrag(&mut self) -> LogEntry {
        match self.heap.defragment() {
            DefragOutcome::Compacted { .. } => {
                LogEntry::system("Defragmentation complete. Memory compacted.")
            }
            DefragOutcome::EmptyHeap => LogEntry::info("Memory is empty, nothing to defrag."),
        }
    }

    fn stats(&self) -> LogEntry {
        let stats = self.heap.stats();
        LogEntry::system(format!(
            "Heap statistics:\n  usage: {} / {} units ({:.1}%)\n  free: {} units (largest block: {})\n  blocks: {}\n  fragmentation: {:.0}%\n  pressure: {}",
            stats.used_size,
            stats.total_size,
            stats.usage_percentage(),
            stats.free_size,
            stats.largest_free_block,
            stats.block_count,
            stats.fragmentation * 100.0,
            stats.pressure(),
        ))
    }

    fn map(&self) -> LogEntry {
        let snapshot = self.heap.snapshot();
        LogEntry::system(format!(
            "Memory map (address: size [state]):\n{}",
            snapshot.memory_map()
        ))
    }

    fn analyze(&mut self) -> Vec<LogEntry> {
        // A newer request supersedes any in-flight one; the stale response
        // is dropped rather than shown against the wrong heap state.
        if let Some(previous) = self.analysis.take() {
            previous.abort();
        }

        let snapshot = self.heap.snapshot();
        let summarizer = Arc::clone(&self.summarizer);
        let events = self.events.clone();
        let task = tokio::spawn(async move {
            let stats = snapshot.stats.clone();
            let entry = match summarizer.summarize(snapshot).await {
                Ok(text) => LogEntry::info(format!(
                    "AI analysis ({} / {} units used at capture): {}",
                    stats.used_size, stats.total_size, text
                )),
                Err(SummarizerError::NotConfigured) => {
                    LogEntry::warning(ANALYSIS_NOT_CONFIGURED)
                }
                Err(err) => {
                    warn!("Summarizer call failed: {}", err);
                    LogEntry::warning(ANALYSIS_FAILED)
                }
            };
            let _ = events.send(entry);
        });
        self.analysis = Some(task.abort_handle());

        vec![LogEntry::system("Requesting AI analysis of heap state...")]
    }
}
