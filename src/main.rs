/*!
 * MemVis - Main Entry Point
 *
 * Terminal front end for the simulated heap allocator:
 * - C-style command console (malloc / free / defrag / ...)
 * - Usage and fragmentation statistics
 * - Optional AI-backed heap analysis
 */

use std::error::Error;
use std::io::Write;
use std::sync::Arc;

use memvis::advisor::{GeminiSummarizer, NoopSummarizer, Summarizer};
use memvis::core::limits::TOTAL_HEAP_SIZE;
use memvis::shell::LogEntry;
use memvis::{init_tracing, HeapManager, Shell};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize structured tracing
    init_tracing();

    info!("MemVis starting...");
    info!("================================================");

    info!("Initializing heap manager...");
    let heap = HeapManager::new();

    let summarizer: Arc<dyn Summarizer> = match GeminiSummarizer::from_env() {
        Some(gemini) => {
            info!("AI advisor configured");
            Arc::new(gemini)
        }
        None => {
            info!("No API credential found, AI advisor disabled");
            Arc::new(NoopSummarizer)
        }
    };

    let (mut shell, mut events) = Shell::new(heap, summarizer);

    info!("Initialization complete");
    info!("================================================");

    println!(
        "System initialized. Heap size: {} units. Type \"help\" for commands.",
        TOTAL_HEAP_SIZE
    );

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    prompt()?;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break; // stdin closed
                };
                if !line.trim().is_empty() {
                    for entry in shell.execute(&line) {
                        print_entry(&entry);
                    }
                }
                prompt()?;
            }
            Some(entry) = events.recv() => {
                println!();
                print_entry(&entry);
                prompt()?;
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                info!("Shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("memvis> ");
    std::io::stdout().flush()
}

fn print_entry(entry: &LogEntry) {
    println!("{}{}\x1b[0m", entry.level.ansi_color(), entry.message);
}
