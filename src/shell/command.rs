/*!
 * Command Parsing
 * Text commands accepted by the terminal
 */

use crate::core::types::Address;
use miette::Diagnostic;
use thiserror::Error;

/// Static help text printed by the `help` command
pub const HELP_TEXT: &str = "\
Available commands:
  malloc <size>   Allocate a block of memory (aliases: alloc, m)
  free <addr>     Free the block at <addr>, decimal or 0x.. hex (alias: f)
  defrag          Compact memory, moving blocks to eliminate holes (alias: compact)
  stats           Show heap usage and fragmentation statistics
  map             Print the current memory map
  analyze         Ask the AI advisor to analyze the current heap state
  reset           Clear all memory
  help            Show this help
  clear           Clear terminal logs (alias: cls)";

/// Command parse result
pub type ParseResult = Result<Command, ParseError>;

/// Commands accepted by the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Allocate `size` units; non-positive sizes are rejected downstream
    /// with the raw value intact
    Malloc { size: i64 },
    /// Free the block starting at `address`
    Free { address: Address },
    Reset,
    Defrag,
    Stats,
    Map,
    Analyze,
    Help,
    Clear,
}

/// Command parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ParseError {
    #[error("Unknown command: \"{0}\"")]
    #[diagnostic(
        code(shell::unknown_command),
        help("Type \"help\" for the list of commands.")
    )]
    UnknownCommand(String),

    #[error("Usage: {usage}")]
    #[diagnostic(
        code(shell::missing_argument),
        help("The command requires an argument.")
    )]
    MissingArgument { usage: &'static str },

    #[error("Invalid argument \"{argument}\". Usage: {usage}")]
    #[diagnostic(
        code(shell::invalid_argument),
        help("The argument could not be parsed as a number.")
    )]
    InvalidArgument {
        argument: String,
        usage: &'static str,
    },

    #[error("Empty command")]
    #[diagnostic(code(shell::empty))]
    Empty,
}

impl Command {
    /// Parse one line of terminal input
    ///
    /// Case-insensitive, whitespace-delimited; extra arguments are ignored.
    pub fn parse(input: &str) -> ParseResult {
        let mut parts = input.split_whitespace();
        let Some(head) = parts.next() else {
            return Err(ParseError::Empty);
        };

        match head.to_ascii_lowercase().as_str() {
            "malloc" | "alloc" | "m" => {
                let size = parse_size_arg(parts.next(), "malloc <size>")?;
                Ok(Command::Malloc { size })
            }
            "free" | "f" => {
                let address = parse_address_arg(parts.next(), "free <address>")?;
                Ok(Command::Free { address })
            }
            "reset" => Ok(Command::Reset),
            "defrag" | "compact" => Ok(Command::Defrag),
            "stats" => Ok(Command::Stats),
            "map" => Ok(Command::Map),
            "analyze" => Ok(Command::Analyze),
            "help" => Ok(Command::Help),
            "clear" | "cls" => Ok(Command::Clear),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parse a signed decimal size; negatives flow through so the executor can
/// report them as invalid sizes without mutating the heap
fn parse_size_arg(arg: Option<&str>, usage: &'static str) -> Result<i64, ParseError> {
    let arg = arg.ok_or(ParseError::MissingArgument { usage })?;
    arg.parse::<i64>().map_err(|_| ParseError::InvalidArgument {
        argument: arg.to_string(),
        usage,
    })
}

/// Parse an address, falling back to hex when the decimal parse fails
fn parse_address_arg(arg: Option<&str>, usage: &'static str) -> Result<Address, ParseError> {
    let arg = arg.ok_or(ParseError::MissingArgument { usage })?;
    if let Ok(address) = arg.parse::<Address>() {
        return Ok(address);
    }
    let hex = arg.trim_start_matches("0x").trim_start_matches("0X");
    Address::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidArgument {
        argument: arg.to_string(),
        usage,
    })
}
