pub mod config;
pub mod errors;
pub mod index;
mod pattern;
pub mod repl;
pub mod scanner;
pub mod state;

pub use errors::{CommandError, ScanError};
pub use index::TextIndex;
pub use scanner::{MatchOptions, Outcome, Returns, StringScanner};
pub use state::ScannerState;
