use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_automata::meta::BuildError,
    },
    #[error("Invalid index: {0}")]
    InvalidIndex(String),
    #[error("Index {index} out of range for text of length {len}")]
    OutOfRange { index: isize, len: usize },
    #[error("End of input at position {position}")]
    EndOfInput { position: usize },
}

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Missing argument for {0}")]
    MissingArgument(String),
    #[error("Invalid count: {0}")]
    InvalidCount(String),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
