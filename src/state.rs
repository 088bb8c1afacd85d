use serde::{Deserialize, Serialize};

/// The observable state of a [`StringScanner`](crate::StringScanner): text,
/// cursor and match register. Compiled patterns are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerState {
    pub text: String,
    pub position: usize,
    pub last_match: Option<String>,
}
