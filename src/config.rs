use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use log::LevelFilter;

pub const LOG_VAR: &str = "STRSCAN_LOG";
pub const HISTORY_VAR: &str = "STRSCAN_HISTORY";
const HISTORY_FILE: &str = ".strscan_history";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: LevelFilter,
    /// Set when the log level variable held something unparsable.
    pub invalid_log_level: Option<String>,
    /// Where REPL history lives, if anywhere.
    pub history: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_vars(
            env::var(LOG_VAR).ok(),
            env::var_os(HISTORY_VAR).map(PathBuf::from),
            home::home_dir(),
        )
    }

    pub fn from_vars(
        log: Option<String>,
        history: Option<PathBuf>,
        home: Option<PathBuf>,
    ) -> Config {
        let (log_level, invalid_log_level) = match log {
            None => (LevelFilter::Off, None),
            Some(level) => match LevelFilter::from_str(level.trim()) {
                Ok(level) => (level, None),
                Err(_) => (LevelFilter::Warn, Some(level)),
            },
        };
        let history = history.or_else(|| home.map(|home| home.join(HISTORY_FILE)));

        Config {
            log_level,
            invalid_log_level,
            history,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from_vars(None, None, None)
    }
}
