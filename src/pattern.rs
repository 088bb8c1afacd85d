use std::collections::HashMap;

use log::debug;
use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};

use crate::errors::ScanError;

/// One compiled pattern, usable both anchored at the start of the haystack
/// and as a leftmost search.
#[derive(Debug, Clone)]
pub(crate) struct Compiled {
    regex: Regex,
}

impl Compiled {
    fn new(pattern: &str) -> Result<Compiled, ScanError> {
        let regex = Regex::new(pattern).map_err(|source| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Compiled { regex })
    }

    /// End offset (in bytes, relative to `haystack`) of the first match.
    pub fn match_end(&self, haystack: &str, anchored: bool) -> Option<usize> {
        let anchored = if anchored { Anchored::Yes } else { Anchored::No };
        self.regex
            .search(&Input::new(haystack).anchored(anchored))
            .map(|m| m.end())
    }
}

/// Compiled patterns keyed by their source string.
#[derive(Debug, Clone, Default)]
pub(crate) struct PatternCache {
    compiled: HashMap<String, Compiled>,
}

impl PatternCache {
    pub fn new() -> PatternCache {
        PatternCache::default()
    }

    pub fn get(&mut self, pattern: &str) -> Result<&Compiled, ScanError> {
        if !self.compiled.contains_key(pattern) {
            debug!("Compiling pattern: {}", pattern);
            let compiled = Compiled::new(pattern)?;
            self.compiled.insert(pattern.to_string(), compiled);
        }
        Ok(&self.compiled[pattern])
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }
}
