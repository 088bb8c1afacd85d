use std::fmt;

use log::debug;

use crate::errors::ScanError;
use crate::index::{self, TextIndex};
use crate::pattern::PatternCache;
use crate::state::ScannerState;

const DISPLAY_CHARS: usize = 30;

/// What a matching operation hands back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    Text,
    Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Move the cursor past the match.
    pub advance: bool,
    /// Require the match to begin at the cursor. When false the pattern is
    /// searched for anywhere in the rest of the text.
    pub anchored: bool,
    pub returns: Returns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Text(Option<String>),
    Length(usize),
}

/// A cursor over a string with regex-driven lexing primitives, in the spirit
/// of Ruby's `StringScanner`.
///
/// Positions and lengths are counted in characters. A failed match is not an
/// error: it leaves the match register empty and callers branch on that.
#[derive(Debug, Clone)]
pub struct StringScanner {
    text: String,
    position: usize,
    // Byte offset of `position` inside `text`.
    offset: usize,
    matched: Option<String>,
    patterns: PatternCache,
}

impl StringScanner {
    pub fn new(text: impl Into<String>) -> StringScanner {
        StringScanner {
            text: text.into(),
            position: 0,
            offset: 0,
            matched: None,
            patterns: PatternCache::new(),
        }
    }

    /// Creates a scanner with the cursor already at `position`.
    ///
    /// Fails with [`ScanError::OutOfRange`] when `position` lies past the end
    /// of `text`.
    pub fn with_position(
        text: impl Into<String>,
        position: usize,
    ) -> Result<StringScanner, ScanError> {
        let mut scanner = StringScanner::new(text);
        scanner.offset = byte_offset(&scanner.text, position)?;
        scanner.position = position;
        Ok(scanner)
    }

    pub fn restore(state: ScannerState) -> Result<StringScanner, ScanError> {
        let mut scanner = StringScanner::with_position(state.text, state.position)?;
        scanner.matched = state.last_match;
        Ok(scanner)
    }

    pub fn snapshot(&self) -> ScannerState {
        ScannerState {
            text: self.text.clone(),
            position: self.position,
            last_match: self.matched.clone(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The match register: whatever the last matching operation matched.
    pub fn matched(&self) -> Option<&str> {
        self.matched.as_deref()
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The primitive behind every matching operation.
    ///
    /// On success the match register is set to the text from the cursor up to
    /// the END of the match. For an unanchored search this includes whatever
    /// was skipped before the match proper, and advancing consumes it too.
    pub fn attempt_match(
        &mut self,
        pattern: &str,
        options: MatchOptions,
    ) -> Result<Outcome, ScanError> {
        let rest = &self.text[self.offset..];
        let end = self.patterns.get(pattern)?.match_end(rest, options.anchored);

        self.matched = end.map(|end| rest[..end].to_string());
        match &self.matched {
            Some(m) => debug!("Matched {:?} at {} with {:?}", m, self.position, pattern),
            None => debug!("No match at {} for {:?}", self.position, pattern),
        }

        let length = self.matched_len();
        if options.advance {
            self.position += length;
            self.offset += end.unwrap_or(0);
        }

        Ok(match options.returns {
            Returns::Text => Outcome::Text(self.matched.clone()),
            Returns::Length => Outcome::Length(length),
        })
    }

    /// Looks ahead for `pattern` at the cursor without consuming it. The match
    /// register is still updated.
    pub fn check(&mut self, pattern: &str) -> Result<Option<String>, ScanError> {
        self.text_match(pattern, false, true)
    }

    /// Consumes `pattern` at the cursor, returning the matched text.
    pub fn scan(&mut self, pattern: &str) -> Result<Option<String>, ScanError> {
        self.text_match(pattern, true, true)
    }

    /// Consumes `pattern` at the cursor, returning how many characters were
    /// skipped (0 when nothing matched).
    pub fn skip(&mut self, pattern: &str) -> Result<usize, ScanError> {
        self.length_match(pattern, true, true)
    }

    /// Looks ahead up to and including the next occurrence of `pattern`.
    pub fn check_until(&mut self, pattern: &str) -> Result<Option<String>, ScanError> {
        self.text_match(pattern, false, false)
    }

    /// Consumes everything up to and including the next occurrence of
    /// `pattern`.
    pub fn scan_until(&mut self, pattern: &str) -> Result<Option<String>, ScanError> {
        self.text_match(pattern, true, false)
    }

    pub fn skip_until(&mut self, pattern: &str) -> Result<usize, ScanError> {
        self.length_match(pattern, true, false)
    }

    /// Steps back over the last match and clears the register. Only one step
    /// can be undone; a second call does nothing.
    pub fn unscan(&mut self) {
        if let Some(m) = self.matched.take() {
            debug!("Unscanning {:?} from {}", m, self.position);
            // Step back character by character: after a non-consuming check
            // the register need not be what lies behind the cursor. Stops at
            // the start of the text.
            let back = m.chars().count();
            self.offset = self.text[..self.offset]
                .char_indices()
                .rev()
                .take(back)
                .last()
                .map_or(self.offset, |(offset, _)| offset);
            self.position = self.position.saturating_sub(back);
        }
    }

    /// Consumes a single character.
    ///
    /// Fails with [`ScanError::EndOfInput`] at the end of the text, leaving the
    /// scanner untouched.
    pub fn getch(&mut self) -> Result<char, ScanError> {
        let c = self.current_char().ok_or(ScanError::EndOfInput {
            position: self.position,
        })?;
        self.position += 1;
        self.offset += c.len_utf8();
        self.matched = Some(c.to_string());
        Ok(c)
    }

    pub fn append(&mut self, suffix: &str) {
        self.text.push_str(suffix);
    }

    /// Returns the `n` characters that follow the current one.
    ///
    /// Note this starts one past the cursor: on `"Hello"` at position 0,
    /// `peek(2)` is `"el"`, not `"He"`.
    pub fn peek(&self, n: usize) -> String {
        self.rest().chars().skip(1).take(n).collect()
    }

    pub fn item(&self, index: isize) -> Result<char, ScanError> {
        index::char_at(&self.text, index)
    }

    pub fn slice(
        &self,
        start: Option<isize>,
        stop: Option<isize>,
        step: Option<isize>,
    ) -> Result<String, ScanError> {
        index::slice(&self.text, start, stop, step)
    }

    pub fn get(&self, index: impl Into<TextIndex>) -> Result<String, ScanError> {
        index::get(&self.text, index.into())
    }

    /// The character under the cursor, or `None` at the end of the text.
    pub fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn is_eos(&self) -> bool {
        self.offset == self.text.len()
    }

    pub fn rest(&self) -> &str {
        &self.text[self.offset..]
    }

    fn matched_len(&self) -> usize {
        self.matched.as_ref().map_or(0, |m| m.chars().count())
    }

    fn text_match(
        &mut self,
        pattern: &str,
        advance: bool,
        anchored: bool,
    ) -> Result<Option<String>, ScanError> {
        let options = MatchOptions {
            advance,
            anchored,
            returns: Returns::Text,
        };
        match self.attempt_match(pattern, options)? {
            Outcome::Text(m) => Ok(m),
            Outcome::Length(_) => Ok(self.matched.clone()),
        }
    }

    fn length_match(
        &mut self,
        pattern: &str,
        advance: bool,
        anchored: bool,
    ) -> Result<usize, ScanError> {
        let options = MatchOptions {
            advance,
            anchored,
            returns: Returns::Length,
        };
        match self.attempt_match(pattern, options)? {
            Outcome::Length(n) => Ok(n),
            Outcome::Text(_) => Ok(self.matched_len()),
        }
    }
}

impl fmt::Display for StringScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = if self.len() > DISPLAY_CHARS {
            self.text.chars().take(DISPLAY_CHARS).chain("...".chars()).collect()
        } else {
            self.text.clone()
        };
        write!(f, "<StringScanner: position={} text=\"{}\">", self.position, text)
    }
}

fn byte_offset(text: &str, position: usize) -> Result<usize, ScanError> {
    let out_of_range = || ScanError::OutOfRange {
        index: isize::try_from(position).unwrap_or(isize::MAX),
        len: text.chars().count(),
    };
    match text.char_indices().nth(position) {
        Some((offset, _)) => Ok(offset),
        None if text.chars().count() == position => Ok(text.len()),
        None => Err(out_of_range()),
    }
}
