use std::str::FromStr;

use log::debug;

use crate::errors::CommandError;
use crate::index::TextIndex;
use crate::scanner::StringScanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOp {
    Check,
    Scan,
    Skip,
    CheckUntil,
    ScanUntil,
    SkipUntil,
}

impl FromStr for MatchOp {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(MatchOp::Check),
            "scan" => Ok(MatchOp::Scan),
            "skip" => Ok(MatchOp::Skip),
            "check_until" => Ok(MatchOp::CheckUntil),
            "scan_until" => Ok(MatchOp::ScanUntil),
            "skip_until" => Ok(MatchOp::SkipUntil),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New(String),
    Append(String),
    Match { op: MatchOp, pattern: String },
    Unscan,
    Getch,
    Peek(usize),
    Rest,
    Pos,
    Eos,
    Char,
    Matched,
    Index(TextIndex),
    State,
    Show,
    Exit,
}

/// Splits a line into a command word and its argument.
///
/// One blank separates the two; everything after it is taken verbatim, so
/// patterns and text keep their backslashes and inner spacing. Returns
/// `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut scanner = StringScanner::new(line);
    scanner.skip(r"\s+")?;
    if scanner.is_eos() {
        return Ok(None);
    }

    let word = match scanner.scan(r"\w+")? {
        Some(word) => word,
        None => return Err(CommandError::UnknownCommand(scanner.rest().to_string())),
    };
    if scanner.skip(r"[ \t]")? == 0 && !scanner.is_eos() {
        // Something like `scan(`: the word runs into the argument.
        return Err(CommandError::UnknownCommand(format!("{}{}", word, scanner.rest())));
    }
    let argument = scanner.rest();
    debug!("Command {:?} with argument {:?}", word, argument);

    let required = || {
        if argument.is_empty() {
            Err(CommandError::MissingArgument(word.clone()))
        } else {
            Ok(argument.to_string())
        }
    };

    let command = match word.as_str() {
        "new" => Command::New(argument.to_string()),
        "append" => Command::Append(required()?),
        "unscan" => Command::Unscan,
        "getch" => Command::Getch,
        "peek" => {
            let count = argument.trim();
            if count.is_empty() {
                Command::Peek(1)
            } else {
                let n = count
                    .parse::<usize>()
                    .map_err(|_| CommandError::InvalidCount(count.to_string()))?;
                Command::Peek(n)
            }
        }
        "rest" => Command::Rest,
        "pos" => Command::Pos,
        "eos" => Command::Eos,
        "char" => Command::Char,
        "matched" => Command::Matched,
        "index" => Command::Index(required()?.parse()?),
        "state" => Command::State,
        "show" => Command::Show,
        "exit" => Command::Exit,
        other => match other.parse::<MatchOp>() {
            Ok(op) => Command::Match {
                op,
                pattern: required()?,
            },
            Err(()) => return Err(CommandError::UnknownCommand(other.to_string())),
        },
    };
    Ok(Some(command))
}
