mod command;

pub use command::{parse, Command, MatchOp};

use log::debug;

use crate::errors::CommandError;
use crate::scanner::StringScanner;

const NIL: &str = "nil";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Silent,
    Exit,
}

/// One interactive scanner driven by line commands.
pub struct Session {
    scanner: StringScanner,
}

impl Session {
    pub fn new() -> Session {
        Session {
            scanner: StringScanner::new(""),
        }
    }

    pub fn scanner(&self) -> &StringScanner {
        &self.scanner
    }

    pub fn execute(&mut self, line: &str) -> Result<Reply, CommandError> {
        match parse(line)? {
            Some(command) => self.run(command),
            None => Ok(Reply::Silent),
        }
    }

    pub fn run(&mut self, command: Command) -> Result<Reply, CommandError> {
        debug!("Running {:?}", command);
        let scanner = &mut self.scanner;
        let output = match command {
            Command::New(text) => {
                *scanner = StringScanner::new(text);
                return Ok(Reply::Silent);
            }
            Command::Append(text) => {
                scanner.append(&text);
                return Ok(Reply::Silent);
            }
            Command::Unscan => {
                scanner.unscan();
                return Ok(Reply::Silent);
            }
            Command::Exit => return Ok(Reply::Exit),
            Command::Match { op, pattern } => match op {
                MatchOp::Check => or_nil(scanner.check(&pattern)?),
                MatchOp::Scan => or_nil(scanner.scan(&pattern)?),
                MatchOp::Skip => scanner.skip(&pattern)?.to_string(),
                MatchOp::CheckUntil => or_nil(scanner.check_until(&pattern)?),
                MatchOp::ScanUntil => or_nil(scanner.scan_until(&pattern)?),
                MatchOp::SkipUntil => scanner.skip_until(&pattern)?.to_string(),
            },
            Command::Getch => scanner.getch()?.to_string(),
            Command::Peek(n) => scanner.peek(n),
            Command::Rest => scanner.rest().to_string(),
            Command::Pos => scanner.position().to_string(),
            Command::Eos => scanner.is_eos().to_string(),
            Command::Char => or_nil(scanner.current_char().map(String::from)),
            Command::Matched => or_nil(scanner.matched().map(String::from)),
            Command::Index(index) => scanner.get(index)?,
            Command::State => serde_json::to_string(&scanner.snapshot())?,
            Command::Show => scanner.to_string(),
        };
        Ok(Reply::Output(output))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn or_nil(value: Option<String>) -> String {
    value.unwrap_or_else(|| NIL.to_string())
}
