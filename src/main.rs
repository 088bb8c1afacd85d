use log::{debug, warn};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

use strscan::config::{Config, LOG_VAR};
use strscan::repl::{Reply, Session};

fn main() -> Result<()> {
    let config = Config::from_env();
    if TermLogger::init(
        config.log_level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Error: logger already initialised");
    }
    if let Some(level) = &config.invalid_log_level {
        warn!("Ignoring invalid {} value: {}", LOG_VAR, level);
    }

    let mut rl = DefaultEditor::new()?;
    if let Some(path) = &config.history {
        if rl.load_history(path).is_err() {
            debug!("No history loaded from {}", path.display());
        }
    }

    let mut session = Session::new();
    loop {
        let readline = rl.readline("> ");
        let line = match readline {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                line
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        };

        match session.execute(&line) {
            Ok(Reply::Output(s)) => {
                if !s.is_empty() {
                    println!("{}", s)
                }
            }
            Ok(Reply::Silent) => {}
            Ok(Reply::Exit) => break,
            Err(e) => eprintln!("{}", e),
        }
    }

    if let Some(path) = &config.history {
        if let Err(err) = rl.save_history(path) {
            debug!("Could not save history to {}: {}", path.display(), err);
        }
    }
    Ok(())
}
