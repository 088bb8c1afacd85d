use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn run_repl_in(home: &Path, input: &str, log: Option<&str>) -> (String, String) {
    let strscan_path = env!("CARGO_BIN_EXE_strscan");

    let mut command = Command::new(strscan_path);
    command
        .current_dir(home)
        .env("HOME", home)
        .env_remove("STRSCAN_HISTORY")
        .env_remove("STRSCAN_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(level) = log {
        command.env("STRSCAN_LOG", level);
    }
    let mut child = command.spawn().expect("Failed to spawn child process");

    let input = input.to_string() + "\n";
    let mut stdin = child.stdin.take().expect("Failed to open stdin");
    stdin
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");
    drop(stdin);

    let output = child.wait_with_output().expect("Failed to read stdout");

    (
        String::from_utf8_lossy(&output.stdout).trim().to_string(),
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
    )
}

fn run_repl(input: &str) -> (String, String) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    run_repl_in(temp_dir.path(), input, None)
}

#[test]
fn test_check_command() {
    let (stdout, stderr) = run_repl("new Hello, world!\ncheck \\w+\npos");
    assert_eq!(stdout, "Hello\n0");
    assert_eq!(stderr, "");
}

#[test]
fn test_skip_and_unscan() {
    let (stdout, stderr) = run_repl("new Hello, world!\nskip \\w+\npos\nunscan\npos\nmatched");
    assert_eq!(stdout, "5\n5\n0\nnil");
    assert_eq!(stderr, "");
}

#[test]
fn test_failed_match_prints_nil() {
    let (stdout, stderr) = run_repl("new Hello\nscan \\d+\nskip \\d+");
    assert_eq!(stdout, "nil\n0");
    assert_eq!(stderr, "");
}

#[test]
fn test_scan_until() {
    let (stdout, stderr) = run_repl("new Hello, world!\nscan_until ,\nrest");
    assert_eq!(stdout, "Hello,\n world!");
    assert_eq!(stderr, "");
}

#[test]
fn test_getch_and_peek() {
    let (stdout, stderr) = run_repl("new Hello, world!\npeek 2\ngetch\npos\nchar");
    assert_eq!(stdout, "el\nH\n1\ne");
    assert_eq!(stderr, "");
}

#[test]
fn test_eos() {
    let (stdout, stderr) = run_repl("new Hello, world!\neos\nscan Hello, world!\neos\nchar");
    assert_eq!(stdout, "false\nHello, world!\ntrue\nnil");
    assert_eq!(stderr, "");
}

#[test]
fn test_index_command() {
    let (stdout, stderr) = run_repl("new Hello, world!\nindex 2\nindex -1\nindex :5\nindex 1:5:2");
    assert_eq!(stdout, "l\n!\nHello\nel");
    assert_eq!(stderr, "");
}

#[test]
fn test_show_and_state() {
    let (stdout, stderr) = run_repl("new Hello, world!\nappend  again\nshow\nstate");
    assert_eq!(
        stdout,
        "<StringScanner: position=0 text=\"Hello, world! again\">\n\
         {\"text\":\"Hello, world! again\",\"position\":0,\"last_match\":null}"
    );
    assert_eq!(stderr, "");
}

#[test]
fn test_errors_do_not_stop_the_session() {
    let (stdout, stderr) = run_repl("new a\ngetch\ngetch\nindex 5\nscan (\nbogus\npos");
    assert_eq!(stdout, "a\n1");
    // Regex errors span several lines, so only the ends are pinned down.
    assert!(stderr.starts_with(
        "End of input at position 1\n\
         Index 5 out of range for text of length 1\n\
         Invalid pattern \"(\""
    ));
    assert!(stderr.ends_with("Unknown command: bogus"));
}

#[test]
fn test_exit_command() {
    let (stdout, stderr) = run_repl("new abc\nexit\nrest");
    assert_eq!(stdout, "");
    assert_eq!(stderr, "");
}

#[test]
fn test_history_is_saved() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (_, stderr) = run_repl_in(temp_dir.path(), "new abc\nscan a", None);
    assert_eq!(stderr, "");
    let history = std::fs::read_to_string(temp_dir.path().join(".strscan_history"))
        .expect("history file should exist");
    assert!(history.contains("scan a"));
}

#[test]
fn test_invalid_log_level_warns() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (stdout, stderr) = run_repl_in(temp_dir.path(), "new abc\nrest", Some("loud"));
    assert_eq!(stdout, "abc");
    assert!(stderr.contains("Ignoring invalid STRSCAN_LOG value: loud"));
}
