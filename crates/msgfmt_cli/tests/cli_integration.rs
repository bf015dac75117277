//! Integration tests that run the CLI binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_msgfmt"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = bin()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary not found - run cargo build first");
    // The binary may exit (e.g. on a config error) before reading stdin.
    if let Err(e) = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
    {
        assert_eq!(e.kind(), std::io::ErrorKind::BrokenPipe, "write stdin: {e}");
    }
    child.wait_with_output().expect("wait for msgfmt")
}

#[test]
fn cli_help_succeeds_and_outputs_usage() {
    let output = bin()
        .arg("--help")
        .output()
        .expect("binary not found - run cargo build first");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("msgfmt"));
    assert!(stdout.contains("--mode"));
}

#[test]
fn formats_file_as_finalized_message() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let input = tmp.path().join("message.txt");
    std::fs::write(&input, "1. a\n2. b").unwrap();

    let output = bin().arg(&input).output().expect("run msgfmt");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "<ol class=\"numbered-list\" data-type=\"decimal\"><li>a</li><li>b</li></ol>"
    );
}

#[test]
fn stream_mode_reads_stdin() {
    let output = run_with_stdin(&["--mode", "stream"], "**hai**\n- satu\n- du");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        concat!(
            "<strong class=\"bold-text\">hai</strong><br>",
            "<div class=\"list-item bullet\"><span class=\"list-bullet\">•</span> satu</div><br>",
            "- du"
        )
    );
}

#[test]
fn user_mode_only_escapes() {
    let output = run_with_stdin(&["-m", "user"], "a <b>\n**c**");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "a &lt;b&gt;<br>**c**"
    );
}

#[test]
fn check_complete_reports_status() {
    let done = run_with_stdin(&["--check-complete"], "Proses selesai, terima kasih");
    assert_eq!(String::from_utf8_lossy(&done.stdout).trim_end(), "complete");

    let busy = run_with_stdin(&["--check-complete"], "still working");
    assert_eq!(String::from_utf8_lossy(&busy.stdout).trim_end(), "incomplete");
}

#[test]
fn writes_output_file() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let out = tmp.path().join("out.html");

    let output = run_with_stdin(&["-o", out.to_str().unwrap()], "# Halo");

    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "<h2 class=\"msg-header-1\">Halo</h2>"
    );
}

#[test]
fn config_file_replaces_keywords() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let config = tmp.path().join("msgfmt.toml");
    std::fs::write(&config, "[completion]\nkeywords = [\"fertig\"]\n").unwrap();

    let output = run_with_stdin(
        &["--check-complete", "-c", config.to_str().unwrap()],
        "selesai",
    );

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "incomplete");
}

#[test]
fn invalid_config_exits_with_error() {
    let tmp = tempfile::TempDir::new().expect("temp dir");
    let config = tmp.path().join("broken.toml");
    std::fs::write(&config, "[normalize\n").unwrap();

    let output = run_with_stdin(&["-c", config.to_str().unwrap()], "hi");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config"), "got: {}", stderr);
}

#[test]
fn missing_input_exits_with_error() {
    let output = bin()
        .arg("/nonexistent/msgfmt/input.txt")
        .output()
        .expect("run msgfmt");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "got: {}", stderr);
}
