//! End-to-end tests of the `treebench` binary

mod common;

use std::io::{BufRead, BufReader};
use std::process::{Command, Output, Stdio};

use common::expected_output;
use test_case::test_case;

fn treebench() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_treebench"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    treebench().args(args).output().expect("binary starts")
}

/// First stdout line of a run; the process is killed after it.
///
/// Default-sized runs take far too long to finish inside a test, but the
/// stretch line alone shows which depth was chosen.
fn first_line(args: &[&str]) -> String {
    let mut child = treebench()
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("binary starts");

    let mut line = String::new();
    let stdout = child.stdout.take().expect("stdout piped");
    BufReader::new(stdout)
        .read_line(&mut line)
        .expect("stdout readable");

    child.kill().expect("child killed");
    child.wait().expect("child reaped");
    line
}

#[test_case(&["4"] ; "explicit four")]
#[test_case(&["-1"] ; "negative clamps to six")]
#[test_case(&["0"] ; "zero clamps to six")]
#[test_case(&["4", "5"] ; "extra arguments ignored")]
fn small_workloads_print_snapshot(args: &[&str]) {
    let output = run(args);

    assert!(output.status.success(), "exit status {:?}", output.status);
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        expected_output("run_n4.txt")
    );
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test_case(&[] ; "no argument")]
#[test_case(&["abc"] ; "not a number")]
#[test_case(&["-x"] ; "short flag lookalike")]
#[test_case(&["--foo"] ; "long flag lookalike")]
#[test_case(&["-x", "4"] ; "only first argument counts")]
fn unusable_input_runs_default_workload(args: &[&str]) {
    assert_eq!(first_line(args), "stretch tree of depth 22\t check: 8388607\n");
}

#[test]
fn oversized_workload_exits_with_error() {
    let output = run(&["100"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Depth 100 exceeds supported maximum 58"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn logs_go_to_stderr_only() {
    let output = treebench()
        .env("RUST_LOG", "info")
        .arg("4")
        .output()
        .expect("binary starts");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        expected_output("run_n4.txt")
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("run complete"));
}
