//! CLI tests for the `shellkit` binary.
//!
//! Spawns the binary inside temporary trees and checks stdout and exit codes.

use std::process::Command;

use shellkit::exit_codes;
use shellkit::test_support::TestTree;

fn shellkit(tree: &TestTree) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shellkit"));
    cmd.current_dir(tree.path());
    cmd
}

fn stdout_lines(output: &std::process::Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn ls_prints_absolute_paths() {
    let tree = TestTree::project().expect("tree");
    let output = shellkit(&tree)
        .arg("ls")
        .arg(tree.path())
        .args(["-r", "--depth", "1", "-f"])
        .output()
        .expect("shellkit ls");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let lines = stdout_lines(&output);
    let expected = vec![
        tree.abs("a.txt").display().to_string(),
        tree.abs("sub/b.txt").display().to_string(),
    ];
    assert_eq!(lines, expected);
}

#[test]
fn ls_json_is_an_array() {
    let tree = TestTree::project().expect("tree");
    let output = shellkit(&tree)
        .args(["ls", "--json", "-p", "**/*.txt"])
        .output()
        .expect("shellkit ls");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let parsed: Vec<String> = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parsed.len(), 3);
}

#[test]
fn ls_missing_path_fails() {
    let tree = TestTree::project().expect("tree");
    let output = shellkit(&tree)
        .args(["ls", "nope"])
        .output()
        .expect("shellkit ls");
    assert_eq!(output.status.code(), Some(exit_codes::FAILURE));
    assert!(String::from_utf8_lossy(&output.stderr).contains("path not found"));
}

#[test]
fn write_then_cat() {
    let tree = TestTree::new().expect("tree");
    let status = shellkit(&tree)
        .args(["write", "note.txt", "hello\n"])
        .status()
        .expect("shellkit write");
    assert_eq!(status.code(), Some(exit_codes::OK));
    let status = shellkit(&tree)
        .args(["write", "--append", "note.txt", "world\n"])
        .status()
        .expect("shellkit write --append");
    assert_eq!(status.code(), Some(exit_codes::OK));

    let output = shellkit(&tree)
        .args(["cat", "note.txt"])
        .output()
        .expect("shellkit cat");
    assert_eq!(stdout_lines(&output), vec!["hello", "world"]);
}

#[test]
fn rm_non_empty_dir_requires_recurse() {
    let tree = TestTree::project().expect("tree");
    let status = shellkit(&tree)
        .args(["rm", "sub"])
        .status()
        .expect("shellkit rm");
    assert_eq!(status.code(), Some(exit_codes::FAILURE));
    assert!(tree.abs("sub").exists());

    let status = shellkit(&tree)
        .args(["rm", "-r", "sub"])
        .status()
        .expect("shellkit rm -r");
    assert_eq!(status.code(), Some(exit_codes::OK));
    assert!(!tree.abs("sub").exists());
}

#[test]
fn cp_mv_touch_mkdir() {
    let tree = TestTree::project().expect("tree");
    let run = |args: &[&str]| {
        shellkit(&tree)
            .args(args)
            .status()
            .expect("shellkit")
            .code()
    };
    assert_eq!(run(&["mkdir", "out/nested"]), Some(exit_codes::OK));
    assert_eq!(run(&["cp", "a.txt", "out/nested"]), Some(exit_codes::OK));
    assert_eq!(run(&["cp", "a.txt", "out/nested"]), Some(exit_codes::FAILURE));
    assert_eq!(
        run(&["cp", "--force", "a.txt", "out/nested"]),
        Some(exit_codes::OK)
    );
    assert_eq!(run(&["cp", "-r", "sub", "sub-copy"]), Some(exit_codes::OK));
    assert_eq!(run(&["mv", "sub-copy", "moved"]), Some(exit_codes::OK));
    assert_eq!(run(&["touch", "moved/new.txt"]), Some(exit_codes::OK));

    assert!(tree.abs("out/nested/a.txt").is_file());
    assert!(tree.abs("moved/sub2/c.txt").is_file());
    assert!(tree.abs("moved/new.txt").is_file());
    assert!(!tree.abs("sub-copy").exists());
}

#[test]
fn change_directory_flag_moves_pwd() {
    let tree = TestTree::project().expect("tree");
    let output = shellkit(&tree)
        .args(["pwd", "-C", "sub"])
        .output()
        .expect("shellkit pwd");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let printed = std::path::PathBuf::from(stdout_lines(&output).remove(0));
    let expected = tree.abs("sub").canonicalize().expect("canonicalize");
    assert_eq!(printed.canonicalize().expect("canonicalize"), expected);
}

#[cfg(unix)]
#[test]
fn run_exits_with_child_code_and_echoes() {
    let tree = TestTree::new().expect("tree");
    let output = shellkit(&tree)
        .args(["run", "sh -c 'echo out; exit 4'"])
        .output()
        .expect("shellkit run");
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(stdout_lines(&output), vec!["out"]);
}

#[cfg(unix)]
#[test]
fn run_feeds_stdin_file_and_respects_silent_config() {
    let tree = TestTree::new().expect("tree");
    tree.file("input.txt", "x\ny\n").expect("input");
    tree.file(".shellkit.toml", "silent = true\n").expect("config");

    let output = shellkit(&tree)
        .args(["run", "cat", "--stdin-file", "input.txt"])
        .output()
        .expect("shellkit run");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(output.stdout.is_empty(), "silent config suppresses echo");

    let output = shellkit(&tree)
        .args([
            "run",
            "cat",
            "--stdin-file",
            "input.txt",
            "--config",
            "missing.toml",
        ])
        .output()
        .expect("shellkit run");
    assert_eq!(stdout_lines(&output), vec!["x", "y"]);
}
