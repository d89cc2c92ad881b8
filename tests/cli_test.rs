// CLI entry point tests.

use std::process::Command;

use tempfile::tempdir;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_batch_runner"))
}

// ============================================================
// 1. Usage / version
// ============================================================

#[test]
fn test_main_no_args_shows_usage() {
    let output = cargo_bin().output().expect("failed to execute binary");

    assert!(
        !output.status.success(),
        "should exit with failure when no args given"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage"),
        "stderr should contain 'Usage', got: {stderr}"
    );
}

#[test]
fn test_main_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "should exit with success for --help"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage"),
        "stderr should contain 'Usage', got: {stderr}"
    );
}

#[test]
fn test_main_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "should exit with success for --version"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    let version = env!("CARGO_PKG_VERSION");
    assert!(
        stderr.contains(version),
        "stderr should contain version '{version}', got: {stderr}"
    );
}

// ============================================================
// 2. Argument validation
// ============================================================

#[test]
fn test_main_nonexistent_list_file() {
    let dir = tempdir().expect("tempdir");
    let output = cargo_bin()
        .args(["/no/such/list.txt", "2", "out.bin", "--cmd", "true"])
        .current_dir(dir.path())
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR"),
        "stderr should contain 'ERROR', got: {stderr}"
    );
}

#[test]
fn test_main_zero_workers_aborts_before_processing() {
    let dir = tempdir().expect("tempdir");
    let list = dir.path().join("files.txt");
    std::fs::write(&list, "a.dat\n").expect("write list");

    let output = cargo_bin()
        .args([
            list.to_str().unwrap(),
            "0",
            dir.path().join("out.bin").to_str().unwrap(),
            "--cmd",
            "true",
        ])
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("processed successfully"),
        "no job should complete, got: {stderr}"
    );
}

#[test]
fn test_main_missing_worker_command() {
    let dir = tempdir().expect("tempdir");
    let list = dir.path().join("files.txt");
    std::fs::write(&list, "a.dat\n").expect("write list");

    let output = cargo_bin()
        .args([
            list.to_str().unwrap(),
            "2",
            dir.path().join("out.bin").to_str().unwrap(),
        ])
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("worker command"),
        "stderr should mention the missing worker command, got: {stderr}"
    );
}

// ============================================================
// 3. End-to-end runs
// ============================================================

#[test]
fn test_main_all_jobs_succeed_no_failure_file() {
    let dir = tempdir().expect("tempdir");
    let list = dir.path().join("files.txt");
    std::fs::write(&list, "a.dat\nb.dat\nc.dat\n").expect("write list");

    let output = cargo_bin()
        .args([
            list.to_str().unwrap(),
            "2",
            dir.path().join("out.bin").to_str().unwrap(),
            "--cmd",
            "true",
        ])
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success(), "run should succeed");
    assert!(
        !dir.path().join("failed_files.txt").exists(),
        "no failure file expected when every job succeeds"
    );
}

#[test]
fn test_main_failing_command_records_all_jobs() {
    let dir = tempdir().expect("tempdir");
    let list = dir.path().join("files.txt");
    std::fs::write(&list, "a.dat\nb.dat\nc.dat\n").expect("write list");

    let output = cargo_bin()
        .args([
            list.to_str().unwrap(),
            "2",
            dir.path().join("out.bin").to_str().unwrap(),
            "--cmd",
            "false",
        ])
        .output()
        .expect("failed to execute binary");

    // Individual job failures are recorded, not fatal.
    assert!(output.status.success(), "run should still exit successfully");

    let content =
        std::fs::read_to_string(dir.path().join("failed_files.txt")).expect("failure file");
    let mut lines: Vec<&str> = content.lines().collect();
    lines.sort();
    assert_eq!(lines, vec!["a.dat", "b.dat", "c.dat"]);
}

#[cfg(unix)]
#[test]
fn test_main_selective_failure() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("tempdir");
    let list = dir.path().join("files.txt");
    std::fs::write(&list, "a.dat\nb.dat\nc.dat\n").expect("write list");

    // Worker script that fails only for b.dat.
    let script = dir.path().join("worker.sh");
    std::fs::write(&script, "#!/bin/sh\ntest \"$1\" != b.dat\n").expect("write script");
    let mut perms = std::fs::metadata(&script).expect("stat").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&script, perms).expect("chmod");

    let output = cargo_bin()
        .args([
            list.to_str().unwrap(),
            "2",
            dir.path().join("result.parquet").to_str().unwrap(),
            "--cmd",
            script.to_str().unwrap(),
        ])
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());
    let content =
        std::fs::read_to_string(dir.path().join("failed_files.txt")).expect("failure file");
    assert_eq!(content, "b.dat\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("3/3 completed"),
        "log should reach 3/3, got: {stderr}"
    );
    assert!(
        stderr.contains("ERROR"),
        "failed job should be logged at error level, got: {stderr}"
    );
}
