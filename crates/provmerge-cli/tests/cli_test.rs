use std::io::Write;
use std::process::{Command, Output, Stdio};

fn provmerge() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_provmerge"));
    command
        .env_remove("RUST_LOG")
        .env_remove("PROVMERGE_SCHEME")
        .env_remove("PROVMERGE_BATCH_SIZE")
        .args(["--store", "memory"]);
    command
}

fn write_input(dir: &tempfile::TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write input");
    path.to_string_lossy().into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn successful_import_is_silent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "usage.json", test_support::prov_json::USAGE);

    let output = provmerge().arg(&input).output().expect("run provmerge");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn reads_standard_input() {
    let mut child = provmerge()
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn provmerge");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(test_support::prov_json::NESTED.as_bytes())
        .expect("write stdin");

    let output = child.wait_with_output().expect("wait for provmerge");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn merges_several_inputs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let usage = write_input(&dir, "usage.json", test_support::prov_json::USAGE);
    let bundle = write_input(&dir, "bundle.json", test_support::prov_json::BUNDLE);

    let output = provmerge()
        .args(["--verbose", "--batch-size", "1"])
        .args([&usage, &bundle])
        .output()
        .expect("run provmerge");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let log = stderr(&output);
    assert!(log.contains("Merged inputs"));
    assert!(log.contains("Import finished"));
}

#[test]
fn unsupported_scheme_prints_a_hint() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "usage.json", test_support::prov_json::USAGE);

    let output = provmerge().args(["--scheme", "ftp", &input]).output().expect("run provmerge");

    assert_eq!(output.status.code(), Some(1));
    let log = stderr(&output);
    assert!(log.contains("error:"), "stderr: {log}");
    assert!(log.contains("ftp"), "stderr: {log}");
    assert!(log.contains("Hint:"), "stderr: {log}");
}

#[test]
fn invalid_json_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "broken.json", "{\"entity\": ");

    let output = provmerge().arg(&input).output().expect("run provmerge");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("broken.json"));
}

#[test]
fn missing_file_fails() {
    let output = provmerge().arg("/nonexistent/provmerge.json").output().expect("run provmerge");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("/nonexistent/provmerge.json"));
}

#[test]
fn zero_batch_size_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "usage.json", test_support::prov_json::USAGE);

    let output = provmerge().args(["--batch-size", "0", &input]).output().expect("run provmerge");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn json_logs_are_one_object_per_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = write_input(&dir, "usage.json", test_support::prov_json::USAGE);

    let output = provmerge()
        .args(["--verbose", "--log-format", "json", &input])
        .output()
        .expect("run provmerge");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let log = stderr(&output);
    assert!(!log.is_empty());
    for line in log.lines() {
        assert!(line.starts_with('{'), "not JSON: {line}");
    }
}
