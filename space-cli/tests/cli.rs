//! End-to-end tests for the `space` binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DOC: &str = "Working notes\n\n⫻status/meta:0\nSUCCESS.\n\n⫻data/json:store\n{\"count\": 4}\n";

fn space() -> Command {
    Command::cargo_bin("space").expect("space binary")
}

fn write_doc(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("doc.space");
    fs::write(&path, contents).expect("write doc");
    path.to_string_lossy().into_owned()
}

#[test]
fn inspect_defaults_to_treeviz() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, DOC);

    space()
        .current_dir(dir.path())
        .args(["inspect", &path])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("⧉ Document (2 records)"))
        .stdout(predicate::str::contains("├─ ¶ Working notes"))
        .stdout(predicate::str::contains("└─ ⫻ data/json:store"));
}

#[test]
fn inspect_json_keeps_bodies_opaque() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, DOC);

    space()
        .current_dir(dir.path())
        .args(["inspect", &path, "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"preamble\": \"Working notes\""))
        .stdout(predicate::str::contains("\"body\": \"{\\\"count\\\": 4}\""));
}

#[test]
fn inspect_reads_stdin() {
    let dir = TempDir::new().unwrap();

    space()
        .current_dir(dir.path())
        .args(["inspect", "-", "-f", "yaml"])
        .write_stdin("⫻x:z\nhello")
        .assert()
        .success()
        .stdout(predicate::str::contains("name: x"))
        .stdout(predicate::str::contains("place: z"));
}

#[test]
fn inspect_unknown_format_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, DOC);

    space()
        .current_dir(dir.path())
        .args(["inspect", &path, "-f", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format 'xml' not found"))
        .stderr(predicate::str::contains("json, space, treeviz, yaml"));
}

#[test]
fn inspect_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    space()
        .current_dir(dir.path())
        .args(["inspect", "missing.space"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: IO error:"));
}

#[test]
fn format_drops_preamble_by_default() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, DOC);

    space()
        .current_dir(dir.path())
        .args(["format", &path])
        .assert()
        .success()
        .stdout("⫻status/meta:0\nSUCCESS.\n\n⫻data/json:store\n{\"count\": 4}\n");
}

#[test]
fn format_keep_preamble_and_write() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "intro\n⫻a\n\n\nbody\n\n\n⫻b\nmore");

    space()
        .current_dir(dir.path())
        .args(["format", &path, "--keep-preamble", "--write"])
        .assert()
        .success()
        .stdout("");

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "intro\n\n⫻a\nbody\n\n⫻b\nmore\n"
    );
}

#[test]
fn config_file_changes_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, DOC);
    fs::write(
        dir.path().join(".space.toml"),
        "[output]\nformat = \"space\"\n",
    )
    .unwrap();

    space()
        .current_dir(dir.path())
        .args(["inspect", &path])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("⫻status/meta:0\nSUCCESS."));
}

#[test]
fn prompt_frames_document_as_context() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "⫻a\nbody");

    space()
        .current_dir(dir.path())
        .args(["prompt", &path, "summarize"])
        .assert()
        .success()
        .stdout("CONTEXT INPUT:\n⫻a\nbody\n\nUSER COMMAND:\nsummarize\n");
}

#[cfg(unix)]
#[test]
fn append_runs_generator_and_appends_output() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "⫻a\nbody\n\n");

    space()
        .current_dir(dir.path())
        .args(["append", &path, "-m", "add status", "--"])
        .args(["sh", "-c", "cat > /dev/null; printf '⫻status/meta:0\\nSUCCESS.\\n'"])
        .assert()
        .success()
        .stdout("⫻a\nbody\n\n⫻status/meta:0\nSUCCESS.\n");
}

#[cfg(unix)]
#[test]
fn append_large_document_through_streaming_generator() {
    let dir = TempDir::new().unwrap();
    let body = "line of context\n".repeat(16 * 1024);
    let path = write_doc(&dir, &format!("⫻a\n{body}"));

    space()
        .current_dir(dir.path())
        .args(["append", &path, "-m", "echo it back", "--", "cat"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::ends_with("USER COMMAND:\necho it back\n"));
}

#[cfg(unix)]
#[test]
fn append_failure_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "⫻a\nbody");

    space()
        .current_dir(dir.path())
        .args(["append", &path, "-m", "go", "--", "sh", "-c", "echo quota exceeded >&2; exit 3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Generator error: quota exceeded"));
}

#[cfg(unix)]
#[test]
fn append_inline_errors_adds_error_record() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(&dir, "⫻a\nbody");

    space()
        .current_dir(dir.path())
        .args(["append", &path, "-m", "go", "--inline-errors", "--", "true"])
        .assert()
        .success()
        .stdout("⫻a\nbody\n\n⫻error/meta:alert\nNo response generated.\n");
}

#[test]
fn template_parses_cleanly() {
    let dir = TempDir::new().unwrap();
    let output = space()
        .current_dir(dir.path())
        .arg("template")
        .output()
        .unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let doc = space_parser::parse(&text);
    assert_eq!(doc.record_count(), 3);
    assert_eq!(doc.error_count(), 0);
}

#[test]
fn list_formats_names_every_format() {
    space()
        .arg("list-formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("space"))
        .stdout(predicate::str::contains("treeviz"))
        .stdout(predicate::str::contains("yaml"));
}
