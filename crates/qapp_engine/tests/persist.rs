use std::fs;

use qapp_engine::{deterministic_filename, ensure_output_dir, AtomicFileWriter, PopOutWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("popouts");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("doc.html", "hello").unwrap();
    assert_eq!(first.file_name().unwrap(), "doc.html");
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("doc.html", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("doc.html", "data").is_err());
    assert!(!file_path.with_file_name("doc.html").exists());
}

#[test]
fn popout_name_is_stable_per_url() {
    let a = deterministic_filename(Some("My: Page?"), "https://a.example.com");
    let b = deterministic_filename(Some("My: Page?"), "https://a.example.com");
    let c = deterministic_filename(Some("My: Page?"), "https://b.example.com");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.starts_with("My_ Page--"));
    assert!(a.ends_with(".html"));
}

#[test]
fn popout_name_falls_back_for_missing_or_reserved_titles() {
    assert!(deterministic_filename(None, "u").starts_with("archive--"));
    assert!(deterministic_filename(Some("///"), "u").starts_with("archive--"));
    assert!(deterministic_filename(Some("CON"), "u").starts_with("CON_--"));
}

#[test]
fn popout_writes_standalone_document() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("out");
    let writer = PopOutWriter::new(dir.clone());

    let written = writer
        .write(Some("Snap"), "https://a.example.com", "<html>snap</html>")
        .unwrap();
    assert_eq!(written.parent().unwrap(), dir.as_path());
    assert_eq!(fs::read_to_string(written).unwrap(), "<html>snap</html>");
}
