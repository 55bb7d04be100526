/*!
 * Process File Loader Tests
 */

use memsim::simulation::load_processes;
use memsim::ConfigError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_loads_valid_records_and_skips_noise() {
    let mut contents = String::from("arrival size burst\n");
    for i in 0..10 {
        contents.push_str(&format!("{} {} {}\n", i, 10 + i, 3));
    }
    contents.push_str("1 2\n7 0 4\n");
    let file = write_file(&contents);

    let processes = load_processes(file.path()).unwrap();

    assert_eq!(processes.len(), 10);
    assert_eq!(processes[0].pid, 1);
    assert_eq!(processes[9].size, 19);
}

#[test]
fn test_too_few_records_is_fatal() {
    let file = write_file("0 10 1\n1 10 1\n2 10 1\n");

    match load_processes(file.path()) {
        Err(ConfigError::TooFewProcesses { found, required }) => {
            assert_eq!(found, 3);
            assert_eq!(required, 10);
        }
        other => panic!("Expected TooFewProcesses, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    assert!(matches!(
        load_processes(&path),
        Err(ConfigError::Io { .. })
    ));
}
