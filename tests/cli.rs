use std::error::Error;
use std::fs;
use std::process::{Command, Output};

const CMD: &str = env!("CARGO_BIN_EXE_csv-ingest");

fn run(args: &[&str]) -> Output {
    Command::new(CMD)
        .args(args)
        .env_remove("CSV_INGEST_INPUT")
        .env_remove("CSV_INGEST_OUTPUT")
        .env_remove("CSV_INGEST_DELIMITER")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn missing_input_exits_with_one() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("input.csv");
    let missing = missing.to_str().unwrap();

    let output = run(&["--input", missing]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("input file not found"), "{stderr}");
    assert!(stderr.contains(missing), "{stderr}");
    Ok(())
}

#[test]
fn existing_input_exits_cleanly() {
    let output = run(&["--input", "test-inputs/two_rows.csv"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());
}

#[test]
fn input_from_environment() {
    let output = Command::new(CMD)
        .env("CSV_INGEST_INPUT", "test-inputs/single_row.csv")
        .env_remove("CSV_INGEST_OUTPUT")
        .env_remove("CSV_INGEST_DELIMITER")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn malformed_row_exits_with_one() {
    let output = run(&["--input", "test-inputs/short_row.csv"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("test-inputs/short_row.csv"), "{stderr}");
}

#[test]
fn output_round_trips() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("output.csv");

    let output = run(&[
        "--input",
        "test-inputs/two_rows.csv",
        "--output",
        out.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        fs::read_to_string(&out)?,
        fs::read_to_string("test-inputs/two_rows.csv")?
    );
    Ok(())
}

#[test]
fn no_output_written_without_path() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("input.csv");
    fs::write(&input, "a;b\n1;2\n")?;

    let output = run(&["--input", input.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_dir(dir.path())?.count(), 1);
    Ok(())
}
