use std::{
    env,
    fs::{self, File},
    io::Write,
    process::{Command, Output},
};

macro_rules! check_output {
    ($file_name:literal, $actual:expr) => {
        check_output(&$actual, include_bytes!($file_name), $file_name);
    };
}

fn check_output(actual: &[u8], expected: &[u8], file_name: &str) {
    if actual != expected {
        if env::var("FIX").as_ref().map(String::as_str) == Ok("y") {
            let mut snapshot_file = File::create("tests/".to_owned() + file_name).unwrap();
            snapshot_file.write_all(actual).unwrap();
        } else {
            panic!(
                "Unexpected output:\n\
                 {}\n\
                 The output didn't match the content of `{}`\n\
                 Auto-fix snapshots via FIX=y cargo test",
                String::from_utf8_lossy(actual),
                file_name
            )
        }
    }
}

fn call_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_disscalc"))
        .args(args)
        .output()
        .unwrap()
}

fn parse_table(stdout: &[u8], delimiter: char) -> Vec<(f64, f64)> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| {
            let (interval, dissonance) = line.split_once(delimiter).unwrap();
            (interval.parse().unwrap(), dissonance.parse().unwrap())
        })
        .collect()
}

fn assert_table(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?}");
    for (&(actual_interval, actual_dissonance), &(expected_interval, expected_dissonance)) in
        actual.iter().zip(expected)
    {
        assert_eq!(actual_interval, expected_interval);
        assert!(
            (actual_dissonance - expected_dissonance).abs() < 1e-9,
            "{actual_dissonance} != {expected_dissonance}"
        );
    }
}

#[test]
fn print_help() {
    let output = call_cli(&["--help"]);
    assert!(output.status.success());
    check_output!("snapshots/help.stdout", output.stdout);
    assert!(output.stderr.is_empty());
}

#[test]
fn help_wins_over_invalid_arguments() {
    let output = call_cli(&["-h", "bogus", "-d", "0"]);
    assert!(output.status.success());
    check_output!("snapshots/help.stdout", output.stdout);
}

#[test]
fn syntax_errors_are_reported_together() {
    let output = call_cli(&["other", "-p", "1", "x", "-s", "--end=1,5", "-q"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    check_output!("snapshots/syntax_errors.stderr", output.stderr);
}

#[test]
fn validation_errors_are_reported_together() {
    let output = call_cli(&["-d", "0", "-f", "json", "-p", "1", "2", "-a", "1", "-x", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    check_output!("snapshots/validation_errors.stderr", output.stderr);
}

#[test]
fn table_without_partials() {
    let output = call_cli(&["--delta=0.25", "-x", "1.1"]);
    assert!(output.status.success());
    check_output!("snapshots/table_without_partials.stdout", output.stdout);
}

#[test]
fn table_of_harmonic_timbre() {
    let output = call_cli(&["-p", "440", "880", "-a", "1", "0.5", "-d", "0.05", "-e", "1.1"]);
    assert!(output.status.success());
    assert_table(
        &parse_table(&output.stdout, ','),
        &[
            (1.0, 9.198921497239626e-6),
            (1.05, 1.3226058031252506),
            (1.1, 1.005248824779361),
        ],
    );
}

#[test]
fn table_of_separate_mobile_partials_as_tsv() {
    let output = call_cli(&[
        "-f", "tsv", "-p", "440", "-a", "1", "-P", "220", "330", "-A", "1", "0.5", "-s", "1.5", "-d", "0.5",
    ]);
    assert!(output.status.success());
    assert_table(
        &parse_table(&output.stdout, '\t'),
        &[(1.5, 0.43616890292405), (2.0, 0.0033411774259878946)],
    );
}

#[test]
fn write_table_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let file_name = dir.path().join("table.csv");

    let output_flag = format!("--output={}", file_name.display());
    let output = call_cli(&[output_flag.as_str(), "-d", "0.25", "-x", "1.1"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    check_output!(
        "snapshots/table_without_partials.stdout",
        fs::read(&file_name).unwrap()
    );
}

#[test]
fn unwritable_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let file_name = dir.path().join("missing-directory").join("table.csv");

    let output = call_cli(&["-o", file_name.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.starts_with("disscalc error: could not open output file"),
        "{stderr}"
    );
}
