#![forbid(unsafe_code)]

//! Drives the `vreg` command surface end to end through argument parsing.

use clap::Parser;
use tempfile::tempdir;

use vreg_cli::VregError;
use vreg_cli::cli::{Cli, run_with_output};

fn vreg(args: &[&str]) -> Result<String, VregError> {
    let cli = Cli::try_parse_from(std::iter::once("vreg").chain(args.iter().copied()))
        .expect("arguments parse");
    let mut out = Vec::new();
    run_with_output(cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn build_generate_match_export() {
    let temp = tempdir().expect("tempdir");
    let project = temp.path().join("digits.vreg");
    let project = project.to_str().expect("utf-8 path");

    let built = vreg(&["build", "start", "digit", "one-or-more", "-o", project]).unwrap();
    assert_eq!(built, "^\\d+\n");

    let generated = vreg(&["generate", project, "--chain"]).unwrap();
    let mut lines = generated.lines();
    assert_eq!(lines.next(), Some("^\\d+"));
    assert_eq!(lines.count(), 3);

    let matched = vreg(&["match", "--project", project, "--text", "42 apples"]).unwrap();
    assert!(matched.contains("0..2  \"42\""));

    let none = vreg(&["match", "--project", project, "--text", "a42"]).unwrap();
    assert_eq!(none, "0 match(es)\n");

    let exported = vreg(&["export", "--project", project, "--target", "rust"]).unwrap();
    assert_eq!(exported, "let re = regex::Regex::new(r\"^\\d+\")?;\n");
}

#[test]
fn scan_directory_with_config_limit() {
    let temp = tempdir().expect("tempdir");
    let data = temp.path().join("data");
    std::fs::create_dir(&data).unwrap();
    std::fs::write(data.join("a.txt"), "x1 y2").unwrap();
    std::fs::write(data.join("big.txt"), "9".repeat(100)).unwrap();
    std::fs::create_dir(data.join("sub")).unwrap();
    std::fs::write(data.join("sub").join("c.txt"), "3").unwrap();
    let config = temp.path().join("vreg.toml");
    std::fs::write(&config, "max_scan_bytes = 50\n").unwrap();

    let out = vreg(&[
        "--config",
        config.to_str().unwrap(),
        "scan",
        "--pattern",
        r"\d",
        data.to_str().unwrap(),
    ])
    .unwrap();
    assert!(out.contains("skipped"));
    assert!(out.ends_with("scanned 1 file(s), skipped 1, 2 match(es)\n"));
}

#[test]
fn json_debug_output() {
    let out = vreg(&[
        "debug",
        "--pattern",
        r"(\d{3})-(\d{4})",
        "--text",
        "555-1234 and 777-0000",
        "--index",
        "1",
        "--json",
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["index"], 1);
    assert_eq!(value["text"], "777-0000");
    assert_eq!(value["groups"][1]["content"], "0000");
    assert_eq!(value["groups"][1]["color"], 1);
}

#[test]
fn errors_carry_exit_codes() {
    let empty = vreg(&["match", "--pattern", "", "--text", "abc"]).unwrap_err();
    assert_eq!(empty.exit_code(), 5);

    let temp = tempdir().expect("tempdir");
    let bogus = temp.path().join("bogus.vreg");
    std::fs::write(&bogus, "SOMETHING_ELSE\n").unwrap();
    let format = vreg(&["generate", bogus.to_str().unwrap()]).unwrap_err();
    assert_eq!(format.exit_code(), 4);

    let token = vreg(&["build", "start", "letterz"]).unwrap_err();
    assert_eq!(token.exit_code(), 2);
}
