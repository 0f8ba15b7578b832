//! Exit codes and error reporting of the `tsp-sa` binary.
//!
//! Every case here fails (or exits) before the catalog is read, so no
//! `data/` directory is needed.

use std::process::{Command, Output};

fn tsp_sa(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tsp-sa"))
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("binary runs")
}

#[test]
fn test_malformed_flag_value_exits_one() {
    let out = tsp_sa(&["--cities", "1,2", "--phi", "abc"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
}

#[test]
fn test_conflicting_city_sources_exit_one() {
    let out = tsp_sa(&["--cities", "1,2", "--cities-file", "ids.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!out.stderr.is_empty());
}

#[test]
fn test_missing_city_list_reported_with_logging_off() {
    let out = tsp_sa(&[]);
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Error:"), "stderr was {stderr:?}");
    assert!(stderr.contains("no city list"), "stderr was {stderr:?}");
}

#[test]
fn test_bad_city_token_exits_one() {
    let out = tsp_sa(&["--cities", "1,x"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid city id 'x'"));
}

#[test]
fn test_help_and_version_exit_zero() {
    for flag in ["--help", "--version"] {
        let out = tsp_sa(&[flag]);
        assert_eq!(out.status.code(), Some(0), "{flag}");
        assert!(!out.stdout.is_empty(), "{flag}");
    }
}
