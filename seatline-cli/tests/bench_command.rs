//! Integration tests for the `bench` command.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use serde_json::Value;

fn bench_json(env: &TestEnv, extra: &[&str]) -> Value {
    let config = env.small_config();
    let output = env
        .command_with_config(&config)
        .arg("bench")
        .args(["--format", "json"])
        .args(extra)
        .output()
        .expect("Failed to run bench command");

    assert!(
        output.status.success(),
        "bench failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("bench output is JSON")
}

fn calls(report: &Value, op: &str) -> u64 {
    report[op]["calls"].as_u64().expect("calls is a number")
}

/// Tests that every drawn operation is accounted for in the JSON report.
///
/// **What this tests:**
/// - Two workers of 200 draws each, from the config file
/// - Call counts per operation plus skipped refunds
///
/// **Invariant verified:**
/// Calls and skips add up to threads times ops per thread.
#[test]
fn test_bench_json_accounts_for_every_draw() {
    let env = TestEnv::new();
    let report = bench_json(&env, &[]);

    assert_eq!(report["engine"], "bitmap");
    assert_eq!(report["threads"], 2);
    assert_eq!(report["ops_per_thread"], 200);
    assert_eq!(report["seed"], 7);

    let total = calls(&report, "buy")
        + calls(&report, "refund")
        + calls(&report, "inquiry")
        + report["skipped"].as_u64().unwrap();
    assert_eq!(total, 400);
}

#[test]
fn test_bench_flags_override_config() {
    let env = TestEnv::new();
    let report = bench_json(
        &env,
        &["--threads", "1", "--ops", "50", "--seed", "9", "--engine", "tree"],
    );

    assert_eq!(report["engine"], "tree");
    assert_eq!(report["threads"], 1);
    assert_eq!(report["ops_per_thread"], 50);
    assert_eq!(report["seed"], 9);
}

/// Tests that a single-threaded run is reproducible from its seed.
#[test]
fn test_bench_single_thread_is_deterministic() {
    let env = TestEnv::new();
    let first = bench_json(&env, &["--threads", "1"]);
    let second = bench_json(&env, &["--threads", "1"]);

    for op in ["buy", "refund", "inquiry"] {
        assert_eq!(first[op]["calls"], second[op]["calls"], "{op} calls differ");
        assert_eq!(
            first[op]["succeeded"], second[op]["succeeded"],
            "{op} outcomes differ"
        );
    }
    assert_eq!(first["skipped"], second["skipped"]);
}

#[test]
fn test_bench_csv_format() {
    let env = TestEnv::new();
    let config = env.small_config();

    env.command_with_config(&config)
        .args(["bench", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "engine,threads,ops_per_thread,seed,operation,calls,succeeded,mean_us",
        ))
        .stdout(predicate::str::contains("bitmap,2,200,7,buy,"))
        .stdout(predicate::str::contains("bitmap,2,200,7,inquiry,"));
}

#[test]
fn test_bench_human_format() {
    let env = TestEnv::new();
    let config = env.small_config();

    env.command_with_config(&config)
        .args(["bench", "--engine", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("engine tree"))
        .stdout(predicate::str::contains("buy"));
}

#[test]
fn test_bench_zero_threads_is_config_error() {
    let env = TestEnv::new();
    let config = env.small_config();

    env.command_with_config(&config)
        .args(["bench", "--threads", "0"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("bench.threads"));
}

#[test]
fn test_bench_missing_config_file() {
    let env = TestEnv::new();

    env.command_with_config(&env.path().join("absent.yaml"))
        .arg("bench")
        .assert()
        .code(4);
}
