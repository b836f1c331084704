use std::process::{Command, Output};

fn fixture() -> String {
    format!(
        "{}/../instruments/tests/data/master_sample.csv",
        env!("CARGO_MANIFEST_DIR")
    )
}

fn dhan_agent(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dhan-agent"))
        .args(["--config", "does-not-exist.toml"])
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run dhan-agent")
}

#[test]
fn resolve_prints_record_json() {
    let dataset = fixture();
    let out = dhan_agent(&[
        "resolve",
        "--dataset",
        &dataset,
        "--underlying",
        "BANKNIFTY",
        "--option-type",
        "CE",
        "--mode",
        "OTM",
        "--value",
        "2",
        "--spot",
        "47250",
        "--today",
        "2024-01-01",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let record: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(record["security_id"], 35041);
    assert_eq!(record["expiry"], "2024-01-03");
}

#[test]
fn resolve_miss_exits_non_zero() {
    let dataset = fixture();
    let out = dhan_agent(&[
        "resolve",
        "--dataset",
        &dataset,
        "--underlying",
        "NIFTY",
        "--option-type",
        "CE",
        "--mode",
        "ITM",
        "--value",
        "3",
        "--today",
        "2024-01-01",
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("NIFTY|2024-01-04|CE|22350"));
}

#[test]
fn validate_summarizes_dataset() {
    let dataset = fixture();
    let out = dhan_agent(&["validate", "--dataset", &dataset]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("65 instruments"));
    assert!(stdout.contains("FINNIFTY: 2 expiries, 2024-01-02 .. 2024-01-09"));
}

#[test]
fn validate_missing_dataset_fails() {
    let out = dhan_agent(&["validate", "--dataset", "/nonexistent/master.csv"]);
    assert!(!out.status.success());
}
