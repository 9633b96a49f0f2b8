//! End-to-end checks that drive the compiled binary the way a grader would.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn marking_tool(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_marking-tool"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("MARKING_EMPTY_PRESENTATION")
        .env_remove("MARKING_REQUIRE_EXCELLENCE_FLAG")
        .env("APP_LOG_LEVEL", "warn")
        .output()
        .expect("binary runs")
}

fn write_input(name: &str, body: &Value) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("marking-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join(name);
    fs::write(&path, body.to_string()).expect("input written");
    path
}

#[test]
fn scheme_prints_every_lab() {
    let output = marking_tool(&["scheme"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.starts_with("Marking scheme"));
    for lab in 1..=9 {
        assert!(stdout.contains(&format!("Lab {lab} (")), "lab {lab} missing");
    }
}

#[test]
fn evaluate_prints_structured_export() {
    let input = write_input(
        "threshold.json",
        &serde_json::json!({
            "student_id": "s1000001",
            "presentation": [],
            "units": {
                "5": {
                    "missing": [
                        "The two EC2 instances must be created in two different availability zones",
                        "You should attach your evidence of creating 2 instances",
                        "The instance name does NOT start with a student number",
                        "The instance type is not t3.micro",
                        "The code used to create an application load balancer is missing",
                        "Explanations of code used to create an application load balancer are missing",
                        "Explanations of commands used to test the application load balancer are missing"
                    ]
                }
            }
        }),
    );
    let output = marking_tool(&[
        "evaluate",
        "--input",
        input.to_str().expect("utf8 path"),
        "--format",
        "json",
    ]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: Value = serde_json::from_slice(&output.stdout).expect("json on stdout");
    assert_eq!(json["student_id"], "s1000001");
    assert_eq!(json["presentation"]["grade"], "Excellent");
    assert_eq!(json["lab_grades"]["Lab 5"], "Bad");
    assert_eq!(json["lab_marks"]["Lab 5"].as_f64(), Some(0.5));
    assert_eq!(json["labs"]["Lab 5"]["missing_count"], 7);
}

#[test]
fn evaluate_rejects_unknown_criteria() {
    let input = write_input(
        "unknown.json",
        &serde_json::json!({ "presentation": ["bad_colour_scheme"] }),
    );
    let output = marking_tool(&[
        "evaluate",
        "--input",
        input.to_str().expect("utf8 path"),
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("bad_colour_scheme"), "stderr: {stderr}");
}
