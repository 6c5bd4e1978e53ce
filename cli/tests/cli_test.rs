use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;
use std::fs;
use tempfile::tempdir;

fn health_calc() -> Command {
    let mut cmd = Command::cargo_bin("health-calc").unwrap();
    // Keep stderr limited to user-facing messages
    cmd.env("RUST_LOG", "off");
    cmd.env_remove("HC__DISPLAY__LOCALE");
    cmd
}

#[rstest]
#[case(&["bmi", "--height", "170", "--weight", "70"], 0, "分类: 超重", "stdout")]
#[case(&["--locale", "en", "ideal-weight", "--height", "170"], 0, "Ideal weight range: 53.5 kg - 72.0 kg", "stdout")]
#[case(&["bmi", "--height", "abc", "--weight", "70"], 2, "身高: 请输入有效的数值", "stderr")]
#[case(&["--locale", "en", "bmi", "--height", "170", "--weight", "500"], 2, "Weight: Value must be between 20 and 200", "stderr")]
#[case(&["muscle", "--weight", "70", "--sex", "robot"], 2, "Unknown sex: robot", "stderr")]
#[case(&["muscle", "--weight", "80", "--body-fat", "80"], 2, "体脂率", "stderr")]
#[case(&["bmi", "--height", "170"], 2, "required", "stderr")]
#[case(&["calc", "5", "+", "3", "="], 0, "8", "stdout")]
#[case(&["calc", "6÷0="], 0, "Infinity", "stdout")]
#[case(&["calc", "5", "%"], 2, "Unknown calculator key", "stderr")]
fn cli_table_cases(
    #[case] args: &[&str],
    #[case] exit_code: i32,
    #[case] needle: &str,
    #[case] stream: &str,
) {
    let assert = health_calc().args(args).assert().code(exit_code);

    match stream {
        "stdout" => {
            assert.stdout(predicate::str::contains(needle));
        }
        "stderr" => {
            assert.stderr(predicate::str::contains(needle));
        }
        other => panic!("unknown stream: {other}"),
    }
}

#[test]
fn cli_metabolism_with_factor() {
    health_calc()
        .args([
            "--locale", "en", "metabolism", "--height", "175", "--weight", "70", "--age", "30",
            "--sex", "male", "--factor", "1.2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Basal metabolic rate (BMR): 1696 kcal/day"))
        .stdout(predicate::str::contains("2035 kcal/day"));
}

#[test]
fn cli_json_output() {
    let output = health_calc()
        .args(["--json", "body-fat", "--height", "180", "--weight", "80", "--age", "35"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["ok"], true);
    assert_eq!(doc["action"], "body_fat");
    let percent = doc["result"]["percent"].as_f64().unwrap();
    assert!((5.0..=50.0).contains(&percent));
}

#[test]
fn cli_json_errors_go_to_stdout() {
    health_calc()
        .args(["--json", "ideal-weight", "--height", "90"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"ok\":false"))
        .stdout(predicate::str::contains("\"field\":\"height\""));
}

#[rstest]
#[case(&["--json", "muscle", "--weight", "70", "--sex", "robot"], "Unknown sex: robot")]
#[case(&["--json", "calc", "5", "%"], "Unknown calculator key")]
fn cli_json_command_failures_go_to_stdout(#[case] args: &[&str], #[case] needle: &str) {
    let output = health_calc().args(args).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stderr.is_empty());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["ok"], false);
    assert!(doc["error"].as_str().unwrap().contains(needle));
}

#[test]
fn cli_reads_config_file() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[display]\nlocale = \"en\"\n").unwrap();

    health_calc()
        .arg("--config")
        .arg(&cfg)
        .args(["bmi", "--height", "170", "--weight", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Category: Overweight"));
}

#[test]
fn cli_locale_flag_beats_config_file() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("cfg.toml");
    fs::write(&cfg, "[display]\nlocale = \"en\"\n").unwrap();

    health_calc()
        .arg("--config")
        .arg(&cfg)
        .args(["--locale", "zh", "bmi", "--height", "170", "--weight", "70"])
        .assert()
        .success()
        .stdout(predicate::str::contains("分类: 超重"));
}

#[test]
fn cli_missing_config_file_fails() {
    let dir = tempdir().unwrap();
    health_calc()
        .arg("--config")
        .arg(dir.path().join("nope.toml"))
        .args(["bmi", "--height", "170", "--weight", "70"])
        .assert()
        .failure();
}

#[test]
fn cli_interactive_session() {
    health_calc()
        .args(["--locale", "en"])
        .write_stdin("set height 170\nset weight 70\nbmi\nset height x\nbmi\ncalc 12*2=\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("BMI: 24.22"))
        .stdout(predicate::str::contains("> 24\ncalculator> "))
        .stderr(predicate::str::contains("Height: Please enter a valid number"));
}
