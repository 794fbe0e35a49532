use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "onsen-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

const SESSION: &str = r#"{"chara_info":{"turn":1,"playing_state":1,"vital":100,"max_vital":100,"speed":100,"max_speed":1200},"home_info":{"command_info_array":[{"command_id":101,"is_enable":1,"failure_rate":2,"training_partners":[{"position":1}],"params_inc_dec_info_array":[{"target_type":1,"value":11},{"target_type":10,"value":-21}]},{"command_id":102,"is_enable":1}]},"onsen_data_set":{"onsen_info_array":[{"onsen_id":2,"state":2,"stratum_info_array":[{"stratum_id":4,"rest_volume":20},{"stratum_id":5,"rest_volume":60}]}],"dig_effect_info_array":[{"stratum_type":1,"dig_effect_value":10},{"stratum_type":2,"dig_effect_value":20}]}}
{"chara_info":{"turn":2,"playing_state":1,"vital":79,"max_vital":100,"speed":111,"max_speed":1200}}
{"chara_info":{"turn":2,"playing_state":1,"vital":79,"max_vital":100,"speed":111,"max_speed":1200}}
{"chara_info":{"turn":5,"playing_state":1,"vital":60,"max_vital":100,"speed":111,"max_speed":1200}}
"#;

fn write_session() -> std::path::PathBuf {
    let path = temp_path("session");
    std::fs::write(&path, SESSION).expect("write session");
    path
}

#[test]
fn cli_json_report_contains_every_snapshot() {
    let exe = env!("CARGO_BIN_EXE_onsen-replay");
    let input = write_session();
    let output_path = temp_path("json");
    let status = Command::new(exe)
        .arg(&input)
        .args(["--report", "json", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());

    let content = std::fs::read_to_string(output_path).expect("read output");
    let turns: Vec<serde_json::Value> = serde_json::from_str(&content).expect("json report");
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0]["transition"]["kind"], "restart");
    assert_eq!(turns[2]["transition"]["kind"], "repeat");
    assert_eq!(turns[3]["transition"]["kind"], "anomaly");
    assert_eq!(turns[0]["commands"][0]["dig"]["amount"], 28);
    assert_eq!(turns[1]["previous_choice"]["discipline"], "speed");
}

#[test]
fn cli_markdown_report_in_chinese() {
    let exe = env!("CARGO_BIN_EXE_onsen-replay");
    let input = write_session();
    let output_path = temp_path("md");
    let status = Command::new(exe)
        .arg(&input)
        .args(["--report", "markdown", "--lang", "zh", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.starts_with("# Onsen Session Replay"));
    assert!(content.contains("### 回合 1"));
    assert!(content.contains("重复的回合"));
}

#[test]
fn cli_console_report_to_stdout() {
    let exe = env!("CARGO_BIN_EXE_onsen-replay");
    let input = write_session();
    let output = Command::new(exe)
        .arg(&input)
        .args(["--no-color", "--event-stats"])
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Onsen Session Replay"));
    assert!(stdout.contains("Snapshots: 4"));
    assert!(stdout.contains("Total time"));
}

#[test]
fn cli_strict_mode_fails_on_anomalies() {
    let exe = env!("CARGO_BIN_EXE_onsen-replay");
    let input = write_session();
    let output = Command::new(exe)
        .arg(&input)
        .args(["--strict", "--report", "json", "--output"])
        .arg(temp_path("strict"))
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("anomalies"));
}

#[test]
fn cli_rejects_malformed_session_and_unknown_lang() {
    let exe = env!("CARGO_BIN_EXE_onsen-replay");
    let bad = temp_path("bad");
    std::fs::write(&bad, "{\"chara_info\":{\"turn\":1}}\nnot json\n").expect("write bad");
    let output = Command::new(exe).arg(&bad).output().expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));

    let input = write_session();
    let output = Command::new(exe)
        .arg(&input)
        .args(["--lang", "xx"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}
