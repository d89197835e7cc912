// Drives the compiled binary. Every run passes --config pointing into a temp dir
// so a developer's own config file never leaks into the results.

use std::fs;
use std::path::Path;

use assert_cmd::Command;

fn jlpt_trend(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jlpt-trend").unwrap();
    cmd.arg("--config").arg(config_dir.join("config.json"));
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn score_prints_mean_of_known_words() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(jlpt_trend(dir.path()).args(["score", "先生は忙しい"]));
    assert_eq!(out, "1.50\n");
}

#[test]
fn score_without_known_words_prints_none() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(jlpt_trend(dir.path()).args(["score", "ハンバーガー"]));
    assert_eq!(out, "none\n");
}

#[test]
fn score_with_whitespace_tokenizer_and_explain() {
    let dir = tempfile::tempdir().unwrap();
    let out = stdout_of(jlpt_trend(dir.path()).args([
        "score",
        "先生 子供 学生",
        "--tokenizer",
        "whitespace",
        "--explain",
    ]));

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("先生"));
    assert!(lines[0].contains("N4"));
    assert!(lines[2].contains('-'));
    assert_eq!(lines[3], "2.00");
}

#[test]
fn score_with_custom_vocabulary() {
    let dir = tempfile::tempdir().unwrap();
    let vocab = dir.path().join("vocab.json");
    fs::write(
        &vocab,
        r#"{"name": "mini", "levels": [{"tier": "N1", "words": ["忙しい"]}]}"#,
    )
    .unwrap();

    let out = stdout_of(
        jlpt_trend(dir.path())
            .args(["score", "先生は忙しい", "--vocabulary"])
            .arg(&vocab),
    );
    assert_eq!(out, "5.00\n");
}

#[test]
fn trend_writes_png_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("log.csv");
    fs::write(&input, "句數,內容\n2,先生は忙しい\n1,私は学生です\n").unwrap();
    let out_dir = dir.path().join("charts");

    let out = stdout_of(
        jlpt_trend(dir.path())
            .args(["trend", "--user", "alice", "--summary", "--input"])
            .arg(&input)
            .arg("--output-dir")
            .arg(&out_dir),
    );

    let png = out_dir.join("jlpt_trend_alice.png");
    let summary = out_dir.join("jlpt_trend_alice.json");
    assert!(out.contains(&png.display().to_string()));
    assert!(png.is_file());
    let json: serde_json::Value = serde_json::from_slice(&fs::read(summary).unwrap()).unwrap();
    assert_eq!(json["overall_average"], 1.25);
    assert_eq!(json["scored_entries"], 2);
}

#[test]
fn trend_all_requires_user_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("log.csv");
    fs::write(&input, "sequence_index,text\n1,先生\n").unwrap();

    jlpt_trend(dir.path())
        .args(["trend", "--all", "--input"])
        .arg(&input)
        .arg("--output-dir")
        .arg(dir.path().join("charts"))
        .assert()
        .failure();
}

#[test]
fn trend_all_rejects_invalid_user_before_writing_charts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("log.csv");
    fs::write(&input, "user_id,sequence_index,text\nalice,1,先生\n,2,子供\n").unwrap();
    let out_dir = dir.path().join("charts");

    jlpt_trend(dir.path())
        .args(["trend", "--all", "--input"])
        .arg(&input)
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .failure();

    assert!(!out_dir.join("jlpt_trend_alice.png").exists());
}

#[test]
fn trend_rejects_log_without_text_column() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("log.csv");
    fs::write(&input, "sequence_index,body\n1,先生\n").unwrap();

    let output = jlpt_trend(dir.path())
        .args(["trend", "--user", "u", "--input"])
        .arg(&input)
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("text"));
}

#[test]
fn config_init_then_show() {
    let dir = tempfile::tempdir().unwrap();

    stdout_of(jlpt_trend(dir.path()).args(["config", "init", "--tokenizer", "whitespace"]));
    assert!(dir.path().join("config.json").is_file());

    let out = stdout_of(jlpt_trend(dir.path()).args(["config", "show"]));
    assert!(out.contains("\"tokenizer\": \"whitespace\""));
}
