use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

mod common;

use crate::common::resource;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("dom-truncate").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Тест проверяет вывод текста с настройками из конфигурации
#[test]
fn truncate_text_with_config() {
    cli()
        .arg("--config")
        .arg(resource("config.yaml"))
        .arg("truncate")
        .arg(resource("article.html"))
        .args(["--length", "20", "--selector", "article"])
        .assert()
        .success()
        .stdout("Release notes The new parser is much faster than before.\n");
}

#[test]
fn truncate_both_prints_json_report() {
    let output = cli()
        .arg("truncate")
        .arg(resource("article.html"))
        .args(["--length", "20", "--selector", "article"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["text"], "Release notes The new parser is much faster than before");
    assert_eq!(report["truncated"], true);
    assert_eq!(report["node"]["kind"], "element");
    assert_eq!(report["node"]["name"], "em");
    let path = report["node"]["path"].as_str().unwrap();
    assert!(path.ends_with("article:nth-child(1) > p:nth-child(2) > em:nth-child(1)"), "{path}");
}

#[test]
fn truncate_node_only_for_unmatched_selector_prints_null() {
    cli()
        .arg("truncate")
        .arg(resource("article.html"))
        .args(["--length", "5", "--selector", "table", "--return-mode", "node"])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn truncate_xml_input() {
    cli()
        .arg("truncate")
        .arg(resource("feed.xml"))
        .args(["--xml", "--length", "10", "--selector", "entry", "--return-mode", "text"])
        .assert()
        .success()
        .stdout("Weekly digest Three releases shipped this week\n");
}

#[test]
fn collapse_writes_output_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("collapsed.html");

    cli()
        .arg("--config")
        .arg(resource("config.yaml"))
        .arg("collapse")
        .arg(resource("article.html"))
        .args(["--length", "20", "--selector", "article.story"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    out.assert(predicate::path::is_file());
    out.assert(predicate::str::contains(r##"<a class="read-more" href="#">Show more</a>"##));
    out.assert(predicate::str::contains(r#"<section class="more"><p>Second paragraph"#));
    out.assert(predicate::str::contains("<p>Short.</p>"));
}

#[test]
fn invalid_selector_fails() {
    cli()
        .arg("truncate")
        .arg(resource("article.html"))
        .args(["--length", "5", "--selector", "p[["])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid selector"));
}

#[test]
fn missing_config_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    cli()
        .arg("--config")
        .arg(temp.child("absent.yaml").path())
        .arg("truncate")
        .arg(resource("article.html"))
        .args(["--length", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load"));
}

#[test]
fn missing_length_is_a_usage_error() {
    cli()
        .arg("truncate")
        .arg(resource("article.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--length"));
}
