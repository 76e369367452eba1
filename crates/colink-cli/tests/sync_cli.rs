use assert_cmd::Command;
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

fn colink() -> Command {
    let mut command = Command::cargo_bin("colink").expect("colink binary");
    command.env_clear();
    command
}

fn parse_stdout(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout is JSON")
}

#[test]
fn missing_source_column_exits_with_config_code() {
    let output = colink()
        .args(["sync", "--target-column-id", "t", "--github-token", "token"])
        .output()
        .expect("run colink");

    assert_eq!(output.status.code(), Some(2));
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("error: Input required and not supplied: source_column_id")
    );
}

#[test]
fn json_errors_use_the_envelope() {
    let output = colink()
        .args(["--json", "sync", "--source-column-id", "s", "--target-column-id", "t"])
        .output()
        .expect("run colink");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"ok\": false"));
    assert!(stderr.contains("\"kind\": \"config\""));
    assert!(stderr.contains("Input required and not supplied: github_token"));
}

#[test]
fn sync_adds_missing_card_and_reports_summary() {
    let server = MockServer::start();

    let columns = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .header("authorization", "token secret-token")
            .body_contains("sourceColumns");
        then.status(200).json_body(json!({
            "data": {
                "sourceColumns": [{
                    "id": "s",
                    "name": "Todo",
                    "url": "https://github.com/orgs/acme/projects/1/columns/s",
                    "project": {"name": "Roadmap"},
                    "cards": {
                        "nodes": [{"id": "11", "note": "hello", "content": null}],
                        "pageInfo": {"hasNextPage": false, "endCursor": null}
                    }
                }],
                "targetColumn": {
                    "id": "t",
                    "name": "Mirror",
                    "url": "https://github.com/orgs/acme/projects/2/columns/t",
                    "project": {"name": "Team"},
                    "cards": {
                        "nodes": [],
                        "pageInfo": {"hasNextPage": false, "endCursor": null}
                    }
                }
            }
        }));
    });

    let add = server.mock(|when, then| {
        when.method(POST)
            .path("/graphql")
            .body_contains("addProjectCard");
        then.status(200).json_body(json!({
            "data": {
                "addProjectCard": {
                    "cardEdge": {"node": {"id": "200", "note": "hello", "content": null}}
                }
            }
        }));
    });

    let output = colink()
        .args([
            "--json",
            "sync",
            "--source-column-id",
            "s",
            "--target-column-id",
            "t",
            "--github-token",
            "secret-token",
            "--api-url",
            &server.url("/graphql"),
        ])
        .output()
        .expect("run colink");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let summary = parse_stdout(&output.stdout);
    assert_eq!(summary["ok"], true);
    assert_eq!(summary["result"]["added"], 1);
    assert_eq!(summary["result"]["placed"], 1);
    assert_eq!(summary["result"]["deleted"], 0);
    assert_eq!(summary["result"]["failed_adds"], json!([]));

    columns.assert();
    add.assert();
}

#[test]
fn api_errors_exit_with_api_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/graphql");
        then.status(401).json_body(json!({"message": "Bad credentials"}));
    });

    let output = colink()
        .args([
            "sync",
            "--source-column-id",
            "s",
            "--target-column-id",
            "t",
            "--github-token",
            "bad",
            "--api-url",
            &server.url("/graphql"),
        ])
        .output()
        .expect("run colink");

    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Bad credentials [http_status=401]"));
}

#[test]
fn config_layers_file_env_and_flags_and_hides_token() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("colink.toml");
    fs::write(
        &path,
        r#"
source_column_id = ["col-a", "col-b"]
target_column_id = "from-file"
github_token = "file-secret"
label_filter = ["bug", "good first issue"]
"#,
    )
    .expect("write config");

    let output = colink()
        .env("INPUT_TARGET_COLUMN_ID", "from-env")
        .args(["--json", "config", "--config"])
        .arg(&path)
        .args(["--automation-notice", "--state-filter", "open"])
        .output()
        .expect("run colink");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("file-secret"));

    let rendered = parse_stdout(&output.stdout);
    let result = &rendered["result"];
    assert_eq!(result["source_column_ids"], json!(["col-a", "col-b"]));
    assert_eq!(result["target_column_id"], "from-env");
    assert_eq!(result["github_token"], "***");
    assert_eq!(result["automation_notice"], true);
    assert_eq!(result["source_column_notices"], false);
    assert_eq!(result["api_url"], "https://api.github.com/graphql");
    assert_eq!(
        result["filters"]["label_filter"],
        json!(["bug", "good first issue"])
    );
    assert_eq!(result["filters"]["state_filter"], "open");
}
