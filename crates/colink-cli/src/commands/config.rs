use colink_config::SyncConfig;
use colink_core::{ExitCode, LinkError, LinkResult};
use serde_json::{Value, json};

use crate::{GlobalOptions, print_json};

const REDACTED: &str = "***";

pub(crate) fn cmd_config(config: &SyncConfig, globals: &GlobalOptions) -> LinkResult<ExitCode> {
    let mut rendered = serde_json::to_value(config)
        .map_err(|err| LinkError::io(format!("failed to render configuration: {err}")))?;
    rendered["github_token"] = json!(REDACTED);

    if globals.json {
        print_json(&json!({"ok": true, "result": rendered}))?;
    } else {
        println!("source_column_id = {}", config.source_column_ids.join(", "));
        println!("target_column_id = {}", config.target_column_id);
        println!("github_token = {REDACTED}");
        println!("github_api_url = {}", config.api_url);
        println!("type_filter = {}", display(&rendered["filters"]["type_filter"]));
        println!("content_filter = {}", config.filters.content_filter.join(", "));
        println!("label_filter = {}", config.filters.label_filter.join(", "));
        println!("state_filter = {}", display(&rendered["filters"]["state_filter"]));
        println!("automation_notice = {}", config.automation_notice);
        println!("source_column_notices = {}", config.source_column_notices);
    }

    Ok(ExitCode::Success)
}

fn display(value: &Value) -> &str {
    value.as_str().unwrap_or("-")
}
