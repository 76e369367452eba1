use colink_api::{GithubGraphql, ProjectsApi};
use colink_config::SyncConfig;
use colink_core::{ExitCode, LinkResult};
use colink_sync::SyncEngine;
use serde_json::json;
use tracing::info;

use crate::{GlobalOptions, print_json};

pub(crate) fn cmd_sync(config: &SyncConfig, globals: &GlobalOptions) -> LinkResult<ExitCode> {
    let client = GithubGraphql::new(&config.api_url, &config.github_token)?;
    info!(
        endpoint = client.endpoint(),
        sources = config.source_column_ids.len(),
        target = %config.target_column_id,
        "starting sync"
    );

    let api = ProjectsApi::new(client);
    let outcome = SyncEngine::new(&api, config).run()?;

    if globals.json {
        print_json(&json!({"ok": true, "result": outcome}))?;
    } else {
        println!(
            "Synced column {}: {} placed, {} added, {} moved, {} deleted.",
            config.target_column_id, outcome.placed, outcome.added, outcome.moved, outcome.deleted
        );
        if !outcome.failed_adds.is_empty() {
            println!("{} cards could not be added:", outcome.failed_adds.len());
            for payload in &outcome.failed_adds {
                println!("  {payload}");
            }
        }
    }

    Ok(ExitCode::Success)
}
