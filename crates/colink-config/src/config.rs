use crate::inputs::{RawInputs, parse_input_list};
use colink_core::{LinkError, LinkResult};
use regex::{Regex, RegexBuilder};
use serde::Serialize;

pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// User-selected card filters, exactly as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterInputs {
    pub type_filter: Option<String>,
    pub content_filter: Vec<String>,
    pub label_filter: Vec<String>,
    pub state_filter: Option<String>,
}

impl FilterInputs {
    /// Compiles `content_filter` into case-insensitive patterns.
    pub fn content_patterns(&self) -> LinkResult<Vec<Regex>> {
        self.content_filter
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|err| {
                        LinkError::config(format!(
                            "invalid content_filter pattern '{pattern}': {err}"
                        ))
                    })
            })
            .collect()
    }
}

/// Fully resolved settings for one sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncConfig {
    pub source_column_ids: Vec<String>,
    pub target_column_id: String,
    #[serde(skip)]
    pub github_token: String,
    pub api_url: String,
    pub filters: FilterInputs,
    pub automation_notice: bool,
    pub source_column_notices: bool,
}

pub fn resolve_config(inputs: &RawInputs) -> LinkResult<SyncConfig> {
    let source_column_ids = parse_input_list(required(inputs, "source_column_id")?);
    if source_column_ids.is_empty() {
        return Err(LinkError::missing_input("source_column_id"));
    }
    let target_column_id = required(inputs, "target_column_id")?.to_string();
    let github_token = required(inputs, "github_token")?.to_string();

    let filters = FilterInputs {
        type_filter: inputs.get("type_filter").map(str::to_string),
        content_filter: inputs
            .get("content_filter")
            .map(parse_input_list)
            .unwrap_or_default(),
        label_filter: inputs
            .get("label_filter")
            .map(parse_input_list)
            .unwrap_or_default(),
        state_filter: inputs.get("state_filter").map(str::to_string),
    };
    filters.content_patterns()?;

    let automation_notice = flag(inputs, "automation_notice") || flag(inputs, "add_note");

    Ok(SyncConfig {
        source_column_ids,
        target_column_id,
        github_token,
        api_url: inputs
            .get("github_api_url")
            .unwrap_or(DEFAULT_GRAPHQL_URL)
            .to_string(),
        filters,
        automation_notice,
        source_column_notices: flag(inputs, "source_column_notices"),
    })
}

fn required<'a>(inputs: &'a RawInputs, name: &str) -> LinkResult<&'a str> {
    inputs
        .get(name)
        .ok_or_else(|| LinkError::missing_input(name))
}

fn flag(inputs: &RawInputs, name: &str) -> bool {
    inputs
        .get(name)
        .is_some_and(|value| value.eq_ignore_ascii_case("true"))
}
