mod model;
mod paginate;
mod projects;
pub mod queries;

pub use model::{
    Card, CardBody, CardConnection, CardContent, CardPayload, Column, Label, LabelConnection,
    PageInfo, Project,
};
pub use projects::{ProjectColumns, ProjectsApi};

use colink_core::{LinkError, LinkResult};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, HeaderMap, RETRY_AFTER};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Executes one GraphQL document against a remote endpoint and returns the
/// `data` member of the response.
pub trait GraphqlExecutor {
    fn execute(&self, query: &str, variables: Value) -> LinkResult<Value>;
}

impl<T: GraphqlExecutor + ?Sized> GraphqlExecutor for &T {
    fn execute(&self, query: &str, variables: Value) -> LinkResult<Value> {
        (**self).execute(query, variables)
    }
}

#[derive(Debug, Clone)]
pub struct GithubGraphql {
    endpoint: String,
    token: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorBody {
    message: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: Option<String>,
}

impl GithubGraphql {
    pub fn new(endpoint: &str, token: &str) -> LinkResult<Self> {
        let endpoint = endpoint.trim().to_string();
        if endpoint.is_empty() {
            return Err(LinkError::config("GraphQL endpoint cannot be empty"));
        }
        if token.trim().is_empty() {
            return Err(LinkError::missing_input("github_token"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("colink/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| LinkError::io(format!("failed to construct API client: {err}")))?;

        Ok(Self {
            endpoint,
            token: token.trim().to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl GraphqlExecutor for GithubGraphql {
    fn execute(&self, query: &str, variables: Value) -> LinkResult<Value> {
        let body = json!({
            "query": query,
            "variables": variables,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .json(&body)
            .send()
            .map_err(network_error)?;

        parse_graphql_response(response)
    }
}

fn parse_graphql_response(response: Response) -> LinkResult<Value> {
    let status = response.status();
    let headers = response.headers().clone();
    let body_text = response.text().unwrap_or_default();

    if !status.is_success() {
        return Err(parse_error_response(status, &body_text, Some(&headers)));
    }

    let envelope = serde_json::from_str::<GraphqlEnvelope>(&body_text)
        .map_err(|err| LinkError::sync(format!("failed to decode API response JSON: {err}")))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope
            .errors
            .iter()
            .map(|error| {
                let message = error
                    .message
                    .clone()
                    .unwrap_or_else(|| "unknown GraphQL error".to_string());
                match &error.kind {
                    Some(kind) => format!("{message} ({kind})"),
                    None => message,
                }
            })
            .collect();
        return Err(LinkError::api(messages.join("; ")));
    }

    match envelope.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(LinkError::sync("GraphQL response did not include data")),
    }
}

fn parse_error_response(
    status: StatusCode,
    body_text: &str,
    headers: Option<&HeaderMap>,
) -> LinkError {
    let body_trimmed = body_text.trim();
    let fallback = if body_trimmed.is_empty() {
        format!("request failed with status {}", status.as_u16())
    } else {
        format!(
            "request failed with status {}: {}",
            status.as_u16(),
            truncate_for_error(body_trimmed, 240)
        )
    };

    let message = serde_json::from_str::<RestErrorBody>(body_text)
        .ok()
        .and_then(|payload| payload.message)
        .unwrap_or(fallback);

    let with_retry_after = match headers.and_then(extract_retry_after_seconds) {
        Some(seconds)
            if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::FORBIDDEN =>
        {
            format!("{message} [retry_after_seconds={seconds}]")
        }
        _ => message,
    };

    LinkError::api(format!(
        "{} [http_status={}]",
        with_retry_after,
        status.as_u16()
    ))
}

fn extract_retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .and_then(|value| value.parse::<u64>().ok())
}

fn truncate_for_error(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }

    let truncated: String = input.chars().take(max_chars).collect();
    format!("{truncated}...")
}

fn network_error(err: reqwest::Error) -> LinkError {
    LinkError::api(format!("network request failed: {err}"))
}
