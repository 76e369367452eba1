use colink_core::{LinkError, LinkResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Every input name the sync run understands.
pub const INPUT_NAMES: &[&str] = &[
    "source_column_id",
    "target_column_id",
    "github_token",
    "github_api_url",
    "type_filter",
    "content_filter",
    "label_filter",
    "state_filter",
    "automation_notice",
    "add_note",
    "source_column_notices",
];

const ENV_INPUT_PREFIX: &str = "INPUT_";
const ENV_GRAPHQL_URL: &str = "GITHUB_GRAPHQL_URL";

// A token is either wrapped in matching quotes (commas allowed inside) or a
// bare run of characters up to the next comma.
static INPUT_LIST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*(?:"([^"]+?)"|'([^']+?)'|([^"',]+))\s*"#).expect("input list regex")
});

/// Splits a list input into trimmed tokens, dropping empty ones.
///
/// `a, b` yields two tokens; `"a, b", c` keeps the quoted comma.
pub fn parse_input_list(input: &str) -> Vec<String> {
    INPUT_LIST_REGEX
        .captures_iter(input)
        .filter_map(|captures| {
            captures
                .get(1)
                .or_else(|| captures.get(2))
                .or_else(|| captures.get(3))
        })
        .map(|token| token.as_str().trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Raw string inputs keyed by input name, before any validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    values: BTreeMap<String, String>,
}

impl RawInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Trimmed value of an input; blank values count as not supplied.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Layers `overrides` on top of these inputs. Blank overrides are ignored.
    pub fn merge(&mut self, overrides: RawInputs) {
        for (name, value) in overrides.values {
            if !value.trim().is_empty() {
                self.values.insert(name, value);
            }
        }
    }

    /// Reads GitHub Actions style `INPUT_<NAME>` variables.
    pub fn from_env_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut inputs = Self::new();
        let mut graphql_url = None;

        for (key, value) in vars {
            let key = key.as_ref();
            if key == ENV_GRAPHQL_URL {
                graphql_url = Some(value.into());
                continue;
            }

            let Some(name) = key.strip_prefix(ENV_INPUT_PREFIX) else {
                continue;
            };
            let name = name.to_ascii_lowercase().replace(' ', "_");
            if INPUT_NAMES.contains(&name.as_str()) {
                inputs.set(&name, value);
            }
        }

        if inputs.get("github_api_url").is_none()
            && let Some(url) = graphql_url
        {
            inputs.set("github_api_url", url);
        }

        inputs
    }

    pub fn from_env() -> Self {
        Self::from_env_vars(std::env::vars())
    }

    /// Loads a flat TOML table of inputs. Lists become quoted input lists so
    /// they parse back into the same tokens.
    pub fn load_file(path: &Path) -> LinkResult<Self> {
        let contents = fs::read_to_string(path).map_err(|err| {
            LinkError::io(format!(
                "failed to read config file '{}': {}",
                path.display(),
                err
            ))
        })?;

        let table: toml::Table = toml::from_str(&contents).map_err(|err| {
            LinkError::config(format!(
                "failed to parse config file '{}': {}",
                path.display(),
                err
            ))
        })?;

        let mut inputs = Self::new();
        for (name, value) in table {
            if !INPUT_NAMES.contains(&name.as_str()) {
                return Err(LinkError::config(format!(
                    "unknown input '{name}' in config file '{}'",
                    path.display()
                )));
            }

            let rendered = render_toml_value(&value).ok_or_else(|| {
                LinkError::config(format!(
                    "unsupported value for '{name}' in config file '{}'",
                    path.display()
                ))
            })?;
            inputs.set(&name, rendered);
        }

        Ok(inputs)
    }
}

fn render_toml_value(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.clone()),
        toml::Value::Boolean(flag) => Some(flag.to_string()),
        toml::Value::Integer(number) => Some(number.to_string()),
        toml::Value::Array(items) => {
            let mut tokens = Vec::with_capacity(items.len());
            for item in items {
                let toml::Value::String(text) = item else {
                    return None;
                };
                let quote = if text.contains('"') { '\'' } else { '"' };
                tokens.push(format!("{quote}{text}{quote}"));
            }
            Some(tokens.join(", "))
        }
        _ => None,
    }
}
