mod config;
mod inputs;

pub use config::{DEFAULT_GRAPHQL_URL, FilterInputs, SyncConfig, resolve_config};
pub use inputs::{INPUT_NAMES, RawInputs, parse_input_list};
