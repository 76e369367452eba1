use colink_api::{Card, CardBody};
use colink_config::FilterInputs;
use colink_core::LinkResult;
use regex::Regex;
use tracing::warn;

/// Cards whose note or content body contains this marker are never synced.
pub const IGNORE_COMMENT: &str = "<!-- mirror ignore -->";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    Note,
    Content,
    Unknown(String),
}

impl TypeFilter {
    /// `None` for a blank value, which keeps every card.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" => None,
            "note" => Some(Self::Note),
            "content" => Some(Self::Content),
            other => Some(Self::Unknown(other.to_string())),
        }
    }
}

/// One step of a filter chain. Each step only removes cards; survivors keep
/// their relative order.
#[derive(Debug, Clone)]
pub enum CardFilter {
    Type(TypeFilter),
    Content(Vec<Regex>),
    Label(Vec<String>),
    State(String),
    Ignored,
}

impl CardFilter {
    /// The user-selected chain for source columns: type, content, label and
    /// state when configured, then the ignore marker.
    pub fn source_chain(inputs: &FilterInputs) -> LinkResult<Vec<CardFilter>> {
        let mut chain = Vec::new();

        if let Some(type_filter) = inputs.type_filter.as_deref().and_then(TypeFilter::parse) {
            chain.push(Self::Type(type_filter));
        }

        let patterns = inputs.content_patterns()?;
        if !patterns.is_empty() {
            chain.push(Self::Content(patterns));
        }

        if !inputs.label_filter.is_empty() {
            chain.push(Self::Label(inputs.label_filter.clone()));
        }

        if let Some(state) = inputs.state_filter.as_deref()
            && !state.is_empty()
        {
            chain.push(Self::State(state.to_uppercase()));
        }

        chain.push(Self::Ignored);
        Ok(chain)
    }

    /// Target columns only drop ignored cards.
    pub fn target_chain() -> Vec<CardFilter> {
        vec![Self::Ignored]
    }

    pub fn apply(&self, mut cards: Vec<Card>) -> Vec<Card> {
        match self {
            Self::Type(TypeFilter::Note) => {
                cards.retain(|card| matches!(card.body, CardBody::Note(_)));
            }
            Self::Type(TypeFilter::Content) => {
                cards.retain(|card| matches!(card.body, CardBody::Content(_)));
            }
            Self::Type(TypeFilter::Unknown(value)) => {
                warn!("cannot apply unknown type_filter {value}");
            }
            Self::Content(patterns) => {
                cards.retain(|card| match &card.body {
                    CardBody::Redacted => true,
                    _ => {
                        let text = card.display_text();
                        patterns.iter().any(|pattern| pattern.is_match(text))
                    }
                });
            }
            Self::Label(names) => {
                cards.retain(|card| match &card.body {
                    CardBody::Content(content) => content.has_label(names),
                    CardBody::Note(_) | CardBody::Redacted => true,
                });
            }
            Self::State(state) => {
                cards.retain(|card| match &card.body {
                    CardBody::Content(content) => content.state.to_uppercase() == *state,
                    CardBody::Note(_) | CardBody::Redacted => true,
                });
            }
            Self::Ignored => {
                cards.retain(|card| !is_ignored(card));
            }
        }

        cards
    }
}

pub fn is_ignored(card: &Card) -> bool {
    match &card.body {
        CardBody::Note(text) => text.contains(IGNORE_COMMENT),
        CardBody::Content(content) => content
            .body
            .as_deref()
            .is_some_and(|body| body.contains(IGNORE_COMMENT)),
        CardBody::Redacted => false,
    }
}

/// Runs `cards` through every filter in order. The input is left untouched.
pub fn apply_filters(cards: &[Card], filters: &[CardFilter]) -> Vec<Card> {
    filters
        .iter()
        .fold(cards.to_vec(), |remaining, filter| filter.apply(remaining))
}
