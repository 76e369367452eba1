use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConnection {
    #[serde(default)]
    pub nodes: Vec<Label>,
}

/// The issue or pull request a content card links to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub labels: LabelConnection,
}

impl CardContent {
    pub fn has_label(&self, names: &[String]) -> bool {
        self.labels
            .nodes
            .iter()
            .any(|label| names.iter().any(|name| name == &label.name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    Content(CardContent),
    Note(String),
    /// Linked content the token cannot read; GitHub sends neither a note nor
    /// content for it.
    Redacted,
}

/// A project card: linked content, note text, or unreadable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawCard", into = "RawCard")]
pub struct Card {
    pub id: String,
    pub body: CardBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawCard {
    id: String,
    #[serde(default)]
    note: Option<String>,
    #[serde(default)]
    content: Option<CardContent>,
}

impl From<RawCard> for Card {
    fn from(raw: RawCard) -> Self {
        let body = match (raw.content, raw.note) {
            (Some(content), _) => CardBody::Content(content),
            (None, Some(note)) => CardBody::Note(note),
            (None, None) => CardBody::Redacted,
        };

        Self { id: raw.id, body }
    }
}

impl From<Card> for RawCard {
    fn from(card: Card) -> Self {
        match card.body {
            CardBody::Content(content) => Self {
                id: card.id,
                note: None,
                content: Some(content),
            },
            CardBody::Note(note) => Self {
                id: card.id,
                note: Some(note),
                content: None,
            },
            CardBody::Redacted => Self {
                id: card.id,
                note: None,
                content: None,
            },
        }
    }
}

impl Card {
    pub fn note(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: CardBody::Note(text.into()),
        }
    }

    pub fn content(id: impl Into<String>, content: CardContent) -> Self {
        Self {
            id: id.into(),
            body: CardBody::Content(content),
        }
    }

    /// Title for content cards, literal text for notes, empty when redacted.
    pub fn display_text(&self) -> &str {
        match &self.body {
            CardBody::Content(content) => &content.title,
            CardBody::Note(text) => text,
            CardBody::Redacted => "",
        }
    }

    /// What it takes to recreate this card in another column. Redacted cards
    /// cannot be recreated.
    pub fn payload(&self) -> Option<CardPayload> {
        match &self.body {
            CardBody::Content(content) => Some(CardPayload::Content(content.id.clone())),
            CardBody::Note(text) => Some(CardPayload::Note(text.clone())),
            CardBody::Redacted => None,
        }
    }
}

/// Input for creating a card: either a content id or note text, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardPayload {
    Content(String),
    Note(String),
}

impl CardPayload {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Content(content_id) => json!({ "contentId": content_id }),
            Self::Note(note) => json!({ "note": note }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConnection {
    #[serde(default)]
    pub nodes: Vec<Card>,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub project: Project,
    #[serde(default)]
    pub cards: CardConnection,
}

impl Column {
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.project.name, self.name)
    }
}
