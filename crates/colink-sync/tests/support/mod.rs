#![allow(dead_code)]

use colink_api::{GraphqlExecutor, queries};
use colink_core::{LinkError, LinkResult};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

/// A recorded request: operation name plus the variables it was sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub op: &'static str,
    pub variables: Value,
}

#[derive(Debug, Clone)]
struct FakeColumn {
    name: String,
    project: String,
    cards: Vec<Value>,
}

#[derive(Debug, Default)]
struct BoardState {
    columns: BTreeMap<String, FakeColumn>,
    next_card_id: u32,
    page_size: Option<usize>,
    rejected_adds: BTreeSet<String>,
    fail_moves: bool,
    calls: Vec<Call>,
}

/// In-memory project board answering the same GraphQL documents GitHub does.
///
/// Added cards go to the top of their column, moves place a card right after
/// `afterCardId` (or at the top), and every request is recorded.
#[derive(Debug)]
pub struct FakeBoard {
    state: RefCell<BoardState>,
}

impl Default for FakeBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBoard {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(BoardState {
                next_card_id: 200,
                ..BoardState::default()
            }),
        }
    }

    pub fn with_column(self, id: &str, project: &str, name: &str, cards: Vec<Value>) -> Self {
        self.state.borrow_mut().columns.insert(
            id.to_string(),
            FakeColumn {
                name: name.to_string(),
                project: project.to_string(),
                cards,
            },
        );
        self
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        self.state.borrow_mut().page_size = Some(page_size.max(1));
        self
    }

    /// Rejects adds whose content id or note text equals `key`.
    pub fn reject_add(self, key: &str) -> Self {
        self.state.borrow_mut().rejected_adds.insert(key.to_string());
        self
    }

    pub fn fail_moves(self) -> Self {
        self.state.borrow_mut().fail_moves = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call.op, "add" | "move" | "delete"))
            .collect()
    }

    pub fn ops(&self) -> Vec<&'static str> {
        self.mutations().into_iter().map(|call| call.op).collect()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn card_ids(&self, column_id: &str) -> Vec<String> {
        self.column_cards(column_id)
            .iter()
            .map(|card| card["id"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    /// Note text or content title of every card, top to bottom.
    pub fn texts(&self, column_id: &str) -> Vec<String> {
        self.column_cards(column_id)
            .iter()
            .map(|card| {
                card["note"]
                    .as_str()
                    .or_else(|| card["content"]["title"].as_str())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect()
    }

    fn column_cards(&self, column_id: &str) -> Vec<Value> {
        self.state
            .borrow()
            .columns
            .get(column_id)
            .map(|column| column.cards.clone())
            .unwrap_or_default()
    }
}

impl GraphqlExecutor for FakeBoard {
    fn execute(&self, query: &str, variables: Value) -> LinkResult<Value> {
        let mut state = self.state.borrow_mut();
        let op = operation_name(query)?;
        state.calls.push(Call {
            op,
            variables: variables.clone(),
        });

        match op {
            "columns" => {
                let sources: Vec<Value> = variables["sourceColumnIds"]
                    .as_array()
                    .map(|ids| {
                        ids.iter()
                            .map(|id| state.column_json(id.as_str().unwrap_or_default(), None))
                            .collect()
                    })
                    .unwrap_or_default();
                let target =
                    state.column_json(variables["targetColumnId"].as_str().unwrap_or_default(), None);
                Ok(json!({ "sourceColumns": sources, "targetColumn": target }))
            }
            "column" => {
                let column = state.column_json(
                    variables["id"].as_str().unwrap_or_default(),
                    variables["after"].as_str(),
                );
                Ok(json!({ "column": column }))
            }
            "add" => state.add(&variables),
            "move" => state.move_card(&variables),
            "delete" => state.delete(&variables),
            _ => Err(LinkError::api(format!("unsupported operation {op}"))),
        }
    }
}

impl BoardState {
    fn column_json(&self, id: &str, after: Option<&str>) -> Value {
        let Some(column) = self.columns.get(id) else {
            return Value::Null;
        };

        let start = after
            .and_then(|cursor| cursor.strip_prefix("cursor-"))
            .and_then(|offset| offset.parse::<usize>().ok())
            .unwrap_or(0);
        let end = self
            .page_size
            .map_or(column.cards.len(), |size| (start + size).min(column.cards.len()));
        let has_next_page = end < column.cards.len();

        json!({
            "id": id,
            "name": column.name,
            "url": format!("https://github.com/orgs/acme/projects/1/columns/{id}"),
            "project": { "name": column.project, "url": "https://github.com/orgs/acme/projects/1" },
            "cards": {
                "nodes": column.cards[start..end].to_vec(),
                "pageInfo": {
                    "hasNextPage": has_next_page,
                    "endCursor": has_next_page.then(|| format!("cursor-{end}")),
                },
            },
        })
    }

    fn add(&mut self, variables: &Value) -> LinkResult<Value> {
        let column_id = variables["columnId"].as_str().unwrap_or_default().to_string();
        let content_id = variables["contentId"].as_str();
        let note = variables["note"].as_str();

        let key = content_id.or(note).unwrap_or_default();
        if self.rejected_adds.contains(key) {
            return Err(LinkError::api(
                "Project already has the associated issue",
            ));
        }

        let id = self.next_card_id.to_string();
        self.next_card_id += 1;

        let card = match (content_id, note) {
            (Some(content_id), _) => {
                let content = self.find_content(content_id).ok_or_else(|| {
                    LinkError::api(format!("Could not resolve to a node with the global id of '{content_id}'"))
                })?;
                json!({ "id": id, "note": null, "content": content })
            }
            (None, Some(note)) => note_card(&id, note),
            (None, None) => return Err(LinkError::api("card needs a note or content")),
        };

        let column = self
            .columns
            .get_mut(&column_id)
            .ok_or_else(|| LinkError::api(format!("column '{column_id}' was not found")))?;
        column.cards.insert(0, card.clone());

        Ok(json!({ "addProjectCard": { "cardEdge": { "node": card } } }))
    }

    fn move_card(&mut self, variables: &Value) -> LinkResult<Value> {
        if self.fail_moves {
            return Err(LinkError::api("moveProjectCard was rejected"));
        }

        let card_id = variables["cardId"].as_str().unwrap_or_default();
        let column_id = variables["columnId"].as_str().unwrap_or_default();
        let after = variables["afterCardId"].as_str();

        let column = self
            .columns
            .get_mut(column_id)
            .ok_or_else(|| LinkError::api(format!("column '{column_id}' was not found")))?;
        let from = position(&column.cards, card_id)
            .ok_or_else(|| LinkError::api(format!("card '{card_id}' is not in the column")))?;
        let card = column.cards.remove(from);

        let to = match after {
            None => 0,
            Some(after_id) => {
                position(&column.cards, after_id)
                    .ok_or_else(|| LinkError::api(format!("card '{after_id}' is not in the column")))?
                    + 1
            }
        };
        column.cards.insert(to, card.clone());

        Ok(json!({ "moveProjectCard": { "cardEdge": { "node": card } } }))
    }

    fn delete(&mut self, variables: &Value) -> LinkResult<Value> {
        let card_id = variables["cardId"].as_str().unwrap_or_default();

        for column in self.columns.values_mut() {
            if let Some(index) = position(&column.cards, card_id) {
                column.cards.remove(index);
                return Ok(json!({ "deleteProjectCard": { "deletedCardId": card_id } }));
            }
        }

        Err(LinkError::api(format!("card '{card_id}' was not found")))
    }

    fn find_content(&self, content_id: &str) -> Option<Value> {
        self.columns
            .values()
            .flat_map(|column| column.cards.iter())
            .find(|card| card["content"]["id"].as_str() == Some(content_id))
            .map(|card| card["content"].clone())
    }
}

fn position(cards: &[Value], card_id: &str) -> Option<usize> {
    cards
        .iter()
        .position(|card| card["id"].as_str() == Some(card_id))
}

fn operation_name(query: &str) -> LinkResult<&'static str> {
    let op = if query == queries::GET_PROJECT_COLUMNS {
        "columns"
    } else if query == queries::GET_SINGLE_PROJECT_COLUMN {
        "column"
    } else if query == queries::ADD_PROJECT_CARD {
        "add"
    } else if query == queries::MOVE_PROJECT_CARD {
        "move"
    } else if query == queries::DELETE_PROJECT_CARD {
        "delete"
    } else {
        return Err(LinkError::api("unknown GraphQL document"));
    };
    Ok(op)
}

pub fn note_card(id: &str, text: &str) -> Value {
    json!({ "id": id, "note": text, "content": null })
}

pub fn issue_card(id: &str, content_id: &str, title: &str) -> Value {
    issue_card_with(id, content_id, title, "OPEN", &[], None)
}

pub fn issue_card_with(
    id: &str,
    content_id: &str,
    title: &str,
    state: &str,
    labels: &[&str],
    body: Option<&str>,
) -> Value {
    let labels: Vec<Value> = labels.iter().map(|name| json!({ "name": name })).collect();
    json!({
        "id": id,
        "note": null,
        "content": {
            "id": content_id,
            "title": title,
            "state": state,
            "body": body,
            "labels": { "nodes": labels },
        },
    })
}
