use crate::model::{Card, CardPayload, Column};
use crate::{GraphqlExecutor, queries};
use colink_core::{LinkError, LinkResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info};

/// Typed access to the project column queries and card mutations.
#[derive(Debug, Clone)]
pub struct ProjectsApi<E> {
    executor: E,
}

#[derive(Debug, Clone)]
pub struct ProjectColumns {
    pub source_columns: Vec<Column>,
    pub target_column: Column,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ColumnsData {
    #[serde(default)]
    source_columns: Vec<Option<Column>>,
    target_column: Option<Column>,
}

#[derive(Debug, Deserialize)]
struct ColumnPageData {
    column: Option<Column>,
}

#[derive(Debug, Deserialize)]
struct CardEdge {
    node: Card,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CardEdgePayload {
    card_edge: CardEdge,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddCardData {
    add_project_card: CardEdgePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveCardData {
    move_project_card: CardEdgePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeletedCard {
    deleted_card_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteCardData {
    delete_project_card: DeletedCard,
}

impl<E: GraphqlExecutor> ProjectsApi<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Fetches every source column and the target column in one request and
    /// then completes their card lists page by page.
    pub fn get_project_columns(
        &self,
        source_column_ids: &[String],
        target_column_id: &str,
    ) -> LinkResult<ProjectColumns> {
        let data: ColumnsData = self.request(
            queries::GET_PROJECT_COLUMNS,
            json!({
                "sourceColumnIds": source_column_ids,
                "targetColumnId": target_column_id,
            }),
        )?;

        if data.source_columns.len() != source_column_ids.len() {
            return Err(LinkError::sync(format!(
                "expected {} source columns, API returned {}",
                source_column_ids.len(),
                data.source_columns.len()
            )));
        }

        let mut source_columns = Vec::with_capacity(data.source_columns.len());
        for (column, id) in data.source_columns.into_iter().zip(source_column_ids) {
            let column = column
                .ok_or_else(|| LinkError::api(format!("source column '{id}' was not found")))?;
            source_columns.push(column);
        }

        let mut target_column = data.target_column.ok_or_else(|| {
            LinkError::api(format!("target column '{target_column_id}' was not found"))
        })?;

        let pages = self.paginate_column_cards(
            source_columns
                .iter_mut()
                .chain(std::iter::once(&mut target_column)),
        )?;
        debug!(pages, "fetched follow-up card pages");

        Ok(ProjectColumns {
            source_columns,
            target_column,
        })
    }

    pub fn fetch_column_page(&self, column_id: &str, after: Option<&str>) -> LinkResult<Column> {
        let data: ColumnPageData = self.request(
            queries::GET_SINGLE_PROJECT_COLUMN,
            json!({
                "id": column_id,
                "after": after,
            }),
        )?;

        data.column
            .ok_or_else(|| LinkError::api(format!("column '{column_id}' was not found")))
    }

    pub fn add_card(&self, column_id: &str, payload: &CardPayload) -> LinkResult<Card> {
        let mut variables = payload.to_json();
        variables["columnId"] = json!(column_id);

        let data: AddCardData = self.request(queries::ADD_PROJECT_CARD, variables)?;
        let card = data.add_project_card.card_edge.node;
        info!(card_id = %card.id, column_id, "added card");
        Ok(card)
    }

    /// Moves a card so it directly follows `after_card_id`, or to the top of
    /// the column when no card is given.
    pub fn move_card(
        &self,
        card_id: &str,
        column_id: &str,
        after_card_id: Option<&str>,
    ) -> LinkResult<Card> {
        let data: MoveCardData = self.request(
            queries::MOVE_PROJECT_CARD,
            json!({
                "cardId": card_id,
                "columnId": column_id,
                "afterCardId": after_card_id,
            }),
        )?;

        info!(card_id, after_card_id = ?after_card_id, "moved card");
        Ok(data.move_project_card.card_edge.node)
    }

    pub fn delete_card(&self, card_id: &str) -> LinkResult<String> {
        let data: DeleteCardData =
            self.request(queries::DELETE_PROJECT_CARD, json!({ "cardId": card_id }))?;

        info!(card_id, "deleted card");
        Ok(data.delete_project_card.deleted_card_id)
    }

    fn request<T: DeserializeOwned>(&self, query: &str, variables: Value) -> LinkResult<T> {
        let data = self.executor.execute(query, variables)?;
        serde_json::from_value(data).map_err(|err| {
            LinkError::sync(format!(
                "failed to map API response to expected shape: {err}"
            ))
        })
    }
}
