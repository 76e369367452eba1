use crate::filters::{CardFilter, apply_filters};
use crate::mirror::ColumnMirror;
use crate::notes::{automation_note, column_header_note};
use crate::reconcile::{Reconciler, SyncOutcome};
use colink_api::{CardPayload, Column, GraphqlExecutor, ProjectsApi};
use colink_config::SyncConfig;
use colink_core::LinkResult;
use tracing::{info, warn};

/// One full mirror run: fetch, filter, place every wanted card in order and
/// drop whatever is left over at the end of the target column.
#[derive(Debug)]
pub struct SyncEngine<'a, E> {
    api: &'a ProjectsApi<E>,
    config: &'a SyncConfig,
}

impl<'a, E: GraphqlExecutor> SyncEngine<'a, E> {
    pub fn new(api: &'a ProjectsApi<E>, config: &'a SyncConfig) -> Self {
        Self { api, config }
    }

    pub fn run(&self) -> LinkResult<SyncOutcome> {
        let source_filters = CardFilter::source_chain(&self.config.filters)?;

        let columns = self
            .api
            .get_project_columns(&self.config.source_column_ids, &self.config.target_column_id)?;

        let target_cards = apply_filters(
            &columns.target_column.cards.nodes,
            &CardFilter::target_chain(),
        );
        let mut source_columns = columns.source_columns;
        for column in &mut source_columns {
            column.cards.nodes = apply_filters(&column.cards.nodes, &source_filters);
            info!(
                column = %column.qualified_name(),
                cards = column.cards.nodes.len(),
                "filtered source column"
            );
        }

        let desired = desired_sequence(self.config, &source_columns);
        let mut reconciler = Reconciler::new(
            self.api,
            ColumnMirror::new(columns.target_column.id.clone(), target_cards),
        );

        let mut target_index = 0usize;
        for payload in &desired {
            if reconciler.ensure_payload_at(target_index, payload)?.is_some() {
                target_index += 1;
            }
        }
        reconciler.truncate(target_index)?;

        let (_, outcome) = reconciler.into_parts();
        info!(
            placed = outcome.placed,
            added = outcome.added,
            moved = outcome.moved,
            deleted = outcome.deleted,
            failed_adds = outcome.failed_adds.len(),
            "sync complete"
        );
        Ok(outcome)
    }
}

/// The target column's wanted contents, top to bottom, for already filtered
/// source columns.
pub fn desired_sequence(config: &SyncConfig, source_columns: &[Column]) -> Vec<CardPayload> {
    let mut desired = Vec::new();

    if config.automation_notice {
        desired.push(CardPayload::Note(automation_note(source_columns)));
    }

    for column in source_columns {
        if config.source_column_notices {
            desired.push(CardPayload::Note(column_header_note(column)));
        }
        for card in &column.cards.nodes {
            match card.payload() {
                Some(payload) => desired.push(payload),
                None => warn!(
                    card_id = %card.id,
                    column = %column.qualified_name(),
                    "skipping source card with unreadable content"
                ),
            }
        }
    }

    desired
}
