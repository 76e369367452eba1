use crate::mirror::ColumnMirror;
use colink_api::{Card, CardPayload, GraphqlExecutor, ProjectsApi};
use colink_core::{LinkError, LinkResult};
use serde::Serialize;
use tracing::{debug, warn};

/// What a run changed in the target column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    pub placed: usize,
    pub added: usize,
    pub moved: usize,
    pub deleted: usize,
    pub failed_adds: Vec<String>,
}

impl SyncOutcome {
    pub fn mutations(&self) -> usize {
        self.added + self.moved + self.deleted
    }
}

/// Places cards into the target column one index at a time.
///
/// Indices are settled strictly left to right, so every `afterCardId` a move
/// needs is read from the part of the mirror that already matches the remote
/// column.
#[derive(Debug)]
pub struct Reconciler<'a, E> {
    api: &'a ProjectsApi<E>,
    target: ColumnMirror,
    outcome: SyncOutcome,
}

impl<'a, E: GraphqlExecutor> Reconciler<'a, E> {
    pub fn new(api: &'a ProjectsApi<E>, target: ColumnMirror) -> Self {
        Self {
            api,
            target,
            outcome: SyncOutcome::default(),
        }
    }

    pub fn target(&self) -> &ColumnMirror {
        &self.target
    }

    pub fn outcome(&self) -> &SyncOutcome {
        &self.outcome
    }

    pub fn into_parts(self) -> (ColumnMirror, SyncOutcome) {
        (self.target, self.outcome)
    }

    /// Ensures the card for `payload` sits at `to_index`.
    pub fn ensure_payload_at(
        &mut self,
        to_index: usize,
        payload: &CardPayload,
    ) -> LinkResult<Option<Card>> {
        self.ensure_at(
            to_index,
            |mirror| mirror.position(payload),
            || payload.clone(),
        )
    }

    /// Finds the card with `find`, creating it from `new_card` when missing,
    /// and moves it to `to_index`.
    ///
    /// Returns `None` when the remote add was rejected; the failure is logged
    /// and recorded and later cards simply take the slot. Move failures are
    /// returned as errors.
    pub fn ensure_at<F, P>(
        &mut self,
        to_index: usize,
        find: F,
        new_card: P,
    ) -> LinkResult<Option<Card>>
    where
        F: FnOnce(&ColumnMirror) -> Option<usize>,
        P: FnOnce() -> CardPayload,
    {
        debug!(cards = ?self.target.display_texts(), to_index, "before ensure card");

        let (card, current_index) = match find(&self.target) {
            Some(index) if index < to_index => {
                let card = self.card_at(index)?;
                warn!(
                    card_id = %card.id,
                    "skipping duplicate of a card already placed at index {index}"
                );
                return Ok(None);
            }
            Some(index) => (self.card_at(index)?, index),
            None => {
                let payload = new_card();
                match self.api.add_card(self.target.column_id(), &payload) {
                    Ok(card) => {
                        // new cards always land at the top of the column
                        self.target.insert(0, card.clone());
                        self.outcome.added += 1;
                        (card, 0)
                    }
                    Err(error) => {
                        let rendered = payload.to_json().to_string();
                        warn!("could not add card for payload {rendered}");
                        warn!("{}", error.message);
                        self.outcome.failed_adds.push(rendered);
                        return Ok(None);
                    }
                }
            }
        };

        if current_index != to_index {
            let after_card_id = self.after_card_id(current_index, to_index);
            self.api
                .move_card(&card.id, self.target.column_id(), after_card_id.as_deref())?;

            let moved = self.target.remove(current_index).ok_or_else(|| {
                LinkError::sync(format!("card at index {current_index} vanished from mirror"))
            })?;
            self.target.insert(to_index, moved);
            self.outcome.moved += 1;
        }

        self.outcome.placed += 1;
        debug!(cards = ?self.target.display_texts(), "after ensure card");
        Ok(Some(card))
    }

    /// Deletes cards from the end of the target until `len` remain.
    pub fn truncate(&mut self, len: usize) -> LinkResult<usize> {
        let mut deleted = 0usize;

        while self.target.len() > len {
            let index = self.target.len() - 1;
            let card_id = self.card_at(index)?.id;
            self.api.delete_card(&card_id)?;
            self.target.remove(index);
            self.outcome.deleted += 1;
            deleted += 1;
        }

        Ok(deleted)
    }

    // The card that must precede the moved one, read before the move is
    // applied locally. Moving towards the end, the card currently at
    // `to_index` shifts down into `to_index - 1` once the moved card is
    // lifted out.
    fn after_card_id(&self, from_index: usize, to_index: usize) -> Option<String> {
        let cards = self.target.cards();
        if to_index == 0 {
            return None;
        }
        if to_index >= cards.len() {
            return cards.last().map(|card| card.id.clone());
        }
        if to_index > from_index {
            Some(cards[to_index].id.clone())
        } else {
            Some(cards[to_index - 1].id.clone())
        }
    }

    fn card_at(&self, index: usize) -> LinkResult<Card> {
        self.target
            .get(index)
            .cloned()
            .ok_or_else(|| LinkError::sync(format!("no card at index {index} in target mirror")))
    }
}
