use crate::matcher::find_card;
use colink_api::{Card, CardPayload};

/// Local copy of a column's card order, kept in step with every remote
/// mutation confirmed during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMirror {
    column_id: String,
    cards: Vec<Card>,
}

impl ColumnMirror {
    pub fn new(column_id: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            column_id: column_id.into(),
            cards,
        }
    }

    pub fn column_id(&self) -> &str {
        &self.column_id
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Current index of the card equivalent to `candidate`.
    pub fn position(&self, candidate: &CardPayload) -> Option<usize> {
        find_card(&self.cards, candidate).map(|(index, _)| index)
    }

    /// Inserts at `index`, or at the end when `index` is past it.
    pub fn insert(&mut self, index: usize, card: Card) {
        let index = index.min(self.cards.len());
        self.cards.insert(index, card);
    }

    pub fn remove(&mut self, index: usize) -> Option<Card> {
        (index < self.cards.len()).then(|| self.cards.remove(index))
    }

    pub fn display_texts(&self) -> Vec<&str> {
        self.cards.iter().map(Card::display_text).collect()
    }
}
