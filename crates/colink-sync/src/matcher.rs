use colink_api::{Card, CardBody, CardPayload};

/// True when `card` is the same card as `candidate`: equal content ids for
/// linked content, or byte-for-byte equal note text. Notes never match content.
pub fn is_same_card(card: &Card, candidate: &CardPayload) -> bool {
    match (&card.body, candidate) {
        (CardBody::Content(content), CardPayload::Content(content_id)) => {
            &content.id == content_id
        }
        (CardBody::Note(text), CardPayload::Note(note)) => text == note,
        _ => false,
    }
}

/// First card equivalent to `candidate`, with its index.
pub fn find_card<'a>(cards: &'a [Card], candidate: &CardPayload) -> Option<(usize, &'a Card)> {
    cards
        .iter()
        .enumerate()
        .find(|(_, card)| is_same_card(card, candidate))
}
