mod engine;
mod filters;
mod matcher;
mod mirror;
mod notes;
mod reconcile;

pub use engine::{SyncEngine, desired_sequence};
pub use filters::{CardFilter, IGNORE_COMMENT, TypeFilter, apply_filters, is_ignored};
pub use matcher::{find_card, is_same_card};
pub use mirror::ColumnMirror;
pub use notes::{AUTOMATION_NOTE_HEADER, automation_note, column_header_note};
pub use reconcile::{Reconciler, SyncOutcome};
