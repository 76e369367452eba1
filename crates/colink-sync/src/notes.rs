use colink_api::Column;

pub const AUTOMATION_NOTE_HEADER: &str = "**DO NOT EDIT**";

/// Banner placed at the top of the target column when automation notices are
/// enabled.
pub fn automation_note(source_columns: &[Column]) -> String {
    match source_columns {
        [column] => format!(
            "{AUTOMATION_NOTE_HEADER}\nThis column uses automation to mirror the {} from {}.",
            column_link(column),
            project_link(column)
        ),
        columns => {
            let lines: Vec<String> = columns
                .iter()
                .map(|column| format!("- {} from {}", column_link(column), project_link(column)))
                .collect();
            format!(
                "{AUTOMATION_NOTE_HEADER}\nThis column uses automation to mirror the following columns:\n{}",
                lines.join("\n")
            )
        }
    }
}

/// Header placed directly before the cards mirrored from `column`.
pub fn column_header_note(column: &Column) -> String {
    format!("**{}: {}**", column.project.name, column.name)
}

fn column_link(column: &Column) -> String {
    format!("['{}' column]({})", column.name, board_url(&column.url))
}

fn project_link(column: &Column) -> String {
    match &column.project.url {
        Some(url) => format!("[{}]({url})", column.project.name),
        None => column.project.name.clone(),
    }
}

// `/columns/<id>` becomes the `#column-<id>` anchor on the project board.
fn board_url(column_url: &str) -> String {
    column_url.replace("/columns/", "#column-")
}
