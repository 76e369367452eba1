//! GraphQL documents for the GitHub classic projects API.

macro_rules! card_content_fields {
    () => {
        "id
title
state
body
labels(first: 20) {
  nodes {
    name
  }
}"
    };
}

macro_rules! card_fields {
    () => {
        concat!(
            "id
note
content {
  ... on Issue {
",
            card_content_fields!(),
            "
  }
  ... on PullRequest {
",
            card_content_fields!(),
            "
  }
}"
        )
    };
}

macro_rules! column_fields {
    () => {
        concat!(
            "id
name
url
project {
  name
  url
}
cards(first: 50, archivedStates: [NOT_ARCHIVED], after: $after) {
  nodes {
",
            card_fields!(),
            "
  }
  pageInfo {
    hasNextPage
    endCursor
  }
}"
        )
    };
}

pub const GET_PROJECT_COLUMNS: &str = concat!(
    "query($sourceColumnIds: [ID!]!, $targetColumnId: ID!, $after: String) {
  sourceColumns: nodes(ids: $sourceColumnIds) {
    ... on ProjectColumn {
",
    column_fields!(),
    "
    }
  }
  targetColumn: node(id: $targetColumnId) {
    ... on ProjectColumn {
",
    column_fields!(),
    "
    }
  }
}"
);

pub const GET_SINGLE_PROJECT_COLUMN: &str = concat!(
    "query($id: ID!, $after: String) {
  column: node(id: $id) {
    ... on ProjectColumn {
",
    column_fields!(),
    "
    }
  }
}"
);

pub const ADD_PROJECT_CARD: &str = concat!(
    "mutation addProjectCard($columnId: ID!, $contentId: ID, $note: String) {
  addProjectCard(input: { projectColumnId: $columnId, contentId: $contentId, note: $note }) {
    cardEdge {
      node {
",
    card_fields!(),
    "
      }
    }
  }
}"
);

pub const MOVE_PROJECT_CARD: &str = concat!(
    "mutation moveProjectCard($cardId: ID!, $columnId: ID!, $afterCardId: ID) {
  moveProjectCard(input: { cardId: $cardId, columnId: $columnId, afterCardId: $afterCardId }) {
    cardEdge {
      node {
",
    card_fields!(),
    "
      }
    }
  }
}"
);

pub const DELETE_PROJECT_CARD: &str = "mutation deleteProjectCard($cardId: ID!) {
  deleteProjectCard(input: { cardId: $cardId }) {
    deletedCardId
  }
}";
