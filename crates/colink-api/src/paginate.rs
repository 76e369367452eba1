use crate::GraphqlExecutor;
use crate::model::Column;
use crate::projects::ProjectsApi;
use colink_core::{LinkError, LinkResult};
use tracing::info;

impl<E: GraphqlExecutor> ProjectsApi<E> {
    /// Follows each column's card cursor until its last page, appending every
    /// page's cards in order. Columns are exhausted one at a time.
    ///
    /// Returns the number of follow-up page requests issued.
    pub fn paginate_column_cards<'c>(
        &self,
        columns: impl IntoIterator<Item = &'c mut Column>,
    ) -> LinkResult<usize> {
        let mut requests = 0usize;

        for column in columns {
            while column.cards.page_info.has_next_page {
                let cursor = column.cards.page_info.end_cursor.clone().ok_or_else(|| {
                    LinkError::sync(format!(
                        "column '{}' reports another page without a cursor",
                        column.id
                    ))
                })?;

                info!(
                    "paginating {} after {}",
                    column.qualified_name(),
                    cursor
                );

                let page = self.fetch_column_page(&column.id, Some(&cursor))?;
                requests += 1;

                column.cards.nodes.extend(page.cards.nodes);
                column.cards.page_info = page.cards.page_info;
            }
        }

        Ok(requests)
    }
}
