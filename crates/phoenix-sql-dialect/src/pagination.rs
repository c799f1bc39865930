//! LIMIT/OFFSET pagination.
//!
//! Phoenix accepts `LIMIT ?` and `OFFSET ?` after the query. Both bounds are
//! bound as parameters after every parameter of the query itself.

/// Row bounds requested for a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowSelection {
    /// Index of the first row to return (0-based).
    pub first_row: Option<u64>,
    /// Maximum number of rows to return.
    pub max_rows: Option<u64>,
}

impl RowSelection {
    /// Selects at most `max_rows` rows.
    #[must_use]
    pub const fn limit(max_rows: u64) -> Self {
        Self {
            first_row: None,
            max_rows: Some(max_rows),
        }
    }

    /// Skips the first `first_row` rows.
    #[must_use]
    pub const fn offset(mut self, first_row: u64) -> Self {
        self.first_row = Some(first_row);
        self
    }

    /// Returns `true` if a row limit is set.
    #[must_use]
    pub const fn has_max_rows(&self) -> bool {
        self.max_rows.is_some()
    }

    /// Returns `true` if a non-zero offset is set.
    #[must_use]
    pub const fn has_first_row(&self) -> bool {
        matches!(self.first_row, Some(n) if n > 0)
    }
}

/// Appends pagination clauses to queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitHandler;

impl LimitHandler {
    /// Creates a new limit handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns whether the dialect supports LIMIT at all.
    #[must_use]
    pub const fn supports_limit(&self) -> bool {
        true
    }

    /// Appends ` limit ?` and/or ` offset ?` to `sql` as `selection` requires.
    #[must_use]
    pub fn process_sql(&self, sql: &str, selection: &RowSelection) -> String {
        let mut out = String::from(sql);
        if selection.has_max_rows() {
            out.push_str(" limit ?");
        }
        if selection.has_first_row() {
            out.push_str(" offset ?");
        }
        out
    }

    /// Returns the values for the placeholders added by
    /// [`process_sql`](Self::process_sql), in order.
    #[must_use]
    pub fn bind_values(&self, selection: &RowSelection) -> Vec<u64> {
        let limit = selection.max_rows;
        let offset = selection.first_row.filter(|_| selection.has_first_row());
        limit.into_iter().chain(offset).collect()
    }
}
