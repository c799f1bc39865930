//! Apache Phoenix dialect implementation.

use phoenix_sql_core::{inject_hints, Dialect, StatementRewriter, TargetDialect};

use crate::functions::FunctionRegistry;
use crate::hint::SecondaryIndexHint;
use crate::pagination::LimitHandler;
use crate::types::{column_type, SqlType};

/// Which parts of a qualified name the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameQualifierSupport {
    /// `catalog.table`.
    Catalog,
    /// `schema.table`.
    Schema,
    /// `catalog.schema.table`.
    Both,
    /// Unqualified names only.
    None,
}

/// Apache Phoenix dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhoenixDialect;

impl PhoenixDialect {
    /// Creates a new Phoenix dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Maps a portable type to the Phoenix column type.
    #[must_use]
    pub fn column_type(&self, ty: SqlType) -> String {
        column_type(ty)
    }

    /// Returns the Phoenix function registry.
    #[must_use]
    pub fn functions(&self) -> FunctionRegistry {
        FunctionRegistry::phoenix()
    }

    /// Returns a statement rewriter with the Phoenix gate open.
    #[must_use]
    pub fn rewriter(&self) -> StatementRewriter {
        StatementRewriter::for_dialect(self)
    }

    /// Returns the pagination handler.
    #[must_use]
    pub const fn limit_handler(&self) -> LimitHandler {
        LimitHandler::new()
    }

    /// Places `hints` after the first `select` keyword of `query`.
    #[must_use]
    pub fn query_hint_string<S: AsRef<str>>(&self, query: &str, hints: &[S]) -> String {
        inject_hints(query, hints, self.target())
    }

    /// Places secondary index hints after the first `select` keyword of `query`.
    #[must_use]
    pub fn apply_index_hints(&self, query: &str, hints: &[SecondaryIndexHint]) -> String {
        let fragments: Vec<String> = hints.iter().map(SecondaryIndexHint::build).collect();
        self.query_hint_string(query, &fragments)
    }

    // Writes

    /// Phoenix spells every row write `upsert`.
    #[must_use]
    pub const fn supports_upsert(&self) -> bool {
        true
    }

    /// Phoenix accepts `limit ?` and `offset ?`.
    #[must_use]
    pub const fn supports_limit_offset(&self) -> bool {
        true
    }

    // Locking

    /// Phoenix does not support lock timeouts.
    #[must_use]
    pub const fn supports_lock_timeouts(&self) -> bool {
        false
    }

    /// Phoenix does not support `for update` on outer joins.
    #[must_use]
    pub const fn supports_outer_join_for_update(&self) -> bool {
        false
    }

    // Current timestamp

    /// Returns whether the current timestamp can be selected.
    #[must_use]
    pub const fn supports_current_timestamp_selection(&self) -> bool {
        true
    }

    /// Returns whether the current timestamp query is a callable statement.
    #[must_use]
    pub const fn is_current_timestamp_select_callable(&self) -> bool {
        false
    }

    /// Returns the query selecting the current timestamp.
    #[must_use]
    pub const fn current_timestamp_select(&self) -> &'static str {
        "select current_date()"
    }

    /// Returns the function returning the current timestamp.
    #[must_use]
    pub const fn current_timestamp_function(&self) -> &'static str {
        "current_date"
    }

    // Queries

    /// Phoenix supports `union all`.
    #[must_use]
    pub const fn supports_union_all(&self) -> bool {
        true
    }

    /// Phoenix rejects `in ()`.
    #[must_use]
    pub const fn supports_empty_in_list(&self) -> bool {
        false
    }

    /// Phoenix supports `(a, b) = (?, ?)`.
    #[must_use]
    pub const fn supports_row_value_constructor(&self) -> bool {
        true
    }

    /// Phoenix supports `(a, b) in ((?, ?), ...)`.
    #[must_use]
    pub const fn supports_row_value_constructor_in_in_list(&self) -> bool {
        true
    }

    /// Phoenix cannot bind parameters as callable arguments.
    #[must_use]
    pub const fn supports_bind_as_callable_argument(&self) -> bool {
        false
    }

    /// Phoenix does not support `count(distinct (a, b))`.
    #[must_use]
    pub const fn supports_tuple_distinct_counts(&self) -> bool {
        false
    }

    /// Returns how table names may be qualified.
    #[must_use]
    pub const fn name_qualifier_support(&self) -> NameQualifierSupport {
        NameQualifierSupport::Schema
    }

    // DDL

    /// Phoenix accepts `drop table if exists`.
    #[must_use]
    pub const fn supports_if_exists_before_table_name(&self) -> bool {
        true
    }

    /// Phoenix ignores column check constraints.
    #[must_use]
    pub const fn supports_column_check(&self) -> bool {
        false
    }

    /// Phoenix ignores table check constraints.
    #[must_use]
    pub const fn supports_table_check(&self) -> bool {
        false
    }

    /// Phoenix cannot add constraints with `alter table`.
    #[must_use]
    pub const fn has_alter_table(&self) -> bool {
        false
    }

    /// Constraints are never dropped before their tables.
    #[must_use]
    pub const fn drop_constraints(&self) -> bool {
        false
    }
}

impl Dialect for PhoenixDialect {
    fn name(&self) -> &'static str {
        "phoenix"
    }

    fn target(&self) -> TargetDialect {
        TargetDialect::Phoenix
    }
}
