//! Schema DDL.
//!
//! Phoenix has no unique constraints. Unique keys are declared as secondary
//! indexes instead, and the inline `unique` fragments of `create table` are
//! left empty.

use phoenix_sql_core::Dialect;
use serde::{Deserialize, Serialize};

use crate::dialect::PhoenixDialect;

/// Sort direction of an indexed column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A unique key declared on an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueKey {
    /// Constraint name.
    pub name: String,
    /// Qualified table name.
    pub table: String,
    /// Key columns with an optional explicit order.
    pub columns: Vec<(String, Option<SortOrder>)>,
}

impl UniqueKey {
    /// Creates a unique key with no columns.
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            columns: Vec::new(),
        }
    }

    /// Adds a column in the index's default order.
    #[must_use]
    pub fn column(mut self, name: &str) -> Self {
        self.columns.push((String::from(name), None));
        self
    }

    /// Adds a column with an explicit order.
    #[must_use]
    pub fn column_ordered(mut self, name: &str, order: SortOrder) -> Self {
        self.columns.push((String::from(name), Some(order)));
        self
    }
}

impl PhoenixDialect {
    /// Returns the uniqueness fragment appended to `create table`.
    #[must_use]
    pub const fn table_creation_unique_constraints(&self) -> &'static str {
        ""
    }

    /// Returns the uniqueness fragment appended to a column definition.
    #[must_use]
    pub const fn column_definition_uniqueness(&self) -> &'static str {
        ""
    }

    /// Generates the index that stands in for a unique key.
    #[must_use]
    pub fn add_unique_key(&self, key: &UniqueKey) -> String {
        let columns: Vec<String> = key
            .columns
            .iter()
            .map(|(name, order)| match order {
                Some(order) => format!("{name} {}", order.as_sql()),
                None => name.clone(),
            })
            .collect();
        format!(
            "create index {} on {} ({})",
            self.quote_identifier(&key.name),
            key.table,
            columns.join(", ")
        )
    }

    /// Generates the statement dropping a unique key's index.
    #[must_use]
    pub fn drop_unique_key(&self, key: &UniqueKey) -> String {
        format!(
            "drop index if exists {} on {}",
            self.quote_identifier(&key.name),
            key.table
        )
    }

    /// Generates the statement dropping a schema.
    #[must_use]
    pub fn drop_schema(&self, schema: &str) -> Vec<String> {
        vec![format!("drop schema if exists {schema}")]
    }

    /// Returns the keyword fragment for `alter table ... add`.
    #[must_use]
    pub const fn add_column_string(&self) -> &'static str {
        " add "
    }
}
