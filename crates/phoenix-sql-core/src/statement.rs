//! Finalized ORM statements and their descriptors.
//!
//! The ORM hands every statement over twice: once as the SQL text it has
//! finalized, and once as a [`StatementDescriptor`] exposing the table and
//! the ordered column bindings the text was assembled from. The rewriter
//! works from the descriptor so it never has to parse SQL.

use serde::{Deserialize, Deserializer, Serialize};

/// Revision of the descriptor interface understood by this crate.
pub const DESCRIPTOR_REVISION: u32 = 1;

/// The kind of a finalized statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// `insert into ... values (...)`.
    Insert,
    /// `insert into ... select ...`.
    InsertSelect,
    /// `update ... set ... where ...`.
    Update,
    /// `delete from ...`.
    Delete,
    /// Queries and anything else.
    Other,
}

/// Returns a value expression as it appears in emitted SQL.
///
/// A leading `=` marks a server-side computed value (`=current_date()`)
/// and is dropped. Nothing else is interpreted.
#[must_use]
pub fn emitted_value(expr: &str) -> &str {
    expr.strip_prefix('=').unwrap_or(expr)
}

/// An insertion-ordered mapping from column name to SQL fragment.
///
/// Order is significant: it decides which positional `?` placeholder lines
/// up with which column. Serialized as a list of `[column, fragment]` pairs;
/// a column listed twice keeps its first position and its last fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnBindings {
    entries: Vec<(String, String)>,
}

impl ColumnBindings {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Binds `column` to `expr`.
    ///
    /// Re-binding a column replaces its fragment without moving it.
    pub fn insert(&mut self, column: impl Into<String>, expr: impl Into<String>) {
        let column = column.into();
        let expr = expr.into();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = expr,
            None => self.entries.push((column, expr)),
        }
    }

    /// Returns the fragment bound to `column`.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, expr)| expr.as_str())
    }

    /// Iterates over `(column, fragment)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, e)| (c.as_str(), e.as_str()))
    }

    /// Iterates over column names in binding order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    /// Returns the number of bound columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no column is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for ColumnBindings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<(String, String)>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

impl<C: Into<String>, E: Into<String>> FromIterator<(C, E)> for ColumnBindings {
    fn from_iter<I: IntoIterator<Item = (C, E)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (column, expr) in iter {
            bindings.insert(column, expr);
        }
        bindings
    }
}

/// Structured view of an UPDATE statement as assembled by the ORM.
///
/// - `set_columns` and `key_columns` map a column to a value expression
///   (`?` or `=<computed>`).
/// - `where_columns` map a column to a full predicate fragment such as
///   `>10` or `=?`, appended directly after the column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementDescriptor {
    /// Target table, possibly schema-qualified.
    pub table: String,
    /// Columns assigned by the statement.
    pub set_columns: ColumnBindings,
    /// Primary-key columns identifying the row.
    pub key_columns: ColumnBindings,
    /// Additional restrictions on the row.
    pub where_columns: ColumnBindings,
    /// Optimistic-lock version column, if the entity is versioned.
    pub version_column: Option<String>,
    /// Comment the ORM prefixes to the statement.
    pub comment: Option<String>,
}

impl StatementDescriptor {
    /// Creates a descriptor for `table` with no bindings.
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Adds a SET assignment.
    #[must_use]
    pub fn set(mut self, column: &str, expr: &str) -> Self {
        self.set_columns.insert(column, expr);
        self
    }

    /// Adds a primary-key column.
    #[must_use]
    pub fn key(mut self, column: &str, expr: &str) -> Self {
        self.key_columns.insert(column, expr);
        self
    }

    /// Adds a WHERE restriction; `predicate` includes its operator.
    #[must_use]
    pub fn where_column(mut self, column: &str, predicate: &str) -> Self {
        self.where_columns.insert(column, predicate);
        self
    }

    /// Marks the statement as versioned by `column`.
    #[must_use]
    pub fn version(mut self, column: &str) -> Self {
        self.version_column = Some(String::from(column));
        self
    }

    /// Sets the statement comment.
    #[must_use]
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(String::from(comment));
        self
    }

    /// Returns the total number of bound columns across all groups.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.set_columns.len() + self.key_columns.len() + self.where_columns.len()
    }

    /// Renders the ANSI UPDATE the ORM would send to a generic engine.
    ///
    /// Placeholders appear in binding order: SET values, key values, WHERE
    /// fragments, then the version.
    #[must_use]
    pub fn update_sql(&self) -> String {
        let mut sql = comment_prefix(self.comment.as_deref());
        sql.push_str("update ");
        sql.push_str(&self.table);
        sql.push_str(" set ");

        let assignments: Vec<String> = self
            .set_columns
            .iter()
            .map(|(column, expr)| format!("{column}={}", emitted_value(expr)))
            .collect();
        sql.push_str(&assignments.join(", "));

        let predicates = self.predicates();
        if !predicates.is_empty() {
            sql.push_str(" where ");
            sql.push_str(&predicates.join(" and "));
        }
        sql
    }

    /// Returns the row predicates in binding order: key equalities, WHERE
    /// fragments, then the version check.
    pub(crate) fn predicates(&self) -> Vec<String> {
        let keys = self
            .key_columns
            .iter()
            .map(|(column, expr)| format!("{column}={}", emitted_value(expr)));
        let restrictions = self
            .where_columns
            .iter()
            .map(|(column, predicate)| format!("{column}{predicate}"));
        let version = self
            .version_column
            .iter()
            .map(|column| format!("{column}=?"));
        keys.chain(restrictions).chain(version).collect()
    }
}

/// Renders `/* comment */ ` with any `*/` inside the comment escaped.
pub(crate) fn comment_prefix(comment: Option<&str>) -> String {
    comment.map_or_else(String::new, |text| {
        format!("/* {} */ ", text.replace("*/", "*\\/"))
    })
}

/// A statement the ORM has finished assembling.
///
/// This is the only view of ORM internals the rewriter relies on.
pub trait FinalizedStatement {
    /// Returns the statement kind.
    fn kind(&self) -> StatementKind;

    /// Returns the SQL text the ORM generated.
    fn sql(&self) -> &str;

    /// Returns the structured descriptor, if the ORM could supply one.
    fn descriptor(&self) -> Option<&StatementDescriptor>;

    /// Returns the revision of the descriptor interface the ORM speaks.
    fn descriptor_revision(&self) -> u32 {
        DESCRIPTOR_REVISION
    }
}

/// An owned finalized statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// Statement kind.
    pub kind: StatementKind,
    /// SQL text as generated by the ORM.
    #[serde(default)]
    pub sql: String,
    /// Descriptor, present for updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<StatementDescriptor>,
}

impl Statement {
    /// Creates an `insert into ... values` statement.
    #[must_use]
    pub fn insert(sql: impl Into<String>) -> Self {
        Self::raw(StatementKind::Insert, sql)
    }

    /// Creates an `insert into ... select` statement.
    #[must_use]
    pub fn insert_select(sql: impl Into<String>) -> Self {
        Self::raw(StatementKind::InsertSelect, sql)
    }

    /// Creates an update statement, rendering its SQL from `descriptor`.
    #[must_use]
    pub fn update(descriptor: StatementDescriptor) -> Self {
        Self {
            kind: StatementKind::Update,
            sql: descriptor.update_sql(),
            descriptor: Some(descriptor),
        }
    }

    /// Creates a statement of `kind` from its SQL text alone.
    #[must_use]
    pub fn raw(kind: StatementKind, sql: impl Into<String>) -> Self {
        Self {
            kind,
            sql: sql.into(),
            descriptor: None,
        }
    }

    /// Fills in the SQL text from the descriptor when it was left empty.
    #[must_use]
    pub fn with_rendered_sql(mut self) -> Self {
        if self.sql.is_empty() {
            if let Some(descriptor) = &self.descriptor {
                self.sql = descriptor.update_sql();
            }
        }
        self
    }
}

impl FinalizedStatement for Statement {
    fn kind(&self) -> StatementKind {
        self.kind
    }

    fn sql(&self) -> &str {
        &self.sql
    }

    fn descriptor(&self) -> Option<&StatementDescriptor> {
        self.descriptor.as_ref()
    }
}
