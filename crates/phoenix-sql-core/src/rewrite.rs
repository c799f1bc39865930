//! Statement rewriting for Apache Phoenix.
//!
//! Phoenix has no `UPDATE`; every row write is an `UPSERT`. Inserts only
//! need their leading keyword swapped. Updates are rebuilt from their
//! descriptor:
//!
//! - unversioned: `upsert into t (set.., key.., where..) values (..)`
//! - versioned: `upsert into t (set.., where.., key..) select ..,key.. from t
//!   where key=? and .. and ver=?`, which only writes while the row still
//!   carries the expected version.
//!
//! Placeholders stay in the order the ORM binds them: SET values, key
//! values, WHERE values, version.

use tracing::{debug, warn};

use crate::dialect::{Dialect, TargetDialect};
use crate::error::{Result, RewriteError};
use crate::statement::{
    comment_prefix, emitted_value, FinalizedStatement, StatementDescriptor, StatementKind,
    DESCRIPTOR_REVISION,
};

const INSERT_INTO: &str = "insert into";
const UPSERT_INTO: &str = "upsert into";

/// What the rewriter does with a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewritePlan {
    /// Emit the ORM's text unchanged.
    PassThrough,
    /// Swap `insert into` for `upsert into`.
    RewriteInsert,
    /// Rebuild the statement as an UPSERT from its descriptor.
    RewriteUpdate,
}

/// Rewrites finalized ORM statements for the configured dialect.
///
/// The rewriter holds no state besides the dialect and can be shared freely
/// across threads.
///
/// ```rust
/// use phoenix_sql_core::{Statement, StatementDescriptor, StatementRewriter, TargetDialect};
///
/// let rewriter = StatementRewriter::new(TargetDialect::Phoenix);
/// let update = Statement::update(StatementDescriptor::new("T").set("name", "?").key("id", "?"));
/// assert_eq!(rewriter.rewrite(&update), "upsert into T (name,id) values (?,?)");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatementRewriter {
    dialect: TargetDialect,
}

impl StatementRewriter {
    /// Creates a rewriter for `dialect`.
    #[must_use]
    pub const fn new(dialect: TargetDialect) -> Self {
        Self { dialect }
    }

    /// Creates a rewriter for the gate `dialect` opens.
    #[must_use]
    pub fn for_dialect(dialect: &dyn Dialect) -> Self {
        debug!(dialect = dialect.name(), target = %dialect.target(), "rewriter configured");
        Self::new(dialect.target())
    }

    /// Returns the configured dialect.
    #[must_use]
    pub const fn dialect(&self) -> TargetDialect {
        self.dialect
    }

    /// Chooses how a statement of `kind` is handled.
    #[must_use]
    pub const fn plan(&self, kind: StatementKind) -> RewritePlan {
        if !self.dialect.is_phoenix() {
            return RewritePlan::PassThrough;
        }
        match kind {
            StatementKind::Insert | StatementKind::InsertSelect => RewritePlan::RewriteInsert,
            StatementKind::Update => RewritePlan::RewriteUpdate,
            StatementKind::Delete | StatementKind::Other => RewritePlan::PassThrough,
        }
    }

    /// Returns the SQL to execute for `statement`.
    ///
    /// Never fails: whenever a rewrite cannot be built, the ORM's own text is
    /// returned unchanged.
    #[must_use]
    pub fn rewrite<S: FinalizedStatement + ?Sized>(&self, statement: &S) -> String {
        match self.try_rewrite(statement) {
            Ok(sql) => sql,
            Err(err @ RewriteError::UnsupportedDialect(_)) => {
                debug!(%err, "statement passed through");
                statement.sql().to_owned()
            }
            Err(err) => {
                warn!(%err, kind = ?statement.kind(), "statement rewrite skipped");
                statement.sql().to_owned()
            }
        }
    }

    /// Like [`rewrite`](Self::rewrite), but reports why a statement was not
    /// rewritten.
    ///
    /// Statements whose kind needs no rewriting under Phoenix (deletes,
    /// queries) are returned unchanged as `Ok`.
    ///
    /// # Errors
    ///
    /// - [`RewriteError::UnsupportedDialect`] if the dialect is not Phoenix.
    /// - [`RewriteError::IntrospectionFailure`] if an update carries no
    ///   descriptor, or one of an unknown revision.
    /// - [`RewriteError::EmptyStatement`] if the descriptor names no table or
    ///   binds no columns.
    pub fn try_rewrite<S: FinalizedStatement + ?Sized>(&self, statement: &S) -> Result<String> {
        match self.plan(statement.kind()) {
            RewritePlan::PassThrough if !self.dialect.is_phoenix() => {
                Err(RewriteError::UnsupportedDialect(self.dialect.name()))
            }
            RewritePlan::PassThrough => Ok(statement.sql().to_owned()),
            RewritePlan::RewriteInsert => {
                let sql = upsert_from_insert(statement.sql());
                debug!(%sql, "insert rewritten");
                Ok(sql)
            }
            RewritePlan::RewriteUpdate => {
                let revision = statement.descriptor_revision();
                if revision != DESCRIPTOR_REVISION {
                    return Err(RewriteError::IntrospectionFailure(format!(
                        "descriptor revision {revision} is not supported \
                         (expected {DESCRIPTOR_REVISION})"
                    )));
                }
                let descriptor = statement.descriptor().ok_or_else(|| {
                    RewriteError::IntrospectionFailure(String::from(
                        "update statement carries no descriptor",
                    ))
                })?;
                let sql = upsert_from_update(descriptor)?;
                debug!(table = %descriptor.table, %sql, "update rewritten");
                Ok(sql)
            }
        }
    }
}

/// Replaces the first `insert into` in `sql` with `upsert into`.
///
/// Text without the phrase is returned unchanged.
#[must_use]
pub fn upsert_from_insert(sql: &str) -> String {
    sql.replacen(INSERT_INTO, UPSERT_INTO, 1)
}

/// Builds the UPSERT equivalent of the update described by `descriptor`.
///
/// # Errors
///
/// Returns [`RewriteError::EmptyStatement`] if the descriptor names no table
/// or binds no columns.
pub fn upsert_from_update(descriptor: &StatementDescriptor) -> Result<String> {
    if descriptor.table.trim().is_empty() || descriptor.column_count() == 0 {
        return Err(RewriteError::EmptyStatement {
            table: descriptor.table.clone(),
        });
    }

    let mut sql = comment_prefix(descriptor.comment.as_deref());
    match descriptor.version_column {
        None => push_upsert_values(&mut sql, descriptor),
        Some(_) => push_upsert_select(&mut sql, descriptor),
    }
    Ok(sql)
}

fn push_upsert_values(sql: &mut String, descriptor: &StatementDescriptor) {
    let (names, values): (Vec<&str>, Vec<&str>) = descriptor
        .set_columns
        .iter()
        .chain(descriptor.key_columns.iter())
        .chain(descriptor.where_columns.iter())
        .map(|(column, expr)| (column, emitted_value(expr)))
        .unzip();

    sql.push_str(UPSERT_INTO);
    sql.push(' ');
    sql.push_str(&descriptor.table);
    sql.push_str(" (");
    sql.push_str(&names.join(","));
    sql.push_str(") values (");
    sql.push_str(&values.join(","));
    sql.push(')');
}

fn push_upsert_select(sql: &mut String, descriptor: &StatementDescriptor) {
    let (mut names, mut values): (Vec<&str>, Vec<&str>) = descriptor
        .set_columns
        .iter()
        .chain(descriptor.where_columns.iter())
        .map(|(column, expr)| (column, emitted_value(expr)))
        .unzip();

    // Key values are re-read from the current row rather than bound.
    names.extend(descriptor.key_columns.columns());
    values.extend(descriptor.key_columns.columns());

    sql.push_str(UPSERT_INTO);
    sql.push(' ');
    sql.push_str(&descriptor.table);
    sql.push_str(" (");
    sql.push_str(&names.join(","));
    sql.push_str(") select ");
    sql.push_str(&values.join(","));
    sql.push_str(" from ");
    sql.push_str(&descriptor.table);
    sql.push_str(" where ");
    sql.push_str(&descriptor.predicates().join(" and "));
}
