//! # phoenix-sql-core
//!
//! Adapts SQL generated by an ORM to [Apache Phoenix], the SQL layer over
//! HBase.
//!
//! Phoenix has no `UPDATE` and spells every row write `UPSERT`. ORMs keep
//! emitting `INSERT` and `UPDATE`, and bind their parameters positionally
//! without knowing the text was changed. This crate rewrites each finalized
//! statement so the placeholders still line up:
//!
//! - `insert into ...` becomes `upsert into ...`.
//! - `update t set a=? where id=?` becomes `upsert into t (a,id) values (?,?)`.
//! - A versioned update becomes an `upsert ... select ... where ver=?`, which
//!   only writes while the row still has the expected version.
//!
//! It also strips SQL comments and places optimizer hints after `SELECT`.
//!
//! [Apache Phoenix]: https://phoenix.apache.org/
//!
//! ## Example
//!
//! ```rust
//! use phoenix_sql_core::{Statement, StatementDescriptor, StatementRewriter, TargetDialect};
//!
//! let rewriter = StatementRewriter::new(TargetDialect::Phoenix);
//!
//! let insert = Statement::insert("insert into employee (emp_no, name) values (?, ?)");
//! assert_eq!(
//!     rewriter.rewrite(&insert),
//!     "upsert into employee (emp_no, name) values (?, ?)"
//! );
//!
//! let update = Statement::update(
//!     StatementDescriptor::new("employee")
//!         .set("name", "?")
//!         .key("emp_no", "?")
//!         .version("ver"),
//! );
//! assert_eq!(
//!     rewriter.rewrite(&update),
//!     "upsert into employee (name,emp_no) select ?,emp_no from employee where emp_no=? and ver=?"
//! );
//! ```

pub mod comments;
pub mod config;
pub mod dialect;
pub mod error;
pub mod hint;
pub mod rewrite;
pub mod statement;

pub use comments::strip_comments;
pub use config::{IndexHintConfig, RewriteConfig};
pub use dialect::{Dialect, TargetDialect};
pub use error::{ConfigError, RewriteError};
pub use hint::{inject_hints, try_inject_hints};
pub use rewrite::{upsert_from_insert, upsert_from_update, RewritePlan, StatementRewriter};
pub use statement::{
    ColumnBindings, FinalizedStatement, Statement, StatementDescriptor, StatementKind,
    DESCRIPTOR_REVISION,
};
