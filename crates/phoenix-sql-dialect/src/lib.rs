//! # phoenix-sql-dialect
//!
//! Apache Phoenix dialect descriptor for `phoenix-sql-core`.
//!
//! # How Phoenix differs from other dialects
//!
//! - **[UPSERT]**: Phoenix has no `INSERT` or `UPDATE`. Every write is an
//!   `UPSERT VALUES` or `UPSERT SELECT`; the rewriter in
//!   `phoenix-sql-core` produces both.
//! - **No unique constraints**: unique keys become secondary indexes. See
//!   [`PhoenixDialect::add_unique_key`].
//! - **[Hints]**: the optimizer reads `/*+ ... */` hints placed right after
//!   `SELECT`. [`SecondaryIndexHint`] renders the `INDEX` hint.
//! - **No `ALTER TABLE ... ADD CONSTRAINT`** and no check constraints.
//! - **[Data types]**: booleans are `boolean`, decimals default to
//!   `decimal(19,2)`, arrays carry a length.
//!
//! [UPSERT]: https://phoenix.apache.org/language/index.html#upsert_values
//! [Hints]: https://phoenix.apache.org/language/index.html#hint
//! [Data types]: https://phoenix.apache.org/language/datatypes.html
//!
//! ## Example
//!
//! ```rust
//! use phoenix_sql_dialect::{PhoenixDialect, SecondaryIndexHint};
//!
//! let dialect = PhoenixDialect::new();
//! let sql = dialect.apply_index_hints(
//!     "select d from department d where d.name = ?",
//!     &[SecondaryIndexHint::new("DEPARTMENT", "DEPT_NAME_IDX")],
//! );
//! assert_eq!(
//!     sql,
//!     "select /*+ INDEX(DEPARTMENT DEPT_NAME_IDX) */ d from department d where d.name = ?"
//! );
//! ```

pub mod ddl;
mod dialect;
pub mod functions;
pub mod hint;
pub mod pagination;
pub mod types;

pub use ddl::{SortOrder, UniqueKey};
pub use dialect::{NameQualifierSupport, PhoenixDialect};
pub use functions::{FunctionError, FunctionRegistry, ReturnType, SqlFunction};
pub use hint::SecondaryIndexHint;
pub use pagination::{LimitHandler, RowSelection};
pub use types::{column_type, SqlType};
