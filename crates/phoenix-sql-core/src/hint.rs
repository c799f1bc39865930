//! Optimizer hint injection.
//!
//! Phoenix reads hints from a block comment that directly follows the
//! `SELECT` keyword: `SELECT /*+ INDEX(t idx) */ ...`. The injector finds the
//! first `select` outside any comment and splices the hint fragments in after
//! it, leaving the rest of the query untouched.

use tracing::debug;

use crate::comments::StrippedView;
use crate::dialect::TargetDialect;
use crate::error::{Result, RewriteError};

const SELECT: &str = "select";
const HINT_OPEN: &str = "/*+";
const HINT_CLOSE: &str = "*/";

/// Inserts `hints` after the first `select` keyword of `query`.
///
/// Returns `query` unchanged when the dialect is not Phoenix, when there is
/// nothing to insert, or when no `select` keyword exists outside comments.
///
/// ```rust
/// use phoenix_sql_core::{inject_hints, TargetDialect};
///
/// let sql = inject_hints(
///     "SELECT d from department d",
///     &["/*+ INDEX(D D_I0) */"],
///     TargetDialect::Phoenix,
/// );
/// assert_eq!(sql, "SELECT /*+ INDEX(D D_I0) */ d from department d");
/// ```
#[must_use]
pub fn inject_hints<S: AsRef<str>>(query: &str, hints: &[S], dialect: TargetDialect) -> String {
    match try_inject_hints(query, hints, dialect) {
        Ok(sql) => sql,
        Err(err) => {
            debug!(%err, "query hints not applied");
            query.to_owned()
        }
    }
}

/// Like [`inject_hints`], but reports why nothing was inserted.
///
/// Hint fragments already present in the run of `/*+ ... */` blocks right
/// after the keyword are skipped, so injecting the same hints twice yields
/// the same text as injecting once. Text after the insertion point is kept
/// byte for byte.
///
/// # Errors
///
/// Returns [`RewriteError::UnsupportedDialect`] when `dialect` is not Phoenix
/// and [`RewriteError::MissingSelectKeyword`] when the query has no `select`
/// keyword outside comments.
pub fn try_inject_hints<S: AsRef<str>>(
    query: &str,
    hints: &[S],
    dialect: TargetDialect,
) -> Result<String> {
    if !dialect.is_phoenix() {
        return Err(RewriteError::UnsupportedDialect(dialect.name()));
    }

    let requested: Vec<&str> = hints
        .iter()
        .map(|hint| hint.as_ref().trim())
        .filter(|hint| !hint.is_empty())
        .collect();
    if requested.is_empty() {
        return Ok(query.to_owned());
    }

    let at = select_keyword_end(query).ok_or(RewriteError::MissingSelectKeyword)?;
    let (head, tail) = query.split_at(at);

    let present = leading_hint_run(tail);
    let pending: Vec<&str> = requested
        .into_iter()
        .filter(|hint| !present.contains(*hint))
        .collect();
    if pending.is_empty() {
        return Ok(query.to_owned());
    }

    let separator = if tail.starts_with(char::is_whitespace) {
        ""
    } else {
        " "
    };
    Ok(format!("{head} {}{separator}{tail}", pending.join(" ")))
}

/// Returns the prefix of `tail` made of whitespace and `/*+ ... */` blocks.
fn leading_hint_run(tail: &str) -> &str {
    let mut rest = tail;
    loop {
        let trimmed = rest.trim_start();
        let Some(body) = trimmed.strip_prefix(HINT_OPEN) else {
            break;
        };
        let Some(close) = body.find(HINT_CLOSE) else {
            break;
        };
        rest = &body[close + HINT_CLOSE.len()..];
    }
    &tail[..tail.len() - rest.len()]
}

/// Returns the byte offset just past the first whole-word, case-insensitive
/// `select` in `query`, ignoring comments.
fn select_keyword_end(query: &str) -> Option<usize> {
    let view = StrippedView::new(query);
    let lowered = view.text().to_ascii_lowercase();
    let bytes = lowered.as_bytes();

    let mut from = 0;
    while let Some(found) = lowered[from..].find(SELECT) {
        let start = from + found;
        let end = start + SELECT.len();
        let before = start.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(end).copied();
        if !before.is_some_and(is_word_byte) && !after.is_some_and(is_word_byte) {
            return view.original_end(end);
        }
        from = end;
    }
    None
}

const fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
