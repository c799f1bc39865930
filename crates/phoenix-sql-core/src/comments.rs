//! SQL comment stripping.
//!
//! Removes `/* ... */` block comments (which may span lines) and `-- ...`
//! line comments. Optimizer hints (`/*+ ... */`) are block comments too and
//! are removed like any other.
//!
//! Comment delimiters inside string literals are not recognised as such:
//! `'a -- b'` loses its tail. ORM-generated statements bind literals as
//! parameters, so this does not arise for the statements this crate handles.
//!
//! Every removed comment leaves a single space behind so the tokens around
//! it stay apart, which also makes stripping idempotent.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Block comments match lazily so adjacent comments are removed one by one.
static COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)/\*.*?\*/|--[^\r\n]*").expect("Invalid comment pattern regex")
});

/// Removes block and line comments from `sql`.
///
/// ```rust
/// use phoenix_sql_core::strip_comments;
///
/// let sql = strip_comments("select /*+ INDEX(t i) */ * from t -- all rows");
/// assert_eq!(sql.split_whitespace().collect::<Vec<_>>(), ["select", "*", "from", "t"]);
/// ```
#[must_use]
pub fn strip_comments(sql: &str) -> String {
    COMMENT.replace_all(sql, " ").into_owned()
}

/// Returns the byte ranges of every comment in `sql`, in order.
#[must_use]
pub fn comment_spans(sql: &str) -> Vec<Range<usize>> {
    COMMENT.find_iter(sql).map(|m| m.range()).collect()
}

/// The comment-stripped text of a statement, with a map back to the
/// original byte offsets.
#[derive(Debug)]
pub(crate) struct StrippedView {
    text: String,
    /// `origin[i]` is the byte offset in the original text of `text[i]`.
    origin: Vec<usize>,
}

impl StrippedView {
    pub(crate) fn new(sql: &str) -> Self {
        let mut text = String::with_capacity(sql.len());
        let mut origin = Vec::with_capacity(sql.len());
        let mut cursor = 0;

        for span in comment_spans(sql) {
            text.push_str(&sql[cursor..span.start]);
            origin.extend(cursor..span.start);
            text.push(' ');
            origin.push(span.start);
            cursor = span.end;
        }
        text.push_str(&sql[cursor..]);
        origin.extend(cursor..sql.len());

        Self { text, origin }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Maps the exclusive end of a match in the stripped text to the
    /// exclusive end of the same bytes in the original text.
    pub(crate) fn original_end(&self, stripped_end: usize) -> Option<usize> {
        let last = stripped_end.checked_sub(1)?;
        self.origin.get(last).map(|offset| offset + 1)
    }
}
