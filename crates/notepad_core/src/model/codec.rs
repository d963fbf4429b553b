//! Row codec between in-memory post state and stored columns.
//!
//! # Responsibility
//! - Serialize a record into the flat column mapping used for insertion.
//! - Restore record state from a stored row, kind extras included.
//!
//! # Invariants
//! - The base mapping always carries `type`, `created_at` and `text`; kind
//!   extras are appended after it, never interleaved.
//! - `load_row` replaces `created_at` with the stored value instead of
//!   re-stamping it.

use crate::model::post::Post;
use rusqlite::types::Value;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stored form of `created_at`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const COL_ROWID: &str = "rowid";
pub const COL_TYPE: &str = "type";
pub const COL_CREATED_AT: &str = "created_at";
pub const COL_TEXT: &str = "text";
pub const COL_DUE_DATE: &str = "due_date";
pub const COL_URL: &str = "url";

/// Codec-level failure, distinct from storage transport errors.
#[derive(Debug)]
pub enum CodecError {
    /// A type tag outside the closed kind set; indicates a data-modeling
    /// mismatch rather than a storage problem.
    UnknownType(String),
    /// A column the codec requires is absent from the row.
    MissingColumn(&'static str),
    /// A stored value that cannot be decoded into record state.
    InvalidValue { column: &'static str, message: String },
}

impl CodecError {
    pub(crate) fn invalid(column: &'static str, message: impl Display) -> Self {
        Self::InvalidValue {
            column,
            message: message.to_string(),
        }
    }
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownType(tag) => write!(f, "unknown post type tag `{tag}`"),
            Self::MissingColumn(column) => write!(f, "column `{column}` missing from stored row"),
            Self::InvalidValue { column, message } => {
                write!(f, "invalid value in column `{column}`: {message}")
            }
        }
    }
}

impl Error for CodecError {}

/// One stored row as a column-name keyed mapping.
///
/// The repo layer builds this from a SQLite row; round-trip tests build it
/// straight from `to_row` output.
#[derive(Debug, Clone, Default)]
pub struct RowData {
    values: HashMap<String, Value>,
}

impl RowData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        self.values.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Required text column; null or absent is an error.
    pub fn text(&self, column: &'static str) -> Result<&str, CodecError> {
        match self.values.get(column) {
            Some(Value::Text(text)) => Ok(text),
            Some(other) => Err(CodecError::invalid(
                column,
                format!("expected text, found {other:?}"),
            )),
            None => Err(CodecError::MissingColumn(column)),
        }
    }

    /// Optional text column; null and absent both read as `None`.
    pub fn opt_text(&self, column: &'static str) -> Result<Option<&str>, CodecError> {
        match self.values.get(column) {
            Some(Value::Text(text)) => Ok(Some(text)),
            Some(Value::Null) | None => Ok(None),
            Some(other) => Err(CodecError::invalid(
                column,
                format!("expected text, found {other:?}"),
            )),
        }
    }

    /// Optional integer column; null and absent both read as `None`.
    pub fn opt_integer(&self, column: &'static str) -> Result<Option<i64>, CodecError> {
        match self.values.get(column) {
            Some(Value::Integer(value)) => Ok(Some(*value)),
            Some(Value::Null) | None => Ok(None),
            Some(other) => Err(CodecError::invalid(
                column,
                format!("expected integer, found {other:?}"),
            )),
        }
    }
}

impl From<Vec<(&'static str, Value)>> for RowData {
    fn from(pairs: Vec<(&'static str, Value)>) -> Self {
        let mut row = Self::new();
        for (column, value) in pairs {
            row.insert(column, value);
        }
        row
    }
}

/// Serializes a record into the column mapping for insertion.
///
/// The base columns come first, then the kind extras; `rowid` is never
/// emitted because identity assignment belongs to the store.
pub fn to_row(post: &dyn Post) -> Vec<(&'static str, Value)> {
    let state = post.state();
    let mut row = vec![
        (COL_TYPE, Value::Text(post.kind().tag().to_string())),
        (
            COL_CREATED_AT,
            Value::Text(state.created_at.format(TIMESTAMP_FORMAT).to_string()),
        ),
        (COL_TEXT, Value::Text(state.text.join("\n"))),
    ];
    row.extend(post.extra_columns());
    row
}

/// Restores record state from a stored row; inverse of `to_row`.
///
/// # Errors
/// - `InvalidValue` when `created_at` does not parse under the stored format.
/// - Whatever the kind's `load_extras` reports for its own columns.
pub fn load_row(post: &mut dyn Post, row: &RowData) -> Result<(), CodecError> {
    let created_at = row.text(COL_CREATED_AT)?;
    let created_at = chrono::NaiveDateTime::parse_from_str(created_at, TIMESTAMP_FORMAT)
        .map_err(|err| CodecError::invalid(COL_CREATED_AT, err))?;
    let text = match row.opt_text(COL_TEXT)? {
        Some(body) if !body.is_empty() => body.lines().map(str::to_string).collect(),
        _ => Vec::new(),
    };
    let row_id = row.opt_integer(COL_ROWID)?;

    let state = post.state_mut();
    state.created_at = created_at;
    state.text = text;
    if row_id.is_some() {
        state.row_id = row_id;
    }

    post.load_extras(row)
}

#[cfg(test)]
mod tests {
    use super::{load_row, to_row, RowData, COL_CREATED_AT, COL_DUE_DATE, COL_TYPE, COL_URL};
    use crate::model::post::{Link, Memo, Post, PostKind, Task};
    use rusqlite::types::Value;

    fn roundtrip(original: &dyn Post, reloaded: &mut dyn Post) {
        let row = RowData::from(to_row(original));
        load_row(reloaded, &row).expect("round-trip load should succeed");
        assert_eq!(reloaded.state().created_at, original.state().created_at);
        assert_eq!(reloaded.state().text, original.state().text);
    }

    #[test]
    fn memo_roundtrip_preserves_base_state() {
        let mut memo = Memo::new();
        memo.state_mut().text = vec!["first line".into(), "second line".into()];
        let mut reloaded = Memo::new();
        roundtrip(&memo, &mut reloaded);
    }

    #[test]
    fn task_roundtrip_preserves_due_date() {
        let mut task = Task::new();
        task.due_date = "next friday".into();
        task.state_mut().text = vec!["buy milk".into()];
        let mut reloaded = Task::new();
        roundtrip(&task, &mut reloaded);
        assert_eq!(reloaded.due_date, "next friday");
    }

    #[test]
    fn link_roundtrip_preserves_url() {
        let mut link = Link::new();
        link.url = "https://example.org".into();
        link.state_mut().text = vec!["reference".into()];
        let mut reloaded = Link::new();
        roundtrip(&link, &mut reloaded);
        assert_eq!(reloaded.url, "https://example.org");
    }

    #[test]
    fn to_row_always_carries_the_base_columns() {
        for kind in PostKind::ALL {
            let post = kind.create();
            let row = to_row(post.as_ref());
            assert_eq!(row[0].0, COL_TYPE);
            assert_eq!(row[0].1, Value::Text(kind.tag().to_string()));
            assert_eq!(row[1].0, COL_CREATED_AT);
        }
    }

    #[test]
    fn kind_extras_extend_the_base_mapping() {
        let task = Task::new();
        let columns: Vec<_> = to_row(&task).into_iter().map(|(name, _)| name).collect();
        assert!(columns.contains(&COL_DUE_DATE));

        let link = Link::new();
        let columns: Vec<_> = to_row(&link).into_iter().map(|(name, _)| name).collect();
        assert!(columns.contains(&COL_URL));
    }

    #[test]
    fn load_row_rejects_a_malformed_timestamp() {
        let mut row = RowData::new();
        row.insert(COL_CREATED_AT, Value::Text("not a timestamp".into()));
        let mut memo = Memo::new();
        let err = load_row(&mut memo, &row).expect_err("malformed timestamp must fail");
        assert!(err.to_string().contains(COL_CREATED_AT));
    }
}
