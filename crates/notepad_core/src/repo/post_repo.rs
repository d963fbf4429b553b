//! Post persistence contract and SQLite storage gateway.
//!
//! # Responsibility
//! - Provide save / point-lookup / listing over the `posts` table.
//! - Map store-level failures into a uniform, reportable error shape.
//!
//! # Invariants
//! - Each operation is scoped to one connection open/close cycle; no
//!   connection is held across calls or shared between operations.
//! - An absent lookup id short-circuits to "not found" without touching
//!   the store.
//! - Store faults carry the db file path so the operator knows which store
//!   misbehaved; the caller decides whether the process terminates.

use crate::model::codec::{self, CodecError, RowData};
use crate::model::post::{Post, PostKind};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure raised by post persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Any failure from the embedded store during prepare or execute.
    /// Non-recoverable at this layer; the CLI boundary reports it and
    /// exits.
    Store {
        db_file: PathBuf,
        source: rusqlite::Error,
    },
    /// A stored or requested type tag outside the closed kind set.
    UnknownType(String),
    /// Persisted state the codec cannot decode.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store { db_file, source } => write!(
                f,
                "failed to run query against database `{}`: {source}",
                db_file.display()
            ),
            Self::UnknownType(tag) => write!(f, "unknown post type tag `{tag}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted post data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store { source, .. } => Some(source),
            Self::UnknownType(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<CodecError> for RepoError {
    fn from(value: CodecError) -> Self {
        match value {
            CodecError::UnknownType(tag) => Self::UnknownType(tag),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Raw listing result for a display layer to format.
///
/// Rows keep store order (newest first) with `rowid` as the first column.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Persistence contract for post records.
pub trait PostRepository {
    /// Inserts the record and returns the store-assigned row identity.
    /// Every save is an insert; identities are never reused.
    fn save(&self, post: &dyn Post) -> RepoResult<i64>;

    /// Point lookup by identity. `None` id means the caller had nothing to
    /// look up; that is an explicit "not found", not a fault, and performs
    /// no store access.
    fn find_by_id(&self, id: Option<i64>) -> RepoResult<Option<Box<dyn Post>>>;

    /// Ordered listing, newest first, optionally filtered to one kind and
    /// optionally bounded in count. Both options are independent.
    fn find_all(&self, limit: Option<u32>, kind: Option<PostKind>) -> RepoResult<RowSet>;
}

/// SQLite-backed storage gateway working against a store file path.
pub struct SqlitePostStore {
    db_path: PathBuf,
}

impl SqlitePostStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_file(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> RepoResult<Connection> {
        Connection::open(&self.db_path).map_err(|err| self.store_fault(err))
    }

    fn store_fault(&self, source: rusqlite::Error) -> RepoError {
        RepoError::Store {
            db_file: self.db_path.clone(),
            source,
        }
    }
}

impl PostRepository for SqlitePostStore {
    fn save(&self, post: &dyn Post) -> RepoResult<i64> {
        let row = codec::to_row(post);
        let columns: Vec<&str> = row.iter().map(|(name, _)| *name).collect();
        let placeholders: Vec<String> = (1..=row.len()).map(|n| format!("?{n}")).collect();
        // Column names come from the codec's static mapping, never from
        // user input; all values go through bound parameters.
        let sql = format!(
            "INSERT INTO posts ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        );

        let conn = self.open()?;
        conn.execute(&sql, params_from_iter(row.into_iter().map(|(_, value)| value)))
            .map_err(|err| self.store_fault(err))?;
        Ok(conn.last_insert_rowid())
    }

    fn find_by_id(&self, id: Option<i64>) -> RepoResult<Option<Box<dyn Post>>> {
        let Some(id) = id else {
            return Ok(None);
        };

        let conn = self.open()?;
        let mut stmt = conn
            .prepare("SELECT rowid, * FROM posts WHERE rowid = ?1")
            .map_err(|err| self.store_fault(err))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut rows = stmt.query([id]).map_err(|err| self.store_fault(err))?;
        let Some(row) = rows.next().map_err(|err| self.store_fault(err))? else {
            return Ok(None);
        };

        let mut data = RowData::new();
        for (index, column) in columns.iter().enumerate() {
            let value: Value = row
                .get_ref(index)
                .map_err(|err| self.store_fault(err))?
                .into();
            data.insert(column.clone(), value);
        }

        let tag = data.text(codec::COL_TYPE)?;
        let kind = PostKind::from_tag(tag)
            .ok_or_else(|| RepoError::UnknownType(tag.to_string()))?;
        let mut post = kind.create();
        codec::load_row(post.as_mut(), &data)?;
        Ok(Some(post))
    }

    fn find_all(&self, limit: Option<u32>, kind: Option<PostKind>) -> RepoResult<RowSet> {
        let mut sql = String::from("SELECT rowid, * FROM posts");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(kind) = kind {
            sql.push_str(" WHERE type = ?");
            bind_values.push(Value::Text(kind.tag().to_string()));
        }

        sql.push_str(" ORDER BY rowid DESC");

        if let Some(limit) = limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
        }

        let conn = self.open()?;
        let mut stmt = conn.prepare(&sql).map_err(|err| self.store_fault(err))?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut rows = stmt
            .query(params_from_iter(bind_values))
            .map_err(|err| self.store_fault(err))?;
        let mut collected = Vec::new();
        while let Some(row) = rows.next().map_err(|err| self.store_fault(err))? {
            let mut values = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                let value: Value = row
                    .get_ref(index)
                    .map_err(|err| self.store_fault(err))?
                    .into();
                values.push(value);
            }
            collected.push(values);
        }

        Ok(RowSet {
            columns,
            rows: collected,
        })
    }
}
