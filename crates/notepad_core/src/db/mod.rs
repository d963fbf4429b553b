//! SQLite storage bootstrap.
//!
//! # Responsibility
//! - Open SQLite connections for the notepad store.
//! - Guarantee the `posts` schema exists before the store is used.
//!
//! # Invariants
//! - `open_db` never returns a connection without the schema applied.
//! - Raw per-operation connections opened by the repo layer deliberately
//!   skip schema bootstrap; a missing table there is a reported fault.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{ensure_schema, open_db};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
