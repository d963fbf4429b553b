//! Post kinds, shared base state and the record contract.
//!
//! # Responsibility
//! - Define the canonical record shape shared by memo/task/link kinds.
//! - Dispatch stored type tags to concrete constructors.
//!
//! # Invariants
//! - `created_at` is stamped once at construction and only ever replaced by
//!   the stored value during a load.
//! - `row_id` is assigned by the store on first save, never by this module.
//! - An unrecognized type tag is a reported `CodecError::UnknownType`, not a
//!   panic.

use crate::model::codec::{self, CodecError, RowData};
use chrono::{Local, NaiveDateTime, Timelike};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;

/// Closed set of record kinds the store understands.
///
/// The serialized form of each variant is exactly the tag written to the
/// `type` column, so the enum itself is the type registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostKind {
    Memo,
    Task,
    Link,
}

impl PostKind {
    pub const ALL: [PostKind; 3] = [PostKind::Memo, PostKind::Task, PostKind::Link];

    /// Returns the tag stored in the `type` column for this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Memo => "Memo",
            Self::Task => "Task",
            Self::Link => "Link",
        }
    }

    /// Parses a stored type tag back into a kind.
    pub fn from_tag(tag: &str) -> Option<PostKind> {
        match tag {
            "Memo" => Some(Self::Memo),
            "Task" => Some(Self::Task),
            "Link" => Some(Self::Link),
            _ => None,
        }
    }

    /// Constructs a fresh, empty record of this kind.
    pub fn create(self) -> Box<dyn Post> {
        match self {
            Self::Memo => Box::new(Memo::new()),
            Self::Task => Box::new(Task::new()),
            Self::Link => Box::new(Link::new()),
        }
    }
}

/// Factory entry point for reconstruction from stored data.
///
/// # Errors
/// - `CodecError::UnknownType` when the tag is outside the closed kind set.
///   This can originate from externally modified rows and must stay a
///   recoverable condition; no store access happens on failure.
pub fn create(tag: &str) -> Result<Box<dyn Post>, CodecError> {
    PostKind::from_tag(tag)
        .map(PostKind::create)
        .ok_or_else(|| CodecError::UnknownType(tag.to_string()))
}

/// Base state shared by every concrete kind.
///
/// Kinds hold this struct by composition and add their own fields next to
/// it; the codec composes the base column mapping with kind extras the same
/// way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostState {
    /// Store-assigned row identity; `None` until the first save.
    pub row_id: Option<i64>,
    /// Creation wall-clock time, persisted at second precision.
    pub created_at: NaiveDateTime,
    /// Free-form body, one entry per line.
    pub text: Vec<String>,
}

impl PostState {
    pub fn new() -> Self {
        let now = Local::now().naive_local();
        Self {
            row_id: None,
            // Sub-second precision does not survive the stored string form,
            // so drop it up front to keep round-trips exact.
            created_at: now.with_nanosecond(0).unwrap_or(now),
            text: Vec::new(),
        }
    }
}

impl Default for PostState {
    fn default() -> Self {
        Self::new()
    }
}

/// Console-input seam used by `Post::populate`.
///
/// The CLI backs this with interactive prompts; tests back it with canned
/// answers. Core never talks to a terminal directly.
pub trait PostInput {
    /// Asks for a single line under the given label.
    fn line(&mut self, label: &str) -> io::Result<String>;
    /// Asks for the multi-line body, terminated by the collaborator.
    fn body(&mut self) -> io::Result<Vec<String>>;
}

/// Contract every concrete record kind implements.
///
/// The base lifecycle (`save`, `find_by_id`, `find_all`) lives in the repo
/// layer and works against this trait; kinds only describe their own columns
/// and rendering.
pub trait Post: fmt::Debug {
    fn kind(&self) -> PostKind;
    fn state(&self) -> &PostState;
    fn state_mut(&mut self) -> &mut PostState;

    /// Kind-specific columns appended to the base row mapping.
    fn extra_columns(&self) -> Vec<(&'static str, Value)> {
        Vec::new()
    }

    /// Restores kind-specific fields from a stored row.
    fn load_extras(&mut self, _row: &RowData) -> Result<(), CodecError> {
        Ok(())
    }

    /// Fills user-editable fields from the console collaborator.
    fn populate(&mut self, input: &mut dyn PostInput) -> io::Result<()>;

    /// Renders this record for console display, one line per entry.
    fn render(&self) -> Vec<String>;
}

fn heading(kind: PostKind, state: &PostState) -> String {
    format!(
        "{} from {}",
        kind.tag(),
        state.created_at.format(codec::TIMESTAMP_FORMAT)
    )
}

/// Plain note; nothing beyond the base state.
#[derive(Debug, Default)]
pub struct Memo {
    state: PostState,
}

impl Memo {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Post for Memo {
    fn kind(&self) -> PostKind {
        PostKind::Memo
    }

    fn state(&self) -> &PostState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PostState {
        &mut self.state
    }

    fn populate(&mut self, input: &mut dyn PostInput) -> io::Result<()> {
        self.state.text = input.body()?;
        Ok(())
    }

    fn render(&self) -> Vec<String> {
        let mut lines = vec![heading(PostKind::Memo, &self.state)];
        lines.extend(self.state.text.iter().cloned());
        lines
    }
}

/// Actionable item with a free-form due date.
#[derive(Debug, Default)]
pub struct Task {
    state: PostState,
    pub due_date: String,
}

impl Task {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Post for Task {
    fn kind(&self) -> PostKind {
        PostKind::Task
    }

    fn state(&self) -> &PostState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PostState {
        &mut self.state
    }

    fn extra_columns(&self) -> Vec<(&'static str, Value)> {
        vec![(codec::COL_DUE_DATE, Value::Text(self.due_date.clone()))]
    }

    fn load_extras(&mut self, row: &RowData) -> Result<(), CodecError> {
        self.due_date = row.opt_text(codec::COL_DUE_DATE)?.unwrap_or_default().to_string();
        Ok(())
    }

    fn populate(&mut self, input: &mut dyn PostInput) -> io::Result<()> {
        self.due_date = input.line("Due date")?;
        self.state.text = input.body()?;
        Ok(())
    }

    fn render(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} (due {})",
            heading(PostKind::Task, &self.state),
            self.due_date
        )];
        lines.extend(self.state.text.iter().cloned());
        lines
    }
}

/// Bookmark; a URL plus a description body.
#[derive(Debug, Default)]
pub struct Link {
    state: PostState,
    pub url: String,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Post for Link {
    fn kind(&self) -> PostKind {
        PostKind::Link
    }

    fn state(&self) -> &PostState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut PostState {
        &mut self.state
    }

    fn extra_columns(&self) -> Vec<(&'static str, Value)> {
        vec![(codec::COL_URL, Value::Text(self.url.clone()))]
    }

    fn load_extras(&mut self, row: &RowData) -> Result<(), CodecError> {
        self.url = row.opt_text(codec::COL_URL)?.unwrap_or_default().to_string();
        Ok(())
    }

    fn populate(&mut self, input: &mut dyn PostInput) -> io::Result<()> {
        self.url = input.line("URL")?;
        self.state.text = input.body()?;
        Ok(())
    }

    fn render(&self) -> Vec<String> {
        let mut lines = vec![heading(PostKind::Link, &self.state), self.url.clone()];
        lines.extend(self.state.text.iter().cloned());
        lines
    }
}
