//! Core domain logic for the notepad record keeper.
//! This crate is the single source of truth for persistence invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::codec::{CodecError, RowData};
pub use model::post::{create, Link, Memo, Post, PostInput, PostKind, PostState, Task};
pub use repo::post_repo::{PostRepository, RepoError, RepoResult, RowSet, SqlitePostStore};
pub use service::post_service::PostService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
