//! Post use-case service.
//!
//! # Responsibility
//! - Provide stable create / lookup / list entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - The service never bypasses the repository contract.
//! - The service stays storage-agnostic; it compiles against any
//!   `PostRepository`.

use crate::model::codec::CodecError;
use crate::model::post::{self, Post, PostKind};
use crate::repo::post_repo::{PostRepository, RepoResult, RowSet};

/// Use-case wrapper over a post repository.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Constructs a fresh, empty record of the given kind.
    pub fn create_post(&self, kind: PostKind) -> Box<dyn Post> {
        kind.create()
    }

    /// Constructs a record from a raw type tag.
    ///
    /// # Errors
    /// - `CodecError::UnknownType` for tags outside the closed kind set;
    ///   the store is never touched on this path.
    pub fn create_post_from_tag(&self, tag: &str) -> Result<Box<dyn Post>, CodecError> {
        post::create(tag)
    }

    /// Persists the record and returns the store-assigned row identity.
    pub fn save(&self, post: &dyn Post) -> RepoResult<i64> {
        self.repo.save(post)
    }

    /// Looks up one record; `None` id is an explicit "not found".
    pub fn find_by_id(&self, id: Option<i64>) -> RepoResult<Option<Box<dyn Post>>> {
        self.repo.find_by_id(id)
    }

    /// Lists stored rows newest first with optional kind filter and limit.
    pub fn find_all(&self, limit: Option<u32>, kind: Option<PostKind>) -> RepoResult<RowSet> {
        self.repo.find_all(limit, kind)
    }
}
