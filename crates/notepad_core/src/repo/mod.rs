//! Repository layer contracts and the SQLite storage gateway.
//!
//! # Responsibility
//! - Define the post persistence contract used by services and the CLI.
//! - Keep SQL and connection lifecycle details out of the model layer.
//!
//! # Invariants
//! - Every store operation opens and closes its own connection.
//! - Filter and limit values are always bound parameters, never
//!   interpolated text.

pub mod post_repo;
