//! Domain model for persisted post records.
//!
//! # Responsibility
//! - Define the closed set of post kinds and their shared base state.
//! - Provide factory construction from stored type tags.
//!
//! # Invariants
//! - Every persisted row carries exactly one tag from `PostKind`.
//! - Concrete kinds compose `PostState`; there is no field inheritance.

pub mod codec;
pub mod post;
