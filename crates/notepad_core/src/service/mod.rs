//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate factory, codec and repository calls into use-case APIs.
//! - Keep the CLI decoupled from storage details.

pub mod post_service;
