//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define store interfaces the validation layer and services depend on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate every field before persistence.
//! - Repository APIs return semantic errors (`AuthorNotFound`,
//!   `PostNotFound`, `Validation`) in addition to DB transport errors.

pub mod author_repo;
pub mod error;
pub mod post_repo;
mod sql;
