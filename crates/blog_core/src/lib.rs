//! Core records for the blog application.
//! This crate is the single source of truth for Author and Post invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CoreConfig, DbLocation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId, NewAuthor};
pub use model::post::{NewPost, Post, PostId};
pub use model::validation::{
    validate_category, validate_content, validate_name_present, validate_phone_number,
    validate_summary, validate_title, ValidationError, ValidationResult, ALLOWED_CATEGORIES,
    CLICKBAIT_PHRASES,
};
pub use repo::author_repo::{AuthorListQuery, AuthorRepository, SqliteAuthorRepository};
pub use repo::error::{RepoError, RepoResult};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use service::author_service::AuthorService;
pub use service::post_service::PostService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
