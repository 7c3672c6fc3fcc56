//! Post use-case service.
//!
//! # Responsibility
//! - Provide create / per-field update / read / delete entry points.
//!
//! # Invariants
//! - A rejected field update leaves the stored post untouched.

use crate::model::post::{NewPost, Post, PostId};
use crate::model::validation::ValidationResult;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::post_repo::{PostListQuery, PostRepository};

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts a new post.
    pub fn create_post(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        summary: Option<String>,
    ) -> RepoResult<Post> {
        let draft = NewPost::new(title, content, category, summary)?;
        self.repo.create_post(&draft)
    }

    pub fn retitle_post(&self, id: PostId, title: impl Into<String>) -> RepoResult<Post> {
        let title = title.into();
        self.modify(id, |post| post.set_title(title))
    }

    pub fn set_content(&self, id: PostId, content: impl Into<String>) -> RepoResult<Post> {
        let content = content.into();
        self.modify(id, |post| post.set_content(content))
    }

    pub fn set_category(&self, id: PostId, category: impl Into<String>) -> RepoResult<Post> {
        let category = category.into();
        self.modify(id, |post| post.set_category(category))
    }

    pub fn set_summary(&self, id: PostId, summary: Option<String>) -> RepoResult<Post> {
        self.modify(id, |post| post.set_summary(summary))
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        self.repo.delete_post(id)
    }

    fn modify(
        &self,
        id: PostId,
        apply: impl FnOnce(&mut Post) -> ValidationResult<()>,
    ) -> RepoResult<Post> {
        let mut post = self
            .repo
            .get_post(id)?
            .ok_or(RepoError::PostNotFound(id))?;
        apply(&mut post)?;
        self.repo.update_post(&post)
    }
}
