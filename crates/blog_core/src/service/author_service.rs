//! Author use-case service.
//!
//! # Responsibility
//! - Provide create / per-field update / read / delete entry points.
//! - Re-run only the validator of the field being changed, then persist.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::author::{Author, AuthorId, NewAuthor};
use crate::model::validation::ValidationResult;
use crate::repo::author_repo::{AuthorListQuery, AuthorRepository};
use crate::repo::error::{RepoError, RepoResult};

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts a new author.
    pub fn create_author(
        &self,
        name: impl Into<String>,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        let draft = NewAuthor::new(name, phone_number)?;
        self.repo.create_author(&draft)
    }

    /// Assigns a new name. Keeping the current name is always accepted.
    pub fn rename_author(&self, id: AuthorId, name: impl Into<String>) -> RepoResult<Author> {
        let name = name.into();
        self.modify(id, |author| author.set_name(name))
    }

    /// Assigns or clears the phone number.
    pub fn set_phone_number(
        &self,
        id: AuthorId,
        phone_number: Option<String>,
    ) -> RepoResult<Author> {
        self.modify(id, |author| author.set_phone_number(phone_number))
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.find_author_by_name(name)
    }

    pub fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        self.repo.delete_author(id)
    }

    fn modify(
        &self,
        id: AuthorId,
        apply: impl FnOnce(&mut Author) -> ValidationResult<()>,
    ) -> RepoResult<Author> {
        let mut author = self
            .repo
            .get_author(id)?
            .ok_or(RepoError::AuthorNotFound(id))?;
        apply(&mut author)?;
        self.repo.update_author(&author)
    }
}
