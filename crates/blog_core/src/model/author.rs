//! Author domain model.
//!
//! # Responsibility
//! - Define the persisted author record and its unpersisted draft.
//! - Route every field assignment through the matching validator.
//!
//! # Invariants
//! - `name` is never empty; uniqueness is checked against the store by
//!   `AuthorRepository::validate_name` on every write.
//! - `phone_number`, when set, is exactly ten decimal digits.
//! - `id` and `created_at` never change after insert.

use crate::model::validation::{
    validate_name_present, validate_phone_number, ValidationError, ValidationResult,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned author identifier.
pub type AuthorId = i64;

/// Validated author fields that have not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    name: String,
    phone_number: Option<String>,
}

impl NewAuthor {
    /// Builds a draft, running the name-presence and phone checks.
    ///
    /// Name uniqueness is decided by the repository at insert time.
    pub fn new(
        name: impl Into<String>,
        phone_number: Option<String>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        validate_name_present(Some(&name))?;
        validate_phone_number(phone_number.as_deref())?;
        Ok(Self { name, phone_number })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }
}

/// Persisted author record.
///
/// Fields are private so that every mutation goes through a validating
/// setter. Timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuthorFields")]
pub struct Author {
    id: AuthorId,
    name: String,
    phone_number: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl Author {
    pub(crate) fn from_parts(fields: AuthorFields) -> ValidationResult<Self> {
        let author = Self {
            id: fields.id,
            name: fields.name,
            phone_number: fields.phone_number,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
        };
        author.validate()?;
        Ok(author)
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Assigns a new name after the presence check.
    ///
    /// The record is left unchanged on error. Uniqueness is enforced when
    /// the record is written back through `AuthorRepository::update_author`.
    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        let name = name.into();
        validate_name_present(Some(&name))?;
        self.name = name;
        Ok(())
    }

    /// Assigns or clears the phone number.
    pub fn set_phone_number(&mut self, phone_number: Option<String>) -> ValidationResult<()> {
        validate_phone_number(phone_number.as_deref())?;
        self.phone_number = phone_number;
        Ok(())
    }

    /// Re-runs every store-independent field check.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name_present(Some(&self.name))?;
        validate_phone_number(self.phone_number.as_deref())?;
        Ok(())
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author(id={}, name={})", self.id, self.name)
    }
}

/// Raw author columns, validated on conversion into `Author`.
#[derive(Deserialize)]
pub(crate) struct AuthorFields {
    pub(crate) id: AuthorId,
    pub(crate) name: String,
    pub(crate) phone_number: Option<String>,
    pub(crate) created_at: i64,
    pub(crate) updated_at: i64,
}

impl TryFrom<AuthorFields> for Author {
    type Error = ValidationError;

    fn try_from(value: AuthorFields) -> ValidationResult<Self> {
        Self::from_parts(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Author {
        Author::from_parts(AuthorFields {
            id: 7,
            name: "Ada".to_string(),
            phone_number: None,
            created_at: 1_000,
            updated_at: 1_000,
        })
        .unwrap()
    }

    #[test]
    fn draft_rejects_empty_name_and_bad_phone() {
        assert_eq!(
            NewAuthor::new("", None).unwrap_err(),
            ValidationError::NameMissing
        );
        assert_eq!(
            NewAuthor::new("Ada", Some("12345".to_string())).unwrap_err(),
            ValidationError::InvalidPhoneNumber
        );
        let draft = NewAuthor::new("Ada", Some("1234567890".to_string())).unwrap();
        assert_eq!(draft.phone_number(), Some("1234567890"));
    }

    #[test]
    fn failed_setter_leaves_record_unchanged() {
        let mut author = sample();
        author
            .set_phone_number(Some("0123456789".to_string()))
            .unwrap();

        let err = author
            .set_phone_number(Some("12345abcde".to_string()))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidPhoneNumber);
        assert_eq!(author.phone_number(), Some("0123456789"));

        assert!(author.set_name("").is_err());
        assert_eq!(author.name(), "Ada");
    }

    #[test]
    fn phone_number_can_be_cleared() {
        let mut author = sample();
        author
            .set_phone_number(Some("0123456789".to_string()))
            .unwrap();
        author.set_phone_number(None).unwrap();
        assert_eq!(author.phone_number(), None);
    }

    #[test]
    fn display_shows_id_and_name() {
        assert_eq!(sample().to_string(), "Author(id=7, name=Ada)");
    }
}
