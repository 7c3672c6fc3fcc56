//! Post domain model.
//!
//! # Responsibility
//! - Define the persisted post record and its unpersisted draft.
//! - Route every field assignment through the matching validator.
//!
//! # Invariants
//! - `title` contains at least one clickbait phrase.
//! - `content` is at least 250 characters.
//! - `category` is `Fiction` or `Non-Fiction`.
//! - `summary`, when set, is at most 250 characters.

use crate::model::validation::{
    validate_category, validate_content, validate_summary, validate_title, ValidationError,
    ValidationResult,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned post identifier.
pub type PostId = i64;

/// Validated post fields that have not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    category: String,
    summary: Option<String>,
}

impl NewPost {
    /// Builds a draft, checking fields in declaration order.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
        summary: Option<String>,
    ) -> ValidationResult<Self> {
        let draft = Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
            summary,
        };
        check_post_fields(
            &draft.title,
            &draft.content,
            &draft.category,
            draft.summary.as_deref(),
        )?;
        Ok(draft)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}

/// Persisted post record. Timestamps are Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostFields")]
pub struct Post {
    id: PostId,
    title: String,
    content: String,
    category: String,
    summary: Option<String>,
    created_at: i64,
    updated_at: i64,
}

impl Post {
    pub(crate) fn from_parts(fields: PostFields) -> ValidationResult<Self> {
        let post = Self {
            id: fields.id,
            title: fields.title,
            content: fields.content,
            category: fields.category,
            summary: fields.summary,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
        };
        post.validate()?;
        Ok(post)
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> ValidationResult<()> {
        let title = title.into();
        validate_title(Some(&title))?;
        self.title = title;
        Ok(())
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> ValidationResult<()> {
        let content = content.into();
        validate_content(Some(&content))?;
        self.content = content;
        Ok(())
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> ValidationResult<()> {
        let category = category.into();
        validate_category(Some(&category))?;
        self.category = category;
        Ok(())
    }

    pub fn set_summary(&mut self, summary: Option<String>) -> ValidationResult<()> {
        validate_summary(summary.as_deref())?;
        self.summary = summary;
        Ok(())
    }

    /// Re-runs every field check.
    pub fn validate(&self) -> ValidationResult<()> {
        check_post_fields(
            &self.title,
            &self.content,
            &self.category,
            self.summary.as_deref(),
        )
    }
}

impl Display for Post {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Post(id={}, title={} content={}, summary={})",
            self.id,
            self.title,
            self.content,
            self.summary.as_deref().unwrap_or("None")
        )
    }
}

/// Raw post columns, validated on conversion into `Post`.
#[derive(Deserialize)]
pub(crate) struct PostFields {
    pub(crate) id: PostId,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) category: String,
    pub(crate) summary: Option<String>,
    pub(crate) created_at: i64,
    pub(crate) updated_at: i64,
}

impl TryFrom<PostFields> for Post {
    type Error = ValidationError;

    fn try_from(value: PostFields) -> ValidationResult<Self> {
        Self::from_parts(value)
    }
}

fn check_post_fields(
    title: &str,
    content: &str,
    category: &str,
    summary: Option<&str>,
) -> ValidationResult<()> {
    validate_title(Some(title))?;
    validate_content(Some(content))?;
    validate_category(Some(category))?;
    validate_summary(summary)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> String {
        "b".repeat(250)
    }

    fn sample() -> Post {
        Post::from_parts(PostFields {
            id: 3,
            title: "Top Tips".to_string(),
            content: body(),
            category: "Fiction".to_string(),
            summary: None,
            created_at: 1_000,
            updated_at: 1_000,
        })
        .unwrap()
    }

    #[test]
    fn draft_reports_first_failing_field() {
        let err = NewPost::new("A Normal Day", "short", "Sports", None).unwrap_err();
        assert_eq!(err, ValidationError::TitleMissingClickbait);

        let err = NewPost::new("Guess What", body(), "Sports", None).unwrap_err();
        assert_eq!(err, ValidationError::InvalidCategory);

        let draft = NewPost::new("Guess What", body(), "Non-Fiction", Some("s".repeat(250)))
            .unwrap();
        assert_eq!(draft.category(), "Non-Fiction");
    }

    #[test]
    fn setters_reject_invalid_values_without_mutation() {
        let mut post = sample();

        assert_eq!(
            post.set_content("x".repeat(249)).unwrap_err(),
            ValidationError::ContentTooShort
        );
        assert_eq!(post.content(), body());

        assert_eq!(
            post.set_summary(Some("s".repeat(251))).unwrap_err(),
            ValidationError::SummaryTooLong
        );
        assert_eq!(post.summary(), None);

        assert!(post.set_category("Sports").is_err());
        assert!(post.set_title("A Normal Day").is_err());
        assert_eq!(post.title(), "Top Tips");
    }

    #[test]
    fn setters_accept_valid_values() {
        let mut post = sample();
        post.set_title("The Secret Garden").unwrap();
        post.set_category("Non-Fiction").unwrap();
        post.set_summary(Some("short".to_string())).unwrap();
        post.set_content("c".repeat(300)).unwrap();
        assert_eq!(post.title(), "The Secret Garden");
        assert_eq!(post.summary(), Some("short"));
    }

    #[test]
    fn display_includes_title_content_and_summary() {
        let rendered = sample().to_string();
        assert!(rendered.starts_with("Post(id=3, title=Top Tips content=bbb"));
        assert!(rendered.ends_with(", summary=None)"));
    }
}
