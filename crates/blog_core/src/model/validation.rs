//! Field validators for Author and Post records.
//!
//! # Responsibility
//! - Gate every candidate field value before it is assigned or persisted.
//! - Describe each rejection with the field name and the violated rule.
//!
//! # Invariants
//! - Validators are pure functions of the candidate value. The only
//!   store-backed rule (author name uniqueness) lives on
//!   `AuthorRepository::validate_name` and reuses `validate_name_present`.
//! - Lengths are counted in characters, not bytes.
//! - Accepted values are returned unchanged.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum post content length in characters.
pub const CONTENT_MIN_CHARS: usize = 250;
/// Maximum post summary length in characters.
pub const SUMMARY_MAX_CHARS: usize = 250;
/// Exact phone number length in characters.
pub const PHONE_NUMBER_DIGITS: usize = 10;

/// Categories a post may belong to.
pub const ALLOWED_CATEGORIES: &[&str] = &["Fiction", "Non-Fiction"];

/// Phrases of which at least one must appear in a post title.
pub const CLICKBAIT_PHRASES: &[&str] = &["Won't Believe", "Secret", "Top", "Guess"];

// `\d` is Unicode-aware: any Nd digit counts, e.g. Arabic-Indic digits.
static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone number regex"));

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejection raised when a candidate field value breaks a record rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Author name is absent or empty.
    NameMissing,
    /// Another author already owns this exact name.
    NameTaken,
    /// Phone number is not exactly ten decimal digits.
    InvalidPhoneNumber,
    /// Post content is absent or shorter than the minimum.
    ContentTooShort,
    /// Post summary exceeds the maximum length.
    SummaryTooLong,
    /// Post category is not one of `ALLOWED_CATEGORIES`.
    InvalidCategory,
    /// Post title contains none of `CLICKBAIT_PHRASES`.
    TitleMissingClickbait,
}

impl ValidationError {
    /// Name of the record field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameMissing | Self::NameTaken => "name",
            Self::InvalidPhoneNumber => "phone_number",
            Self::ContentTooShort => "content",
            Self::SummaryTooLong => "summary",
            Self::InvalidCategory => "category",
            Self::TitleMissingClickbait => "title",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameMissing => write!(f, "Name must be present."),
            Self::NameTaken => write!(f, "Name must be unique."),
            Self::InvalidPhoneNumber => write!(
                f,
                "Phone number must be exactly {PHONE_NUMBER_DIGITS} digits."
            ),
            Self::ContentTooShort => write!(
                f,
                "Content must be at least {CONTENT_MIN_CHARS} characters long."
            ),
            Self::SummaryTooLong => write!(
                f,
                "Summary must be at most {SUMMARY_MAX_CHARS} characters long."
            ),
            Self::InvalidCategory => write!(
                f,
                "Category must be one of {}.",
                format_list(ALLOWED_CATEGORIES)
            ),
            Self::TitleMissingClickbait => write!(
                f,
                "Title must contain one of the clickbait phrases: {}.",
                format_list(CLICKBAIT_PHRASES)
            ),
        }
    }
}

impl Error for ValidationError {}

/// Checks that an author name is present and non-empty.
///
/// Uniqueness needs the store and is checked by
/// `AuthorRepository::validate_name`, which calls this first.
pub fn validate_name_present(candidate: Option<&str>) -> ValidationResult<&str> {
    match candidate {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(ValidationError::NameMissing),
    }
}

/// Accepts `None`, or exactly ten decimal digits from any script.
pub fn validate_phone_number(candidate: Option<&str>) -> ValidationResult<Option<&str>> {
    match candidate {
        None => Ok(None),
        Some(phone) if PHONE_NUMBER_RE.is_match(phone) => Ok(Some(phone)),
        Some(_) => Err(ValidationError::InvalidPhoneNumber),
    }
}

/// Requires content of at least `CONTENT_MIN_CHARS` characters.
pub fn validate_content(candidate: Option<&str>) -> ValidationResult<&str> {
    match candidate {
        Some(content) if content.chars().count() >= CONTENT_MIN_CHARS => Ok(content),
        _ => Err(ValidationError::ContentTooShort),
    }
}

/// Accepts `None`, or a summary of at most `SUMMARY_MAX_CHARS` characters.
pub fn validate_summary(candidate: Option<&str>) -> ValidationResult<Option<&str>> {
    match candidate {
        Some(summary) if summary.chars().count() > SUMMARY_MAX_CHARS => {
            Err(ValidationError::SummaryTooLong)
        }
        other => Ok(other),
    }
}

/// Requires an exact match against `ALLOWED_CATEGORIES`.
///
/// `None` is simply not in the allowed set.
pub fn validate_category(candidate: Option<&str>) -> ValidationResult<&str> {
    candidate
        .filter(|category| ALLOWED_CATEGORIES.iter().any(|allowed| allowed == category))
        .ok_or(ValidationError::InvalidCategory)
}

/// Requires at least one case-sensitive clickbait substring.
///
/// `None` has no substrings, so it fails the same rule.
pub fn validate_title(candidate: Option<&str>) -> ValidationResult<&str> {
    candidate
        .filter(|title| CLICKBAIT_PHRASES.iter().any(|phrase| title.contains(phrase)))
        .ok_or(ValidationError::TitleMissingClickbait)
}

fn format_list(values: &[&str]) -> String {
    let quoted = values
        .iter()
        .map(|value| {
            if value.contains('\'') {
                format!("\"{value}\"")
            } else {
                format!("'{value}'")
            }
        })
        .collect::<Vec<_>>();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_requires_non_empty_value() {
        assert_eq!(validate_name_present(Some("Ada")), Ok("Ada"));
        assert_eq!(
            validate_name_present(Some("")),
            Err(ValidationError::NameMissing)
        );
        assert_eq!(validate_name_present(None), Err(ValidationError::NameMissing));
    }

    #[test]
    fn phone_number_accepts_none_and_ten_digits_only() {
        assert_eq!(validate_phone_number(None), Ok(None));
        assert_eq!(
            validate_phone_number(Some("1234567890")),
            Ok(Some("1234567890"))
        );
        for bad in ["12345", "12345abcde", "12345678901", "123456789 ", ""] {
            assert_eq!(
                validate_phone_number(Some(bad)),
                Err(ValidationError::InvalidPhoneNumber),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn phone_number_rejects_trailing_newline() {
        assert!(validate_phone_number(Some("1234567890\n")).is_err());
    }

    #[test]
    fn phone_number_accepts_non_ascii_decimal_digits() {
        let arabic_indic = "١٢٣٤٥٦٧٨٩٠";
        assert_eq!(arabic_indic.chars().count(), 10);
        assert_eq!(
            validate_phone_number(Some(arabic_indic)),
            Ok(Some(arabic_indic))
        );
        assert_eq!(
            validate_phone_number(Some("12345abcde")),
            Err(ValidationError::InvalidPhoneNumber)
        );
        assert_eq!(
            validate_phone_number(Some("1234567890\n")),
            Err(ValidationError::InvalidPhoneNumber)
        );
        assert!(validate_phone_number(Some("١٢٣٤٥٦٧٨٩x")).is_err());
    }

    #[test]
    fn content_boundary_is_inclusive() {
        let short = "x".repeat(CONTENT_MIN_CHARS - 1);
        let exact = "x".repeat(CONTENT_MIN_CHARS);
        assert_eq!(
            validate_content(Some(&short)),
            Err(ValidationError::ContentTooShort)
        );
        assert_eq!(validate_content(Some(&exact)), Ok(exact.as_str()));
        assert_eq!(validate_content(None), Err(ValidationError::ContentTooShort));
    }

    #[test]
    fn content_length_counts_characters() {
        // 250 two-byte characters.
        let content = "é".repeat(CONTENT_MIN_CHARS);
        assert!(validate_content(Some(&content)).is_ok());
    }

    #[test]
    fn summary_boundary_is_inclusive() {
        let exact = "s".repeat(SUMMARY_MAX_CHARS);
        let long = "s".repeat(SUMMARY_MAX_CHARS + 1);
        assert_eq!(validate_summary(Some(&exact)), Ok(Some(exact.as_str())));
        assert_eq!(
            validate_summary(Some(&long)),
            Err(ValidationError::SummaryTooLong)
        );
        assert_eq!(validate_summary(None), Ok(None));
    }

    #[test]
    fn category_must_be_exact_allowed_value() {
        assert_eq!(validate_category(Some("Fiction")), Ok("Fiction"));
        assert_eq!(validate_category(Some("Non-Fiction")), Ok("Non-Fiction"));
        for bad in [Some("Sports"), Some("fiction"), Some(""), None] {
            assert_eq!(
                validate_category(bad),
                Err(ValidationError::InvalidCategory)
            );
        }
    }

    #[test]
    fn title_needs_case_sensitive_clickbait_substring() {
        assert!(validate_title(Some("10 Secrets You Won't Believe")).is_ok());
        assert!(validate_title(Some("Guess Who")).is_ok());
        assert!(validate_title(Some("Top 5 Recipes")).is_ok());
        assert_eq!(
            validate_title(Some("A Normal Day")),
            Err(ValidationError::TitleMissingClickbait)
        );
        assert_eq!(
            validate_title(Some("top 5 recipes")),
            Err(ValidationError::TitleMissingClickbait)
        );
        assert_eq!(
            validate_title(None),
            Err(ValidationError::TitleMissingClickbait)
        );
    }

    #[test]
    fn error_messages_name_field_and_rule() {
        assert_eq!(
            ValidationError::InvalidCategory.to_string(),
            "Category must be one of ['Fiction', 'Non-Fiction']."
        );
        assert_eq!(
            ValidationError::TitleMissingClickbait.to_string(),
            "Title must contain one of the clickbait phrases: [\"Won't Believe\", 'Secret', 'Top', 'Guess']."
        );
        assert_eq!(
            ValidationError::InvalidPhoneNumber.to_string(),
            "Phone number must be exactly 10 digits."
        );
        assert_eq!(ValidationError::SummaryTooLong.field(), "summary");
        assert_eq!(ValidationError::NameTaken.field(), "name");
    }
}
