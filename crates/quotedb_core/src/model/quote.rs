//! Quote domain model.
//!
//! # Responsibility
//! - Define the persisted quote record and the creation request.
//! - Validate text/author invariants before anything reaches storage.
//!
//! # Invariants
//! - `text` is non-empty after trimming at creation time.
//! - `author` is never empty.
//! - `id` and `created_at` never change after creation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier. Monotonic, never reused after deletion.
pub type QuoteId = i64;

/// Validation failures for quote fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteValidationError {
    EmptyText,
    EmptyAuthor,
}

impl Display for QuoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "quote text must not be empty"),
            Self::EmptyAuthor => write!(f, "quote author must not be empty"),
        }
    }
}

impl Error for QuoteValidationError {}

/// A persisted quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    /// Who submitted the quote. Mutable through the admin `chgnick` command.
    pub author: String,
    pub text: String,
    /// Unix epoch milliseconds (UTC).
    pub created_at: i64,
}

impl Quote {
    /// Re-checks field invariants, used when decoding persisted rows.
    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        validate_author(&self.author)?;
        validate_text(&self.text)
    }
}

/// Creation request; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    pub author: String,
    pub text: String,
}

impl NewQuote {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
        }
    }

    pub fn validate(&self) -> Result<(), QuoteValidationError> {
        validate_author(&self.author)?;
        validate_text(&self.text)
    }
}

/// Rejects authors that are empty after trimming.
pub fn validate_author(author: &str) -> Result<(), QuoteValidationError> {
    if author.trim().is_empty() {
        return Err(QuoteValidationError::EmptyAuthor);
    }
    Ok(())
}

fn validate_text(text: &str) -> Result<(), QuoteValidationError> {
    if text.trim().is_empty() {
        return Err(QuoteValidationError::EmptyText);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{NewQuote, Quote, QuoteValidationError};

    #[test]
    fn whitespace_only_text_is_rejected() {
        let err = NewQuote::new("ann", " \t\n").validate().unwrap_err();
        assert_eq!(err, QuoteValidationError::EmptyText);
    }

    #[test]
    fn empty_author_is_rejected_before_text() {
        let err = NewQuote::new("", "").validate().unwrap_err();
        assert_eq!(err, QuoteValidationError::EmptyAuthor);
    }

    #[test]
    fn persisted_quote_with_blank_author_fails_validation() {
        let quote = Quote {
            id: 1,
            author: "  ".to_string(),
            text: "hello".to_string(),
            created_at: 0,
        };
        assert!(quote.validate().is_err());
    }
}
