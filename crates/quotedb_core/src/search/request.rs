//! Typed lookup requests parsed from command arguments.
//!
//! # Invariants
//! - `id:` selects an id lookup only when followed by digits and nothing
//!   else; anything else starting with `id:` stays a search term.
//! - Count terms shorter than [`MIN_COUNT_TERM_CHARS`] are ignored.

use crate::model::quote::QuoteId;

/// Minimum number of characters a count term needs before it is searched.
pub const MIN_COUNT_TERM_CHARS: usize = 3;

const ID_PREFIX: &str = "id:";

/// What the retrieve command should look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrieveRequest {
    ById(QuoteId),
    ByTerm(String),
    Random,
}

impl RetrieveRequest {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Random;
        }

        match parse_id_selector(input) {
            Some(id) => Self::ById(id),
            None => Self::ByTerm(input.to_string()),
        }
    }
}

/// What the count command should count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountRequest {
    Total,
    ByTerm(String),
    /// Term too short to search; the command stays silent.
    Ignored,
}

impl CountRequest {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::Total;
        }
        if input.chars().count() < MIN_COUNT_TERM_CHARS {
            return Self::Ignored;
        }
        Self::ByTerm(input.to_string())
    }
}

fn parse_id_selector(input: &str) -> Option<QuoteId> {
    let prefix = input.get(..ID_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(ID_PREFIX) {
        return None;
    }

    let digits = input[ID_PREFIX.len()..].trim_start();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::{CountRequest, RetrieveRequest};

    #[test]
    fn blank_input_is_random() {
        assert_eq!(RetrieveRequest::parse("   "), RetrieveRequest::Random);
    }

    #[test]
    fn id_prefix_with_digits_selects_id() {
        assert_eq!(RetrieveRequest::parse("id:42"), RetrieveRequest::ById(42));
        assert_eq!(RetrieveRequest::parse("ID: 7"), RetrieveRequest::ById(7));
    }

    #[test]
    fn id_prefix_without_number_is_a_term() {
        assert_eq!(
            RetrieveRequest::parse("id:foo"),
            RetrieveRequest::ByTerm("id:foo".to_string())
        );
        assert_eq!(
            RetrieveRequest::parse("id: 12 monkeys"),
            RetrieveRequest::ByTerm("id: 12 monkeys".to_string())
        );
        assert_eq!(
            RetrieveRequest::parse("id:-3"),
            RetrieveRequest::ByTerm("id:-3".to_string())
        );
    }

    #[test]
    fn overflowing_id_falls_back_to_term() {
        let input = "id:99999999999999999999999";
        assert_eq!(
            RetrieveRequest::parse(input),
            RetrieveRequest::ByTerm(input.to_string())
        );
    }

    #[test]
    fn multibyte_input_does_not_split_chars() {
        assert_eq!(
            RetrieveRequest::parse("ïd"),
            RetrieveRequest::ByTerm("ïd".to_string())
        );
    }

    #[test]
    fn count_terms_need_three_chars() {
        assert_eq!(CountRequest::parse(""), CountRequest::Total);
        assert_eq!(CountRequest::parse(" ab "), CountRequest::Ignored);
        assert_eq!(
            CountRequest::parse("fox"),
            CountRequest::ByTerm("fox".to_string())
        );
    }
}
