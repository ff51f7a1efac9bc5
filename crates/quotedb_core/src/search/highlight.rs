//! Term highlighting for retrieved quotes.
//!
//! # Invariants
//! - Only the first case-insensitive whole-word occurrence is decorated.
//! - The term is escaped before matching; it is never interpreted as a
//!   pattern.
//! - Text without a whole-word match is returned unchanged.

use crate::format::TermFormatter;
use regex::RegexBuilder;

/// Byte span of the occurrence to decorate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub len: usize,
}

impl Highlight {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Finds the first whole-word, case-insensitive occurrence of `term`.
pub fn find_highlight(text: &str, term: &str) -> Option<Highlight> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let pattern = format!(r"\b{}\b", regex::escape(term));
    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;

    matcher.find(text).map(|found| Highlight {
        start: found.start(),
        len: found.len(),
    })
}

/// Returns `text` with the highlighted span wrapped by `formatter`.
pub fn apply_highlight<F>(text: &str, highlight: Highlight, formatter: &F) -> String
where
    F: TermFormatter + ?Sized,
{
    let (Some(before), Some(token), Some(after)) = (
        text.get(..highlight.start),
        text.get(highlight.start..highlight.end()),
        text.get(highlight.end()..),
    ) else {
        return text.to_string();
    };

    format!("{before}{}{after}", formatter.decorate(token))
}

/// Convenience: find and decorate in one step.
pub fn highlight_term<F>(text: &str, term: &str, formatter: &F) -> String
where
    F: TermFormatter + ?Sized,
{
    match find_highlight(text, term) {
        Some(highlight) => apply_highlight(text, highlight, formatter),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{find_highlight, highlight_term, Highlight};
    use crate::format::TermFormatter;

    struct Brackets;

    impl TermFormatter for Brackets {
        fn decorate(&self, token: &str) -> String {
            format!("[{token}]")
        }
    }

    #[test]
    fn finds_first_whole_word_ignoring_case() {
        let found = find_highlight("The fox and the FOX", "fox").unwrap();
        assert_eq!(found, Highlight { start: 4, len: 3 });
    }

    #[test]
    fn skips_partial_word_matches() {
        assert_eq!(find_highlight("foxes everywhere", "fox"), None);
        let found = find_highlight("foxes and a fox", "fox").unwrap();
        assert_eq!(found.start, 12);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert_eq!(find_highlight("bob tim", "bob|tim"), None);
        let found = find_highlight("say a.b now", "a.b").unwrap();
        assert_eq!(found, Highlight { start: 4, len: 3 });
        assert_eq!(find_highlight("say axb now", "a.b"), None);
    }

    #[test]
    fn decorates_only_first_occurrence_preserving_case() {
        let text = highlight_term("Fox says fox", "fox", &Brackets);
        assert_eq!(text, "[Fox] says fox");
    }

    #[test]
    fn unmatched_term_leaves_text_alone() {
        assert_eq!(highlight_term("lazy dog", "cat", &Brackets), "lazy dog");
        assert_eq!(highlight_term("lazy dog", "  ", &Brackets), "lazy dog");
    }
}
