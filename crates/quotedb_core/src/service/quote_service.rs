//! Quote use-case service.
//!
//! # Responsibility
//! - Provide the store contract used by the command processor.
//! - Turn "missing row" results into `RepoError::NotFound`.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Stats and their total come from one snapshot of the store.

use crate::model::quote::{NewQuote, Quote, QuoteId};
use crate::repo::quote_repo::{CreatedQuote, QuoteRepository, RepoError, RepoResult, TermMatch};
use crate::service::stats::{compute_stats, AuthorCount, StatsOrder};

/// Aggregated stats plus the total they were computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub authors: Vec<AuthorCount>,
    pub total: u64,
}

/// Use-case service wrapper for quote storage.
pub struct QuoteService<R: QuoteRepository> {
    repo: R,
}

impl<R: QuoteRepository> QuoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a quote.
    ///
    /// # Errors
    /// - `InvalidInput` when `author` or `text` is blank.
    pub fn create(&self, author: &str, text: &str) -> RepoResult<Quote> {
        Ok(self.log(author, text)?.quote)
    }

    /// Same as [`Self::create`], also returning the committed total count.
    pub fn log(&self, author: &str, text: &str) -> RepoResult<CreatedQuote> {
        self.repo.create_quote(&NewQuote::new(author, text))
    }

    pub fn get_by_id(&self, id: QuoteId) -> RepoResult<Quote> {
        self.repo.get_quote(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Picks a random quote, restricted to texts containing `filter` if given.
    ///
    /// `NotFound(0)` signals an empty candidate set; there is no id to report.
    pub fn get_random(&self, filter: Option<&str>) -> RepoResult<Quote> {
        self.pick_random(filter, TermMatch::CaseSensitive)
    }

    /// Random quote whose text contains `term`, ignoring ASCII case.
    pub fn get_random_ignoring_case(&self, term: &str) -> RepoResult<Quote> {
        self.pick_random(Some(term), TermMatch::IgnoreCase)
    }

    fn pick_random(&self, filter: Option<&str>, matching: TermMatch) -> RepoResult<Quote> {
        self.repo
            .random_quote(filter, matching)?
            .ok_or(RepoError::NotFound(0))
    }

    pub fn find_by_substring(&self, substring: &str) -> RepoResult<Vec<Quote>> {
        self.repo.find_by_substring(substring)
    }

    pub fn count(&self, substring: Option<&str>) -> RepoResult<u64> {
        self.repo.count_quotes(substring)
    }

    pub fn update_author(&self, id: QuoteId, new_author: &str) -> RepoResult<Quote> {
        self.repo.update_author(id, new_author)
    }

    pub fn delete(&self, id: QuoteId) -> RepoResult<bool> {
        self.repo.delete_quote(id)
    }

    pub fn all(&self) -> RepoResult<Vec<Quote>> {
        self.repo.list_quotes()
    }

    /// Per-author counts and the total, from a single read of all quotes.
    pub fn stats(&self, order: StatsOrder) -> RepoResult<StatsReport> {
        let quotes = self.repo.list_quotes()?;
        Ok(StatsReport {
            authors: compute_stats(&quotes, order),
            total: quotes.len() as u64,
        })
    }
}
