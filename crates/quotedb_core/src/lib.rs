//! Quote store and chat command protocol.
//!
//! Callers build a [`CommandProcessor`] over a [`QuoteService`] and hand it
//! parsed commands; the processor returns the reply to send back, if any.

pub mod command;
pub mod config;
pub mod db;
pub mod format;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use command::{CommandProcessor, Invocation, QuoteCommand};
pub use config::{ConfigError, QuoteDbConfig};
pub use format::{IrcTermFormatter, TermFormatter, TermStyle};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::quote::{NewQuote, Quote, QuoteId, QuoteValidationError};
pub use repo::quote_repo::{
    CreatedQuote, QuoteRepository, RepoError, RepoResult, SqliteQuoteRepository, TermMatch,
};
pub use search::highlight::{find_highlight, Highlight};
pub use search::request::{CountRequest, RetrieveRequest};
pub use service::quote_service::{QuoteService, StatsReport};
pub use service::stats::{compute_stats, AuthorCount, StatsOrder};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
