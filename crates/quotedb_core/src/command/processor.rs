//! Command dispatch over the quote service.
//!
//! # Invariants
//! - `InvalidInput` and `NotFound` outcomes become reply strings.
//! - Store failures propagate as `Err`, except for `qlog`, which answers with
//!   a failure reply.
//! - Log events carry ids and counts, never quote text.

use super::admin::{AdminAction, AdminRequest};
use super::reply;
use super::QuoteCommand;
use crate::format::TermFormatter;
use crate::repo::quote_repo::{QuoteRepository, RepoError, RepoResult};
use crate::search::highlight::highlight_term;
use crate::search::request::{CountRequest, RetrieveRequest};
use crate::service::quote_service::QuoteService;
use crate::service::stats::StatsOrder;
use log::{debug, error, info, warn};

/// One inbound command as handed over by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Caller identity; becomes the author of logged quotes.
    pub caller: &'a str,
    /// Whether the router considers the caller privileged.
    pub privileged: bool,
    /// Raw text following the command name.
    pub text: &'a str,
}

/// Maps quote commands onto store operations and renders replies.
pub struct CommandProcessor<R: QuoteRepository, F: TermFormatter> {
    service: QuoteService<R>,
    formatter: F,
}

impl<R: QuoteRepository, F: TermFormatter> CommandProcessor<R, F> {
    pub fn new(service: QuoteService<R>, formatter: F) -> Self {
        Self { service, formatter }
    }

    pub fn service(&self) -> &QuoteService<R> {
        &self.service
    }

    /// Runs one command. `Ok(None)` means the command stays silent.
    ///
    /// # Errors
    /// - `StoreUnavailable` / `InvalidData` when the store fails mid-command.
    pub fn handle(
        &self,
        command: QuoteCommand,
        invocation: &Invocation<'_>,
    ) -> RepoResult<Option<String>> {
        debug!(
            "event=command_dispatch module=command status=start command={} privileged={}",
            command.name(),
            invocation.privileged
        );

        let result = match command {
            QuoteCommand::Log => Ok(Some(self.log(invocation))),
            QuoteCommand::Retrieve => self.retrieve(invocation.text).map(Some),
            QuoteCommand::Count => self.count(invocation.text),
            QuoteCommand::Stats => self.stats(invocation.text).map(Some),
            QuoteCommand::Admin => self.admin(invocation),
        };

        if let Err(err) = &result {
            error!(
                "event=command_dispatch module=command status=error command={} error={}",
                command.name(),
                err
            );
        }
        result
    }

    fn log(&self, invocation: &Invocation<'_>) -> String {
        let text = invocation.text.trim();
        if text.is_empty() {
            return reply::NEED_QUOTE.to_string();
        }

        match self.service.log(invocation.caller, text) {
            Ok(created) => {
                info!(
                    "event=quote_log module=command status=ok id={} total={}",
                    created.quote.id, created.total
                );
                reply::logged(&created.quote.author, created.total, created.quote.id)
            }
            Err(err) => {
                error!(
                    "event=quote_log module=command status=error error={}",
                    err
                );
                reply::UNABLE_TO_SAVE.to_string()
            }
        }
    }

    fn retrieve(&self, text: &str) -> RepoResult<String> {
        let request = RetrieveRequest::parse(text);
        let found = match &request {
            RetrieveRequest::ById(id) => self.service.get_by_id(*id),
            RetrieveRequest::ByTerm(term) => self.service.get_random_ignoring_case(term),
            RetrieveRequest::Random => self.service.get_random(None),
        };

        let quote = match found {
            Ok(quote) => quote,
            Err(RepoError::NotFound(_)) => {
                return Ok(match request {
                    RetrieveRequest::Random => reply::NO_QUOTES.to_string(),
                    _ => reply::no_match(text.trim()),
                });
            }
            Err(err) => return Err(err),
        };

        let body = match &request {
            RetrieveRequest::ByTerm(term) => highlight_term(&quote.text, term, &self.formatter),
            _ => quote.text.clone(),
        };
        Ok(reply::quote_body(&quote, &body))
    }

    fn count(&self, text: &str) -> RepoResult<Option<String>> {
        match CountRequest::parse(text) {
            CountRequest::Ignored => Ok(None),
            CountRequest::Total => Ok(Some(reply::total_count(self.service.count(None)?))),
            CountRequest::ByTerm(term) => {
                let ids = self
                    .service
                    .find_by_substring(&term)?
                    .into_iter()
                    .map(|quote| quote.id)
                    .collect::<Vec<_>>();
                Ok(Some(reply::term_count(&term, &ids)))
            }
        }
    }

    fn stats(&self, text: &str) -> RepoResult<String> {
        let order = StatsOrder::from_sort_by_author(text.trim().is_empty());
        let report = self.service.stats(order)?;
        Ok(reply::stats(&report))
    }

    fn admin(&self, invocation: &Invocation<'_>) -> RepoResult<Option<String>> {
        if !invocation.privileged {
            warn!("event=quote_admin module=command status=denied reason=unprivileged");
            return Ok(None);
        }

        let (id, action) = match AdminRequest::parse(invocation.text) {
            AdminRequest::Empty => return Ok(None),
            AdminRequest::Malformed(message) => {
                return Ok(Some(reply::malformed_admin(&message)));
            }
            AdminRequest::Unknown(name) => return Ok(Some(reply::unknown_admin(&name))),
            AdminRequest::Valid { id, action } => (id, action),
        };

        let message = match action {
            AdminAction::Delete => {
                if self.service.delete(id)? {
                    info!("event=quote_delete module=command status=ok id={id}");
                    reply::deleted(id)
                } else {
                    reply::missing_id(id)
                }
            }
            AdminAction::ChangeAuthor(author) => match self.service.update_author(id, &author) {
                Ok(updated) => {
                    info!("event=quote_chgnick module=command status=ok id={id}");
                    reply::author_changed(updated.id, &updated.author)
                }
                Err(RepoError::NotFound(_)) => reply::missing_id(id),
                Err(err) => return Err(err),
            },
        };

        Ok(Some(message))
    }
}
