//! Chat command protocol for the quote store.
//!
//! # Responsibility
//! - Name the five quote commands, their help text and privilege needs.
//! - Map raw trailing text onto store operations and render reply strings.
//!
//! # Invariants
//! - Handling is stateless per invocation; the store is the only shared state.
//! - Caller privilege is trusted as given by the router.

mod admin;
mod processor;
mod reply;

pub use admin::{AdminAction, AdminRequest};
pub use processor::{CommandProcessor, Invocation};
pub use reply::{milestone_message, TIMESTAMP_FORMAT};

const HELP_PLACEHOLDER: &str = "{cmd}";

/// Commands understood by the quote processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteCommand {
    Log,
    Retrieve,
    Count,
    Stats,
    Admin,
}

impl QuoteCommand {
    pub const ALL: [QuoteCommand; 5] = [
        Self::Log,
        Self::Retrieve,
        Self::Count,
        Self::Stats,
        Self::Admin,
    ];

    /// Looks a command up by its chat name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|command| command.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Log => "qlog",
            Self::Retrieve => "quote",
            Self::Count => "qcount",
            Self::Stats => "qstats",
            Self::Admin => "qcmd",
        }
    }

    pub fn requires_privilege(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Help line with the router's command prefix substituted.
    pub fn help(self, prefix: &str) -> String {
        self.help_template().replace(HELP_PLACEHOLDER, prefix)
    }

    fn help_template(self) -> &'static str {
        match self {
            Self::Log => "{cmd}qlog <quote> -- Logs a quote.",
            Self::Retrieve => {
                "{cmd}quote <term>|id: <num> -- Looks for a quote, optionally with a search term or id number."
            }
            Self::Count => {
                "{cmd}qcount <term> -- Finds out how many quotes contain the term given. The term is matched literally and needs at least 3 characters.\nFor example: {cmd}qcount stick"
            }
            Self::Stats => {
                "{cmd}qstats [sort_by_num] -- Shows the number of quotes per person. If sort_by_num is given, the results are sorted by the number of quotes instead of by nick."
            }
            Self::Admin => {
                "{cmd}qcmd :command <quote_id> [args] -- Owner only command to modify quotes. Commands are :delete and :chgnick. The :chgnick command takes a nick to assign the quote to."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QuoteCommand;

    #[test]
    fn names_round_trip_case_insensitively() {
        for command in QuoteCommand::ALL {
            assert_eq!(QuoteCommand::from_name(command.name()), Some(command));
        }
        assert_eq!(QuoteCommand::from_name("QLOG"), Some(QuoteCommand::Log));
        assert_eq!(QuoteCommand::from_name("qdelete"), None);
    }

    #[test]
    fn only_admin_is_privileged() {
        let privileged: Vec<_> = QuoteCommand::ALL
            .into_iter()
            .filter(|command| command.requires_privilege())
            .collect();
        assert_eq!(privileged, vec![QuoteCommand::Admin]);
    }

    #[test]
    fn help_substitutes_prefix() {
        let help = QuoteCommand::Count.help("!");
        assert!(help.starts_with("!qcount <term>"));
        assert!(help.ends_with("!qcount stick"));
        assert!(!help.contains("{cmd}"));
    }
}
