//! Parsing of privileged `:command <id> [args]` requests.

use crate::model::quote::QuoteId;
use once_cell::sync::Lazy;
use regex::Regex;

static ADMIN_COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^:([a-z]+)\s+(\d+)\s*(.*?)$").expect("valid admin command regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
    Delete,
    ChangeAuthor(String),
}

/// Outcome of parsing admin command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminRequest {
    /// Nothing to do, no reply.
    Empty,
    Malformed(String),
    Unknown(String),
    Valid { id: QuoteId, action: AdminAction },
}

impl AdminRequest {
    pub fn parse(input: &str) -> Self {
        let message = input.trim();
        if message.is_empty() {
            return Self::Empty;
        }

        let Some(captures) = ADMIN_COMMAND_RE.captures(message) else {
            return Self::Malformed(message.to_string());
        };
        let name = &captures[1];
        let Ok(id) = captures[2].parse::<QuoteId>() else {
            return Self::Malformed(message.to_string());
        };
        let extra = captures[3].trim();

        match name {
            "delete" => Self::Valid {
                id,
                action: AdminAction::Delete,
            },
            "chgnick" if extra.is_empty() => Self::Malformed(message.to_string()),
            "chgnick" => Self::Valid {
                id,
                action: AdminAction::ChangeAuthor(extra.to_string()),
            },
            other => Self::Unknown(other.to_string()),
        }
    }
}
