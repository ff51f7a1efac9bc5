//! Reply strings for quote commands.

use crate::model::quote::{Quote, QuoteId};
use crate::service::quote_service::StatsReport;
use chrono::{DateTime, Utc};

/// strftime pattern used when showing when a quote was submitted (UTC).
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %Y at %I:%M %p";

/// Most ids listed in a count reply.
pub(crate) const MAX_LISTED_IDS: usize = 10;

pub(crate) const NEED_QUOTE: &str = "I need a quote to log!";
pub(crate) const UNABLE_TO_SAVE: &str = "I was unable to save the quote!";
pub(crate) const NO_QUOTES: &str = "There are no quotes!";

/// Celebratory messages keyed by the total count reached; `{nick}` is the
/// submitter.
const MILESTONES: &[(u64, &str)] = &[
    (666, "Totally evil, {nick}! That was the 666th quote!"),
    (1000, "That is the 1000th quote! Congrats. I hope it was worth it."),
    (1234, "Totally sequential, {nick}! That was the 1234th quote!"),
    (1337, "You are elite, {nick}! That was the 1337th quote!"),
];

/// Thank-you line for a freshly logged quote, without the id suffix.
pub fn milestone_message(author: &str, total: u64) -> String {
    MILESTONES
        .iter()
        .find(|(count, _)| *count == total)
        .map(|(_, template)| template.replace("{nick}", author))
        .unwrap_or_else(|| format!("Thank you, {author}. There are now {total} quotes."))
}

pub(crate) fn logged(author: &str, total: u64, id: QuoteId) -> String {
    format!("{} (id: {id})", milestone_message(author, total))
}

pub(crate) fn quote_body(quote: &Quote, text: &str) -> String {
    format!(
        "{text}\nSubmitted by {} on {} (id: {})",
        quote.author,
        format_timestamp(quote.created_at),
        quote.id
    )
}

pub(crate) fn no_match(term: &str) -> String {
    format!("No quotes match term: {term}")
}

pub(crate) fn total_count(total: u64) -> String {
    format!("There are {total} quotes.")
}

pub(crate) fn term_count(term: &str, ids: &[QuoteId]) -> String {
    let mut message = format!(
        "There are {} quote(s) that match the term: {term}",
        ids.len()
    );
    if ids.len() <= MAX_LISTED_IDS {
        let listed = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        message.push_str(&format!(" ({listed})"));
    }
    message
}

pub(crate) fn stats(report: &StatsReport) -> String {
    let entries = report
        .authors
        .iter()
        .map(|entry| format!("{}: {}", entry.author, entry.count))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "Quote Stats: {entries}\nThere are {} total quotes saved.",
        report.total
    )
}

pub(crate) fn deleted(id: QuoteId) -> String {
    format!("Quote ID: {id} deleted.")
}

pub(crate) fn author_changed(id: QuoteId, author: &str) -> String {
    format!("Quote ID: {id} nick changed to {author}.")
}

pub(crate) fn missing_id(id: QuoteId) -> String {
    format!("Unable to find quote for ID: {id}")
}

pub(crate) fn unknown_admin(name: &str) -> String {
    format!("Unknown qcmd command: {name}")
}

pub(crate) fn malformed_admin(message: &str) -> String {
    format!("Malformed qcmd string: {message}")
}

fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "an unknown date".to_string())
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, logged, milestone_message, term_count};

    #[test]
    fn milestones_use_fixed_table() {
        assert_eq!(
            logged("Ann", 666, 666),
            "Totally evil, Ann! That was the 666th quote! (id: 666)"
        );
        assert_eq!(
            milestone_message("Ann", 1000),
            "That is the 1000th quote! Congrats. I hope it was worth it."
        );
        assert!(milestone_message("Ann", 1234).starts_with("Totally sequential, Ann!"));
        assert!(milestone_message("Ann", 1337).starts_with("You are elite, Ann!"));
        assert_eq!(
            milestone_message("Ann", 667),
            "Thank you, Ann. There are now 667 quotes."
        );
    }

    #[test]
    fn count_lists_ids_up_to_ten() {
        assert_eq!(
            term_count("fox", &[5, 9]),
            "There are 2 quote(s) that match the term: fox (5, 9)"
        );
        let many: Vec<i64> = (1..=11).collect();
        assert_eq!(
            term_count("fox", &many),
            "There are 11 quote(s) that match the term: fox"
        );
        assert_eq!(
            term_count("fox", &[]),
            "There are 0 quote(s) that match the term: fox ()"
        );
    }

    #[test]
    fn timestamp_uses_twelve_hour_clock() {
        // 2024-03-05 14:07:00 UTC
        assert_eq!(format_timestamp(1_709_647_620_000), "Tue Mar 05 2024 at 02:07 PM");
    }
}
