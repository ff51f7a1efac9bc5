//! Per-author quote statistics.
//!
//! # Invariants
//! - `StatsOrder::ByAuthor` yields authors in ascending byte order.
//! - `StatsOrder::ByCount` yields non-increasing counts; ties keep the order
//!   in which authors first appear in the input.

use crate::model::quote::Quote;
use std::collections::HashMap;

/// Ordering applied to aggregated stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsOrder {
    ByAuthor,
    ByCount,
}

impl StatsOrder {
    pub fn from_sort_by_author(sort_by_author: bool) -> Self {
        if sort_by_author {
            Self::ByAuthor
        } else {
            Self::ByCount
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCount {
    pub author: String,
    pub count: u64,
}

/// Groups quotes by author and sorts the totals.
pub fn compute_stats(quotes: &[Quote], order: StatsOrder) -> Vec<AuthorCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<AuthorCount> = Vec::new();

    for quote in quotes {
        match positions.get(quote.author.as_str()) {
            Some(&index) => stats[index].count += 1,
            None => {
                positions.insert(quote.author.as_str(), stats.len());
                stats.push(AuthorCount {
                    author: quote.author.clone(),
                    count: 1,
                });
            }
        }
    }

    match order {
        StatsOrder::ByAuthor => stats.sort_by(|a, b| a.author.cmp(&b.author)),
        // stable: ties stay in first-seen order
        StatsOrder::ByCount => stats.sort_by(|a, b| b.count.cmp(&a.count)),
    }

    stats
}
