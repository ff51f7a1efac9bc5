//! Domain model for logged quotes.
//!
//! # Responsibility
//! - Define the canonical quote record shared by store, search and commands.
//!
//! # Invariants
//! - Every quote is identified by a store-assigned `QuoteId`.
//! - Deletion is a hard delete; ids are never reused.

pub mod quote;
