//! Quote lookup helpers.
//!
//! # Responsibility
//! - Parse free-text retrieve/count arguments into typed requests.
//! - Locate the term occurrence to decorate in a retrieved quote.
//!
//! Substring, id and random lookups themselves run in the repository.

pub mod highlight;
pub mod request;
