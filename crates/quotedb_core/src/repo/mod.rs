//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the quote data access contract.
//! - Isolate SQLite query details from service/command orchestration.
//!
//! # Invariants
//! - Repository writes validate quote fields before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `InvalidInput`) in
//!   addition to store transport errors.

pub mod quote_repo;
