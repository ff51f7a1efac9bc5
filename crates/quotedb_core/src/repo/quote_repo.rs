//! Quote repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and query APIs over the `quotes` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every mutation runs inside one SQLite transaction and commits before
//!   returning.
//! - Substring filters are bound parameters compared with `instr`, so terms
//!   are matched literally. Only a random pick may opt into ASCII
//!   case folding (`TermMatch::IgnoreCase`).
//! - All access goes through one connection lock; id assignment and counts
//!   follow a single ordering of commits.

use crate::db::migrations::require_current;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::quote::{validate_author, NewQuote, Quote, QuoteId, QuoteValidationError};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const QUOTE_SELECT_SQL: &str = "SELECT id, author, text, created_at FROM quotes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for quote persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Caller supplied an empty author or text.
    InvalidInput(QuoteValidationError),
    /// No quote exists for this id.
    NotFound(QuoteId),
    /// The underlying store cannot be reached or is not usable.
    StoreUnavailable(DbError),
    /// A persisted row violates quote invariants.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quote not found: {id}"),
            Self::StoreUnavailable(err) => write!(f, "quote store unavailable: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted quote data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::StoreUnavailable(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::StoreUnavailable(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StoreUnavailable(DbError::Sqlite(value))
    }
}

/// How a random pick compares its filter term against quote text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermMatch {
    #[default]
    CaseSensitive,
    /// ASCII case folding on both sides, like SQLite `lower()`.
    IgnoreCase,
}

impl TermMatch {
    fn condition(self) -> &'static str {
        match self {
            Self::CaseSensitive => "instr(text, ?1) > 0",
            Self::IgnoreCase => "instr(lower(text), lower(?1)) > 0",
        }
    }
}

/// Result of a committed insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedQuote {
    pub quote: Quote,
    /// Total number of quotes right after this insert committed.
    pub total: u64,
}

/// Repository interface for quote storage.
pub trait QuoteRepository {
    fn create_quote(&self, quote: &NewQuote) -> RepoResult<CreatedQuote>;
    fn get_quote(&self, id: QuoteId) -> RepoResult<Option<Quote>>;
    /// Uniform random pick, optionally restricted to texts containing `filter`
    /// under `matching`.
    fn random_quote(
        &self,
        filter: Option<&str>,
        matching: TermMatch,
    ) -> RepoResult<Option<Quote>>;
    /// Quotes whose text contains `substring`, ordered by id ascending.
    fn find_by_substring(&self, substring: &str) -> RepoResult<Vec<Quote>>;
    fn count_quotes(&self, substring: Option<&str>) -> RepoResult<u64>;
    fn update_author(&self, id: QuoteId, author: &str) -> RepoResult<Quote>;
    /// Returns `true` when a row existed and was removed.
    fn delete_quote(&self, id: QuoteId) -> RepoResult<bool>;
    /// All quotes ordered by id ascending.
    fn list_quotes(&self) -> RepoResult<Vec<Quote>>;
}

/// SQLite-backed quote repository.
///
/// Owns its connection behind a mutex, so one instance can be shared across
/// threads handling concurrent chat commands.
pub struct SqliteQuoteRepository {
    conn: Mutex<Connection>,
}

impl SqliteQuoteRepository {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `StoreUnavailable(UninitializedConnection)` when the schema version
    ///   does not match this binary.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        require_current(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens (creating if needed) a database file and wraps it.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| RepoError::StoreUnavailable(DbError::LockPoisoned))
    }

    fn query_quotes(
        conn: &Connection,
        sql: &str,
        bind_values: Vec<Value>,
    ) -> RepoResult<Vec<Quote>> {
        let mut stmt = conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut quotes = Vec::new();

        while let Some(row) = rows.next()? {
            quotes.push(parse_quote_row(row)?);
        }

        Ok(quotes)
    }
}

impl QuoteRepository for SqliteQuoteRepository {
    fn create_quote(&self, quote: &NewQuote) -> RepoResult<CreatedQuote> {
        quote.validate()?;

        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let created_at = chrono::Utc::now().timestamp_millis();

        tx.execute(
            "INSERT INTO quotes (author, text, created_at) VALUES (?1, ?2, ?3);",
            params![quote.author.as_str(), quote.text.as_str(), created_at],
        )?;
        let id = tx.last_insert_rowid();
        let total: i64 = tx.query_row("SELECT COUNT(*) FROM quotes;", [], |row| row.get(0))?;
        tx.commit()?;

        Ok(CreatedQuote {
            quote: Quote {
                id,
                author: quote.author.clone(),
                text: quote.text.clone(),
                created_at,
            },
            total: count_from_db(total)?,
        })
    }

    fn get_quote(&self, id: QuoteId) -> RepoResult<Option<Quote>> {
        let conn = self.lock()?;
        let quotes = Self::query_quotes(
            &conn,
            &format!("{QUOTE_SELECT_SQL} WHERE id = ?1;"),
            vec![Value::Integer(id)],
        )?;
        Ok(quotes.into_iter().next())
    }

    fn random_quote(
        &self,
        filter: Option<&str>,
        matching: TermMatch,
    ) -> RepoResult<Option<Quote>> {
        let conn = self.lock()?;
        let quotes = match filter {
            Some(term) => Self::query_quotes(
                &conn,
                &format!(
                    "{QUOTE_SELECT_SQL} WHERE {} ORDER BY random() LIMIT 1;",
                    matching.condition()
                ),
                vec![Value::Text(term.to_string())],
            )?,
            None => Self::query_quotes(
                &conn,
                &format!("{QUOTE_SELECT_SQL} ORDER BY random() LIMIT 1;"),
                Vec::new(),
            )?,
        };
        Ok(quotes.into_iter().next())
    }

    fn find_by_substring(&self, substring: &str) -> RepoResult<Vec<Quote>> {
        let conn = self.lock()?;
        Self::query_quotes(
            &conn,
            &format!("{QUOTE_SELECT_SQL} WHERE instr(text, ?1) > 0 ORDER BY id ASC;"),
            vec![Value::Text(substring.to_string())],
        )
    }

    fn count_quotes(&self, substring: Option<&str>) -> RepoResult<u64> {
        let conn = self.lock()?;
        let total: i64 = match substring {
            Some(term) => conn.query_row(
                "SELECT COUNT(*) FROM quotes WHERE instr(text, ?1) > 0;",
                [term],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM quotes;", [], |row| row.get(0))?,
        };
        count_from_db(total)
    }

    fn update_author(&self, id: QuoteId, author: &str) -> RepoResult<Quote> {
        validate_author(author)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE quotes SET author = ?1 WHERE id = ?2;",
            params![author, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        let updated = Self::query_quotes(
            &tx,
            &format!("{QUOTE_SELECT_SQL} WHERE id = ?1;"),
            vec![Value::Integer(id)],
        )?
        .into_iter()
        .next()
        .ok_or(RepoError::NotFound(id))?;
        tx.commit()?;

        Ok(updated)
    }

    fn delete_quote(&self, id: QuoteId) -> RepoResult<bool> {
        let mut conn = self.lock()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute("DELETE FROM quotes WHERE id = ?1;", [id])?;
        tx.commit()?;
        Ok(changed > 0)
    }

    fn list_quotes(&self) -> RepoResult<Vec<Quote>> {
        let conn = self.lock()?;
        Self::query_quotes(
            &conn,
            &format!("{QUOTE_SELECT_SQL} ORDER BY id ASC;"),
            Vec::new(),
        )
    }
}

fn parse_quote_row(row: &Row<'_>) -> RepoResult<Quote> {
    let quote = Quote {
        id: row.get("id")?,
        author: row.get("author")?,
        text: row.get("text")?,
        created_at: row.get("created_at")?,
    };
    quote.validate().map_err(|err| {
        RepoError::InvalidData(format!("quote {} in quotes table: {err}", quote.id))
    })?;
    Ok(quote)
}

fn count_from_db(value: i64) -> RepoResult<u64> {
    u64::try_from(value)
        .map_err(|_| RepoError::InvalidData(format!("negative quote count `{value}`")))
}
