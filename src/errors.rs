//! Unified error types and result handling for the ledger engine.
//!
//! All fallible operations in the crate return [`Result`], which wraps this
//! module's [`Error`] enum. Storage failures are converted from
//! `sea_orm::DbErr`; parser-internal failures surface as `Csv` or `Parse` and
//! are treated by the import engine as "try the next parser".

use rust_decimal::Decimal;
use thiserror::Error;

/// All error conditions the engine can report.
#[derive(Debug, Error)]
pub enum Error {
    /// Every registered statement parser rejected the uploaded text.
    #[error("no registered statement parser matched the uploaded text")]
    NoParserMatched,

    /// An income transfer asked for more than the source envelope holds.
    #[error("insufficient income in envelope: available {available}, requested {requested}")]
    InsufficientFunds {
        /// Total income currently allocated to the source envelope.
        available: Decimal,
        /// Amount the caller asked to move.
        requested: Decimal,
    },

    /// An entity lookup failed, either because the id does not exist or
    /// because it belongs to a different user.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Table-level name of the entity ("account", "entry", ...).
        entity: &'static str,
        /// The id that was looked up.
        id: i64,
    },

    /// Settings were requested for an anonymous caller. Settings rows are
    /// lazily created for real users only, never for unauthenticated ones.
    #[error("user settings require an authenticated user")]
    AnonymousUser,

    /// A statement parser could not make sense of a field.
    #[error("statement parse error: {message}")]
    Parse {
        /// Human-readable description of the malformed field.
        message: String,
    },

    /// Invalid input that is not tied to a particular entity.
    #[error("configuration error: {message}")]
    Config {
        /// What was wrong with the input.
        message: String,
    },

    /// CSV-level failure inside a statement parser.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Storage layer failure.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
