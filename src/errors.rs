//! Unified error type for the ledger and scoring engines.
//!
//! Every fallible operation returns [`Result`]. All errors are local to a
//! single operation and surfaced synchronously to the caller; nothing is
//! retried automatically.

use thiserror::Error;

/// Crate-wide error enum covering configuration, storage, and domain failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what went wrong
        message: String,
    },

    /// Underlying SeaORM / SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Missing or malformed required field on an operation's input
    #[error("Validation error: {message}")]
    Validation {
        /// What was missing or malformed
        message: String,
    },

    /// A referenced entity does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: &'static str,
        /// The id that failed to resolve
        id: i64,
    },

    /// Amount is zero, negative, or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A payment was linked to a missing entry or to something that is not a debit
    #[error("Invalid payment link to entry {id}: {reason}")]
    InvalidLink {
        /// Id the payment tried to link to
        id: i64,
        /// Why the link was rejected
        reason: &'static str,
    },

    /// A linked payment would exceed the remaining balance on its parent debit
    #[error("Payment of {attempted:.2} exceeds remaining balance of {remaining:.2}")]
    Overpayment {
        /// Amount still owed on the parent debit
        remaining: f64,
        /// Amount the caller attempted to pay
        attempted: f64,
    },

    /// The member was already billed a monthly fee this calendar month
    #[error("Member {member_id} was already charged a monthly fee for {month}")]
    AlreadyCharged {
        /// Member that was billed
        member_id: i64,
        /// The calendar month, formatted `YYYY-MM`
        month: String,
    },

    /// Monthly billing requires an active member with a plan
    #[error("Member {member_id} has no active subscription")]
    NoActiveSubscription {
        /// Member without a usable plan
        member_id: i64,
    },

    /// Undo was requested for a match with no recorded deliveries
    #[error("No balls recorded for match {match_id}")]
    NoBallsRecorded {
        /// The match that has an empty event log
        match_id: i64,
    },

    /// A debit with linked payments cannot be deleted outright
    #[error("Entry {id} has {count} linked payment(s); delete or re-link them first")]
    LinkedPaymentsExist {
        /// The debit that still owns payments
        id: i64,
        /// How many linked credits reference it
        count: usize,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
