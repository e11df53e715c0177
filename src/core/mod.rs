//! Core business logic, independent of any transport or UI layer.
//!
//! Functions here take a database connection handle and return domain
//! results, so they can be driven equally from an HTTP handler, a job
//! runner, or a test.

/// Fine application with per-rule occurrence escalation
pub mod fines;

/// Ledger charges, linked payments, and balance queries
pub mod ledger;

/// Monthly subscription billing with deposit split
pub mod monthly;

/// Ball-by-ball cricket scoring, live scores, and player statistics
pub mod scoring;

/// Tournament points table with net run rate
pub mod standings;
