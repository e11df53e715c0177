//! Configuration management for the database and seed data.

/// Database connection and schema creation
pub mod database;

/// Membership plan and fine rule seeding from config.toml
pub mod rules;
