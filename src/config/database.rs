//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.

use crate::entities::{
    BallEvent, CricketMatch, FineRule, LedgerEntry, Member, MembershipPlan, Team, Tournament,
    UserFine,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/pavilion.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, ensuring the database schema matches the Rust struct definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let member_table = schema.create_table_from_entity(Member);
    let plan_table = schema.create_table_from_entity(MembershipPlan);
    let ledger_table = schema.create_table_from_entity(LedgerEntry);
    let fine_rule_table = schema.create_table_from_entity(FineRule);
    let user_fine_table = schema.create_table_from_entity(UserFine);
    let tournament_table = schema.create_table_from_entity(Tournament);
    let team_table = schema.create_table_from_entity(Team);
    let match_table = schema.create_table_from_entity(CricketMatch);
    let ball_event_table = schema.create_table_from_entity(BallEvent);

    db.execute(builder.build(&plan_table)).await?;
    db.execute(builder.build(&member_table)).await?;
    db.execute(builder.build(&ledger_table)).await?;
    db.execute(builder.build(&fine_rule_table)).await?;
    db.execute(builder.build(&user_fine_table)).await?;
    db.execute(builder.build(&tournament_table)).await?;
    db.execute(builder.build(&team_table)).await?;
    db.execute(builder.build(&match_table)).await?;
    db.execute(builder.build(&ball_event_table)).await?;

    Ok(())
}
