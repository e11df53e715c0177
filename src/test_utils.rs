//! Shared test utilities for Pavilion.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::scoring::NewBallEvent,
    entities::{
        cricket_match::{self, MatchStatus},
        fine_rule, member, membership_plan, team, tournament,
    },
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a membership plan with custom rate and deposit part.
pub async fn create_custom_plan(
    db: &DatabaseConnection,
    name: &str,
    rate_monthly: f64,
    monthly_deposit_part: f64,
) -> Result<membership_plan::Model> {
    let plan = membership_plan::ActiveModel {
        name: Set(name.to_string()),
        rate_monthly: Set(rate_monthly),
        monthly_deposit_part: Set(monthly_deposit_part),
        ..Default::default()
    };
    Ok(plan.insert(db).await?)
}

/// Creates an active member subscribed to the given plan.
pub async fn create_member_with_plan(
    db: &DatabaseConnection,
    name: &str,
    plan_id: i64,
) -> Result<member::Model> {
    let member = member::ActiveModel {
        name: Set(name.to_string()),
        active: Set(true),
        plan_id: Set(Some(plan_id)),
        joined_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(member.insert(db).await?)
}

/// Creates an active member with no subscription plan.
pub async fn create_member_without_plan(
    db: &DatabaseConnection,
    name: &str,
) -> Result<member::Model> {
    let member = member::ActiveModel {
        name: Set(name.to_string()),
        active: Set(true),
        plan_id: Set(None),
        joined_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(member.insert(db).await?)
}

/// Creates a fine rule with sensible defaults.
///
/// # Defaults
/// * `first_time_fine`: 50.0
/// * `subsequent_multiplier`: 2.0
pub async fn create_test_rule(db: &DatabaseConnection, name: &str) -> Result<fine_rule::Model> {
    let rule = fine_rule::ActiveModel {
        name: Set(name.to_string()),
        first_time_fine: Set(50.0),
        subsequent_multiplier: Set(2.0),
        ..Default::default()
    };
    Ok(rule.insert(db).await?)
}

/// Creates a tournament with the given name.
pub async fn create_test_tournament(
    db: &DatabaseConnection,
    name: &str,
) -> Result<tournament::Model> {
    let tournament = tournament::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    };
    Ok(tournament.insert(db).await?)
}

/// Creates a team in the given tournament.
pub async fn create_test_team(
    db: &DatabaseConnection,
    tournament_id: i64,
    name: &str,
) -> Result<team::Model> {
    let team = team::ActiveModel {
        tournament_id: Set(tournament_id),
        name: Set(name.to_string()),
        ..Default::default()
    };
    Ok(team.insert(db).await?)
}

/// Creates a scheduled 20-over match between two teams.
pub async fn create_test_match(
    db: &DatabaseConnection,
    tournament_id: i64,
    team_a_id: i64,
    team_b_id: i64,
) -> Result<cricket_match::Model> {
    let fixture = cricket_match::ActiveModel {
        tournament_id: Set(tournament_id),
        team_a_id: Set(team_a_id),
        team_b_id: Set(team_b_id),
        overs_limit: Set(20),
        status: Set(MatchStatus::Scheduled.as_str().to_string()),
        current_innings: Set(1),
        winning_team_id: Set(None),
        player_of_match: Set(None),
        ..Default::default()
    };
    Ok(fixture.insert(db).await?)
}

/// Creates a completed match, optionally with a winner. `None` records a
/// tie or no-result.
pub async fn create_completed_match(
    db: &DatabaseConnection,
    tournament_id: i64,
    team_a_id: i64,
    team_b_id: i64,
    winning_team_id: Option<i64>,
) -> Result<cricket_match::Model> {
    let fixture = cricket_match::ActiveModel {
        tournament_id: Set(tournament_id),
        team_a_id: Set(team_a_id),
        team_b_id: Set(team_b_id),
        overs_limit: Set(20),
        status: Set(MatchStatus::Completed.as_str().to_string()),
        current_innings: Set(2),
        winning_team_id: Set(winning_team_id),
        player_of_match: Set(None),
        ..Default::default()
    };
    Ok(fixture.insert(db).await?)
}

/// Builds a fair delivery with no runs.
///
/// # Defaults
/// * `bowler_id`: 1, `striker_id`: 2, `non_striker_id`: 3
/// * `batting_team_id`: 1
/// * `runs_scored`: 0, `extras`: 0, no wicket, no extra type
#[must_use]
pub fn new_ball(match_id: i64, innings: i32, over_number: i32, ball_number: i32) -> NewBallEvent {
    NewBallEvent {
        match_id,
        innings,
        over_number,
        ball_number,
        bowler_id: 1,
        striker_id: 2,
        non_striker_id: 3,
        batting_team_id: 1,
        runs_scored: 0,
        is_wicket: false,
        wicket_type: None,
        extras: 0,
        extra_type: None,
    }
}

/// Sets up a complete test environment with an active member on a plan.
/// Returns (db, member) for common ledger test scenarios.
pub async fn setup_with_member() -> Result<(DatabaseConnection, member::Model)> {
    let db = setup_test_db().await?;
    let plan = create_custom_plan(&db, "Standard", 1000.0, 0.0).await?;
    let member = create_member_with_plan(&db, "Test Member", plan.id).await?;
    Ok((db, member))
}

/// Sets up a tournament with two teams.
/// Returns (db, tournament, `team_a`, `team_b`) for standings tests.
pub async fn setup_with_tournament() -> Result<(
    DatabaseConnection,
    tournament::Model,
    team::Model,
    team::Model,
)> {
    let db = setup_test_db().await?;
    let tournament = create_test_tournament(&db, "Test Cup").await?;
    let team_a = create_test_team(&db, tournament.id, "Team A").await?;
    let team_b = create_test_team(&db, tournament.id, "Team B").await?;
    Ok((db, tournament, team_a, team_b))
}

/// Sets up a complete test environment with a scheduled match.
/// Returns (db, match) for scoring tests.
pub async fn setup_with_match() -> Result<(DatabaseConnection, cricket_match::Model)> {
    let (db, tournament, team_a, team_b) = setup_with_tournament().await?;
    let fixture = create_test_match(&db, tournament.id, team_a.id, team_b.id).await?;
    Ok((db, fixture))
}
