//! Match entity - Aggregate root for one cricket fixture.
//!
//! Status is stored as a string; [`MatchStatus`] gives it a typed surface.
//! `winning_team_id` stays None for ties and no-results, which is how the
//! points table detects them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Match database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    /// Unique identifier for the match
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tournament this fixture belongs to
    pub tournament_id: i64,
    /// First team
    pub team_a_id: i64,
    /// Second team
    pub team_b_id: i64,
    /// Overs limit per innings
    pub overs_limit: i32,
    /// `"scheduled"`, `"live"`, or `"completed"`
    pub status: String,
    /// Innings currently being played (1 or 2)
    pub current_innings: i32,
    /// Winner once completed; None for ties and no-results
    pub winning_team_id: Option<i64>,
    /// Player-of-the-match award, if given
    pub player_of_match: Option<String>,
}

/// Defines relationships between Match and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each match belongs to one tournament
    #[sea_orm(
        belongs_to = "super::tournament::Entity",
        from = "Column::TournamentId",
        to = "super::tournament::Column::Id"
    )]
    Tournament,
    /// One match has many ball events
    #[sea_orm(has_many = "super::ball_event::Entity")]
    BallEvents,
}

impl Related<super::tournament::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tournament.def()
    }
}

impl Related<super::ball_event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BallEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Lifecycle state of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Fixture created, no play yet
    Scheduled,
    /// Play in progress
    Live,
    /// Result recorded; counts toward the points table
    Completed,
}

impl MatchStatus {
    /// String representation stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Completed => "completed",
        }
    }

    /// Parses the stored string form, returning None for unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "scheduled" => Some(Self::Scheduled),
            "live" => Some(Self::Live),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
