//! Ball event entity - One delivery in a match.
//!
//! The event log is append-only; the only deletion is undo-most-recent.
//! A delivery counts toward the bowler's legal-ball tally iff its extra type
//! is neither a wide nor a no-ball.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ball event database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ball_events")]
pub struct Model {
    /// Unique identifier, monotonic in insertion order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Match this delivery belongs to
    pub match_id: i64,
    /// Innings number, 1 or 2
    pub innings: i32,
    /// Over number within the innings
    pub over_number: i32,
    /// Ball number within the over
    pub ball_number: i32,
    /// Member bowling the delivery
    pub bowler_id: i64,
    /// Member on strike
    pub striker_id: i64,
    /// Member at the non-striker's end
    pub non_striker_id: i64,
    /// Team currently batting
    pub batting_team_id: i64,
    /// Runs scored off the bat
    pub runs_scored: i32,
    /// Whether a wicket fell on this delivery
    pub is_wicket: bool,
    /// How the wicket fell (e.g., `"bowled"`, `"runout"`), None otherwise
    pub wicket_type: Option<String>,
    /// Extra runs awarded on this delivery
    pub extras: i32,
    /// `"wide"`, `"noball"`, `"legbye"`, `"bye"`, or None for a fair delivery
    pub extra_type: Option<String>,
    /// Whether the delivery counts toward the over
    pub is_valid_ball: bool,
}

/// Defines relationships between `BallEvent` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ball event belongs to one match
    #[sea_orm(
        belongs_to = "super::cricket_match::Entity",
        from = "Column::MatchId",
        to = "super::cricket_match::Column::Id"
    )]
    Match,
}

impl Related<super::cricket_match::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Match.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Kind of extra awarded on a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraType {
    /// Wide: not a legal ball, not faced by the striker
    Wide,
    /// No-ball: not a legal ball, but faced by the striker
    NoBall,
    /// Leg bye: legal ball, runs not charged to the bowler
    LegBye,
    /// Bye: legal ball, runs not charged to the bowler
    Bye,
}

impl ExtraType {
    /// String representation stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::NoBall => "noball",
            Self::LegBye => "legbye",
            Self::Bye => "bye",
        }
    }

    /// Parses the stored string form, returning None for unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "wide" => Some(Self::Wide),
            "noball" => Some(Self::NoBall),
            "legbye" => Some(Self::LegBye),
            "bye" => Some(Self::Bye),
            _ => None,
        }
    }

    /// Whether this extra nullifies the delivery for over-counting.
    #[must_use]
    pub const fn nullifies_ball(self) -> bool {
        matches!(self, Self::Wide | Self::NoBall)
    }
}

impl std::fmt::Display for ExtraType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a wicket fell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WicketType {
    /// Bowled out
    Bowled,
    /// Caught by a fielder
    Caught,
    /// Leg before wicket
    Lbw,
    /// Run out; not credited to the bowler
    RunOut,
    /// Stumped by the keeper
    Stumped,
    /// Hit wicket
    HitWicket,
}

impl WicketType {
    /// String representation stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bowled => "bowled",
            Self::Caught => "caught",
            Self::Lbw => "lbw",
            Self::RunOut => "runout",
            Self::Stumped => "stumped",
            Self::HitWicket => "hitwicket",
        }
    }

    /// Parses the stored string form, returning None for unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bowled" => Some(Self::Bowled),
            "caught" => Some(Self::Caught),
            "lbw" => Some(Self::Lbw),
            "runout" => Some(Self::RunOut),
            "stumped" => Some(Self::Stumped),
            "hitwicket" => Some(Self::HitWicket),
            _ => None,
        }
    }
}

impl std::fmt::Display for WicketType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Model {
    /// Typed view of `extra_type`.
    #[must_use]
    pub fn extra(&self) -> Option<ExtraType> {
        self.extra_type.as_deref().and_then(ExtraType::parse)
    }

    /// Typed view of `wicket_type`.
    #[must_use]
    pub fn wicket(&self) -> Option<WicketType> {
        self.wicket_type.as_deref().and_then(WicketType::parse)
    }

    /// Whether this delivery counts toward the over (not a wide or no-ball).
    #[must_use]
    pub fn is_legal(&self) -> bool {
        self.extra().is_none_or(|e| !e.nullifies_ball())
    }
}
