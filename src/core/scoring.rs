//! Scoring business logic - Aggregates ball events into scores and statistics.
//!
//! The per-match event log is append-only: deliveries are recorded one at a
//! time and the only removal is undo-most-recent. Aggregation queries derive
//! the live score and per-player batting/bowling tables from the stored
//! events; nothing is cached, so an undo is immediately reflected everywhere.

use crate::{
    entities::{
        BallEvent, CricketMatch,
        ball_event::{self, ExtraType, WicketType},
        cricket_match::{self, MatchStatus},
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Input for one recorded delivery.
#[derive(Debug, Clone)]
pub struct NewBallEvent {
    /// Match the delivery belongs to
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
    /// Whether a wicket fell
    pub is_wicket: bool,
    /// How the wicket fell
    pub wicket_type: Option<WicketType>,
    /// Extra runs awarded
    pub extras: i32,
    /// Kind of extra, None for a fair delivery
    pub extra_type: Option<ExtraType>,
}

/// Score of one innings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InningsScore {
    /// Total runs including extras
    pub runs: i32,
    /// Wickets fallen
    pub wickets: i32,
    /// Deliveries that counted toward the over
    pub legal_balls: i32,
    /// Overs in cricket notation, e.g. 7 legal balls is `"1.1"`
    pub overs: String,
}

/// Live score of a match, both innings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchScore {
    /// First innings
    pub innings1: InningsScore,
    /// Second innings
    pub innings2: InningsScore,
}

/// Batting line for one striker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattingStats {
    /// The striker
    pub player_id: i64,
    /// Runs off the bat
    pub runs: i32,
    /// Deliveries faced (wides excluded, no-balls included)
    pub balls_faced: i32,
    /// Deliveries scoring exactly four
    pub fours: i32,
    /// Deliveries scoring exactly six
    pub sixes: i32,
}

/// Bowling line for one bowler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BowlingStats {
    /// The bowler
    pub player_id: i64,
    /// Runs charged to the bowler (bat runs plus wide/no-ball extras)
    pub runs_conceded: i32,
    /// Deliveries that counted toward the over
    pub legal_balls: i32,
    /// Wickets credited (run-outs excluded)
    pub wickets: i32,
}

impl BowlingStats {
    /// Overs bowled in cricket notation.
    #[must_use]
    pub fn overs(&self) -> String {
        overs_display(self.legal_balls)
    }
}

/// Batting and bowling tables for one match.
#[derive(Debug, Clone)]
pub struct MatchStats {
    /// Batting lines, best score first
    pub batting: Vec<BattingStats>,
    /// Bowling lines, most wickets first
    pub bowling: Vec<BowlingStats>,
}

/// Formats a legal-ball count in cricket overs notation: completed overs,
/// a dot, then the balls of the unfinished over (7 balls is `"1.1"`).
#[must_use]
pub fn overs_display(legal_balls: i32) -> String {
    format!("{}.{}", legal_balls / 6, legal_balls % 6)
}

/// Records one delivery into a match's event log.
///
/// Pure append: no validation beyond required-field sanity (innings 1 or 2,
/// non-negative runs and extras, match exists). Recording a ball against a
/// scheduled match moves it to live.
pub async fn record_ball_event(
    db: &DatabaseConnection,
    event: NewBallEvent,
) -> Result<ball_event::Model> {
    if !(1..=2).contains(&event.innings) {
        return Err(Error::Validation {
            message: format!("innings must be 1 or 2, got {}", event.innings),
        });
    }
    if event.runs_scored < 0 || event.extras < 0 {
        return Err(Error::Validation {
            message: "runs and extras cannot be negative".to_string(),
        });
    }

    let txn = db.begin().await?;

    let cricket_match = CricketMatch::find_by_id(event.match_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "match",
            id: event.match_id,
        })?;

    let is_valid = event.extra_type.is_none_or(|e| !e.nullifies_ball());

    let model = ball_event::ActiveModel {
        match_id: Set(event.match_id),
        innings: Set(event.innings),
        over_number: Set(event.over_number),
        ball_number: Set(event.ball_number),
        bowler_id: Set(event.bowler_id),
        striker_id: Set(event.striker_id),
        non_striker_id: Set(event.non_striker_id),
        batting_team_id: Set(event.batting_team_id),
        runs_scored: Set(event.runs_scored),
        is_wicket: Set(event.is_wicket),
        wicket_type: Set(event.wicket_type.map(|w| w.as_str().to_string())),
        extras: Set(event.extras),
        extra_type: Set(event.extra_type.map(|e| e.as_str().to_string())),
        is_valid_ball: Set(is_valid),
        ..Default::default()
    };
    let inserted = model.insert(&txn).await?;

    if cricket_match.status == MatchStatus::Scheduled.as_str() {
        let mut active: cricket_match::ActiveModel = cricket_match.into();
        active.status = Set(MatchStatus::Live.as_str().to_string());
        active.update(&txn).await?;
    }

    txn.commit().await?;
    Ok(inserted)
}

/// Removes the most recently inserted ball of a match.
///
/// "Most recent" is by insertion id, not over order, so a correction entered
/// out of sequence is undone before older balls.
pub async fn undo_last_ball(db: &DatabaseConnection, match_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let last = BallEvent::find()
        .filter(ball_event::Column::MatchId.eq(match_id))
        .order_by_desc(ball_event::Column::Id)
        .one(&txn)
        .await?
        .ok_or(Error::NoBallsRecorded { match_id })?;

    last.delete(&txn).await?;
    txn.commit().await?;
    Ok(())
}

/// Fetches a match's events in insertion order.
pub async fn events_for_match(
    db: &DatabaseConnection,
    match_id: i64,
) -> Result<Vec<ball_event::Model>> {
    BallEvent::find()
        .filter(ball_event::Column::MatchId.eq(match_id))
        .order_by_asc(ball_event::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

fn innings_score(events: &[ball_event::Model], innings: i32) -> InningsScore {
    let mut runs = 0;
    let mut wickets = 0;
    let mut legal_balls = 0;

    for event in events.iter().filter(|e| e.innings == innings) {
        runs += event.runs_scored + event.extras;
        if event.is_wicket {
            wickets += 1;
        }
        if event.is_legal() {
            legal_balls += 1;
        }
    }

    InningsScore {
        runs,
        wickets,
        legal_balls,
        overs: overs_display(legal_balls),
    }
}

/// Computes the live score of a match, both innings.
pub async fn live_score(db: &DatabaseConnection, match_id: i64) -> Result<MatchScore> {
    CricketMatch::find_by_id(match_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "match",
            id: match_id,
        })?;

    let events = events_for_match(db, match_id).await?;
    Ok(MatchScore {
        innings1: innings_score(&events, 1),
        innings2: innings_score(&events, 2),
    })
}

/// Aggregates batting lines per striker over a set of events.
///
/// Wides are not faced deliveries; no-balls are. Fours and sixes count
/// deliveries whose bat runs are exactly 4 or 6. The result is sorted by
/// runs descending; ties keep the order strikers first appeared.
#[must_use]
pub fn batting_stats(events: &[ball_event::Model]) -> Vec<BattingStats> {
    let mut stats: Vec<BattingStats> = Vec::new();

    for event in events {
        let idx = match stats.iter().position(|s| s.player_id == event.striker_id) {
            Some(i) => i,
            None => {
                stats.push(BattingStats {
                    player_id: event.striker_id,
                    runs: 0,
                    balls_faced: 0,
                    fours: 0,
                    sixes: 0,
                });
                stats.len() - 1
            }
        };
        let entry = &mut stats[idx];

        entry.runs += event.runs_scored;
        if event.extra() != Some(ExtraType::Wide) {
            entry.balls_faced += 1;
        }
        if event.runs_scored == 4 {
            entry.fours += 1;
        }
        if event.runs_scored == 6 {
            entry.sixes += 1;
        }
    }

    stats.sort_by(|a, b| b.runs.cmp(&a.runs));
    stats
}

/// Aggregates bowling lines per bowler over a set of events.
///
/// Wide and no-ball extras are charged to the bowler; byes and leg-byes are
/// not. Run-outs are not credited as wickets. The result is sorted by
/// wickets descending; ties keep the order bowlers first appeared.
#[must_use]
pub fn bowling_stats(events: &[ball_event::Model]) -> Vec<BowlingStats> {
    let mut stats: Vec<BowlingStats> = Vec::new();

    for event in events {
        let idx = match stats.iter().position(|s| s.player_id == event.bowler_id) {
            Some(i) => i,
            None => {
                stats.push(BowlingStats {
                    player_id: event.bowler_id,
                    runs_conceded: 0,
                    legal_balls: 0,
                    wickets: 0,
                });
                stats.len() - 1
            }
        };
        let entry = &mut stats[idx];

        entry.runs_conceded += event.runs_scored;
        match event.extra() {
            Some(ExtraType::Wide | ExtraType::NoBall) => entry.runs_conceded += event.extras,
            _ => entry.legal_balls += 1,
        }
        if event.is_wicket && event.wicket() != Some(WicketType::RunOut) {
            entry.wickets += 1;
        }
    }

    stats.sort_by(|a, b| b.wickets.cmp(&a.wickets));
    stats
}

/// Computes the batting and bowling tables for a match.
pub async fn match_stats(db: &DatabaseConnection, match_id: i64) -> Result<MatchStats> {
    CricketMatch::find_by_id(match_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "match",
            id: match_id,
        })?;

    let events = events_for_match(db, match_id).await?;
    Ok(MatchStats {
        batting: batting_stats(&events),
        bowling: bowling_stats(&events),
    })
}
