//! Tournament standings business logic.
//!
//! Builds the points table from completed matches: two points for a win, one
//! each for a tie or no-result, with net run rate as the tie-break. Net run
//! rate is accumulated from the raw ball events of every completed match a
//! team played, using the same legal-ball rule as the scoring engine.

use crate::{
    entities::{
        BallEvent, CricketMatch, Team, Tournament, ball_event,
        cricket_match::{self, MatchStatus},
        team,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use std::collections::HashMap;

/// One row of the points table.
#[derive(Debug, Clone, PartialEq)]
pub struct StandingsRow {
    /// The team
    pub team_id: i64,
    /// Team name, for display
    pub team_name: String,
    /// Completed matches played
    pub played: i32,
    /// Matches won
    pub won: i32,
    /// Matches lost
    pub lost: i32,
    /// Ties and no-results
    pub tied: i32,
    /// Two per win, one per tie/no-result
    pub points: i32,
    /// Run-rate differential, rounded to 3 decimal places
    pub net_run_rate: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    played: i32,
    won: i32,
    lost: i32,
    tied: i32,
    points: i32,
    runs_scored: i32,
    balls_faced: i32,
    runs_conceded: i32,
    balls_bowled: i32,
}

fn net_run_rate(tally: &Tally) -> f64 {
    let rate_for = if tally.balls_faced > 0 {
        f64::from(tally.runs_scored) / (f64::from(tally.balls_faced) / 6.0)
    } else {
        0.0
    };
    let rate_against = if tally.balls_bowled > 0 {
        f64::from(tally.runs_conceded) / (f64::from(tally.balls_bowled) / 6.0)
    } else {
        0.0
    };
    ((rate_for - rate_against) * 1000.0).round() / 1000.0
}

/// Computes the points table of a tournament.
///
/// Every completed match counts one played for both sides; the winner takes
/// two points, a match with no recorded winner gives both teams one point and
/// a tie. Rows are sorted by points descending, then net run rate descending.
pub async fn points_table(db: &DatabaseConnection, tournament_id: i64) -> Result<Vec<StandingsRow>> {
    Tournament::find_by_id(tournament_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "tournament",
            id: tournament_id,
        })?;

    let teams = Team::find()
        .filter(team::Column::TournamentId.eq(tournament_id))
        .order_by_asc(team::Column::Id)
        .all(db)
        .await?;

    let completed = CricketMatch::find()
        .filter(cricket_match::Column::TournamentId.eq(tournament_id))
        .filter(cricket_match::Column::Status.eq(MatchStatus::Completed.as_str()))
        .all(db)
        .await?;

    let mut tallies: HashMap<i64, Tally> = HashMap::new();

    for fixture in &completed {
        for side in [fixture.team_a_id, fixture.team_b_id] {
            tallies.entry(side).or_default().played += 1;
        }

        match fixture.winning_team_id {
            Some(winner) => {
                let loser = if winner == fixture.team_a_id {
                    fixture.team_b_id
                } else {
                    fixture.team_a_id
                };
                let w = tallies.entry(winner).or_default();
                w.won += 1;
                w.points += 2;
                tallies.entry(loser).or_default().lost += 1;
            }
            None => {
                for side in [fixture.team_a_id, fixture.team_b_id] {
                    let t = tallies.entry(side).or_default();
                    t.tied += 1;
                    t.points += 1;
                }
            }
        }

        let events = BallEvent::find()
            .filter(ball_event::Column::MatchId.eq(fixture.id))
            .all(db)
            .await?;

        for event in &events {
            let bowling_side = if event.batting_team_id == fixture.team_a_id {
                fixture.team_b_id
            } else {
                fixture.team_a_id
            };
            let runs = event.runs_scored + event.extras;
            let legal = event.is_legal();

            let batting = tallies.entry(event.batting_team_id).or_default();
            batting.runs_scored += runs;
            if legal {
                batting.balls_faced += 1;
            }

            let bowling = tallies.entry(bowling_side).or_default();
            bowling.runs_conceded += runs;
            if legal {
                bowling.balls_bowled += 1;
            }
        }
    }

    let mut rows: Vec<StandingsRow> = teams
        .into_iter()
        .map(|t| {
            let tally = tallies.get(&t.id).copied().unwrap_or_default();
            StandingsRow {
                team_id: t.id,
                team_name: t.name,
                played: tally.played,
                won: tally.won,
                lost: tally.lost,
                tied: tally.tied,
                points: tally.points,
                net_run_rate: net_run_rate(&tally),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.points.cmp(&a.points).then_with(|| {
            b.net_run_rate
                .partial_cmp(&a.net_run_rate)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    Ok(rows)
}
