//! Read models for the API: matches with team names, the bracket, team listings.

use crate::models::{MatchSlot, Participant, Player, Round, Team, TeamId};
use crate::store::Tables;
use serde::Serialize;
use std::collections::BTreeMap;

/// A match with display names for both sides and the winner.
#[derive(Clone, Debug, Serialize)]
pub struct MatchView {
    #[serde(flatten)]
    pub slot: MatchSlot,
    pub team_a_name: String,
    pub team_b_name: String,
    /// Set once either side has resolved to a real team.
    pub team_a_id: Option<TeamId>,
    pub team_b_id: Option<TeamId>,
    pub winner_name: Option<String>,
}

/// Matches grouped by round, Round 1 first. Every round is present, possibly empty.
pub type Bracket = BTreeMap<Round, Vec<MatchView>>;

fn team_name(tables: &Tables, id: TeamId) -> String {
    tables
        .team(id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "Unknown team".to_string())
}

/// "Winner of Round 1 match 3" for an unresolved side. Generated matches carry
/// their number within their own bracket; hand-made ones are numbered by
/// position in the round.
fn participant_label(tables: &Tables, participant: Participant) -> String {
    if let Some(id) = tables.resolve(participant) {
        return team_name(tables, id);
    }
    match participant {
        Participant::Team(id) => team_name(tables, id),
        Participant::WinnerOf(feeder) => match tables.match_slot(feeder) {
            Some(m) => {
                let number = m.match_number.map(|n| n as usize).unwrap_or_else(|| {
                    tables
                        .matches_in_round(m.round)
                        .iter()
                        .position(|other| other.id == feeder)
                        .map_or(0, |i| i + 1)
                });
                format!("Winner of {} match {}", m.round, number)
            }
            None => "TBD".to_string(),
        },
    }
}

pub fn match_view(tables: &Tables, slot: &MatchSlot) -> MatchView {
    MatchView {
        slot: slot.clone(),
        team_a_name: participant_label(tables, slot.team_a),
        team_b_name: participant_label(tables, slot.team_b),
        team_a_id: tables.resolve(slot.team_a),
        team_b_id: tables.resolve(slot.team_b),
        winner_name: slot.winner_id.map(|id| team_name(tables, id)),
    }
}

/// All matches ordered by date, then time.
pub fn match_views(tables: &Tables) -> Vec<MatchView> {
    tables
        .matches_by_date()
        .into_iter()
        .map(|m| match_view(tables, m))
        .collect()
}

pub fn round_views(tables: &Tables, round: Round) -> Vec<MatchView> {
    tables
        .matches_in_round(round)
        .into_iter()
        .map(|m| match_view(tables, m))
        .collect()
}

pub fn bracket_view(tables: &Tables) -> Bracket {
    Round::ALL
        .into_iter()
        .map(|round| (round, round_views(tables, round)))
        .collect()
}

/// Team row for listings.
#[derive(Clone, Debug, Serialize)]
pub struct TeamSummary {
    #[serde(flatten)]
    pub team: Team,
    pub captain_name: Option<String>,
    pub player_count: usize,
}

/// A team with its squad.
#[derive(Clone, Debug, Serialize)]
pub struct TeamDetails {
    #[serde(flatten)]
    pub team: Team,
    pub captain_name: Option<String>,
    pub players: Vec<Player>,
}

fn captain_name(tables: &Tables, team: &Team) -> Option<String> {
    team.captain_id
        .and_then(|id| tables.player(id))
        .map(|p| p.name.clone())
}

pub fn team_summaries(tables: &Tables) -> Vec<TeamSummary> {
    tables
        .teams()
        .iter()
        .map(|team| TeamSummary {
            team: team.clone(),
            captain_name: captain_name(tables, team),
            player_count: tables.team_players(team.id).len(),
        })
        .collect()
}

pub fn team_details(tables: &Tables, id: TeamId) -> Option<TeamDetails> {
    let team = tables.team(id)?;
    Some(TeamDetails {
        team: team.clone(),
        captain_name: captain_name(tables, team),
        players: tables.team_players(id).into_iter().cloned().collect(),
    })
}
