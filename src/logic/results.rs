//! Result entry and advancement of winners into later rounds.

use crate::models::{MatchId, MatchStatus, TeamId, TournamentError};
use crate::store::Tables;
use serde::Deserialize;

/// Result of a played match.
#[derive(Clone, Debug, Deserialize)]
pub struct MatchResult {
    pub winner_id: TeamId,
    /// Free text, e.g. "156/7 (20)".
    pub team_a_score: Option<String>,
    pub team_b_score: Option<String>,
    pub result_summary: Option<String>,
}

impl MatchResult {
    pub fn winner(winner_id: TeamId) -> Self {
        Self {
            winner_id,
            team_a_score: None,
            team_b_score: None,
            result_summary: None,
        }
    }
}

/// Record a result and mark the match completed.
///
/// The winner must be the team one of the two sides currently resolves to.
/// Returns the ids of later matches that wait on this one; their `WinnerOf`
/// side now resolves to the winner. Recording again overwrites the previous
/// result, and dependants follow the new winner.
pub fn record_result(
    tables: &mut Tables,
    match_id: MatchId,
    result: MatchResult,
) -> Result<Vec<MatchId>, TournamentError> {
    let slot = tables
        .match_slot(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let is_side = slot
        .participants()
        .iter()
        .any(|&p| tables.resolve(p) == Some(result.winner_id));
    if !is_side {
        return Err(TournamentError::InvalidWinner(result.winner_id));
    }

    let slot = tables
        .match_slot_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    let previous_winner = slot.winner_id.replace(result.winner_id);
    slot.team_a_score = result.team_a_score;
    slot.team_b_score = result.team_b_score;
    slot.result_summary = result.result_summary;
    slot.status = MatchStatus::Completed;

    let dependants: Vec<MatchId> = tables
        .matches()
        .iter()
        .filter(|m| m.depends_on(match_id))
        .map(|m| m.id)
        .collect();
    if previous_winner.is_some_and(|w| w != result.winner_id) {
        for id in &dependants {
            let already_played = tables
                .match_slot(*id)
                .is_some_and(|m| m.status == MatchStatus::Completed);
            if already_played {
                log::warn!("Match {} was completed before its feeder {} changed winner", id, match_id);
            }
        }
    }
    log::info!(
        "Recorded result for match {}: winner {}, {} dependant match(es)",
        match_id,
        result.winner_id,
        dependants.len()
    );
    Ok(dependants)
}
