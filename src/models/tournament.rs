//! TournamentSettings and TournamentError.

use crate::models::game::MatchId;
use crate::models::player::PlayerId;
use crate::models::team::TeamId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How an error should be reported to the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input; nothing was changed.
    Validation,
    NotFound,
    /// Store-level failure; the enclosing transaction was rolled back.
    Persistence,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 2 teams exist, so no bracket can be built.
    InsufficientTeams { found: usize },
    /// Start date missing or not a `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// A required request field was absent or blank.
    MissingField(&'static str),
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName(String),
    /// The submitted winner is not a known team of the match.
    InvalidWinner(TeamId),
    TeamNotFound(TeamId),
    PlayerNotFound(PlayerId),
    MatchNotFound(MatchId),
    /// A match slot references a team or match that does not exist.
    UnknownParticipant(MatchId),
    /// A match with this id is already stored.
    DuplicateMatch(MatchId),
    /// Later matches wait on this match's winner, so it cannot be removed.
    MatchHasDependants(MatchId),
    /// The team is a side or winner of a stored match, so it cannot be removed.
    TeamInUse(TeamId),
    /// The store lock was poisoned by a panicking writer.
    StorePoisoned,
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        use TournamentError::*;
        match self {
            InsufficientTeams { .. }
            | InvalidDate(_)
            | MissingField(_)
            | DuplicateTeamName(_)
            | InvalidWinner(_)
            | MatchHasDependants(_)
            | TeamInUse(_) => ErrorKind::Validation,
            TeamNotFound(_) | PlayerNotFound(_) | MatchNotFound(_) => ErrorKind::NotFound,
            UnknownParticipant(_) | DuplicateMatch(_) | StorePoisoned => ErrorKind::Persistence,
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientTeams { found } => {
                write!(f, "At least 2 teams required (found {})", found)
            }
            TournamentError::InvalidDate(raw) => {
                write!(f, "Invalid start date '{}', expected YYYY-MM-DD", raw)
            }
            TournamentError::MissingField(field) => write!(f, "Missing required field: {}", field),
            TournamentError::DuplicateTeamName(name) => {
                write!(f, "A team named '{}' already exists", name)
            }
            TournamentError::InvalidWinner(_) => write!(f, "Winner must be one of the match's teams"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::UnknownParticipant(id) => {
                write!(f, "Match {} references an unknown team or match", id)
            }
            TournamentError::DuplicateMatch(id) => write!(f, "Match {} already exists", id),
            TournamentError::MatchHasDependants(id) => {
                write!(f, "Match {} feeds later matches; delete those first", id)
            }
            TournamentError::TeamInUse(_) => {
                write!(f, "Team is scheduled in matches; delete those first")
            }
            TournamentError::StorePoisoned => write!(f, "Store lock poisoned"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Tournament-wide settings shown on the public pages.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentSettings {
    pub tournament_name: String,
    pub total_teams: u32,
    pub tournament_format: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for TournamentSettings {
    fn default() -> Self {
        Self {
            tournament_name: "NPL Cricket Tournament".to_string(),
            total_teams: 8,
            tournament_format: Some("knockout".to_string()),
            start_date: None,
            end_date: None,
        }
    }
}

impl TournamentSettings {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            tournament_name: name.into(),
            ..Self::default()
        }
    }
}
