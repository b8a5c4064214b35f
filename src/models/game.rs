//! MatchSlot, Participant, and Round for knockout fixtures.

use crate::models::team::TeamId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Elimination stage. Ordered by depth: Round 1 first, Final last.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Round {
    #[serde(rename = "Round 1")]
    Round1,
    #[serde(rename = "Round 2")]
    Round2,
    #[serde(rename = "Semi-Final")]
    SemiFinal,
    #[serde(rename = "Final")]
    Final,
}

impl Round {
    pub const ALL: [Round; 4] = [Round::Round1, Round::Round2, Round::SemiFinal, Round::Final];

    pub fn name(self) -> &'static str {
        match self {
            Round::Round1 => "Round 1",
            Round::Round2 => "Round 2",
            Round::SemiFinal => "Semi-Final",
            Round::Final => "Final",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Round {
    type Err = String;

    /// Accepts the display name ("Semi-Final") case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Round::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown round: {}", s))
    }
}

/// One side of a match: a known team, or the winner of an earlier match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Participant {
    Team(TeamId),
    WinnerOf(MatchId),
}

impl Participant {
    pub fn team_id(self) -> Option<TeamId> {
        match self {
            Participant::Team(id) => Some(id),
            Participant::WinnerOf(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Completed,
}

/// A scheduled fixture plus its result once played.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchSlot {
    pub id: MatchId,
    pub match_date: NaiveDate,
    /// Weekday name of `match_date` ("Monday", ...).
    pub match_day: String,
    pub team_a: Participant,
    pub team_b: Participant,
    pub venue: Option<String>,
    pub match_time: Option<String>,
    pub round: Round,
    /// 1-based position within its round of the bracket it was generated in.
    #[serde(default)]
    pub match_number: Option<u32>,
    pub status: MatchStatus,
    /// None until a result is recorded.
    pub winner_id: Option<TeamId>,
    pub team_a_score: Option<String>,
    pub team_b_score: Option<String>,
    pub result_summary: Option<String>,
}

impl MatchSlot {
    /// New scheduled match; the day name is derived from the date.
    pub fn scheduled(
        match_date: NaiveDate,
        team_a: Participant,
        team_b: Participant,
        round: Round,
        venue: Option<String>,
        match_time: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_date,
            match_day: day_name(match_date),
            team_a,
            team_b,
            venue,
            match_time,
            round,
            match_number: None,
            status: MatchStatus::Scheduled,
            winner_id: None,
            team_a_score: None,
            team_b_score: None,
            result_summary: None,
        }
    }

    pub fn participants(&self) -> [Participant; 2] {
        [self.team_a, self.team_b]
    }

    /// True if either side waits on the result of `match_id`.
    pub fn depends_on(&self, match_id: MatchId) -> bool {
        self.participants()
            .contains(&Participant::WinnerOf(match_id))
    }
}

/// Full English weekday name for a date.
pub fn day_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}
