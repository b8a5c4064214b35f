//! Player and PlayerStatistics data structures.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// Playing role of a cricketer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum PlayerRole {
    Batsman,
    Bowler,
    #[serde(rename = "All-rounder")]
    AllRounder,
    #[serde(rename = "Wicket-keeper")]
    WicketKeeper,
}

/// Career counters for a player. Created zeroed alongside the player.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStatistics {
    pub matches_played: u32,
    pub runs_scored: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub wickets_taken: u32,
    pub balls_bowled: u32,
    pub runs_conceded: u32,
    pub catches: u32,
    pub stumpings: u32,
}

impl PlayerStatistics {
    /// Runs per 100 balls faced; None before the first ball.
    pub fn strike_rate(&self) -> Option<f64> {
        if self.balls_faced == 0 {
            return None;
        }
        Some(f64::from(self.runs_scored) * 100.0 / f64::from(self.balls_faced))
    }

    /// Runs conceded per six-ball over; None before the first ball bowled.
    pub fn economy(&self) -> Option<f64> {
        if self.balls_bowled == 0 {
            return None;
        }
        Some(f64::from(self.runs_conceded) * 6.0 / f64::from(self.balls_bowled))
    }
}

/// A player registered to a team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team_id: TeamId,
    pub role: PlayerRole,
    pub jersey_number: Option<u32>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub statistics: PlayerStatistics,
}

impl Player {
    /// Create a new player on the given team. Statistics start at zero.
    pub fn new(name: impl Into<String>, team_id: TeamId, role: PlayerRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            team_id,
            role,
            jersey_number: None,
            batting_style: None,
            bowling_style: None,
            statistics: PlayerStatistics::default(),
        }
    }
}
