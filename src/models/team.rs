//! Team data structure.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in match slots and lookups).
pub type TeamId = Uuid;

/// A team entered in the tournament.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub coach_name: Option<String>,
    pub home_ground: Option<String>,
    /// Must be one of this team's players when set.
    pub captain_id: Option<PlayerId>,
}

impl Team {
    /// Create a new team with the given name. Optional details start empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coach_name: None,
            home_ground: None,
            captain_id: None,
        }
    }

    pub fn with_details(
        name: impl Into<String>,
        coach_name: Option<String>,
        home_ground: Option<String>,
    ) -> Self {
        Self {
            coach_name,
            home_ground,
            ..Self::new(name)
        }
    }
}
