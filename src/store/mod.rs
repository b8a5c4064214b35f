//! Persistence: the in-memory tables, the shared database handle, and the
//! two collaborator traits the bracket generator is written against.

mod database;
mod tables;

pub use database::Database;
pub use tables::Tables;

use crate::models::{MatchId, MatchSlot, Team, TournamentError};

/// Read access to the registered teams.
pub trait TeamDirectory {
    /// All teams in registration order.
    fn all_teams(&self) -> Vec<Team>;
}

/// Write access to the match table.
pub trait MatchStore {
    /// Remove every match. Returns how many were removed.
    fn delete_all(&mut self) -> Result<usize, TournamentError>;

    /// Store one match. Both participants must resolve to an existing team or
    /// an already stored match.
    fn insert(&mut self, slot: MatchSlot) -> Result<MatchId, TournamentError>;
}
