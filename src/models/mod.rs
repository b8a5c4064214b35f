//! Data structures for the cricket tournament: teams, players, match slots, settings.

mod game;
mod player;
mod team;
mod tournament;

pub use game::{day_name, MatchId, MatchSlot, MatchStatus, Participant, Round};
pub use player::{Player, PlayerId, PlayerRole, PlayerStatistics};
pub use team::{Team, TeamId};
pub use tournament::{ErrorKind, TournamentError, TournamentSettings};
