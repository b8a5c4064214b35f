//! Cricket knockout tournament web app: library with models, storage and business logic.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::Config;
pub use logic::{
    bracket_view, generate_bracket, import_roster, plan_bracket, read_roster, record_result,
    round_structure, BracketOptions, BracketRequest, BracketSummary, MatchResult, MatchView,
    TeamOrder,
};
pub use models::{
    ErrorKind, MatchId, MatchSlot, MatchStatus, Participant, Player, PlayerId, PlayerRole,
    PlayerStatistics, Round, Team, TeamId, TournamentError, TournamentSettings,
};
pub use store::{Database, MatchStore, Tables, TeamDirectory};
