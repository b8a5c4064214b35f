//! Tournament business logic: bracket generation, results, roster import, read models.

mod bracket;
mod results;
mod roster;
mod views;

pub use bracket::{
    generate_bracket, plan_bracket, round_structure, BracketOptions, BracketRequest,
    BracketSummary, TeamOrder, DEFAULT_FINAL_TIME, DEFAULT_MATCH_TIME, DEFAULT_VENUE,
    MAX_SCHEDULED_TEAMS,
};
pub use results::{record_result, MatchResult};
pub use roster::{import_roster, load_roster_file, read_roster};
pub use views::{
    bracket_view, match_view, match_views, round_views, team_details, team_summaries, Bracket,
    MatchView, TeamDetails, TeamSummary,
};
