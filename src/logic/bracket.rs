//! Knockout bracket generation: round structure by team count, sequential
//! pairing for the opening round, and feeder-linked slots for later rounds.

use crate::models::{MatchId, MatchSlot, Participant, Round, TeamId, TournamentError};
use crate::store::{MatchStore, TeamDirectory};
use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Teams beyond this many are never scheduled.
pub const MAX_SCHEDULED_TEAMS: usize = 16;

pub const DEFAULT_VENUE: &str = "TBD";
pub const DEFAULT_MATCH_TIME: &str = "14:00";
pub const DEFAULT_FINAL_TIME: &str = "18:00";

/// Rest days after the opening round.
const ROUND_GAP_DAYS: u64 = 2;
/// Rest days before the Final.
const FINAL_GAP_DAYS: u64 = 3;

const UP_TO_4: &[(Round, usize)] = &[(Round::SemiFinal, 2)];
const UP_TO_8: &[(Round, usize)] = &[(Round::Round1, 4), (Round::SemiFinal, 2)];
const UP_TO_16: &[(Round, usize)] = &[(Round::Round1, 8), (Round::Round2, 4), (Round::SemiFinal, 2)];
const OVER_16: &[(Round, usize)] = &[(Round::Round1, 16), (Round::Round2, 8), (Round::SemiFinal, 2)];

/// Rounds before the Final, with their match counts, chosen by team count.
pub fn round_structure(team_count: usize) -> &'static [(Round, usize)] {
    match team_count {
        0..=4 => UP_TO_4,
        5..=8 => UP_TO_8,
        9..=16 => UP_TO_16,
        _ => OVER_16,
    }
}

/// Generation request as submitted by an admin.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct BracketRequest {
    /// `YYYY-MM-DD`.
    pub start_date: Option<String>,
    pub venue: Option<String>,
    /// Start time for every match except the Final.
    pub match_time: Option<String>,
    pub final_match_time: Option<String>,
    /// Delete every existing match before scheduling.
    #[serde(default)]
    pub clear_existing: bool,
}

impl BracketRequest {
    pub fn starting(start_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            ..Self::default()
        }
    }

    /// Validate the request and fill in defaults.
    pub fn options(&self) -> Result<BracketOptions, TournamentError> {
        let raw = self
            .start_date
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(TournamentError::MissingField("start_date"))?;
        let start_date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| TournamentError::InvalidDate(raw.to_string()))?;
        Ok(BracketOptions {
            start_date,
            venue: text_or(self.venue.as_deref(), DEFAULT_VENUE),
            match_time: text_or(self.match_time.as_deref(), DEFAULT_MATCH_TIME),
            final_match_time: text_or(self.final_match_time.as_deref(), DEFAULT_FINAL_TIME),
        })
    }
}

/// Trimmed `value`, or `default` when absent or blank.
fn text_or(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Validated scheduling parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BracketOptions {
    pub start_date: NaiveDate,
    pub venue: String,
    pub match_time: String,
    pub final_match_time: String,
}

/// Order in which teams are paired.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TeamOrder {
    /// Registration order, as returned by the team directory.
    AsListed,
    /// Random draw.
    Shuffled,
}

/// Outcome of a generation call.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketSummary {
    pub message: String,
    pub teams_count: usize,
    pub matches_created: usize,
    pub matches_cleared: usize,
}

/// Venue and kick-off time shared by the slots of one round.
#[derive(Clone, Copy)]
struct Fixture<'a> {
    venue: &'a str,
    time: &'a str,
}

/// Schedule under construction. Threaded by value through each round.
struct Plan {
    start: NaiveDate,
    day_offset: u64,
    previous_round: Vec<MatchId>,
    current_round: Vec<MatchId>,
    slots: Vec<MatchSlot>,
}

impl Plan {
    fn new(start: NaiveDate) -> Self {
        Self {
            start,
            day_offset: 0,
            previous_round: Vec::new(),
            current_round: Vec::new(),
            slots: Vec::new(),
        }
    }

    fn push(
        mut self,
        round: Round,
        team_a: Participant,
        team_b: Participant,
        fixture: Fixture<'_>,
    ) -> Result<Self, TournamentError> {
        let date = self
            .start
            .checked_add_days(Days::new(self.day_offset))
            .ok_or_else(|| TournamentError::InvalidDate(self.start.to_string()))?;
        let mut slot = MatchSlot::scheduled(
            date,
            team_a,
            team_b,
            round,
            Some(fixture.venue.to_string()),
            Some(fixture.time.to_string()),
        );
        slot.match_number = u32::try_from(self.current_round.len() + 1).ok();
        self.current_round.push(slot.id);
        self.slots.push(slot);
        self.day_offset += 1;
        Ok(self)
    }

    fn gap(mut self, days: u64) -> Self {
        self.day_offset += days;
        self
    }

    fn close_round(mut self) -> Self {
        self.previous_round = std::mem::take(&mut self.current_round);
        self
    }

    /// Pair consecutive teams; an odd team out is not scheduled.
    fn opening_round(
        self,
        round: Round,
        match_count: usize,
        teams: &[TeamId],
        fixture: Fixture<'_>,
    ) -> Result<Self, TournamentError> {
        teams
            .chunks_exact(2)
            .take(match_count)
            .try_fold(self, |plan, pair| {
                plan.push(
                    round,
                    Participant::Team(pair[0]),
                    Participant::Team(pair[1]),
                    fixture,
                )
            })
            .map(Plan::close_round)
    }

    /// Slot `i` takes the winners of previous-round matches `2i` and `2i + 1`.
    /// Without both feeders it falls back to the placeholder pair.
    fn fed_round(
        self,
        round: Round,
        match_count: usize,
        placeholders: [Participant; 2],
        fixture: Fixture<'_>,
    ) -> Result<Self, TournamentError> {
        (0..match_count)
            .try_fold(self, |plan, i| {
                let feeders = (
                    plan.previous_round.get(2 * i).copied(),
                    plan.previous_round.get(2 * i + 1).copied(),
                );
                let [team_a, team_b] = match feeders {
                    (Some(a), Some(b)) => [Participant::WinnerOf(a), Participant::WinnerOf(b)],
                    _ => placeholders,
                };
                plan.push(round, team_a, team_b, fixture)
            })
            .map(Plan::close_round)
    }
}

/// Build the full schedule for `teams` (in pairing order) without touching any store.
///
/// The opening round of the structure gets real pairings, one match per day.
/// After a two-day gap each later round follows one match per day, then the
/// Final after a further three-day gap.
pub fn plan_bracket(
    teams: &[TeamId],
    options: &BracketOptions,
) -> Result<Vec<MatchSlot>, TournamentError> {
    if teams.len() < 2 {
        return Err(TournamentError::InsufficientTeams { found: teams.len() });
    }
    if teams.len() > MAX_SCHEDULED_TEAMS {
        log::warn!(
            "{} teams registered; only the first {} are scheduled",
            teams.len(),
            MAX_SCHEDULED_TEAMS
        );
    }
    let pool = &teams[..teams.len().min(MAX_SCHEDULED_TEAMS)];
    let placeholders = [Participant::Team(teams[0]), Participant::Team(teams[1])];
    let regular = Fixture {
        venue: &options.venue,
        time: &options.match_time,
    };
    let final_fixture = Fixture {
        venue: &options.venue,
        time: &options.final_match_time,
    };

    let (&(opening, opening_count), later) = round_structure(teams.len())
        .split_first()
        .ok_or(TournamentError::InsufficientTeams { found: teams.len() })?;

    let plan = Plan::new(options.start_date)
        .opening_round(opening, opening_count, pool, regular)?
        .gap(ROUND_GAP_DAYS);
    let plan = later.iter().try_fold(plan, |plan, &(round, count)| {
        plan.fed_round(round, count, placeholders, regular)
    })?;
    let plan = plan
        .gap(FINAL_GAP_DAYS)
        .fed_round(Round::Final, 1, placeholders, final_fixture)?;

    Ok(plan.slots)
}

/// Validate, optionally purge, and store a freshly planned bracket.
///
/// Validation happens before any write. This function does not roll back on its
/// own; run it inside [`crate::store::Database::transaction`] for atomicity.
pub fn generate_bracket<S>(
    store: &mut S,
    request: &BracketRequest,
    order: TeamOrder,
) -> Result<BracketSummary, TournamentError>
where
    S: TeamDirectory + MatchStore,
{
    let options = request.options()?;
    let mut teams: Vec<TeamId> = store.all_teams().iter().map(|t| t.id).collect();
    if order == TeamOrder::Shuffled {
        teams.shuffle(&mut rand::thread_rng());
    }
    let slots = plan_bracket(&teams, &options)?;

    let matches_cleared = if request.clear_existing {
        store.delete_all()?
    } else {
        0
    };
    let matches_created = slots.len();
    for slot in slots {
        store.insert(slot)?;
    }

    log::info!(
        "Generated bracket for {} teams from {}: {} matches created, {} cleared",
        teams.len(),
        options.start_date,
        matches_created,
        matches_cleared
    );
    Ok(BracketSummary {
        message: "Tournament bracket generated successfully".to_string(),
        teams_count: teams.len(),
        matches_created,
        matches_cleared,
    })
}
