//! Integration tests for bracket generation: round structure, dates, placeholders, purge.

use chrono::NaiveDate;
use cricket_tournament_web::{
    generate_bracket, plan_bracket, round_structure, BracketRequest, Database, MatchId, MatchSlot,
    MatchStatus, MatchStore, Participant, Round, Tables, Team, TeamDirectory, TeamId, TeamOrder,
    TournamentError,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn tables_with_teams(n: usize) -> Tables {
    let mut tables = Tables::default();
    for i in 0..n {
        tables.insert_team(Team::new(format!("Team {i}"))).unwrap();
    }
    tables
}

fn team_ids(tables: &Tables) -> Vec<TeamId> {
    tables.teams().iter().map(|t| t.id).collect()
}

fn plan(n: usize, start: &str) -> (Vec<TeamId>, Vec<MatchSlot>) {
    let ids: Vec<TeamId> = (0..n).map(|i| Team::new(format!("T{i}")).id).collect();
    let options = BracketRequest::starting(start).options().unwrap();
    let slots = plan_bracket(&ids, &options).unwrap();
    (ids, slots)
}

fn in_round(slots: &[MatchSlot], round: Round) -> Vec<&MatchSlot> {
    slots.iter().filter(|m| m.round == round).collect()
}

#[test]
fn round_structure_follows_team_count_table() {
    assert_eq!(round_structure(2), &[(Round::SemiFinal, 2)]);
    assert_eq!(round_structure(4), &[(Round::SemiFinal, 2)]);
    assert_eq!(round_structure(5), &[(Round::Round1, 4), (Round::SemiFinal, 2)]);
    assert_eq!(round_structure(8), &[(Round::Round1, 4), (Round::SemiFinal, 2)]);
    assert_eq!(
        round_structure(9),
        &[(Round::Round1, 8), (Round::Round2, 4), (Round::SemiFinal, 2)]
    );
    assert_eq!(
        round_structure(16),
        &[(Round::Round1, 8), (Round::Round2, 4), (Round::SemiFinal, 2)]
    );
    assert_eq!(
        round_structure(17),
        &[(Round::Round1, 16), (Round::Round2, 8), (Round::SemiFinal, 2)]
    );
}

#[test]
fn two_teams_get_semi_final_and_duplicate_final() {
    let (ids, slots) = plan(2, "2024-01-01");
    assert_eq!(slots.len(), 2);

    let semi = in_round(&slots, Round::SemiFinal);
    let fin = in_round(&slots, Round::Final);
    assert_eq!(semi.len(), 1);
    assert_eq!(fin.len(), 1);
    let pair = [Participant::Team(ids[0]), Participant::Team(ids[1])];
    assert_eq!(semi[0].participants(), pair);
    assert_eq!(fin[0].participants(), pair);
}

#[test]
fn eight_teams_schedule_dates_and_pairings() {
    let (ids, slots) = plan(8, "2024-01-01");
    assert_eq!(slots.len(), 7);

    let round_1 = in_round(&slots, Round::Round1);
    assert_eq!(round_1.len(), 4);
    for (k, m) in round_1.iter().enumerate() {
        assert_eq!(m.match_date, date("2024-01-01") + chrono::Days::new(k as u64));
        assert_eq!(m.team_a, Participant::Team(ids[2 * k]));
        assert_eq!(m.team_b, Participant::Team(ids[2 * k + 1]));
        assert_eq!(m.match_time.as_deref(), Some("14:00"));
        assert_eq!(m.venue.as_deref(), Some("TBD"));
        assert_eq!(m.status, MatchStatus::Scheduled);
    }
    assert_eq!(round_1[0].match_day, "Monday");
    assert_eq!(round_1[3].match_date, date("2024-01-04"));

    // Counter stood at day 4 after Round 1; the gap moves it to day 6.
    let semi = in_round(&slots, Round::SemiFinal);
    assert_eq!(semi.len(), 2);
    assert_eq!(semi[0].match_date, date("2024-01-07"));
    assert_eq!(semi[1].match_date, date("2024-01-08"));
    assert_eq!(semi[0].team_a, Participant::WinnerOf(round_1[0].id));
    assert_eq!(semi[0].team_b, Participant::WinnerOf(round_1[1].id));
    assert_eq!(semi[1].team_a, Participant::WinnerOf(round_1[2].id));
    assert_eq!(semi[1].team_b, Participant::WinnerOf(round_1[3].id));

    let fin = in_round(&slots, Round::Final);
    assert_eq!(fin.len(), 1);
    assert_eq!(fin[0].match_date, date("2024-01-12"));
    assert_eq!(fin[0].match_day, "Friday");
    assert_eq!(fin[0].match_time.as_deref(), Some("18:00"));
    assert_eq!(fin[0].team_a, Participant::WinnerOf(semi[0].id));
    assert_eq!(fin[0].team_b, Participant::WinnerOf(semi[1].id));
}

#[test]
fn dates_never_decrease_in_generation_order() {
    for n in [2, 3, 5, 8, 9, 13, 16, 20] {
        let (_, slots) = plan(n, "2024-02-27");
        for pair in slots.windows(2) {
            assert!(pair[0].match_date <= pair[1].match_date, "n = {n}");
        }
        assert_eq!(slots.last().unwrap().round, Round::Final);
    }
}

#[test]
fn odd_team_out_is_not_scheduled() {
    let (ids, slots) = plan(5, "2024-01-01");
    assert_eq!(in_round(&slots, Round::Round1).len(), 2);
    let referenced = slots
        .iter()
        .flat_map(|m| m.participants())
        .any(|p| p == Participant::Team(ids[4]));
    assert!(!referenced);
}

#[test]
fn semi_final_without_feeders_uses_placeholder_pair() {
    let (ids, slots) = plan(5, "2024-01-01");
    let semi = in_round(&slots, Round::SemiFinal);
    assert!(matches!(semi[0].team_a, Participant::WinnerOf(_)));
    assert_eq!(
        semi[1].participants(),
        [Participant::Team(ids[0]), Participant::Team(ids[1])]
    );
}

#[test]
fn twenty_teams_are_capped_at_sixteen() {
    let (ids, slots) = plan(20, "2024-01-01");
    assert_eq!(in_round(&slots, Round::Round1).len(), 8);
    for extra in &ids[16..] {
        let referenced = slots
            .iter()
            .flat_map(|m| m.participants())
            .any(|p| p == Participant::Team(*extra));
        assert!(!referenced);
    }
}

#[test]
fn custom_venue_and_times_are_applied() {
    let ids: Vec<TeamId> = (0..4).map(|i| Team::new(format!("T{i}")).id).collect();
    let request = BracketRequest {
        venue: Some("Kirtipur".to_string()),
        match_time: Some("09:30".to_string()),
        final_match_time: Some("19:00".to_string()),
        ..BracketRequest::starting("2024-03-01")
    };
    let slots = plan_bracket(&ids, &request.options().unwrap()).unwrap();
    assert!(slots.iter().all(|m| m.venue.as_deref() == Some("Kirtipur")));
    for m in &slots {
        let expected = if m.round == Round::Final { "19:00" } else { "09:30" };
        assert_eq!(m.match_time.as_deref(), Some(expected));
    }
}

#[test]
fn malformed_request_body_is_a_decode_error() {
    let bad = serde_json::from_str::<BracketRequest>(
        r#"{"start_date": "2024-01-01", "clear_existing": "yes"}"#,
    );
    assert!(bad.is_err());

    let request: BracketRequest =
        serde_json::from_str(r#"{"start_date": "2024-01-01", "venue": "Kirtipur"}"#).unwrap();
    assert!(!request.clear_existing);
    assert_eq!(request.options().unwrap().venue, "Kirtipur");
}

#[test]
fn generated_matches_are_numbered_within_each_round() {
    let (_, slots) = plan(8, "2024-01-01");
    let numbers: Vec<_> = in_round(&slots, Round::Round1)
        .iter()
        .map(|m| m.match_number)
        .collect();
    assert_eq!(numbers, [Some(1), Some(2), Some(3), Some(4)]);
    assert_eq!(in_round(&slots, Round::Final)[0].match_number, Some(1));
}

#[test]
fn fewer_than_two_teams_is_rejected_without_side_effects() {
    for n in [0, 1] {
        let mut tables = tables_with_teams(n);
        let request = BracketRequest {
            clear_existing: true,
            ..BracketRequest::starting("2024-01-01")
        };
        let result = generate_bracket(&mut tables, &request, TeamOrder::AsListed);
        assert_eq!(result, Err(TournamentError::InsufficientTeams { found: n }));
        assert!(tables.matches().is_empty());
    }
}

#[test]
fn invalid_or_missing_date_is_rejected_before_purge() {
    let mut tables = tables_with_teams(4);
    generate_bracket(&mut tables, &BracketRequest::starting("2024-01-01"), TeamOrder::AsListed)
        .unwrap();
    let existing = tables.matches().len();

    let bad = BracketRequest {
        clear_existing: true,
        ..BracketRequest::starting("2024-13-45")
    };
    assert!(matches!(
        generate_bracket(&mut tables, &bad, TeamOrder::AsListed),
        Err(TournamentError::InvalidDate(_))
    ));
    let missing = BracketRequest {
        clear_existing: true,
        ..BracketRequest::default()
    };
    assert_eq!(
        generate_bracket(&mut tables, &missing, TeamOrder::AsListed),
        Err(TournamentError::MissingField("start_date"))
    );
    assert_eq!(tables.matches().len(), existing);
}

#[test]
fn clear_existing_purges_previous_matches() {
    let mut tables = tables_with_teams(8);
    let first = generate_bracket(&mut tables, &BracketRequest::starting("2024-01-01"), TeamOrder::AsListed)
        .unwrap();
    let old_ids: Vec<_> = tables.matches().iter().map(|m| m.id).collect();

    let request = BracketRequest {
        clear_existing: true,
        ..BracketRequest::starting("2024-06-01")
    };
    let summary = generate_bracket(&mut tables, &request, TeamOrder::AsListed).unwrap();
    assert_eq!(summary.matches_cleared, first.matches_created);
    assert_eq!(tables.matches().len(), summary.matches_created);
    assert!(tables.matches().iter().all(|m| !old_ids.contains(&m.id)));
}

#[test]
fn generating_twice_without_purge_duplicates_matches() {
    let mut tables = tables_with_teams(8);
    let request = BracketRequest::starting("2024-01-01");
    let summary = generate_bracket(&mut tables, &request, TeamOrder::AsListed).unwrap();
    generate_bracket(&mut tables, &request, TeamOrder::AsListed).unwrap();
    assert_eq!(summary.teams_count, 8);
    assert_eq!(tables.matches().len(), 2 * summary.matches_created);
}

#[test]
fn shuffled_order_still_schedules_every_pair() {
    let mut tables = tables_with_teams(8);
    let ids = team_ids(&tables);
    generate_bracket(&mut tables, &BracketRequest::starting("2024-01-01"), TeamOrder::Shuffled)
        .unwrap();
    let mut scheduled: Vec<TeamId> = tables
        .matches_in_round(Round::Round1)
        .iter()
        .flat_map(|m| m.participants())
        .filter_map(Participant::team_id)
        .collect();
    scheduled.sort();
    let mut expected = ids;
    expected.sort();
    assert_eq!(scheduled, expected);
}

/// Store that fails after a fixed number of inserts.
struct FailingStore {
    tables: Tables,
    inserts_left: usize,
}

impl TeamDirectory for FailingStore {
    fn all_teams(&self) -> Vec<Team> {
        self.tables.all_teams()
    }
}

impl MatchStore for FailingStore {
    fn delete_all(&mut self) -> Result<usize, TournamentError> {
        self.tables.delete_all()
    }

    fn insert(&mut self, slot: MatchSlot) -> Result<MatchId, TournamentError> {
        if self.inserts_left == 0 {
            return Err(TournamentError::UnknownParticipant(slot.id));
        }
        self.inserts_left -= 1;
        self.tables.insert(slot)
    }
}

#[test]
fn failed_insert_rolls_back_whole_generation() {
    let db = Database::new(tables_with_teams(8));
    db.transaction(|t| generate_bracket(t, &BracketRequest::starting("2024-01-01"), TeamOrder::AsListed))
        .unwrap();
    let before: Vec<_> = db.read(|t| t.matches().iter().map(|m| m.id).collect()).unwrap();

    let request = BracketRequest {
        clear_existing: true,
        ..BracketRequest::starting("2024-05-01")
    };
    let result = db.transaction(|t| {
        let mut store = FailingStore {
            tables: t.clone(),
            inserts_left: 3,
        };
        let summary = generate_bracket(&mut store, &request, TeamOrder::AsListed);
        // Without a transaction the purge and partial inserts are visible.
        assert_eq!(store.tables.matches().len(), 3);
        *t = store.tables;
        summary
    });
    assert!(matches!(result, Err(TournamentError::UnknownParticipant(_))));

    let after: Vec<_> = db.read(|t| t.matches().iter().map(|m| m.id).collect()).unwrap();
    assert_eq!(before, after);
}
