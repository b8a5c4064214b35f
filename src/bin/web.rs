//! Single binary web server: JSON API for teams, players, matches and the bracket.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT. TEAMS_CSV seeds teams at startup,
//! TOURNAMENT_NAME sets the initial tournament name.

use actix_web::{
    delete,
    error::InternalError,
    get, post, put,
    web::{Data, Json, JsonConfig, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use cricket_tournament_web::{
    bracket_view, generate_bracket, import_roster,
    logic::{load_roster_file, match_view, match_views, round_views, team_details, team_summaries},
    models::day_name,
    record_result, BracketRequest, Config, Database, ErrorKind, MatchResult, MatchSlot, MatchStatus,
    MatchStore, Participant, Player, PlayerRole, PlayerStatistics, Round, Tables, Team, TeamOrder,
    TournamentError, TournamentSettings,
};
use serde::Deserialize;
use uuid::Uuid;

type AppState = Data<Database>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TeamBody {
    name: Option<String>,
    coach_name: Option<String>,
    home_ground: Option<String>,
    captain_id: Option<Uuid>,
}

#[derive(Deserialize)]
struct PlayerBody {
    name: Option<String>,
    team_id: Option<Uuid>,
    role: Option<PlayerRole>,
    jersey_number: Option<u32>,
    batting_style: Option<String>,
    bowling_style: Option<String>,
}

#[derive(Deserialize)]
struct CreateMatchBody {
    match_date: NaiveDate,
    team_a: Participant,
    team_b: Participant,
    round: Round,
    venue: Option<String>,
    match_time: Option<String>,
    match_number: Option<u32>,
    #[serde(default)]
    status: MatchStatus,
}

#[derive(Deserialize)]
struct UpdateMatchBody {
    match_date: Option<NaiveDate>,
    team_a: Option<Participant>,
    team_b: Option<Participant>,
    round: Option<Round>,
    venue: Option<String>,
    match_time: Option<String>,
    status: Option<MatchStatus>,
}

/// Path segment: entity id (e.g. /api/teams/{id})
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

#[derive(Deserialize)]
struct TeamIdPath {
    team_id: Uuid,
}

#[derive(Deserialize)]
struct RoundPath {
    round: String,
}

/// Map a tournament error onto an HTTP status with a JSON `{ "error": ... }` body.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Persistence => {
            log::error!("Persistence failure: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
    }
}

/// Malformed or missing JSON bodies get the same `{ "error": ... }` shape as
/// validation failures.
fn json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        let body = serde_json::json!({ "error": err.to_string() });
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

fn message(text: &str) -> serde_json::Value {
    serde_json::json!({ "message": text })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "cricket-tournament-web",
    })
}

// Teams

#[get("/api/teams")]
async fn api_list_teams(state: AppState) -> HttpResponse {
    match state.read(team_summaries) {
        Ok(teams) => HttpResponse::Ok().json(teams),
        Err(e) => error_response(&e),
    }
}

#[get("/api/teams/{id}")]
async fn api_get_team(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.read(|t| team_details(t, path.id)) {
        Ok(Some(team)) => HttpResponse::Ok().json(team),
        Ok(None) => error_response(&TournamentError::TeamNotFound(path.id)),
        Err(e) => error_response(&e),
    }
}

/// Create a team (name required, unique).
#[post("/api/teams")]
async fn api_create_team(state: AppState, body: Json<TeamBody>) -> HttpResponse {
    let body = body.into_inner();
    let Some(name) = body.name else {
        return error_response(&TournamentError::MissingField("name"));
    };
    let team = Team::with_details(name, body.coach_name, body.home_ground);
    match state.transaction(|t| t.insert_team(team)) {
        Ok(team_id) => HttpResponse::Created().json(serde_json::json!({
            "message": "Team created successfully",
            "team_id": team_id,
        })),
        Err(e) => error_response(&e),
    }
}

/// Update a team. Omitted fields keep their stored value.
#[put("/api/teams/{id}")]
async fn api_update_team(state: AppState, path: Path<IdPath>, body: Json<TeamBody>) -> HttpResponse {
    let body = body.into_inner();
    let result = state.transaction(|t| {
        let mut team = t
            .team(path.id)
            .cloned()
            .ok_or(TournamentError::TeamNotFound(path.id))?;
        team.name = body.name.unwrap_or(team.name);
        team.coach_name = body.coach_name.or(team.coach_name);
        team.home_ground = body.home_ground.or(team.home_ground);
        team.captain_id = body.captain_id.or(team.captain_id);
        t.update_team(team)
    });
    match result {
        Ok(()) => HttpResponse::Ok().json(message("Team updated successfully")),
        Err(e) => error_response(&e),
    }
}

/// Delete a team and its players.
#[delete("/api/teams/{id}")]
async fn api_delete_team(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.transaction(|t| t.delete_team(path.id)) {
        Ok(team) => {
            log::info!("Deleted team {}", team.name);
            HttpResponse::Ok().json(message("Team deleted successfully"))
        }
        Err(e) => error_response(&e),
    }
}

// Players

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    match state.read(|t| t.players().to_vec()) {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => error_response(&e),
    }
}

#[get("/api/players/team/{team_id}")]
async fn api_team_players(state: AppState, path: Path<TeamIdPath>) -> HttpResponse {
    let players = state.read(|t| {
        t.team_players(path.team_id)
            .into_iter()
            .cloned()
            .collect::<Vec<Player>>()
    });
    match players {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => error_response(&e),
    }
}

#[get("/api/players/{id}")]
async fn api_get_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.read(|t| t.player(path.id).cloned()) {
        Ok(Some(player)) => HttpResponse::Ok().json(player),
        Ok(None) => error_response(&TournamentError::PlayerNotFound(path.id)),
        Err(e) => error_response(&e),
    }
}

/// Create a player (name, team_id and role required). Statistics start at zero.
#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<PlayerBody>) -> HttpResponse {
    let body = body.into_inner();
    let (Some(name), Some(team_id), Some(role)) = (body.name, body.team_id, body.role) else {
        return error_response(&TournamentError::MissingField("name, team_id and role"));
    };
    let mut player = Player::new(name, team_id, role);
    player.jersey_number = body.jersey_number;
    player.batting_style = body.batting_style;
    player.bowling_style = body.bowling_style;
    match state.transaction(|t| t.insert_player(player)) {
        Ok(player_id) => HttpResponse::Created().json(serde_json::json!({
            "message": "Player created successfully",
            "player_id": player_id,
        })),
        Err(e) => error_response(&e),
    }
}

/// Update a player's profile. Omitted fields keep their stored value.
#[put("/api/players/{id}")]
async fn api_update_player(
    state: AppState,
    path: Path<IdPath>,
    body: Json<PlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let result = state.transaction(|t| {
        let mut player = t
            .player(path.id)
            .cloned()
            .ok_or(TournamentError::PlayerNotFound(path.id))?;
        player.name = body.name.unwrap_or(player.name);
        player.team_id = body.team_id.unwrap_or(player.team_id);
        player.role = body.role.unwrap_or(player.role);
        player.jersey_number = body.jersey_number.or(player.jersey_number);
        player.batting_style = body.batting_style.or(player.batting_style);
        player.bowling_style = body.bowling_style.or(player.bowling_style);
        t.update_player(player)
    });
    match result {
        Ok(()) => HttpResponse::Ok().json(message("Player updated successfully")),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/players/{id}")]
async fn api_delete_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.transaction(|t| t.delete_player(path.id)) {
        Ok(_) => HttpResponse::Ok().json(message("Player deleted successfully")),
        Err(e) => error_response(&e),
    }
}

/// Replace a player's statistics. Omitted counters become zero.
#[put("/api/players/{id}/stats")]
async fn api_update_stats(
    state: AppState,
    path: Path<IdPath>,
    body: Json<PlayerStatistics>,
) -> HttpResponse {
    let stats = body.into_inner();
    match state.transaction(|t| t.update_statistics(path.id, stats)) {
        Ok(()) => HttpResponse::Ok().json(message("Statistics updated successfully")),
        Err(e) => error_response(&e),
    }
}

// Matches

#[get("/api/matches")]
async fn api_list_matches(state: AppState) -> HttpResponse {
    match state.read(match_views) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

#[get("/api/matches/round/{round}")]
async fn api_round_matches(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let round: Round = match path.round.parse() {
        Ok(round) => round,
        Err(e) => return HttpResponse::BadRequest().json(serde_json::json!({ "error": e })),
    };
    match state.read(|t| round_views(t, round)) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.read(|t| t.match_slot(path.id).map(|m| match_view(t, m))) {
        Ok(Some(view)) => HttpResponse::Ok().json(view),
        Ok(None) => error_response(&TournamentError::MatchNotFound(path.id)),
        Err(e) => error_response(&e),
    }
}

/// Create a single match by hand.
#[post("/api/matches")]
async fn api_create_match(state: AppState, body: Json<CreateMatchBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut slot = MatchSlot::scheduled(
        body.match_date,
        body.team_a,
        body.team_b,
        body.round,
        body.venue,
        body.match_time,
    );
    slot.match_number = body.match_number;
    slot.status = body.status;
    match state.transaction(|t| t.insert(slot)) {
        Ok(match_id) => HttpResponse::Created().json(serde_json::json!({
            "message": "Match created successfully",
            "match_id": match_id,
        })),
        Err(e) => error_response(&e),
    }
}

/// Edit a scheduled match. Changing the date also updates the day name.
#[put("/api/matches/{id}")]
async fn api_update_match(
    state: AppState,
    path: Path<IdPath>,
    body: Json<UpdateMatchBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let result = state.transaction(|t| {
        let stored = t
            .match_slot(path.id)
            .cloned()
            .ok_or(TournamentError::MatchNotFound(path.id))?;
        let match_date = body.match_date.unwrap_or(stored.match_date);
        let slot = MatchSlot {
            match_date,
            match_day: day_name(match_date),
            team_a: body.team_a.unwrap_or(stored.team_a),
            team_b: body.team_b.unwrap_or(stored.team_b),
            round: body.round.unwrap_or(stored.round),
            venue: body.venue.or(stored.venue),
            match_time: body.match_time.or(stored.match_time),
            status: body.status.unwrap_or(stored.status),
            ..stored
        };
        t.update_match(slot)
    });
    match result {
        Ok(()) => HttpResponse::Ok().json(message("Match updated successfully")),
        Err(e) => error_response(&e),
    }
}

/// Record a result; later matches fed by this one now show the winner.
#[put("/api/matches/{id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<IdPath>,
    body: Json<MatchResult>,
) -> HttpResponse {
    let result = body.into_inner();
    match state.transaction(|t| record_result(t, path.id, result)) {
        Ok(advanced) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Match result updated successfully",
            "advanced_to": advanced,
        })),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    match state.transaction(|t| t.delete_match(path.id)) {
        Ok(_) => HttpResponse::Ok().json(message("Match deleted successfully")),
        Err(e) => error_response(&e),
    }
}

// Tournament

#[get("/api/tournament/settings")]
async fn api_get_settings(state: AppState) -> HttpResponse {
    match state.read(|t| t.settings().clone()) {
        Ok(settings) => HttpResponse::Ok().json(settings),
        Err(e) => error_response(&e),
    }
}

#[put("/api/tournament/settings")]
async fn api_update_settings(state: AppState, body: Json<TournamentSettings>) -> HttpResponse {
    let settings = body.into_inner();
    match state.transaction(|t| {
        t.set_settings(settings);
        Ok(())
    }) {
        Ok(()) => HttpResponse::Ok().json(message("Tournament settings updated successfully")),
        Err(e) => error_response(&e),
    }
}

/// Bracket view: matches grouped by round.
#[get("/api/tournament/bracket")]
async fn api_bracket(state: AppState) -> HttpResponse {
    match state.read(bracket_view) {
        Ok(bracket) => HttpResponse::Ok().json(bracket),
        Err(e) => error_response(&e),
    }
}

/// Generate the knockout schedule from all teams in a random draw.
/// The optional purge and every insert commit together or not at all.
#[post("/api/tournament/generate")]
async fn api_generate_bracket(state: AppState, body: Json<BracketRequest>) -> HttpResponse {
    let request = body.into_inner();
    match state.transaction(|t| generate_bracket(t, &request, TeamOrder::Shuffled)) {
        Ok(summary) => HttpResponse::Created().json(summary),
        Err(e) => error_response(&e),
    }
}

/// Initial tables: settings from config plus the optional CSV roster.
fn initial_tables(config: &Config) -> Tables {
    let settings = match &config.tournament_name {
        Some(name) => TournamentSettings::named(name.clone()),
        None => TournamentSettings::default(),
    };
    let mut tables = Tables::with_settings(settings);
    if let Some(path) = &config.teams_csv {
        match load_roster_file(path) {
            Ok(teams) => {
                let added = import_roster(&mut tables, teams);
                log::info!("Imported {} team(s) from {}", added, path.display());
            }
            Err(e) => log::error!("Could not read roster {}: {}", path.display(), e),
        }
    }
    tables
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(Database::new(initial_tables(&config)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(json_config())
            .service(api_health)
            .service(api_list_teams)
            .service(api_get_team)
            .service(api_create_team)
            .service(api_update_team)
            .service(api_delete_team)
            .service(api_list_players)
            .service(api_team_players)
            .service(api_get_player)
            .service(api_create_player)
            .service(api_update_player)
            .service(api_delete_player)
            .service(api_update_stats)
            .service(api_list_matches)
            .service(api_round_matches)
            .service(api_get_match)
            .service(api_create_match)
            .service(api_update_match)
            .service(api_record_result)
            .service(api_delete_match)
            .service(api_get_settings)
            .service(api_update_settings)
            .service(api_bracket)
            .service(api_generate_bracket)
    })
    .bind(bind)?
    .run()
    .await
}
