//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), TEAMS_CSV (seed roster file).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{self, Bytes, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::sync::RwLock;
use team_tournament_web::{
    logic, MatchId, MatchStore, TeamId, TeamStore, Tournament, TournamentError,
};

/// In-memory state: the one tournament this server runs. Every engine
/// operation goes through the write lock so pairing and result recording
/// never interleave.
type AppState = Data<RwLock<Tournament>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterTeamBody {
    name: String,
}

#[derive(Deserialize)]
struct RecordResultBody {
    match_id: MatchId,
    winner_id: TeamId,
}

/// Path segment: round number (e.g. /api/rounds/{round})
#[derive(Deserialize)]
struct RoundPath {
    round: u32,
}

/// Map engine errors onto HTTP statuses, always as an {"error": ...} body.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::MatchNotFound(_) | TournamentError::TeamNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::Store(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// The refreshed summary snapshot, returned after every mutation.
fn summary_response(tournament: &mut Tournament) -> HttpResponse {
    match logic::summary(tournament) {
        Ok(summary) => HttpResponse::Ok().json(summary),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Tournament state snapshot (reconciles elimination flags first).
#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    summary_response(&mut g)
}

/// Register a new team.
#[post("/api/teams")]
async fn api_register_team(state: AppState, body: Json<RegisterTeamBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.register_team(body.name.trim()) {
        Ok(_) => summary_response(&mut g),
        Err(e) => error_response(&e),
    }
}

/// Bulk-register teams from a CSV payload (one name per record).
#[post("/api/teams/import")]
async fn api_import_teams(state: AppState, body: Bytes) -> HttpResponse {
    let data = match std::str::from_utf8(&body) {
        Ok(data) => data,
        Err(_) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": "Request body is not valid UTF-8" }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::import_teams_csv(&mut *g, data) {
        Ok(_) => summary_response(&mut g),
        Err(e) => error_response(&e),
    }
}

/// Generate the next round (refused while matches are still pending).
#[post("/api/rounds/next")]
async fn api_generate_next_round(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::can_advance_round(&*g) {
        Ok(true) => {}
        Ok(false) => {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Cannot generate a new round: matches are still pending in the current round"
            }))
        }
        Err(e) => return error_response(&e),
    }
    match logic::generate_next_round(&mut *g) {
        Ok(_) => summary_response(&mut g),
        Err(e) => error_response(&e),
    }
}

/// Pre-generate rounds 1 and 2 together (only before the tournament starts).
#[post("/api/rounds/first-two")]
async fn api_generate_first_two_rounds(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::generate_first_two_rounds(&mut *g) {
        Ok(_) => summary_response(&mut g),
        Err(e) => error_response(&e),
    }
}

/// All matches of one round (history view).
#[get("/api/rounds/{round}")]
async fn api_round_matches(state: AppState, path: Path<RoundPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.matches.by_round(path.round) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&TournamentError::Store(e.to_string())),
    }
}

/// Record or correct a match result.
#[put("/api/matches/result")]
async fn api_record_result(state: AppState, body: Json<RecordResultBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match logic::record_result(&mut *g, body.match_id, body.winner_id) {
        Ok(()) => summary_response(&mut g),
        Err(e) => error_response(&e),
    }
}

/// Reset the tournament: delete all teams and matches.
#[post("/api/reset")]
async fn api_reset(state: AppState) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.reset() {
        Ok(()) => summary_response(&mut g),
        Err(e) => error_response(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Seed the roster from the TEAMS_CSV file, only when no teams exist yet.
fn seed_teams(state: &AppState) {
    let path = match std::env::var("TEAMS_CSV") {
        Ok(path) => path,
        Err(_) => return,
    };
    let data = match std::fs::read_to_string(&path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("could not read TEAMS_CSV file {}: {}", path, e);
            return;
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return,
    };
    match g.teams.list_all() {
        Ok(existing) if existing.is_empty() => match logic::import_teams_csv(&mut *g, &data) {
            Ok(added) => log::info!("seeded {} team(s) from {}", added.len(), path),
            Err(e) => log::warn!("could not seed teams from {}: {}", path, e),
        },
        Ok(_) => log::info!("team store not empty; skipping seed file {}", path),
        Err(e) => log::warn!("could not inspect team store before seeding: {}", e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Tournament::new()));
    seed_teams(&state);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_get_tournament)
            .service(api_register_team)
            .service(api_import_teams)
            .service(api_generate_next_round)
            .service(api_generate_first_two_rounds)
            .service(api_round_matches)
            .service(api_record_result)
            .service(api_reset)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
