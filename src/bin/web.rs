//! Web server around the ranking engine: import results, read rankings, draw pools.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, DRAW_TTL_HOURS (how long an untouched draw is kept).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, NaiveDate, Utc};
use season_ranking::{
    compute_ranking, compute_season_ranking, draw_pools, qualified_count, seed_order, suggested_pool_count, AliasTable,
    DirectoryEntry, EngineError, IdentityResolver, MemoryStore, PoolDraw, RankedEntrant,
    ResultRow, ResultStore, Season, SeasonKey, TOURNAMENTS_PER_SEASON,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Latest pool draw of a season. Not authoritative until convocations are sent.
#[derive(Clone, Serialize)]
struct DrawSnapshot {
    created_at: DateTime<Utc>,
    pool_count: usize,
    pools: Vec<PoolDraw>,
    #[serde(skip)]
    touched: Instant,
}

/// Per-season state. Its mutex serializes recomputation for one (category, season).
/// `ranking` stays `None` until results are imported.
#[derive(Default)]
struct SeasonEntry {
    ranking: Option<Vec<RankedEntrant>>,
    latest_draw: Option<DrawSnapshot>,
}

struct AppData {
    store: RwLock<MemoryStore>,
    seasons: RwLock<HashMap<SeasonKey, Arc<Mutex<SeasonEntry>>>>,
    directory: RwLock<HashMap<String, DirectoryEntry>>,
    identity: AliasTable,
}

type AppState = Data<AppData>;

fn new_app_data() -> AppState {
    Data::new(AppData {
        store: RwLock::new(MemoryStore::new()),
        seasons: RwLock::new(HashMap::new()),
        directory: RwLock::new(HashMap::new()),
        identity: AliasTable::new(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct RankingResponse<'a> {
    category: &'a str,
    season: Season,
    qualified_count: usize,
    entrants: &'a [RankedEntrant],
}

#[derive(Deserialize)]
struct ImportResultsBody {
    #[serde(default)]
    held_on: Option<NaiveDate>,
    rows: Vec<ResultRow>,
}

#[derive(Deserialize)]
struct DrawBody {
    registrations: Vec<String>,
    #[serde(default)]
    pool_count: Option<usize>,
}

#[derive(Deserialize)]
struct DirectoryRecord {
    licence: String,
    name: String,
    #[serde(default)]
    club: Option<String>,
}

/// Path segments: category and season (e.g. /api/seasons/LIBRE%20R2/2024-2025)
#[derive(Deserialize)]
struct SeasonPath {
    category: String,
    season: String,
}

/// Path segments: category, season and tournament number.
#[derive(Deserialize)]
struct TournamentPath {
    category: String,
    season: String,
    tournament: u8,
}

fn bad_request(e: EngineError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn no_season() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No ranking for this season" }))
}

fn season_key(category: &str, season: &str) -> Result<SeasonKey, EngineError> {
    Ok(SeasonKey::new(category.trim(), season.parse()?))
}

/// Existing per-season entry, if any.
fn find_entry(state: &AppData, key: &SeasonKey) -> Result<Option<Arc<Mutex<SeasonEntry>>>, HttpResponse> {
    match state.seasons.read() {
        Ok(g) => Ok(g.get(key).cloned()),
        Err(_) => Err(HttpResponse::InternalServerError().body("lock error")),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "season-ranking",
    })
}

/// Load or update player directory records (licence → name, club).
/// Every stored ranking is recomputed so names and directory misses follow the new records.
#[put("/api/directory")]
async fn api_put_directory(state: AppState, body: Json<Vec<DirectoryRecord>>) -> HttpResponse {
    let players = {
        let mut g = match state.directory.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        for record in body.into_inner() {
            let licence = state.identity.normalize_licence(&record.licence);
            g.insert(licence, DirectoryEntry::new(record.name.trim(), record.club));
        }
        g.len()
    };

    let entries: Vec<(SeasonKey, Arc<Mutex<SeasonEntry>>)> = match state.seasons.read() {
        Ok(g) => g.iter().map(|(k, e)| (k.clone(), e.clone())).collect(),
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut refreshed = 0;
    for (key, entry) in entries {
        let mut entry = entry.lock().await;
        if entry.ranking.is_none() {
            continue;
        }
        let (store, directory) = match (state.store.read(), state.directory.read()) {
            (Ok(s), Ok(d)) => (s, d),
            _ => return HttpResponse::InternalServerError().body("lock error"),
        };
        match compute_season_ranking(&*store, &key, &state.identity, &*directory) {
            Ok(ranking) => {
                entry.ranking = Some(ranking);
                refreshed += 1;
            }
            Err(e) => log::error!("Could not refresh ranking for {}: {}", key, e),
        }
    }
    log::info!("Directory holds {} player(s); refreshed {} ranking(s)", players, refreshed);
    HttpResponse::Ok().json(serde_json::json!({ "players": players }))
}

/// Import (or re-import) one tournament's results and recompute the season ranking.
/// Nothing is stored when the new rows fail validation.
#[put("/api/seasons/{category}/{season}/tournaments/{tournament}/results")]
async fn api_import_results(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ImportResultsBody>,
) -> HttpResponse {
    let key = match season_key(&path.category, &path.season) {
        Ok(k) => k,
        Err(e) => return bad_request(e),
    };
    if !(1..=TOURNAMENTS_PER_SEASON).contains(&path.tournament) {
        return bad_request(EngineError::InvalidTournamentNumber(path.tournament));
    }
    let entry = {
        let mut g = match state.seasons.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        g.entry(key.clone()).or_default().clone()
    };
    let mut entry = entry.lock().await;

    let body = body.into_inner();
    let tournament = path.tournament;
    let new_rows: Vec<ResultRow> = body
        .rows
        .into_iter()
        .map(|r| ResultRow { tournament, ..r })
        .collect();

    let (mut rows, mut calendar) = match state.store.read() {
        Ok(s) => (s.fetch_result_rows(&key), s.calendar(&key)),
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    rows.retain(|r| r.tournament != tournament);
    rows.extend(new_rows.iter().cloned());
    calendar.mark_held(tournament, body.held_on);

    let ranking = {
        let directory = match state.directory.read() {
            Ok(d) => d,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        match compute_ranking(&rows, &calendar, &state.identity, &*directory) {
            Ok(r) => r,
            Err(e) => return bad_request(e),
        }
    };

    match state.store.write() {
        Ok(mut s) => s.import_tournament(&key, tournament, body.held_on, new_rows),
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    }
    log::info!(
        "Imported tournament {} for {}: {} ranked entrant(s)",
        tournament,
        key,
        ranking.len()
    );
    let ranking: &[RankedEntrant] = entry.ranking.insert(ranking);
    HttpResponse::Ok().json(RankingResponse {
        category: &key.category,
        season: key.season,
        qualified_count: qualified_count(ranking.len()),
        entrants: ranking,
    })
}

/// Current season ranking (404 if no results were imported yet).
#[get("/api/seasons/{category}/{season}/ranking")]
async fn api_get_ranking(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let key = match season_key(&path.category, &path.season) {
        Ok(k) => k,
        Err(e) => return bad_request(e),
    };
    let entry = match find_entry(&state, &key) {
        Ok(Some(e)) => e,
        Ok(None) => return no_season(),
        Err(resp) => return resp,
    };
    let entry = entry.lock().await;
    let Some(ranking) = entry.ranking.as_deref() else {
        return no_season();
    };
    HttpResponse::Ok().json(RankingResponse {
        category: &key.category,
        season: key.season,
        qualified_count: qualified_count(ranking.len()),
        entrants: ranking,
    })
}

/// Draw pools for the registered licences, seeded by the season ranking.
/// Without imported results every registration is seeded as a newcomer.
#[post("/api/seasons/{category}/{season}/draws")]
async fn api_create_draw(state: AppState, path: Path<SeasonPath>, body: Json<DrawBody>) -> HttpResponse {
    let key = match season_key(&path.category, &path.season) {
        Ok(k) => k,
        Err(e) => return bad_request(e),
    };
    let entry = {
        let mut g = match state.seasons.write() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        g.entry(key.clone()).or_default().clone()
    };
    let mut entry = entry.lock().await;

    let seeds = {
        let directory = match state.directory.read() {
            Ok(d) => d,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        let ranking = entry.ranking.as_deref().unwrap_or(&[]);
        seed_order(ranking, &body.registrations, &state.identity, &*directory)
    };
    let pool_count = body
        .pool_count
        .unwrap_or_else(|| suggested_pool_count(seeds.len()));
    let pools = match draw_pools(&seeds, pool_count) {
        Ok(p) => p,
        Err(e) => return bad_request(e),
    };
    log::info!("Drew {} pool(s) for {} ({} entrant(s))", pool_count, key, seeds.len());
    let snapshot = DrawSnapshot {
        created_at: Utc::now(),
        pool_count,
        pools,
        touched: Instant::now(),
    };
    entry.latest_draw = Some(snapshot.clone());
    HttpResponse::Ok().json(snapshot)
}

/// Latest draw of a season (404 if none or expired). Reading it keeps it alive.
#[get("/api/seasons/{category}/{season}/draws/latest")]
async fn api_latest_draw(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    let key = match season_key(&path.category, &path.season) {
        Ok(k) => k,
        Err(e) => return bad_request(e),
    };
    let entry = match find_entry(&state, &key) {
        Ok(Some(e)) => e,
        Ok(None) => return no_season(),
        Err(resp) => return resp,
    };
    let mut entry = entry.lock().await;
    match entry.latest_draw.as_mut() {
        Some(draw) => {
            draw.touched = Instant::now();
            HttpResponse::Ok().json(&*draw)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No draw" })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_draw_ttl_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let draw_ttl_hours: u64 = std::env::var("DRAW_TTL_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_draw_ttl_hours);
    let draw_ttl = Duration::from_secs(draw_ttl_hours * 3600);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = new_app_data();

    // Background task: every 30 minutes, drop draws nobody touched within the TTL
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let entries: Vec<_> = match state_cleanup.seasons.read() {
                Ok(g) => g.values().cloned().collect(),
                Err(_) => continue,
            };
            let mut removed = 0;
            for entry in entries {
                let mut entry = entry.lock().await;
                if entry
                    .latest_draw
                    .as_ref()
                    .is_some_and(|d| d.touched.elapsed() >= draw_ttl)
                {
                    entry.latest_draw = None;
                    removed += 1;
                }
            }
            if removed > 0 {
                log::info!("Dropped {} stale draw(s) (untouched for {}h)", removed, draw_ttl_hours);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_put_directory)
            .service(api_import_results)
            .service(api_get_ranking)
            .service(api_create_draw)
            .service(api_latest_draw)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::{call_and_read_body_json, call_service, init_service, TestRequest};
    use actix_web::http::StatusCode;
    use serde_json::{json, Value};

    macro_rules! app {
        ($state:expr) => {
            init_service(
                App::new()
                    .app_data($state.clone())
                    .service(api_put_directory)
                    .service(api_import_results)
                    .service(api_get_ranking)
                    .service(api_create_draw)
                    .service(api_latest_draw),
            )
            .await
        };
    }

    const RANKING_URI: &str = "/api/seasons/LIBRE/2024-2025/ranking";

    #[actix_web::test]
    async fn draw_before_any_import_leaves_ranking_missing() {
        let state = new_app_data();
        let app = app!(state);

        let req = TestRequest::post()
            .uri("/api/seasons/LIBRE/2024-2025/draws")
            .set_json(json!({ "registrations": ["L1", "L2", "L3"] }))
            .to_request();
        let draw: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(draw["pool_count"], 1);

        let resp = call_service(&app, TestRequest::get().uri(RANKING_URI).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let latest = TestRequest::get()
            .uri("/api/seasons/LIBRE/2024-2025/draws/latest")
            .to_request();
        let resp = call_service(&app, latest).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn directory_update_refreshes_stored_rankings() {
        let state = new_app_data();
        let app = app!(state);

        let req = TestRequest::put()
            .uri("/api/seasons/LIBRE/2024-2025/tournaments/1/results")
            .set_json(json!({
                "rows": [{
                    "tournament": 1,
                    "licence": "L1",
                    "player_name": "Sheet Name",
                    "match_points": 6,
                    "moyenne": 2.0,
                    "serie": 8,
                    "points": 60,
                    "reprises": 30
                }]
            }))
            .to_request();
        let imported: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(imported["entrants"][0]["name"], "Sheet Name");
        assert_eq!(imported["entrants"][0]["missing_from_directory"], true);

        let req = TestRequest::put()
            .uri("/api/directory")
            .set_json(json!([{ "licence": "l1", "name": "Alice Martin" }]))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let ranking: Value =
            call_and_read_body_json(&app, TestRequest::get().uri(RANKING_URI).to_request()).await;
        assert_eq!(ranking["entrants"][0]["name"], "Alice Martin");
        assert_eq!(ranking["entrants"][0]["missing_from_directory"], false);
    }
}
