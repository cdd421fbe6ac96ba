use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cp_codec::{payload_link, stored_puzzle_link, LinkTarget, LoadedPuzzle, PuzzleSource};
use cp_core::{fallback_puzzle, library, validate, CoreError, Puzzle};
use cp_session::{GuessOutcome, HintAction};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

type ApiResult<T> = Result<T, ApiError>;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/library", get(list_library))
        .route("/api/v1/links", post(create_link))
        .route("/api/v1/resolve", get(resolve))
}

pub fn puzzle_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/puzzles", post(save_puzzle).get(list_puzzles))
        .route("/api/v1/puzzles/{id}", get(load_puzzle))
}

pub fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/games", post(create_game))
        .route("/api/v1/games/{id}", get(get_game))
        .route("/api/v1/games/{id}/toggle", post(toggle_tile))
        .route("/api/v1/games/{id}/deselect", post(deselect_all))
        .route("/api/v1/games/{id}/submit", post(submit_guess))
        .route("/api/v1/games/{id}/shuffle", post(shuffle_tiles))
        .route("/api/v1/games/{id}/hints", post(apply_hint))
        .route("/api/v1/games/{id}/share", get(share_result))
}

// ========== Health & library ==========

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

async fn list_library() -> Json<Value> {
    Json(json!({ "puzzles": library() }))
}

// ========== Links ==========

#[derive(Debug, Deserialize)]
struct PuzzleRequest {
    puzzle: Puzzle,
    #[serde(default)]
    base_url: Option<String>,
}

/// Normalize a creator draft and reject anything a link cannot carry.
fn prepare(state: &AppState, draft: &Puzzle) -> ApiResult<Puzzle> {
    let puzzle = draft.normalized();
    validate(&puzzle, &state.config.game.limits)?;
    Ok(puzzle)
}

async fn create_link(State(state): State<AppState>, Json(req): Json<PuzzleRequest>) -> ApiResult<Json<Value>> {
    let puzzle = prepare(&state, &req.puzzle)?;
    let payload = state.codec.encode(&puzzle);
    let base_url = req.base_url.as_deref().unwrap_or(&state.config.link.base_url);
    let url = payload_link(base_url, &payload)?;
    info!(payload_len = payload.len(), "share link created");
    Ok(Json(json!({ "url": url, "payload": payload, "puzzle": puzzle })))
}

fn fallback_with(reason: String) -> LoadedPuzzle {
    warn!(%reason, "link unusable, serving fallback puzzle");
    LoadedPuzzle { puzzle: fallback_puzzle(), source: PuzzleSource::Fallback { reason } }
}

/// Resolve a link or query string to a playable puzzle. Only store failures are errors.
async fn load_link(state: &AppState, link: &str) -> ApiResult<LoadedPuzzle> {
    let target = match LinkTarget::parse(link) {
        Ok(target) => target,
        Err(err) => return Ok(fallback_with(err.to_string())),
    };
    let loaded = match target {
        LinkTarget::Empty => state.codec.resolve(None, &fallback_puzzle()),
        LinkTarget::Payload(payload) => state.codec.resolve(Some(&payload), &fallback_puzzle()),
        LinkTarget::Stored(id) => match state.store.load(id).await? {
            Some(stored) if stored.puzzle.is_playable(&state.codec.palette) => {
                LoadedPuzzle { puzzle: stored.puzzle, source: PuzzleSource::Stored { id } }
            }
            Some(_) => fallback_with(format!("stored puzzle {id} is incomplete")),
            None => fallback_with(format!("puzzle {id} not found")),
        },
    };
    Ok(loaded)
}

async fn resolve(State(state): State<AppState>, RawQuery(query): RawQuery) -> ApiResult<Json<Value>> {
    let loaded = load_link(&state, query.as_deref().unwrap_or_default()).await?;
    let title = loaded.puzzle.display_name(&state.config.game.fallback_title).to_string();
    Ok(Json(json!({ "title": title, "puzzle": loaded.puzzle, "source": loaded.source })))
}

// ========== Stored puzzles ==========

async fn save_puzzle(
    State(state): State<AppState>,
    Json(req): Json<PuzzleRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let puzzle = prepare(&state, &req.puzzle)?;
    let stored = state.store.save(puzzle).await?;
    let base_url = req.base_url.as_deref().unwrap_or(&state.config.link.base_url);
    let url = stored_puzzle_link(base_url, stored.id)?;
    info!(id = %stored.id, "puzzle stored");
    Ok((StatusCode::CREATED, Json(json!({ "id": stored.id, "url": url }))))
}

async fn list_puzzles(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let puzzles = state.store.list().await?;
    Ok(Json(json!({ "puzzles": puzzles })))
}

async fn load_puzzle(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Value>> {
    if state.store.record_play(id).await?.is_none() {
        return Err(ApiError::not_found(format!("Puzzle not found: {id}")));
    }
    let stored = state
        .store
        .load(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Puzzle not found: {id}")))?;
    Ok(Json(json!(stored)))
}

// ========== Games ==========

#[derive(Debug, Default, Deserialize)]
struct NewGameRequest {
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    puzzle: Option<Puzzle>,
    #[serde(default)]
    library_id: Option<String>,
}

async fn create_game(
    State(state): State<AppState>,
    Json(req): Json<NewGameRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let (puzzle, source) = if let Some(puzzle) = req.puzzle {
        (puzzle.normalized(), None)
    } else if let Some(entry_id) = req.library_id {
        let entry = cp_core::library::find(&entry_id).ok_or(CoreError::PuzzleNotFound { id: entry_id })?;
        (entry.puzzle.clone(), None)
    } else {
        let loaded = load_link(&state, req.link.as_deref().unwrap_or_default()).await?;
        if let PuzzleSource::Stored { id } = loaded.source {
            state.store.record_play(id).await?;
        }
        (loaded.puzzle, Some(loaded.source))
    };

    let (id, game) = state.sessions.create(puzzle, &state.config.game.palette)?;
    info!(%id, "game created");
    Ok((StatusCode::CREATED, Json(json!({ "id": id, "source": source, "game": game }))))
}

async fn get_game(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Value>> {
    Ok(Json(json!(state.sessions.snapshot(id)?)))
}

#[derive(Debug, Deserialize)]
struct ToggleRequest {
    tile: usize,
}

async fn toggle_tile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleRequest>,
) -> ApiResult<Json<Value>> {
    let (selected, game) = state.sessions.with_session(id, |s| Ok((s.toggle(req.tile)?, s.summary())))?;
    Ok(Json(json!({ "selected": selected, "game": game })))
}

async fn deselect_all(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Value>> {
    let game = state.sessions.with_session(id, |s| {
        s.deselect_all();
        Ok(s.summary())
    })?;
    Ok(Json(json!(game)))
}

async fn submit_guess(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Value>> {
    let palette = &state.config.game.palette;
    let (outcome, share, game) = state.sessions.with_session(id, |s| {
        let outcome = s.submit()?;
        let share = s.state().is_over().then(|| s.share_text(palette));
        Ok((outcome, share, s.summary()))
    })?;
    let message = match outcome {
        GuessOutcome::Incorrect { one_away: true } => Some("One away..."),
        _ => None,
    };
    debug!(%id, ?outcome, "guess submitted");
    Ok(Json(json!({ "outcome": outcome, "message": message, "share": share, "game": game })))
}

async fn shuffle_tiles(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Value>> {
    let game = state.sessions.with_session(id, |s| {
        s.shuffle(&mut rand::thread_rng());
        Ok(s.summary())
    })?;
    Ok(Json(json!(game)))
}

#[derive(Debug, Deserialize)]
struct HintRequest {
    word: String,
    /// A color key, or `"none"` to clear.
    color: String,
}

async fn apply_hint(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<HintRequest>,
) -> ApiResult<Json<Value>> {
    let action: HintAction = req.color.parse().map_err(ApiError::bad_request)?;
    let (marks, game) = state.sessions.with_session(id, |s| {
        let marks = s.hint(&req.word, action)?.to_vec();
        Ok((marks, s.summary()))
    })?;
    Ok(Json(json!({ "word": req.word, "marks": marks, "game": game })))
}

async fn share_result(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Value>> {
    let palette = &state.config.game.palette;
    let text = state.sessions.with_session(id, |s| Ok(s.share_text(palette)))?;
    Ok(Json(json!({ "text": text })))
}
