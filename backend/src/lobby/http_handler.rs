use super::messages::{
    CreateLobbyRequest, JoinByCodeRequest, JoinLobbyRequest, QueryFilter, QueryResponse,
    SignInResponse, UpdateLobbyRequest,
};
use super::model::Lobby;
use crate::AppState;
use crate::error::{LobbyError, Result};
use axum::Json;
use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Request, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use tracing::debug;

/// Header carrying the caller's player id on every authenticated request
pub const PLAYER_ID_HEADER: &str = "x-player-id";

/// Authenticated caller. Declared before any body extractor so identity
/// failures win over malformed bodies.
pub struct Caller(pub String);

#[async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = LobbyError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        authorize(state, &parts.headers).map(Caller)
    }
}

/// JSON body whose rejections are reported as `invalid_request`
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = LobbyError;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| LobbyError::InvalidRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Resolve the caller from its identity header and charge its rate budget
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<String> {
    let player_id = headers
        .get(PLAYER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(LobbyError::Unauthorized)?;

    if !state.players.mark_seen(player_id) {
        debug!(player_id, "Unknown player identity");
        return Err(LobbyError::Unauthorized);
    }
    state.limiter.check(player_id)?;

    Ok(player_id.to_string())
}

pub async fn sign_in(State(state): State<AppState>) -> Json<SignInResponse> {
    Json(SignInResponse {
        player_id: state.players.sign_in_anonymously(),
    })
}

pub async fn create_lobby(
    State(state): State<AppState>,
    Caller(caller): Caller,
    JsonBody(request): JsonBody<CreateLobbyRequest>,
) -> Result<(StatusCode, Json<Lobby>)> {
    let lobby = state.directory.create_lobby(&caller, request)?;
    Ok((StatusCode::CREATED, Json(lobby)))
}

pub async fn query_lobbies(
    State(state): State<AppState>,
    _caller: Caller,
    JsonBody(filter): JsonBody<QueryFilter>,
) -> Json<QueryResponse> {
    Json(QueryResponse {
        results: state.directory.query(&filter),
    })
}

pub async fn get_lobby(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(lobby_id): Path<String>,
) -> Result<Json<Lobby>> {
    Ok(Json(state.directory.get(&lobby_id, &caller)?))
}

pub async fn update_lobby(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(lobby_id): Path<String>,
    JsonBody(request): JsonBody<UpdateLobbyRequest>,
) -> Result<Json<Lobby>> {
    Ok(Json(state.directory.update_lobby(&lobby_id, &caller, request)?))
}

pub async fn join_lobby(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(lobby_id): Path<String>,
    JsonBody(request): JsonBody<JoinLobbyRequest>,
) -> Result<Json<Lobby>> {
    Ok(Json(state.directory.join_by_id(&lobby_id, &caller, request.player)?))
}

pub async fn join_by_code(
    State(state): State<AppState>,
    Caller(caller): Caller,
    JsonBody(request): JsonBody<JoinByCodeRequest>,
) -> Result<Json<Lobby>> {
    let lobby = state.directory.join_by_code(&request.lobby_code, &caller, request.player)?;
    Ok(Json(lobby))
}

pub async fn heartbeat(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path(lobby_id): Path<String>,
) -> Result<StatusCode> {
    state.directory.heartbeat(&lobby_id, &caller)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_player(
    State(state): State<AppState>,
    Caller(caller): Caller,
    Path((lobby_id, player_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    state.directory.remove_player(&lobby_id, &caller, &player_id)?;
    Ok(StatusCode::NO_CONTENT)
}
