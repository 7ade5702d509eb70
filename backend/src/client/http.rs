use super::service::{CreateLobbyOptions, LobbyService};
use crate::error::{ErrorBody, LobbyError, Result};
use crate::lobby::http_handler::PLAYER_ID_HEADER;
use crate::lobby::{
    CreateLobbyRequest, JoinByCodeRequest, JoinLobbyRequest, Lobby, LobbySummary, PlayerProfile,
    QueryFilter, QueryResponse, SignInResponse, UpdateLobbyRequest,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Lobby service reached over HTTP, bound to one signed-in player
#[derive(Clone)]
pub struct HttpLobbyService {
    http: Client,
    base_url: String,
    player_id: String,
}

impl HttpLobbyService {
    /// Sign in anonymously and return a service bound to the issued player id
    pub async fn sign_in_anonymously(base_url: impl Into<String>) -> Result<Self> {
        Self::sign_in_with_client(Client::new(), base_url).await
    }

    pub async fn sign_in_with_client(http: Client, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let response = http.post(format!("{base_url}/auth/anonymous")).send().await?;
        let SignInResponse { player_id } = decode(response).await?;

        info!(player_id, base_url, "Signed in");
        Ok(Self {
            http,
            base_url,
            player_id,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(PLAYER_ID_HEADER, &self.player_id)
    }
}

impl LobbyService for HttpLobbyService {
    fn player_id(&self) -> &str {
        &self.player_id
    }

    async fn create_lobby(
        &self,
        name: &str,
        max_players: u32,
        options: CreateLobbyOptions,
    ) -> Result<Lobby> {
        let request = CreateLobbyRequest {
            name: name.to_string(),
            max_players,
            is_private: options.is_private,
            player: options.player,
            data: options.data,
        };
        let response = self
            .authed(self.http.post(self.url("/lobbies")))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    async fn query_lobbies(&self, filter: QueryFilter) -> Result<Vec<LobbySummary>> {
        let response = self
            .authed(self.http.post(self.url("/lobbies/query")))
            .json(&filter)
            .send()
            .await?;
        let QueryResponse { results } = decode(response).await?;
        Ok(results)
    }

    async fn get_lobby(&self, lobby_id: &str) -> Result<Lobby> {
        let response = self
            .authed(self.http.get(self.url(&format!("/lobbies/{lobby_id}"))))
            .send()
            .await?;
        decode(response).await
    }

    async fn join_lobby_by_id(&self, lobby_id: &str, player: PlayerProfile) -> Result<Lobby> {
        let response = self
            .authed(self.http.post(self.url(&format!("/lobbies/{lobby_id}/join"))))
            .json(&JoinLobbyRequest { player })
            .send()
            .await?;
        decode(response).await
    }

    async fn join_lobby_by_code(&self, lobby_code: &str, player: PlayerProfile) -> Result<Lobby> {
        let request = JoinByCodeRequest {
            lobby_code: lobby_code.to_string(),
            player,
        };
        let response = self
            .authed(self.http.post(self.url("/lobbies/join-by-code")))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    async fn send_heartbeat(&self, lobby_id: &str) -> Result<()> {
        let response = self
            .authed(self.http.post(self.url(&format!("/lobbies/{lobby_id}/heartbeat"))))
            .send()
            .await?;
        expect_success(response).await
    }

    async fn update_lobby(&self, lobby_id: &str, request: UpdateLobbyRequest) -> Result<Lobby> {
        let response = self
            .authed(self.http.patch(self.url(&format!("/lobbies/{lobby_id}"))))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    async fn remove_player(&self, lobby_id: &str, player_id: &str) -> Result<()> {
        let response = self
            .authed(
                self.http
                    .delete(self.url(&format!("/lobbies/{lobby_id}/players/{player_id}"))),
            )
            .send()
            .await?;
        expect_success(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    Ok(response.json().await?)
}

async fn expect_success(response: Response) -> Result<()> {
    check_status(response).await.map(|_| ())
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<ErrorBody>().await.ok();
    debug!(status = status.as_u16(), ?body, "Lobby service returned an error");
    Err(LobbyError::from_response(status.as_u16(), body))
}
