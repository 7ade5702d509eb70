use super::service::{CreateLobbyOptions, LobbyService};
use crate::error::Result;
use crate::lobby::{
    CreateLobbyRequest, Lobby, LobbySummary, PlayerProfile, PlayerRegistry, QueryFilter,
    SessionDirectory, UpdateLobbyRequest,
};
use std::sync::Arc;

/// Lobby service backed by an in-process directory, no transport involved
#[derive(Clone)]
pub struct DirectoryService {
    directory: Arc<SessionDirectory>,
    player_id: String,
}

impl DirectoryService {
    pub fn sign_in_anonymously(directory: Arc<SessionDirectory>, players: &PlayerRegistry) -> Self {
        let player_id = players.sign_in_anonymously();
        Self::for_player(directory, player_id)
    }

    pub fn for_player(directory: Arc<SessionDirectory>, player_id: impl Into<String>) -> Self {
        Self {
            directory,
            player_id: player_id.into(),
        }
    }
}

impl LobbyService for DirectoryService {
    fn player_id(&self) -> &str {
        &self.player_id
    }

    async fn create_lobby(
        &self,
        name: &str,
        max_players: u32,
        options: CreateLobbyOptions,
    ) -> Result<Lobby> {
        self.directory.create_lobby(
            &self.player_id,
            CreateLobbyRequest {
                name: name.to_string(),
                max_players,
                is_private: options.is_private,
                player: options.player,
                data: options.data,
            },
        )
    }

    async fn query_lobbies(&self, filter: QueryFilter) -> Result<Vec<LobbySummary>> {
        Ok(self.directory.query(&filter))
    }

    async fn get_lobby(&self, lobby_id: &str) -> Result<Lobby> {
        self.directory.get(lobby_id, &self.player_id)
    }

    async fn join_lobby_by_id(&self, lobby_id: &str, player: PlayerProfile) -> Result<Lobby> {
        self.directory.join_by_id(lobby_id, &self.player_id, player)
    }

    async fn join_lobby_by_code(&self, lobby_code: &str, player: PlayerProfile) -> Result<Lobby> {
        self.directory.join_by_code(lobby_code, &self.player_id, player)
    }

    async fn send_heartbeat(&self, lobby_id: &str) -> Result<()> {
        self.directory.heartbeat(lobby_id, &self.player_id)
    }

    async fn update_lobby(&self, lobby_id: &str, request: UpdateLobbyRequest) -> Result<Lobby> {
        self.directory.update_lobby(lobby_id, &self.player_id, request)
    }

    async fn remove_player(&self, lobby_id: &str, player_id: &str) -> Result<()> {
        self.directory.remove_player(lobby_id, &self.player_id, player_id)
    }
}
