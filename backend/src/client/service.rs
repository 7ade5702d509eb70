use crate::error::Result;
use crate::lobby::{
    Attributes, Lobby, LobbySummary, PlayerProfile, QueryFilter, UpdateLobbyRequest,
};
use std::future::Future;

/// Options accompanying a create call
#[derive(Debug, Clone, Default)]
pub struct CreateLobbyOptions {
    pub is_private: bool,
    pub player: PlayerProfile,
    pub data: Attributes,
}

/// Outbound calls a client makes to the lobby service.
/// Every call acts on behalf of the player the implementation is signed in as.
pub trait LobbyService: Send + Sync {
    /// Player id this service is authenticated as
    fn player_id(&self) -> &str;

    fn create_lobby(
        &self,
        name: &str,
        max_players: u32,
        options: CreateLobbyOptions,
    ) -> impl Future<Output = Result<Lobby>> + Send;

    fn query_lobbies(
        &self,
        filter: QueryFilter,
    ) -> impl Future<Output = Result<Vec<LobbySummary>>> + Send;

    fn get_lobby(&self, lobby_id: &str) -> impl Future<Output = Result<Lobby>> + Send;

    fn join_lobby_by_id(
        &self,
        lobby_id: &str,
        player: PlayerProfile,
    ) -> impl Future<Output = Result<Lobby>> + Send;

    fn join_lobby_by_code(
        &self,
        lobby_code: &str,
        player: PlayerProfile,
    ) -> impl Future<Output = Result<Lobby>> + Send;

    fn send_heartbeat(&self, lobby_id: &str) -> impl Future<Output = Result<()>> + Send;

    fn update_lobby(
        &self,
        lobby_id: &str,
        request: UpdateLobbyRequest,
    ) -> impl Future<Output = Result<Lobby>> + Send;

    fn remove_player(
        &self,
        lobby_id: &str,
        player_id: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}
