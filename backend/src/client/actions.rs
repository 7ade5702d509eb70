use super::LobbyClient;
use super::service::{CreateLobbyOptions, LobbyService};
use super::session::SessionState;
use super::view::{LobbyView, present_main_menu, present_room};
use crate::error::{LobbyError, Result};
use crate::lobby::{Attributes, DataObject, GAME_STARTED_KEY, UpdateLobbyRequest};
use tracing::{info, warn};

impl<S: LobbyService> LobbyClient<S> {
    /// Create a lobby hosted by us and move into its room
    pub async fn create_lobby<V: LobbyView>(
        &self,
        state: &mut SessionState,
        view: &mut V,
        name: &str,
        max_players: u32,
        is_private: bool,
    ) -> Result<()> {
        let options = CreateLobbyOptions {
            is_private,
            player: state.player_profile(),
            data: Attributes::from([(GAME_STARTED_KEY.to_string(), DataObject::member("false"))]),
        };

        let lobby = self
            .service
            .create_lobby(name, max_players, options)
            .await
            .inspect_err(|err| warn!(%err, name, "Failed to create lobby"))?;

        info!(lobby_id = lobby.id, lobby_code = lobby.lobby_code, "Lobby created");
        state.enter_room(lobby);
        present_room(state, view);
        Ok(())
    }

    pub async fn join_by_id<V: LobbyView>(
        &self,
        state: &mut SessionState,
        view: &mut V,
        lobby_id: &str,
    ) -> Result<()> {
        let lobby = self
            .service
            .join_lobby_by_id(lobby_id, state.player_profile())
            .await
            .inspect_err(|err| warn!(%err, lobby_id, "Failed to join lobby"))?;

        info!(lobby_id, players = lobby.players.len(), "Joined lobby");
        state.enter_room(lobby);
        present_room(state, view);
        Ok(())
    }

    pub async fn join_by_code<V: LobbyView>(
        &self,
        state: &mut SessionState,
        view: &mut V,
        lobby_code: &str,
    ) -> Result<()> {
        let lobby = self
            .service
            .join_lobby_by_code(lobby_code, state.player_profile())
            .await
            .inspect_err(|err| warn!(%err, lobby_code, "Failed to join lobby by code"))?;

        info!(lobby_id = lobby.id, players = lobby.players.len(), "Joined lobby by code");
        state.enter_room(lobby);
        present_room(state, view);
        Ok(())
    }

    /// Leave the held lobby. Does nothing when not in one.
    pub async fn leave<V: LobbyView>(&self, state: &mut SessionState, view: &mut V) -> Result<()> {
        let Some(lobby_id) = state.lobby().map(|l| l.id.clone()) else {
            return Ok(());
        };

        self.service
            .remove_player(&lobby_id, state.player_id())
            .await
            .inspect_err(|err| warn!(%err, lobby_id, "Failed to leave lobby"))?;

        info!(lobby_id, "Left lobby");
        present_main_menu(state, view);
        Ok(())
    }

    /// Remove another member. Host only; the room refreshes on the next poll.
    pub async fn kick(&self, state: &SessionState, player_id: &str) -> Result<()> {
        let lobby_id = hosted_lobby_id(state)?;

        self.service
            .remove_player(&lobby_id, player_id)
            .await
            .inspect_err(|err| warn!(%err, lobby_id, player_id, "Failed to kick player"))?;

        info!(lobby_id, player_id, "Kicked player");
        Ok(())
    }

    /// Flag the game as started for every member and enter it
    pub async fn start_game<V: LobbyView>(
        &self,
        state: &mut SessionState,
        view: &mut V,
    ) -> Result<()> {
        let lobby_id = hosted_lobby_id(state)?;
        let request = UpdateLobbyRequest {
            data: Attributes::from([(GAME_STARTED_KEY.to_string(), DataObject::member("true"))]),
            ..Default::default()
        };

        let lobby = self
            .service
            .update_lobby(&lobby_id, request)
            .await
            .inspect_err(|err| warn!(%err, lobby_id, "Failed to start game"))?;

        info!(lobby_id, "Game started");
        state.apply_snapshot(lobby);
        state.enter_game();
        view.show_game();
        Ok(())
    }

    /// Follow the host into a started game. Returns false if there is nothing to enter.
    pub fn enter_game<V: LobbyView>(&self, state: &mut SessionState, view: &mut V) -> bool {
        if !state.is_member() || !state.is_game_started() {
            return false;
        }
        state.enter_game();
        view.show_game();
        true
    }

    /// One-off refresh of the public lobby list
    pub async fn refresh_lobby_list<V: LobbyView>(&self, view: &mut V) -> Result<()> {
        let lobbies = self
            .service
            .query_lobbies(self.poller.list_filter().clone())
            .await
            .inspect_err(|err| warn!(%err, "Failed to query lobbies"))?;
        view.show_lobby_list(&lobbies);
        Ok(())
    }
}

fn hosted_lobby_id(state: &SessionState) -> Result<String> {
    match state.lobby() {
        Some(lobby) if state.is_host() => Ok(lobby.id.clone()),
        Some(_) => Err(LobbyError::Forbidden("only the host can do this".to_string())),
        None => Err(LobbyError::NotFound),
    }
}
