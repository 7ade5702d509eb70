use super::session::SessionState;
use crate::lobby::{Lobby, LobbySummary};

/// What the room's main button offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomAction {
    /// Host: start the game
    StartGame,
    /// Guest, once the host started: enter the game
    EnterGame,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRow {
    pub player_id: String,
    pub display_name: String,
    pub kickable: bool,
}

/// Room contents prepared for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPresentation {
    pub lobby_id: String,
    pub name: String,
    pub lobby_code: String,
    pub is_host: bool,
    pub members: Vec<MemberRow>,
    pub action: RoomAction,
}

impl RoomPresentation {
    pub fn build(state: &SessionState, lobby: &Lobby) -> Self {
        let is_host = lobby.host_id == state.player_id();

        let members = lobby
            .players
            .iter()
            .map(|player| MemberRow {
                player_id: player.id.clone(),
                display_name: player.display_name().to_string(),
                kickable: is_host && player.id != state.player_id(),
            })
            .collect();

        let action = if is_host {
            RoomAction::StartGame
        } else if lobby.is_game_started() {
            RoomAction::EnterGame
        } else {
            RoomAction::None
        };

        Self {
            lobby_id: lobby.id.clone(),
            name: lobby.name.clone(),
            lobby_code: lobby.lobby_code.clone(),
            is_host,
            members,
            action,
        }
    }
}

/// Presentation layer the client renders into
pub trait LobbyView {
    fn show_lobby_list(&mut self, lobbies: &[LobbySummary]);

    fn show_room(&mut self, room: &RoomPresentation);

    /// Called once each time the client stops being in a lobby
    fn show_main_menu(&mut self);

    fn show_game(&mut self);
}

/// Render the held lobby, or fall back to the main menu if we are no longer in it
pub(crate) fn present_room<V: LobbyView>(state: &mut SessionState, view: &mut V) {
    if !state.is_member() {
        present_main_menu(state, view);
        return;
    }
    let Some(lobby) = state.lobby() else {
        return;
    };
    let room = RoomPresentation::build(state, lobby);
    view.show_room(&room);
}

/// Drop local lobby state; the view hears about it once per exit
pub(crate) fn present_main_menu<V: LobbyView>(state: &mut SessionState, view: &mut V) {
    if state.leave_room() {
        view.show_main_menu();
    }
}
