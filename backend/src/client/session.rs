use crate::lobby::{Lobby, PlayerProfile};
use tracing::debug;

/// Which screen the client is presenting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Not in a lobby: lobby list, create and join-by-code
    MainMenu,
    Room,
    Game,
}

/// Everything the client knows about its own session.
/// Passed explicitly into every poll step and action.
#[derive(Debug, Clone)]
pub struct SessionState {
    player_id: String,
    display_name: String,
    lobby: Option<Lobby>,
    screen: Screen,
}

impl SessionState {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            display_name: String::new(),
            lobby: None,
            screen: Screen::MainMenu,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.player_id
        } else {
            &self.display_name
        }
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.display_name = name.into();
    }

    /// Attributes sent when creating or joining a lobby
    pub fn player_profile(&self) -> PlayerProfile {
        PlayerProfile::with_name(self.display_name())
    }

    pub fn lobby(&self) -> Option<&Lobby> {
        self.lobby.as_ref()
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// True when a lobby is held and the cached member list still contains us
    pub fn is_member(&self) -> bool {
        self.lobby
            .as_ref()
            .is_some_and(|lobby| lobby.has_player(&self.player_id))
    }

    pub fn is_host(&self) -> bool {
        self.lobby
            .as_ref()
            .is_some_and(|lobby| lobby.host_id == self.player_id)
    }

    pub fn is_game_started(&self) -> bool {
        self.lobby.as_ref().is_some_and(Lobby::is_game_started)
    }

    /// Replace the held lobby with a freshly joined or created one and show the room
    pub(crate) fn enter_room(&mut self, lobby: Lobby) {
        self.lobby = Some(lobby);
        self.screen = Screen::Room;
    }

    /// Apply a polled snapshot. Older versions of the held lobby are ignored.
    /// Returns false when the snapshot was discarded.
    pub(crate) fn apply_snapshot(&mut self, snapshot: Lobby) -> bool {
        if let Some(current) = &self.lobby
            && current.id == snapshot.id
            && snapshot.version < current.version
        {
            debug!(
                lobby_id = snapshot.id,
                cached = current.version,
                fetched = snapshot.version,
                "Ignoring stale lobby snapshot"
            );
            return false;
        }
        self.lobby = Some(snapshot);
        true
    }

    pub(crate) fn enter_game(&mut self) {
        self.screen = Screen::Game;
    }

    /// Forget the held lobby and return to the main menu.
    /// Returns true only if this changed the screen.
    pub(crate) fn leave_room(&mut self) -> bool {
        self.lobby = None;
        if self.screen == Screen::MainMenu {
            return false;
        }
        self.screen = Screen::MainMenu;
        true
    }
}
