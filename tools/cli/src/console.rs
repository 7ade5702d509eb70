use tsudoi::client::{LobbyView, RoomAction, RoomPresentation};
use tsudoi::lobby::LobbySummary;

/// Prints lobby updates to stdout, skipping repeats of the last render
#[derive(Default)]
pub struct ConsoleView {
    last_list: Option<Vec<LobbySummary>>,
    last_room: Option<RoomPresentation>,
    /// The lobby list is not printed while inside a room
    in_room: bool,
}

impl LobbyView for ConsoleView {
    fn show_lobby_list(&mut self, lobbies: &[LobbySummary]) {
        if self.in_room {
            return;
        }
        if self.last_list.as_deref() == Some(lobbies) {
            return;
        }
        self.last_list = Some(lobbies.to_vec());

        if lobbies.is_empty() {
            println!("No open lobbies");
            return;
        }
        println!("Open lobbies:");
        for lobby in lobbies {
            println!(
                "  {:<24} {}/{}  id={}",
                lobby.name,
                lobby.player_count(),
                lobby.max_players,
                lobby.id
            );
        }
    }

    fn show_room(&mut self, room: &RoomPresentation) {
        self.in_room = true;
        if self.last_room.as_ref() == Some(room) {
            return;
        }
        self.last_room = Some(room.clone());

        println!("Room {} (code {})", room.name, room.lobby_code);
        for member in &room.members {
            let marker = if member.kickable { "  [kick]" } else { "" };
            println!("  {} ({}){}", member.display_name, member.player_id, marker);
        }
        match room.action {
            RoomAction::StartGame => println!("Type 'start' to start the game"),
            RoomAction::EnterGame => println!("The host started the game, type 'enter' to join"),
            RoomAction::None => {}
        }
    }

    fn show_main_menu(&mut self) {
        self.in_room = false;
        self.last_room = None;
        self.last_list = None;
        println!("Back at the main menu");
    }

    fn show_game(&mut self) {
        println!("Game started");
    }
}
