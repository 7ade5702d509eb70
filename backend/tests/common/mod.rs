#![allow(dead_code)]

use std::time::Duration;
use tokio::net::TcpListener;
use tsudoi::client::{HttpLobbyService, LobbyView, RoomPresentation};
use tsudoi::config::Config;
use tsudoi::lobby::LobbySummary;
use tsudoi::lobby::http_handler::PLAYER_ID_HEADER;

pub struct TestServer {
    base_url: String,
}

impl TestServer {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Config with limits loose enough for tests that don't exercise them
pub fn test_config() -> Config {
    Config {
        port: 0,
        lobby_timeout: Duration::from_secs(30),
        sweep_interval: Duration::from_millis(100),
        rate_limit_per_second: 0,
    }
}

pub async fn spawn_test_server() -> TestServer {
    spawn_test_server_with_config(test_config()).await
}

pub async fn spawn_test_server_with_config(config: Config) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let app = tsudoi::app_with_config(&config);
        axum::serve(listener, app).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
    }
}

pub async fn sign_in(server: &TestServer) -> HttpLobbyService {
    HttpLobbyService::sign_in_anonymously(server.base_url())
        .await
        .expect("Failed to sign in")
}

/// Raw request helper for asserting on status codes
pub fn authed(
    http: &reqwest::Client,
    method: reqwest::Method,
    url: String,
    player_id: &str,
) -> reqwest::RequestBuilder {
    http.request(method, url).header(PLAYER_ID_HEADER, player_id)
}

/// View that records every render call
#[derive(Debug, Default)]
pub struct RecordingView {
    pub lists: Vec<Vec<LobbySummary>>,
    pub rooms: Vec<RoomPresentation>,
    pub main_menu_shown: usize,
    pub game_shown: usize,
}

impl LobbyView for RecordingView {
    fn show_lobby_list(&mut self, lobbies: &[LobbySummary]) {
        self.lists.push(lobbies.to_vec());
    }

    fn show_room(&mut self, room: &RoomPresentation) {
        self.rooms.push(room.clone());
    }

    fn show_main_menu(&mut self) {
        self.main_menu_shown += 1;
    }

    fn show_game(&mut self) {
        self.game_shown += 1;
    }
}
