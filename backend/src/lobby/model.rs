use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lobby attribute flagging that the host has started the game
pub const GAME_STARTED_KEY: &str = "IsGameStarted";
/// Player attribute holding the display name
pub const PLAYER_NAME_KEY: &str = "PlayerName";

/// Who may read an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Anyone, including query results for non-members
    Public,
    /// Members of the lobby
    Member,
    /// Lobby data: the host only. Player data: that player only.
    Private,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataObject {
    pub visibility: Visibility,
    pub value: String,
}

impl DataObject {
    pub fn new(visibility: Visibility, value: impl Into<String>) -> Self {
        Self {
            visibility,
            value: value.into(),
        }
    }

    pub fn public(value: impl Into<String>) -> Self {
        Self::new(Visibility::Public, value)
    }

    pub fn member(value: impl Into<String>) -> Self {
        Self::new(Visibility::Member, value)
    }
}

pub type Attributes = BTreeMap<String, DataObject>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    #[serde(default)]
    pub data: Attributes,
}

impl Player {
    pub fn display_name(&self) -> &str {
        self.data
            .get(PLAYER_NAME_KEY)
            .map(|d| d.value.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lobby {
    pub id: String,
    pub name: String,
    pub lobby_code: String,
    pub host_id: String,
    pub max_players: u32,
    pub available_slots: u32,
    pub is_private: bool,
    #[serde(default)]
    pub data: Attributes,
    pub players: Vec<Player>,
    pub created_at_secs: u64,
    pub version: u64,
}

impl Lobby {
    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() as u32 >= self.max_players
    }

    pub fn is_game_started(&self) -> bool {
        self.data
            .get(GAME_STARTED_KEY)
            .is_some_and(|d| d.value == "true")
    }

    /// Recompute derived fields and bump the version after a mutation
    pub(crate) fn touch(&mut self) {
        self.available_slots = self.max_players.saturating_sub(self.players.len() as u32);
        self.version += 1;
    }

    /// Copy of the lobby with only the attributes `viewer` may read
    pub fn redacted_for(&self, viewer: &str) -> Lobby {
        let is_member = self.has_player(viewer);
        let is_host = self.host_id == viewer;

        let data = self
            .data
            .iter()
            .filter(|(_, d)| match d.visibility {
                Visibility::Public => true,
                Visibility::Member => is_member,
                Visibility::Private => is_host,
            })
            .map(|(k, d)| (k.clone(), d.clone()))
            .collect();

        let players = self
            .players
            .iter()
            .map(|p| Player {
                id: p.id.clone(),
                data: p
                    .data
                    .iter()
                    .filter(|(_, d)| match d.visibility {
                        Visibility::Public => true,
                        Visibility::Member => is_member,
                        Visibility::Private => p.id == viewer,
                    })
                    .map(|(k, d)| (k.clone(), d.clone()))
                    .collect(),
            })
            .collect();

        Lobby {
            data,
            players,
            ..self.clone_header()
        }
    }

    pub fn summary(&self) -> LobbySummary {
        LobbySummary {
            id: self.id.clone(),
            name: self.name.clone(),
            host_id: self.host_id.clone(),
            max_players: self.max_players,
            available_slots: self.available_slots,
            is_private: self.is_private,
            data: self
                .data
                .iter()
                .filter(|(_, d)| d.visibility == Visibility::Public)
                .map(|(k, d)| (k.clone(), d.clone()))
                .collect(),
            created_at_secs: self.created_at_secs,
        }
    }

    fn clone_header(&self) -> Lobby {
        Lobby {
            id: self.id.clone(),
            name: self.name.clone(),
            lobby_code: self.lobby_code.clone(),
            host_id: self.host_id.clone(),
            max_players: self.max_players,
            available_slots: self.available_slots,
            is_private: self.is_private,
            data: Attributes::new(),
            players: Vec::new(),
            created_at_secs: self.created_at_secs,
            version: self.version,
        }
    }
}

/// A lobby as seen in query results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbySummary {
    pub id: String,
    pub name: String,
    pub host_id: String,
    pub max_players: u32,
    pub available_slots: u32,
    pub is_private: bool,
    #[serde(default)]
    pub data: Attributes,
    pub created_at_secs: u64,
}

impl LobbySummary {
    pub fn player_count(&self) -> u32 {
        self.max_players - self.available_slots
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn player(id: &str, name: &str) -> Player {
        Player {
            id: id.to_string(),
            data: Attributes::from([(PLAYER_NAME_KEY.to_string(), DataObject::member(name))]),
        }
    }

    pub(crate) fn lobby_with(host: &str, members: &[&str]) -> Lobby {
        let mut lobby = Lobby {
            id: "lobby-1".to_string(),
            name: "Room".to_string(),
            lobby_code: "ABC234".to_string(),
            host_id: host.to_string(),
            max_players: 4,
            available_slots: 0,
            is_private: false,
            data: Attributes::from([(GAME_STARTED_KEY.to_string(), DataObject::member("false"))]),
            players: members.iter().map(|id| player(id, id)).collect(),
            created_at_secs: 0,
            version: 0,
        };
        lobby.touch();
        lobby
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let mut p = player("p-1", "");
        assert_eq!(p.display_name(), "p-1");
        p.data.clear();
        assert_eq!(p.display_name(), "p-1");
        assert_eq!(player("p-2", "Alice").display_name(), "Alice");
    }

    #[test]
    fn touch_recomputes_slots_and_bumps_version() {
        let mut lobby = lobby_with("alice", &["alice", "bob"]);
        assert_eq!(lobby.available_slots, 2);
        let before = lobby.version;

        lobby.players.pop();
        lobby.touch();

        assert_eq!(lobby.available_slots, 3);
        assert_eq!(lobby.version, before + 1);
    }

    #[test]
    fn game_started_reads_attribute() {
        let mut lobby = lobby_with("alice", &["alice"]);
        assert!(!lobby.is_game_started());
        lobby
            .data
            .insert(GAME_STARTED_KEY.to_string(), DataObject::member("true"));
        assert!(lobby.is_game_started());
    }

    #[test]
    fn member_sees_member_data_but_not_host_private_data() {
        let mut lobby = lobby_with("alice", &["alice", "bob"]);
        lobby.data.insert(
            "Secret".to_string(),
            DataObject::new(Visibility::Private, "relay-key"),
        );

        let view = lobby.redacted_for("bob");
        assert!(view.data.contains_key(GAME_STARTED_KEY));
        assert!(!view.data.contains_key("Secret"));

        let host_view = lobby.redacted_for("alice");
        assert!(host_view.data.contains_key("Secret"));
    }

    #[test]
    fn private_player_data_only_visible_to_owner() {
        let mut lobby = lobby_with("alice", &["alice", "bob"]);
        lobby.players[1]
            .data
            .insert("Token".to_string(), DataObject::new(Visibility::Private, "x"));

        assert!(!lobby.redacted_for("alice").players[1].data.contains_key("Token"));
        assert!(lobby.redacted_for("bob").players[1].data.contains_key("Token"));
    }

    #[test]
    fn summary_keeps_only_public_data() {
        let mut lobby = lobby_with("alice", &["alice"]);
        lobby
            .data
            .insert("Map".to_string(), DataObject::public("harbor"));

        let summary = lobby.summary();
        assert_eq!(summary.data.len(), 1);
        assert_eq!(summary.data["Map"].value, "harbor");
        assert_eq!(summary.player_count(), 1);
    }
}
