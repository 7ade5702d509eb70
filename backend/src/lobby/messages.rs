use super::model::{Attributes, DataObject, LobbySummary, PLAYER_NAME_KEY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_QUERY_LIMIT: usize = 25;
pub const MAX_QUERY_LIMIT: usize = 100;

/// Attributes a player brings when creating or joining a lobby
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default)]
    pub data: Attributes,
}

impl PlayerProfile {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            data: Attributes::from([(PLAYER_NAME_KEY.to_string(), DataObject::member(name))]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLobbyRequest {
    pub name: String,
    pub max_players: u32,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub player: PlayerProfile,
    #[serde(default)]
    pub data: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinLobbyRequest {
    #[serde(default)]
    pub player: PlayerProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinByCodeRequest {
    pub lobby_code: String,
    #[serde(default)]
    pub player: PlayerProfile,
}

/// Host-only lobby update. Absent fields are left unchanged; `data` is merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLobbyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_id: Option<String>,
    #[serde(default)]
    pub data: Attributes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFilter {
    /// Case-insensitive substring of the lobby name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_contains: Option<String>,
    /// Include lobbies with no free slot
    #[serde(default)]
    pub include_full: bool,
    /// Public attributes that must match exactly
    #[serde(default)]
    pub public_data: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl QueryFilter {
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_QUERY_LIMIT)
            .min(MAX_QUERY_LIMIT)
    }

    pub fn matches(&self, lobby: &LobbySummary) -> bool {
        if lobby.is_private {
            return false;
        }
        if !self.include_full && lobby.available_slots == 0 {
            return false;
        }
        if let Some(needle) = &self.name_contains
            && !lobby.name.to_lowercase().contains(&needle.to_lowercase())
        {
            return false;
        }
        self.public_data
            .iter()
            .all(|(key, value)| lobby.data.get(key).is_some_and(|d| &d.value == value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<LobbySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub player_id: String,
}
