use super::join_code::{claim_join_code, normalize_join_code};
use super::messages::{CreateLobbyRequest, PlayerProfile, QueryFilter, UpdateLobbyRequest};
use super::model::{Lobby, LobbySummary, Player};
use crate::error::{LobbyError, Result};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

pub const DEFAULT_LOBBY_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_PLAYERS: u32 = 100;
pub const MAX_NAME_LENGTH: usize = 64;

struct LobbyRecord {
    lobby: Lobby,
    last_heartbeat: Instant,
    /// Creation order, used to list newest lobbies first
    sequence: u64,
}

/// All live lobbies, their membership and their liveness.
/// Every mutation of a lobby happens while holding its map entry.
pub struct SessionDirectory {
    lobbies: DashMap<String, LobbyRecord>,
    codes: DashMap<String, String>, // lobby_code -> lobby_id
    next_sequence: AtomicU64,
    lobby_timeout: Duration,
}

impl SessionDirectory {
    pub fn new(lobby_timeout: Option<Duration>) -> Self {
        Self {
            lobbies: DashMap::new(),
            codes: DashMap::new(),
            next_sequence: AtomicU64::new(0),
            lobby_timeout: lobby_timeout.unwrap_or(DEFAULT_LOBBY_TIMEOUT),
        }
    }

    pub fn lobby_timeout(&self) -> Duration {
        self.lobby_timeout
    }

    pub fn len(&self) -> usize {
        self.lobbies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lobbies.is_empty()
    }

    /// Create a lobby with `host_id` as host and first member
    pub fn create_lobby(&self, host_id: &str, request: CreateLobbyRequest) -> Result<Lobby> {
        let name = validate_name(&request.name)?;
        validate_capacity(request.max_players)?;

        let lobby_id = uuid::Uuid::new_v4().to_string();
        let lobby_code = claim_join_code(|code| match self.codes.entry(code.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(lobby_id.clone());
                true
            }
        });
        let mut lobby = Lobby {
            id: lobby_id,
            name,
            lobby_code: lobby_code.clone(),
            host_id: host_id.to_string(),
            max_players: request.max_players,
            available_slots: 0,
            is_private: request.is_private,
            data: request.data,
            players: vec![Player {
                id: host_id.to_string(),
                data: request.player.data,
            }],
            created_at_secs: unix_now_secs(),
            version: 0,
        };
        lobby.touch();

        let snapshot = lobby.redacted_for(host_id);
        let record = LobbyRecord {
            lobby,
            last_heartbeat: Instant::now(),
            sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
        };

        self.lobbies.insert(snapshot.id.clone(), record);

        info!(
            lobby_id = snapshot.id,
            lobby_code,
            host_id,
            max_players = snapshot.max_players,
            is_private = snapshot.is_private,
            "Created lobby"
        );
        Ok(snapshot)
    }

    /// Public lobbies matching `filter`, newest first
    pub fn query(&self, filter: &QueryFilter) -> Vec<LobbySummary> {
        let mut matches: Vec<(u64, LobbySummary)> = self
            .lobbies
            .iter()
            .map(|entry| (entry.sequence, entry.lobby.summary()))
            .filter(|(_, summary)| filter.matches(summary))
            .collect();

        matches.sort_by(|a, b| b.0.cmp(&a.0));
        matches.truncate(filter.effective_limit());

        debug!(results = matches.len(), "Lobby query");
        matches.into_iter().map(|(_, summary)| summary).collect()
    }

    /// Snapshot of a lobby as seen by one of its members
    pub fn get(&self, lobby_id: &str, caller: &str) -> Result<Lobby> {
        let record = self.lobbies.get(lobby_id).ok_or(LobbyError::NotFound)?;
        if !record.lobby.has_player(caller) {
            return Err(LobbyError::Forbidden("not a member of this lobby".to_string()));
        }
        Ok(record.lobby.redacted_for(caller))
    }

    pub fn join_by_id(
        &self,
        lobby_id: &str,
        caller: &str,
        profile: PlayerProfile,
    ) -> Result<Lobby> {
        let mut record = self.lobbies.get_mut(lobby_id).ok_or(LobbyError::NotFound)?;
        if record.lobby.has_player(caller) {
            return Err(LobbyError::AlreadyMember);
        }
        if record.lobby.is_private {
            return Err(LobbyError::Forbidden(
                "private lobbies can only be joined by code".to_string(),
            ));
        }
        add_member(&mut record.lobby, caller, profile)
    }

    pub fn join_by_code(&self, code: &str, caller: &str, profile: PlayerProfile) -> Result<Lobby> {
        let code = normalize_join_code(code);
        let lobby_id = self
            .codes
            .get(&code)
            .map(|r| r.clone())
            .ok_or(LobbyError::NotFound)?;

        let mut record = self.lobbies.get_mut(&lobby_id).ok_or(LobbyError::NotFound)?;
        if record.lobby.has_player(caller) {
            return Err(LobbyError::AlreadyMember);
        }
        add_member(&mut record.lobby, caller, profile)
    }

    pub fn heartbeat(&self, lobby_id: &str, caller: &str) -> Result<()> {
        self.heartbeat_at(lobby_id, caller, Instant::now())
    }

    pub(crate) fn heartbeat_at(&self, lobby_id: &str, caller: &str, now: Instant) -> Result<()> {
        let mut record = self.lobbies.get_mut(lobby_id).ok_or(LobbyError::NotFound)?;
        if record.lobby.host_id != caller {
            return Err(LobbyError::Forbidden("only the host can heartbeat a lobby".to_string()));
        }
        record.last_heartbeat = now;
        debug!(lobby_id, "Heartbeat");
        Ok(())
    }

    /// Host-only update of lobby settings and attributes
    pub fn update_lobby(
        &self,
        lobby_id: &str,
        caller: &str,
        request: UpdateLobbyRequest,
    ) -> Result<Lobby> {
        let mut record = self.lobbies.get_mut(lobby_id).ok_or(LobbyError::NotFound)?;
        if record.lobby.host_id != caller {
            return Err(LobbyError::Forbidden("only the host can update the lobby".to_string()));
        }

        let name = request.name.as_deref().map(validate_name).transpose()?;
        if let Some(max_players) = request.max_players {
            validate_capacity(max_players)?;
            if (max_players as usize) < record.lobby.players.len() {
                return Err(LobbyError::InvalidRequest(
                    "capacity is below the current member count".to_string(),
                ));
            }
        }
        if let Some(host_id) = &request.host_id
            && !record.lobby.has_player(host_id)
        {
            return Err(LobbyError::InvalidRequest(
                "new host must be a member of the lobby".to_string(),
            ));
        }

        let lobby = &mut record.lobby;
        if let Some(name) = name {
            lobby.name = name;
        }
        if let Some(max_players) = request.max_players {
            lobby.max_players = max_players;
        }
        if let Some(is_private) = request.is_private {
            lobby.is_private = is_private;
        }
        if let Some(host_id) = request.host_id {
            info!(lobby_id, from = caller, to = host_id, "Host transferred");
            lobby.host_id = host_id;
        }
        lobby.data.extend(request.data);
        lobby.touch();

        let snapshot = lobby.redacted_for(caller);
        record.last_heartbeat = Instant::now();

        info!(lobby_id, version = snapshot.version, "Lobby updated");
        Ok(snapshot)
    }

    /// Remove `target` from a lobby. Members may remove themselves, the host may remove anyone.
    pub fn remove_player(&self, lobby_id: &str, caller: &str, target: &str) -> Result<()> {
        self.remove_player_at(lobby_id, caller, target, Instant::now())
    }

    pub(crate) fn remove_player_at(
        &self,
        lobby_id: &str,
        caller: &str,
        target: &str,
        now: Instant,
    ) -> Result<()> {
        let now_empty = {
            let mut record = self.lobbies.get_mut(lobby_id).ok_or(LobbyError::NotFound)?;
            let record = &mut *record;
            let lobby = &mut record.lobby;

            if caller != target && caller != lobby.host_id {
                return Err(LobbyError::Forbidden(
                    "only the host can remove other players".to_string(),
                ));
            }

            let Some(index) = lobby.players.iter().position(|p| p.id == target) else {
                return Err(LobbyError::NotFound);
            };
            lobby.players.remove(index);

            if caller == target {
                info!(lobby_id, player_id = target, "Player left");
            } else {
                info!(lobby_id, player_id = target, host_id = caller, "Player kicked");
            }

            // Longest-standing member takes over, with a full timeout to start heartbeating
            if lobby.host_id == target
                && let Some(next) = lobby.players.first()
            {
                info!(lobby_id, host_id = next.id, "Host migrated");
                lobby.host_id = next.id.clone();
                record.last_heartbeat = now;
            }

            lobby.touch();
            lobby.players.is_empty()
        };

        if now_empty {
            self.remove_if_empty(lobby_id);
        }
        Ok(())
    }

    /// Delete lobbies whose host has not signalled liveness within the timeout.
    /// Returns the ids of the deleted lobbies.
    pub fn reap_expired(&self, now: Instant) -> Vec<String> {
        let timeout = self.lobby_timeout;
        let expired = |record: &LobbyRecord| {
            now.saturating_duration_since(record.last_heartbeat) > timeout
        };

        let candidates: Vec<String> = self
            .lobbies
            .iter()
            .filter(|entry| expired(entry.value()))
            .map(|entry| entry.key().clone())
            .collect();

        let mut reaped = Vec::with_capacity(candidates.len());
        for lobby_id in candidates {
            // Re-check under the entry lock: a heartbeat may have landed meanwhile
            if let Some((_, record)) = self.lobbies.remove_if(&lobby_id, |_, r| expired(r)) {
                self.codes.remove(&record.lobby.lobby_code);
                info!(
                    lobby_id,
                    host_id = record.lobby.host_id,
                    "Lobby reclaimed after missing heartbeats"
                );
                reaped.push(lobby_id);
            }
        }
        reaped
    }

    fn remove_if_empty(&self, lobby_id: &str) {
        if let Some((_, record)) = self
            .lobbies
            .remove_if(lobby_id, |_, r| r.lobby.players.is_empty())
        {
            self.codes.remove(&record.lobby.lobby_code);
            info!(lobby_id, "Deleted empty lobby");
        }
    }
}

fn add_member(lobby: &mut Lobby, player_id: &str, profile: PlayerProfile) -> Result<Lobby> {
    // The last member just left and the lobby is about to be deleted
    if lobby.players.is_empty() {
        return Err(LobbyError::NotFound);
    }
    if lobby.is_full() {
        return Err(LobbyError::LobbyFull);
    }

    lobby.players.push(Player {
        id: player_id.to_string(),
        data: profile.data,
    });
    lobby.touch();

    info!(
        lobby_id = lobby.id,
        player_id,
        players = lobby.players.len(),
        "Player joined"
    );
    Ok(lobby.redacted_for(player_id))
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LobbyError::InvalidRequest("lobby name is empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(LobbyError::InvalidRequest(format!(
            "lobby name is longer than {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

fn validate_capacity(max_players: u32) -> Result<()> {
    if max_players == 0 || max_players > MAX_PLAYERS {
        return Err(LobbyError::InvalidRequest(format!(
            "max_players must be between 1 and {MAX_PLAYERS}"
        )));
    }
    Ok(())
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::model::{DataObject, GAME_STARTED_KEY, Visibility};

    fn create_request(name: &str, max_players: u32) -> CreateLobbyRequest {
        CreateLobbyRequest {
            name: name.to_string(),
            max_players,
            is_private: false,
            player: PlayerProfile::with_name("Alice"),
            data: [(GAME_STARTED_KEY.to_string(), DataObject::member("false"))].into(),
        }
    }

    fn directory_with_lobby(max_players: u32) -> (SessionDirectory, Lobby) {
        let directory = SessionDirectory::new(None);
        let lobby = directory
            .create_lobby("alice", create_request("Room", max_players))
            .unwrap();
        (directory, lobby)
    }

    #[test]
    fn creator_becomes_host_and_first_member() {
        let (directory, lobby) = directory_with_lobby(4);

        assert_eq!(lobby.host_id, "alice");
        assert_eq!(lobby.players.len(), 1);
        assert_eq!(lobby.available_slots, 3);
        assert_eq!(lobby.lobby_code.len(), 6);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn rejects_invalid_capacity_and_name() {
        let directory = SessionDirectory::new(None);

        let err = directory.create_lobby("alice", create_request("Room", 0)).unwrap_err();
        assert!(matches!(err, LobbyError::InvalidRequest(_)));

        let err = directory.create_lobby("alice", create_request("Room", 101)).unwrap_err();
        assert!(matches!(err, LobbyError::InvalidRequest(_)));

        let err = directory.create_lobby("alice", create_request("   ", 4)).unwrap_err();
        assert!(matches!(err, LobbyError::InvalidRequest(_)));

        assert!(directory.is_empty());
    }

    #[test]
    fn join_by_code_adds_member() {
        let (directory, lobby) = directory_with_lobby(4);

        let joined = directory
            .join_by_code(&lobby.lobby_code.to_lowercase(), "bob", PlayerProfile::with_name("Bob"))
            .unwrap();

        assert_eq!(joined.players.len(), 2);
        assert!(joined.has_player("bob"));
        assert_eq!(joined.player("bob").unwrap().display_name(), "Bob");
        assert_eq!(joined.available_slots, 2);
    }

    #[test]
    fn join_unknown_code_is_not_found() {
        let directory = SessionDirectory::new(None);
        let err = directory
            .join_by_code("ZZZZZZ", "bob", PlayerProfile::default())
            .unwrap_err();
        assert_eq!(err, LobbyError::NotFound);
    }

    #[test]
    fn join_full_lobby_is_rejected() {
        let (directory, lobby) = directory_with_lobby(2);
        directory
            .join_by_id(&lobby.id, "bob", PlayerProfile::default())
            .unwrap();

        let err = directory
            .join_by_id(&lobby.id, "carol", PlayerProfile::default())
            .unwrap_err();
        assert_eq!(err, LobbyError::LobbyFull);
    }

    #[test]
    fn joining_twice_is_rejected() {
        let (directory, lobby) = directory_with_lobby(4);
        directory
            .join_by_id(&lobby.id, "bob", PlayerProfile::default())
            .unwrap();

        let err = directory
            .join_by_id(&lobby.id, "bob", PlayerProfile::default())
            .unwrap_err();
        assert_eq!(err, LobbyError::AlreadyMember);
    }

    #[test]
    fn private_lobby_hidden_and_only_joinable_by_code() {
        let directory = SessionDirectory::new(None);
        let mut request = create_request("Secret room", 4);
        request.is_private = true;
        let lobby = directory.create_lobby("alice", request).unwrap();

        assert!(directory.query(&QueryFilter::default()).is_empty());

        let err = directory
            .join_by_id(&lobby.id, "bob", PlayerProfile::default())
            .unwrap_err();
        assert!(matches!(err, LobbyError::Forbidden(_)));

        assert!(directory
            .join_by_code(&lobby.lobby_code, "bob", PlayerProfile::default())
            .is_ok());
    }

    #[test]
    fn get_is_forbidden_for_non_members() {
        let (directory, lobby) = directory_with_lobby(4);

        assert!(directory.get(&lobby.id, "alice").is_ok());
        assert!(matches!(
            directory.get(&lobby.id, "mallory"),
            Err(LobbyError::Forbidden(_))
        ));
        assert_eq!(directory.get("missing", "alice"), Err(LobbyError::NotFound));
    }

    #[test]
    fn query_lists_newest_first_and_skips_full() {
        let directory = SessionDirectory::new(None);
        directory.create_lobby("a", create_request("First", 4)).unwrap();
        directory.create_lobby("b", create_request("Second", 4)).unwrap();
        directory.create_lobby("c", create_request("Solo", 1)).unwrap();

        let names: Vec<String> = directory
            .query(&QueryFilter::default())
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn only_host_can_heartbeat_and_update() {
        let (directory, lobby) = directory_with_lobby(4);
        directory
            .join_by_id(&lobby.id, "bob", PlayerProfile::default())
            .unwrap();

        assert!(directory.heartbeat(&lobby.id, "alice").is_ok());
        assert!(matches!(
            directory.heartbeat(&lobby.id, "bob"),
            Err(LobbyError::Forbidden(_))
        ));
        assert!(matches!(
            directory.update_lobby(&lobby.id, "bob", UpdateLobbyRequest::default()),
            Err(LobbyError::Forbidden(_))
        ));
    }

    #[test]
    fn update_merges_data_and_bumps_version() {
        let (directory, lobby) = directory_with_lobby(4);
        let request = UpdateLobbyRequest {
            data: [(GAME_STARTED_KEY.to_string(), DataObject::member("true"))].into(),
            ..Default::default()
        };

        let updated = directory.update_lobby(&lobby.id, "alice", request).unwrap();

        assert!(updated.is_game_started());
        assert!(updated.version > lobby.version);
    }

    #[test]
    fn update_rejects_capacity_below_membership_and_foreign_host() {
        let (directory, lobby) = directory_with_lobby(4);
        directory
            .join_by_id(&lobby.id, "bob", PlayerProfile::default())
            .unwrap();

        let shrink = UpdateLobbyRequest {
            max_players: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            directory.update_lobby(&lobby.id, "alice", shrink),
            Err(LobbyError::InvalidRequest(_))
        ));

        let transfer = UpdateLobbyRequest {
            host_id: Some("mallory".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            directory.update_lobby(&lobby.id, "alice", transfer),
            Err(LobbyError::InvalidRequest(_))
        ));
    }

    #[test]
    fn host_transfer_through_update() {
        let (directory, lobby) = directory_with_lobby(4);
        directory
            .join_by_id(&lobby.id, "bob", PlayerProfile::default())
            .unwrap();

        let transfer = UpdateLobbyRequest {
            host_id: Some("bob".to_string()),
            ..Default::default()
        };
        let updated = directory.update_lobby(&lobby.id, "alice", transfer).unwrap();
        assert_eq!(updated.host_id, "bob");
    }

    #[test]
    fn host_can_kick_but_members_cannot() {
        let (directory, lobby) = directory_with_lobby(4);
        directory.join_by_id(&lobby.id, "bob", PlayerProfile::default()).unwrap();
        directory.join_by_id(&lobby.id, "carol", PlayerProfile::default()).unwrap();

        assert!(matches!(
            directory.remove_player(&lobby.id, "bob", "carol"),
            Err(LobbyError::Forbidden(_))
        ));

        directory.remove_player(&lobby.id, "alice", "carol").unwrap();
        assert!(matches!(
            directory.get(&lobby.id, "carol"),
            Err(LobbyError::Forbidden(_))
        ));
    }

    #[test]
    fn removing_non_member_is_not_found() {
        let (directory, lobby) = directory_with_lobby(4);
        assert_eq!(
            directory.remove_player(&lobby.id, "alice", "ghost"),
            Err(LobbyError::NotFound)
        );
    }

    #[test]
    fn host_leaving_migrates_host_to_oldest_member() {
        let (directory, lobby) = directory_with_lobby(4);
        directory.join_by_id(&lobby.id, "bob", PlayerProfile::default()).unwrap();
        directory.join_by_id(&lobby.id, "carol", PlayerProfile::default()).unwrap();

        directory.remove_player(&lobby.id, "alice", "alice").unwrap();

        let snapshot = directory.get(&lobby.id, "bob").unwrap();
        assert_eq!(snapshot.host_id, "bob");
        assert_eq!(snapshot.players.len(), 2);
    }

    #[test]
    fn last_member_leaving_deletes_lobby_and_frees_code() {
        let (directory, lobby) = directory_with_lobby(4);

        directory.remove_player(&lobby.id, "alice", "alice").unwrap();

        assert!(directory.is_empty());
        assert_eq!(
            directory.join_by_code(&lobby.lobby_code, "bob", PlayerProfile::default()),
            Err(LobbyError::NotFound)
        );
    }

    #[test]
    fn reaps_lobbies_without_heartbeat() {
        let directory = SessionDirectory::new(Some(Duration::from_secs(30)));
        let lobby = directory.create_lobby("alice", create_request("Room", 4)).unwrap();
        let start = Instant::now();

        assert!(directory.reap_expired(start + Duration::from_secs(10)).is_empty());

        let reaped = directory.reap_expired(start + Duration::from_secs(31));
        assert_eq!(reaped, vec![lobby.id.clone()]);
        assert!(directory.is_empty());
        assert_eq!(
            directory.join_by_code(&lobby.lobby_code, "bob", PlayerProfile::default()),
            Err(LobbyError::NotFound)
        );
    }

    #[test]
    fn heartbeat_extends_lifetime() {
        let directory = SessionDirectory::new(Some(Duration::from_secs(30)));
        let lobby = directory.create_lobby("alice", create_request("Room", 4)).unwrap();
        let start = Instant::now();

        directory
            .heartbeat_at(&lobby.id, "alice", start + Duration::from_secs(20))
            .unwrap();

        assert!(directory.reap_expired(start + Duration::from_secs(45)).is_empty());
        assert_eq!(directory.reap_expired(start + Duration::from_secs(51)).len(), 1);
    }

    #[test]
    fn migrated_host_gets_a_full_timeout() {
        let directory = SessionDirectory::new(Some(Duration::from_secs(30)));
        let lobby = directory.create_lobby("alice", create_request("Room", 4)).unwrap();
        let start = Instant::now();
        directory.join_by_id(&lobby.id, "bob", PlayerProfile::default()).unwrap();

        directory
            .remove_player_at(&lobby.id, "alice", "alice", start + Duration::from_secs(14))
            .unwrap();

        // Bob's first heartbeat is due 15s after he learns he is host
        assert!(directory.reap_expired(start + Duration::from_secs(31)).is_empty());
        assert_eq!(directory.get(&lobby.id, "bob").unwrap().host_id, "bob");
        assert_eq!(directory.reap_expired(start + Duration::from_secs(45)).len(), 1);
    }

    #[test]
    fn lobby_emptied_before_deletion_rejects_joins() {
        let (directory, lobby) = directory_with_lobby(4);
        // State between the last member leaving and the lobby being deleted
        directory.lobbies.get_mut(&lobby.id).unwrap().lobby.players.clear();

        assert_eq!(
            directory.join_by_id(&lobby.id, "bob", PlayerProfile::default()),
            Err(LobbyError::NotFound)
        );
        assert_eq!(
            directory.join_by_code(&lobby.lobby_code, "bob", PlayerProfile::default()),
            Err(LobbyError::NotFound)
        );
    }

    #[test]
    fn concurrent_creates_get_distinct_codes() {
        let directory = std::sync::Arc::new(SessionDirectory::new(None));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let directory = directory.clone();
                std::thread::spawn(move || {
                    (0..50)
                        .map(|j| {
                            let host = format!("host-{i}-{j}");
                            directory.create_lobby(&host, create_request("Room", 4)).unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        let lobbies: Vec<Lobby> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();

        let codes: std::collections::HashSet<_> =
            lobbies.iter().map(|l| l.lobby_code.clone()).collect();
        assert_eq!(codes.len(), lobbies.len());
        for lobby in &lobbies {
            let joined = directory
                .join_by_code(&lobby.lobby_code, "guest", PlayerProfile::default())
                .unwrap();
            assert_eq!(joined.id, lobby.id);
        }
    }

    #[test]
    fn snapshots_are_redacted_per_caller() {
        let directory = SessionDirectory::new(None);
        let mut request = create_request("Room", 4);
        request.data.insert(
            "RelayCode".to_string(),
            DataObject::new(Visibility::Private, "xyz"),
        );
        let lobby = directory.create_lobby("alice", request).unwrap();
        assert!(lobby.data.contains_key("RelayCode"));

        let joined = directory
            .join_by_id(&lobby.id, "bob", PlayerProfile::default())
            .unwrap();
        assert!(!joined.data.contains_key("RelayCode"));
        assert!(joined.data.contains_key(GAME_STARTED_KEY));
    }
}
