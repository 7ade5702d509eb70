pub mod directory;
pub mod http_handler;
pub mod identity;
mod join_code;
pub mod messages;
pub mod model;
pub mod presence;
pub mod rate_limit;

pub use directory::SessionDirectory;
pub use identity::PlayerRegistry;
pub use join_code::normalize_join_code;
pub use messages::{
    CreateLobbyRequest, JoinByCodeRequest, JoinLobbyRequest, PlayerProfile, QueryFilter,
    QueryResponse, SignInResponse, UpdateLobbyRequest,
};
pub use model::{
    Attributes, DataObject, GAME_STARTED_KEY, Lobby, LobbySummary, PLAYER_NAME_KEY, Player,
    Visibility,
};
pub use presence::spawn_presence_monitor;
pub use rate_limit::RateLimiter;
