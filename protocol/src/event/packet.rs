use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerEventData {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// Lifecycle signal pushed by the observed game server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum LifecycleEvent {
    PlayerJoin(PlayerEventData),
    PlayerQuit(PlayerEventData),
}

/// One datagram on the wire: the tagged event plus the sender's epoch-ms
/// clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventPacket {
    #[serde(flatten)]
    pub event: LifecycleEvent,
    pub time: u64,
}
