use serde::{Deserialize, Serialize};

/// JSON document the game server's query endpoint answers with. Everything
/// except the player identifier is optional on the wire: a server that is
/// still starting up may answer with a partial document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gamemode: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub max_players: u32,
    #[serde(default)]
    pub tick_rate: u32,
    #[serde(default)]
    pub players: Vec<QueryPlayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryPlayer {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ping: Option<u32>,
    #[serde(default)]
    pub ip: Option<String>,
}
