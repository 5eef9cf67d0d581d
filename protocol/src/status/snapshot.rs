use serde::{Deserialize, Serialize};

/// Display name used for a connected player the server reports without one.
pub const UNKNOWN_PLAYER_NAME: &str = "Unknown";

/// Address placeholder for roster entries without a reported network address.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Static identity of the observed server. Seeded once at startup; later
/// updates may only overwrite a field with a non-empty (non-zero) value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServerIdentity {
    pub name: String,
    pub gamemode: String,
    pub version: String,
    pub max_players: u32,
}

impl ServerIdentity {
    /// Takes over fields from `other`, skipping empty replacements so a
    /// half-initialized server cannot wipe values that are already known.
    pub fn merge_from(&mut self, other: ServerIdentity) {
        if !other.name.is_empty() {
            self.name = other.name;
        }
        if !other.gamemode.is_empty() {
            self.gamemode = other.gamemode;
        }
        if !other.version.is_empty() {
            self.version = other.version;
        }
        if other.max_players > 0 {
            self.max_players = other.max_players;
        }
    }
}

/// One currently connected player. Entries live only as long as the player
/// is connected; the roster is replaced wholesale on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,
    pub ping: Option<u32>,
    pub ip: Option<String>,
}

impl RosterEntry {
    pub fn new(id: u32, name: String, ping: Option<u32>, ip: Option<String>) -> Self {
        let name = if name.is_empty() {
            UNKNOWN_PLAYER_NAME.to_string()
        } else {
            name
        };
        Self { id, name, ping, ip }
    }
}

/// Best-effort performance counters. Kept at the previous value when the
/// measurement facet is unavailable for a cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSample {
    pub memory_mb: f64,
    pub tick_rate: u32,
}

/// The continuously refreshed view of the observed server.
///
/// Invariants: `online` equals `roster.len()` after every refresh,
/// `last_refresh_ms` never decreases, uptime is derived at read time from
/// `started_at_ms` rather than stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusSnapshot {
    pub identity: ServerIdentity,
    pub roster: Vec<RosterEntry>,
    pub online: u32,
    pub performance: PerformanceSample,
    pub started_at_ms: u64,
    pub last_refresh_ms: u64,
    pub available: bool,
}

impl StatusSnapshot {
    pub fn new(identity: ServerIdentity, started_at_ms: u64) -> Self {
        Self {
            identity,
            roster: Vec::new(),
            online: 0,
            performance: PerformanceSample::default(),
            started_at_ms,
            last_refresh_ms: started_at_ms,
            available: false,
        }
    }

    pub fn uptime_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.started_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn identity(name: &str, max: u32) -> ServerIdentity {
        ServerIdentity {
            name: name.to_string(),
            gamemode: "freeroam".to_string(),
            version: "1.1".to_string(),
            max_players: max,
        }
    }

    #[test]
    fn merge_keeps_known_values_over_empty_ones() {
        let mut current = identity("Rage Server", 100);
        current.merge_from(ServerIdentity {
            name: String::new(),
            gamemode: String::new(),
            version: "1.2".to_string(),
            max_players: 0,
        });

        assert_eq!(current.name, "Rage Server");
        assert_eq!(current.gamemode, "freeroam");
        assert_eq!(current.version, "1.2");
        assert_eq!(current.max_players, 100);
    }

    #[test]
    fn merge_takes_non_empty_replacements() {
        let mut current = identity("Rage Server", 100);
        current.merge_from(identity("Renamed", 200));

        assert_eq!(current, identity("Renamed", 200));
    }

    #[test]
    fn roster_entry_defaults_missing_name() {
        let entry = RosterEntry::new(7, String::new(), None, None);
        assert_eq!(entry.name, UNKNOWN_PLAYER_NAME);

        let named = RosterEntry::new(8, "Kolya".to_string(), Some(42), None);
        assert_eq!(named.name, "Kolya");
    }

    #[test]
    fn uptime_is_derived_from_start_time() {
        let snapshot = StatusSnapshot::new(identity("s", 10), 1_000);
        assert_eq!(snapshot.uptime_ms(61_000), 60_000);
        assert_eq!(snapshot.uptime_ms(500), 0);
    }
}
