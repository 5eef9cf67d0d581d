use chrono::Utc;
use ragemon_protocol::status::{PerformanceSample, RosterEntry, ServerIdentity, StatusSnapshot};
use std::sync::Arc;
use tokio::sync::RwLock;

pub fn epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// What one refresh cycle learned. A `None` facet keeps its last-known-good
/// value in the cache.
#[derive(Debug, Default)]
pub struct RefreshOutcome {
    pub available: bool,
    pub identity: Option<ServerIdentity>,
    pub roster: Option<Vec<RosterEntry>>,
    pub performance: Option<PerformanceSample>,
}

/// Exclusive owner of the mutable status snapshot.
///
/// Readers get point-in-time clones; every mutation takes the write lock
/// exactly once, so the roster and its count can never be observed out of
/// sync and two writers cannot interleave a partial replacement.
#[derive(Clone)]
pub struct StatusCache {
    inner: Arc<RwLock<StatusSnapshot>>,
}

impl StatusCache {
    pub fn new(identity: ServerIdentity, started_at_ms: u64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StatusSnapshot::new(identity, started_at_ms))),
        }
    }

    pub async fn snapshot(&self) -> StatusSnapshot {
        self.inner.read().await.clone()
    }

    /// Startup-time identity seeding; follows the non-empty-overwrite rule.
    pub async fn seed_identity(&self, identity: ServerIdentity) {
        let mut snapshot = self.inner.write().await;
        snapshot.identity.merge_from(identity);
    }

    /// Applies one refresh outcome in a single critical section. The
    /// refresh stamp always advances, even for a cycle that learned
    /// nothing: it signals the engine is alive, not that data changed.
    pub async fn apply(&self, outcome: RefreshOutcome) {
        let now_ms = epoch_ms();
        let mut snapshot = self.inner.write().await;

        snapshot.available = outcome.available;
        if let Some(identity) = outcome.identity {
            snapshot.identity.merge_from(identity);
        }
        if let Some(roster) = outcome.roster {
            snapshot.online = roster.len() as u32;
            snapshot.roster = roster;
        }
        if let Some(performance) = outcome.performance {
            snapshot.performance = performance;
        }
        snapshot.last_refresh_ms = snapshot.last_refresh_ms.max(now_ms);
    }
}
