use crate::monitor::cache::{RefreshOutcome, StatusCache};
use crate::runtime::{Capability, GameRuntime};
use log::{debug, warn};
use ragemon_protocol::status::{PerformanceSample, RosterEntry, ServerIdentity};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

const TRIGGER_QUEUE_CAPACITY: usize = 32;

/// A discrete reason to refresh the cache outside the timer cadence. Both
/// variants run the identical refresh routine; the roster is always
/// re-enumerated wholesale, never patched from the trigger's payload.
#[derive(Debug, Clone)]
pub enum RefreshTrigger {
    PlayerJoined { id: u32, name: String },
    PlayerLeft { id: u32, name: String },
}

/// Clonable sender half of the trigger queue, handed to the lifecycle
/// intake.
#[derive(Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<RefreshTrigger>,
}

impl RefreshHandle {
    /// Enqueues a trigger. A full queue means refreshes are already
    /// pending; the dropped trigger loses nothing because refresh is
    /// idempotent and re-reads the whole roster.
    pub fn notify(&self, trigger: RefreshTrigger) {
        if self.tx.try_send(trigger).is_err() {
            debug!("refresh queue full, trigger coalesced into pending refresh");
        }
    }
}

/// Single writer of the status cache. Timer ticks and lifecycle triggers
/// are serialized through one queue inside `spawn`, so two refreshes can
/// never interleave.
pub struct RefreshEngine {
    cache: StatusCache,
    runtime: Arc<dyn GameRuntime>,
}

impl RefreshEngine {
    pub fn new(cache: StatusCache, runtime: Arc<dyn GameRuntime>) -> Self {
        Self { cache, runtime }
    }

    /// One idempotent refresh cycle. Never fails and never panics: a facet
    /// that errors is logged and left at its last-known-good value for this
    /// cycle.
    pub async fn refresh(&self) {
        let available = self.runtime.is_available().await;

        let identity = if available && self.runtime.has_capability(Capability::Config).await {
            match self.runtime.config().await {
                Ok(cfg) => Some(ServerIdentity {
                    name: cfg.name,
                    gamemode: cfg.gamemode,
                    version: cfg.version,
                    max_players: cfg.max_players,
                }),
                Err(err) => {
                    warn!("config read failed, keeping previous identity: {err:#}");
                    None
                }
            }
        } else {
            None
        };

        let roster = if available && self.runtime.has_capability(Capability::Roster).await {
            match self.runtime.players().await {
                Ok(players) => Some(
                    players
                        .into_iter()
                        .map(|player| {
                            RosterEntry::new(player.id, player.name, player.ping, player.ip)
                        })
                        .collect(),
                ),
                Err(err) => {
                    warn!("roster enumeration failed, keeping previous roster: {err:#}");
                    None
                }
            }
        } else {
            None
        };

        // Performance is an independent facet: the process may still be
        // measurable while the query endpoint is down, and vice versa.
        let performance = if self.runtime.has_capability(Capability::Performance).await {
            match self.runtime.performance().await {
                Ok(perf) => Some(PerformanceSample {
                    memory_mb: perf.memory_mb,
                    tick_rate: perf.tick_rate,
                }),
                Err(err) => {
                    warn!("performance sampling failed, keeping previous sample: {err:#}");
                    None
                }
            }
        } else {
            None
        };

        self.cache
            .apply(RefreshOutcome {
                available,
                identity,
                roster,
                performance,
            })
            .await;
    }

    /// Starts the single-writer loop and returns the trigger handle plus
    /// the task handle. The loop stops on the app-wide stop notification,
    /// letting an in-flight refresh complete.
    pub fn spawn(self, interval_ms: u64, stop: Arc<Notify>) -> (RefreshHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(TRIGGER_QUEUE_CAPACITY);
        let handle = RefreshHandle { tx };

        let join = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_millis(interval_ms.max(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            // Pinned once so a stop notification arriving mid-refresh is
            // not lost between loop iterations.
            let stopped = stop.notified();
            tokio::pin!(stopped);

            loop {
                tokio::select! {
                    _ = &mut stopped => {
                        debug!("refresh engine stopping");
                        break;
                    }
                    _ = ticker.tick() => {
                        self.refresh().await;
                    }
                    Some(trigger) = rx.recv() => {
                        match &trigger {
                            RefreshTrigger::PlayerJoined { id, name } => {
                                debug!("player {name} (id {id}) joined");
                            }
                            RefreshTrigger::PlayerLeft { id, name } => {
                                debug!("player {name} (id {id}) left");
                            }
                        }
                        self.refresh().await;
                    }
                }
            }
        });

        (handle, join)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{RuntimeConfig, RuntimePerformance, RuntimePlayer};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockRuntime {
        available: AtomicBool,
        fail_players: AtomicBool,
        config: Mutex<Option<RuntimeConfig>>,
        players: Mutex<Vec<RuntimePlayer>>,
        performance: Mutex<Option<RuntimePerformance>>,
    }

    impl MockRuntime {
        fn set_available(&self, value: bool) {
            self.available.store(value, Ordering::SeqCst);
        }

        fn set_players(&self, players: Vec<RuntimePlayer>) {
            *self.players.lock().unwrap() = players;
        }

        fn set_performance(&self, perf: Option<RuntimePerformance>) {
            *self.performance.lock().unwrap() = perf;
        }
    }

    fn player(id: u32, name: &str) -> RuntimePlayer {
        RuntimePlayer {
            id,
            name: name.to_string(),
            ping: Some(30),
            ip: Some(format!("10.0.0.{id}")),
        }
    }

    #[async_trait]
    impl GameRuntime for MockRuntime {
        async fn is_available(&self) -> bool {
            self.available.load(Ordering::SeqCst)
        }

        async fn has_capability(&self, cap: Capability) -> bool {
            match cap {
                Capability::Config => {
                    self.is_available().await && self.config.lock().unwrap().is_some()
                }
                Capability::Roster => self.is_available().await,
                Capability::Performance => self.performance.lock().unwrap().is_some(),
            }
        }

        async fn config(&self) -> anyhow::Result<RuntimeConfig> {
            self.config
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("no config"))
        }

        async fn players(&self) -> anyhow::Result<Vec<RuntimePlayer>> {
            if self.fail_players.load(Ordering::SeqCst) {
                anyhow::bail!("enumeration blew up");
            }
            Ok(self.players.lock().unwrap().clone())
        }

        async fn performance(&self) -> anyhow::Result<RuntimePerformance> {
            self.performance
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| anyhow::anyhow!("no measurement"))
        }
    }

    fn test_cache() -> StatusCache {
        StatusCache::new(
            ServerIdentity {
                name: "Rage Server".to_string(),
                gamemode: "freeroam".to_string(),
                version: "1.1".to_string(),
                max_players: 100,
            },
            0,
        )
    }

    #[tokio::test]
    async fn online_count_matches_roster_after_refresh() {
        let runtime = Arc::new(MockRuntime::default());
        runtime.set_available(true);
        runtime.set_players(vec![player(1, "a"), player(2, "b"), player(3, "c")]);

        let cache = test_cache();
        let engine = RefreshEngine::new(cache.clone(), runtime);
        engine.refresh().await;

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.online as usize, snapshot.roster.len());
        assert_eq!(snapshot.online, 3);
        assert!(snapshot.available);
    }

    #[tokio::test]
    async fn refresh_stamp_is_non_decreasing() {
        let runtime = Arc::new(MockRuntime::default());
        let cache = test_cache();
        let engine = RefreshEngine::new(cache.clone(), runtime);

        let mut last = cache.snapshot().await.last_refresh_ms;
        for _ in 0..4 {
            engine.refresh().await;
            let stamp = cache.snapshot().await.last_refresh_ms;
            assert!(stamp >= last);
            last = stamp;
        }
    }

    #[tokio::test]
    async fn unavailable_cycle_preserves_previous_data() {
        let runtime = Arc::new(MockRuntime::default());
        runtime.set_available(true);
        runtime.set_players(vec![player(1, "a"), player(2, "b")]);
        runtime.set_performance(Some(RuntimePerformance {
            memory_mb: 420.0,
            tick_rate: 40,
        }));

        let cache = test_cache();
        let engine = RefreshEngine::new(cache.clone(), runtime.clone());
        engine.refresh().await;
        let before = cache.snapshot().await;

        runtime.set_available(false);
        runtime.set_performance(None);
        engine.refresh().await;
        let after = cache.snapshot().await;

        assert_eq!(after.roster, before.roster);
        assert_eq!(after.online, before.online);
        assert_eq!(after.performance, before.performance);
        assert!(!after.available);
        assert!(after.last_refresh_ms >= before.last_refresh_ms);
    }

    #[tokio::test]
    async fn roster_error_degrades_like_absent_capability() {
        let runtime = Arc::new(MockRuntime::default());
        runtime.set_available(true);
        runtime.set_players(vec![player(1, "a")]);

        let cache = test_cache();
        let engine = RefreshEngine::new(cache.clone(), runtime.clone());
        engine.refresh().await;

        runtime.fail_players.store(true, Ordering::SeqCst);
        runtime.set_players(vec![]);
        engine.refresh().await;

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.online, 1);
        assert_eq!(snapshot.roster.len(), 1);
    }

    #[tokio::test]
    async fn recovery_reflects_current_runtime_exactly() {
        let runtime = Arc::new(MockRuntime::default());
        runtime.set_available(true);
        runtime.set_players(vec![player(1, "old"), player(2, "old2")]);

        let cache = test_cache();
        let engine = RefreshEngine::new(cache.clone(), runtime.clone());
        engine.refresh().await;

        runtime.set_available(false);
        for _ in 0..3 {
            engine.refresh().await;
        }

        runtime.set_players(vec![player(9, "fresh")]);
        runtime.set_available(true);
        engine.refresh().await;

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.online, 1);
        assert_eq!(snapshot.roster.len(), 1);
        assert_eq!(snapshot.roster[0].id, 9);
        assert_eq!(snapshot.roster[0].name, "fresh");
    }

    #[tokio::test]
    async fn missing_player_name_gets_placeholder() {
        let runtime = Arc::new(MockRuntime::default());
        runtime.set_available(true);
        runtime.set_players(vec![RuntimePlayer {
            id: 5,
            name: String::new(),
            ping: None,
            ip: None,
        }]);

        let cache = test_cache();
        let engine = RefreshEngine::new(cache.clone(), runtime);
        engine.refresh().await;

        let snapshot = cache.snapshot().await;
        assert_eq!(
            snapshot.roster[0].name,
            ragemon_protocol::status::UNKNOWN_PLAYER_NAME
        );
    }

    #[tokio::test]
    async fn concurrent_triggers_never_tear_roster_and_count() {
        let runtime = Arc::new(MockRuntime::default());
        runtime.set_available(true);

        let cache = test_cache();
        let stop = Arc::new(Notify::new());
        let engine = RefreshEngine::new(cache.clone(), runtime.clone());
        let (handle, join) = engine.spawn(2, stop.clone());

        // One task churns the runtime's roster, two fire lifecycle
        // triggers, one keeps reading and checking the invariant.
        let churn = {
            let runtime = runtime.clone();
            tokio::spawn(async move {
                for round in 0..50u32 {
                    let players = (0..(round % 7)).map(|id| player(id, "p")).collect();
                    runtime.set_players(players);
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
            })
        };
        let joins = {
            let handle = handle.clone();
            tokio::spawn(async move {
                for id in 0..50u32 {
                    handle.notify(RefreshTrigger::PlayerJoined {
                        id,
                        name: "p".to_string(),
                    });
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
            })
        };
        let leaves = {
            let handle = handle.clone();
            tokio::spawn(async move {
                for id in 0..50u32 {
                    handle.notify(RefreshTrigger::PlayerLeft {
                        id,
                        name: "p".to_string(),
                    });
                    tokio::time::sleep(Duration::from_millis(1)).await;
                }
            })
        };

        for _ in 0..100 {
            let snapshot = cache.snapshot().await;
            assert_eq!(snapshot.online as usize, snapshot.roster.len());
            tokio::time::sleep(Duration::from_millis(1)).await;
        }

        churn.await.unwrap();
        joins.await.unwrap();
        leaves.await.unwrap();
        stop.notify_waiters();
        join.await.unwrap();

        let snapshot = cache.snapshot().await;
        assert_eq!(snapshot.online as usize, snapshot.roster.len());
    }
}
