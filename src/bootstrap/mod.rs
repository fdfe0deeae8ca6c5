//! Session bootstrap: decides the first screen shown after process start.
//!
//! Two things run concurrently from the moment the host boots: the splash
//! presentation interval (fixed minimum display time) and the local-storage
//! lookup of the persisted uid. Routing is gated on the later of the two —
//! if the lookup settled first its result is picked up as soon as the
//! interval elapses, otherwise the resolver suspends on the lookup. The
//! decision is made at most once per process; a failed lookup fails open
//! to unauthenticated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::ipc::event::EventBroadcaster;
use crate::nav::{NavStack, Screen};
use crate::storage::Storage;

/// The one-time routing decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRoute {
    /// A uid was found locally — land on the dashboard.
    Authenticated { uid: String },
    /// No uid (or the lookup failed) — land on the intro carousel.
    Unauthenticated,
}

impl LaunchRoute {
    pub fn screen(&self) -> Screen {
        match self {
            LaunchRoute::Authenticated { .. } => Screen::Dashboard,
            LaunchRoute::Unauthenticated => Screen::Intro,
        }
    }
}

/// Resolver phases, in order. `Gated` means the interval has elapsed and
/// the resolver is (or was) waiting on the lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Gated,
    Routed,
}

pub struct BootstrapResolver {
    splash_duration: Duration,
    phase: Mutex<Phase>,
    routed: AtomicBool,
}

impl BootstrapResolver {
    pub fn new(splash_duration: Duration) -> Self {
        Self {
            splash_duration,
            phase: Mutex::new(Phase::Pending),
            routed: AtomicBool::new(false),
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock().expect("bootstrap phase poisoned")
    }

    /// Whether a routing decision has already been made.
    pub fn is_routed(&self) -> bool {
        self.routed.load(Ordering::Acquire)
    }

    pub fn splash_duration(&self) -> Duration {
        self.splash_duration
    }

    /// Resolve against the real storage slot. Lookup errors are treated
    /// as "no uid found".
    pub async fn resolve(&self, storage: Arc<Storage>) -> Option<LaunchRoute> {
        self.resolve_with(async move {
            match storage.get_uid().await {
                Ok(uid) => uid,
                Err(e) => {
                    warn!("uid lookup failed, treating as signed out: {e:#}");
                    None
                }
            }
        })
        .await
    }

    /// Resolve with an arbitrary lookup future.
    ///
    /// The lookup is spawned immediately so it runs concurrently with the
    /// splash interval; the task handle is awaited exactly once, which is
    /// what makes late or repeated settlements unobservable. Returns
    /// `None` when a routing decision was already made.
    pub async fn resolve_with<F>(&self, lookup: F) -> Option<LaunchRoute>
    where
        F: std::future::Future<Output = Option<String>> + Send + 'static,
    {
        if self.routed.load(Ordering::Acquire) {
            return None;
        }

        let lookup = tokio::spawn(lookup);

        sleep(self.splash_duration).await;
        *self.phase.lock().expect("bootstrap phase poisoned") = Phase::Gated;

        // Already settled → ready immediately; otherwise suspend here.
        // A panicked lookup task counts as a failed lookup.
        let uid = lookup.await.unwrap_or(None);

        if self.routed.swap(true, Ordering::AcqRel) {
            return None;
        }
        *self.phase.lock().expect("bootstrap phase poisoned") = Phase::Routed;

        Some(match uid {
            Some(uid) => LaunchRoute::Authenticated { uid },
            None => LaunchRoute::Unauthenticated,
        })
    }
}

/// Run the full launch sequence: announce the splash, resolve, reset the
/// navigation stack to the chosen entry point.
pub async fn run_launch_sequence(
    resolver: &BootstrapResolver,
    storage: Arc<Storage>,
    nav: &NavStack,
    broadcaster: &EventBroadcaster,
) {
    // A second launch attempt in the same process — already routed, so
    // no splash either.
    if resolver.is_routed() {
        return;
    }

    broadcaster.broadcast(
        "splash.started",
        serde_json::json!({ "durationMs": resolver.splash_duration().as_millis() as u64 }),
    );

    let Some(route) = resolver.resolve(storage).await else {
        return;
    };

    match &route {
        LaunchRoute::Authenticated { uid } => info!(uid = %uid, "launch route: dashboard"),
        LaunchRoute::Unauthenticated => info!("launch route: intro"),
    }

    nav.reset(route.screen());
    broadcaster.broadcast(
        "splash.routed",
        serde_json::json!({ "route": route.screen().as_str() }),
    );
}
