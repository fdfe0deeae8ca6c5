//! End-to-end launch sequence against real slot storage.
//!
//! Timing properties of the resolver are covered by the paused-clock
//! unit tests in `src/bootstrap/`; these run in real time with a short
//! splash interval because SQLite does its work off the async runtime.

use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use zynkod::bootstrap::{run_launch_sequence, BootstrapResolver, Phase};
use zynkod::ipc::event::EventBroadcaster;
use zynkod::nav::{NavStack, Screen};
use zynkod::storage::Storage;

const SPLASH: Duration = Duration::from_millis(100);

async fn storage() -> Arc<Storage> {
    let dir = tempfile::tempdir().unwrap().keep();
    Arc::new(Storage::new(&dir).await.unwrap())
}

#[tokio::test]
async fn persisted_uid_routes_to_dashboard() {
    let storage = storage().await;
    storage.save_uid("u123").await.unwrap();

    let broadcaster = Arc::new(EventBroadcaster::new());
    let mut rx = broadcaster.subscribe();
    let nav = NavStack::new(broadcaster.clone());
    let resolver = BootstrapResolver::new(SPLASH);

    let start = Instant::now();
    run_launch_sequence(&resolver, storage, &nav, &broadcaster).await;
    assert!(start.elapsed() >= SPLASH);

    assert_eq!(nav.snapshot(), vec![Screen::Dashboard]);
    assert_eq!(resolver.phase(), Phase::Routed);

    let started: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(started["method"], "splash.started");
    assert_eq!(started["params"]["durationMs"], 100);
    // nav.changed from the reset, then the routing announcement
    let changed: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(changed["method"], "nav.changed");
    assert_eq!(changed["params"]["reset"], true);
    let routed: Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
    assert_eq!(routed["method"], "splash.routed");
    assert_eq!(routed["params"]["route"], "Dashboard");
}

#[tokio::test]
async fn empty_slot_routes_to_intro() {
    let storage = storage().await;
    let broadcaster = Arc::new(EventBroadcaster::new());
    let nav = NavStack::new(broadcaster.clone());
    let resolver = BootstrapResolver::new(SPLASH);

    run_launch_sequence(&resolver, storage, &nav, &broadcaster).await;
    assert_eq!(nav.snapshot(), vec![Screen::Intro]);
}

#[tokio::test]
async fn launch_sequence_runs_at_most_once() {
    let storage = storage().await;
    storage.save_uid("u123").await.unwrap();

    let broadcaster = Arc::new(EventBroadcaster::new());
    let nav = NavStack::new(broadcaster.clone());
    let resolver = BootstrapResolver::new(SPLASH);

    run_launch_sequence(&resolver, storage.clone(), &nav, &broadcaster).await;
    assert_eq!(nav.snapshot(), vec![Screen::Dashboard]);

    // A signed-out user relaunching the sequence in the same process
    // must not be re-routed, and must not see a second splash.
    storage.clear_uid().await.unwrap();
    nav.reset(Screen::Intro);
    let mut rx = broadcaster.subscribe();
    run_launch_sequence(&resolver, storage, &nav, &broadcaster).await;
    assert_eq!(nav.snapshot(), vec![Screen::Intro]);
    assert!(rx.try_recv().is_err(), "relaunch broadcast an event");
}

#[tokio::test]
async fn sign_out_then_process_restart_lands_on_intro() {
    // Fresh resolver per process: this simulates a relaunch after sign-out.
    let storage = storage().await;
    storage.save_uid("u123").await.unwrap();
    storage.clear_uid().await.unwrap();

    let broadcaster = Arc::new(EventBroadcaster::new());
    let nav = NavStack::new(broadcaster.clone());
    let resolver = BootstrapResolver::new(SPLASH);

    run_launch_sequence(&resolver, storage, &nav, &broadcaster).await;
    assert_eq!(nav.snapshot(), vec![Screen::Intro]);
}
