//! Audio session state.
//!
//! One explicitly owned session shared by every screen, replacing the
//! original's module-level globals. The host owns the lifecycle and the
//! muted flag; sample playback is the shell's job, driven by the
//! `audio.*` notifications. A failed or absent audio backend on the shell
//! side degrades silently — nothing here blocks a flow.

use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::ipc::event::EventBroadcaster;

/// Background track volume when unmuted.
pub const BACKGROUND_VOLUME: f32 = 0.05;

#[derive(Debug, Default)]
struct AudioState {
    started: bool,
    muted: bool,
}

pub struct AudioSession {
    state: Mutex<AudioState>,
    background_track: String,
    click_sound: String,
    broadcaster: Arc<EventBroadcaster>,
}

impl AudioSession {
    pub fn new(
        broadcaster: Arc<EventBroadcaster>,
        background_track: String,
        click_sound: String,
    ) -> Self {
        Self {
            state: Mutex::new(AudioState::default()),
            background_track,
            click_sound,
            broadcaster,
        }
    }

    /// Begin the looping background track. Idempotent — screens call this
    /// on mount without coordinating.
    pub fn start(&self) {
        let muted = {
            let mut state = self.state.lock().expect("audio state poisoned");
            if state.started {
                return;
            }
            state.started = true;
            state.muted
        };
        debug!(track = %self.background_track, "background audio started");
        self.broadcast_background(true, muted);
    }

    pub fn set_muted(&self, muted: bool) {
        let started = {
            let mut state = self.state.lock().expect("audio state poisoned");
            state.muted = muted;
            state.started
        };
        if started {
            self.broadcast_background(true, muted);
        }
    }

    pub fn is_muted(&self) -> bool {
        self.state.lock().expect("audio state poisoned").muted
    }

    /// Flip the muted flag; returns the new value.
    pub fn toggle_muted(&self) -> bool {
        let (started, muted) = {
            let mut state = self.state.lock().expect("audio state poisoned");
            state.muted = !state.muted;
            (state.started, state.muted)
        };
        if started {
            self.broadcast_background(true, muted);
        }
        muted
    }

    /// One-shot button click. Suppressed entirely while muted.
    pub fn play_click(&self) {
        if self.is_muted() {
            return;
        }
        self.broadcaster.broadcast(
            "audio.click",
            serde_json::json!({ "sound": self.click_sound }),
        );
    }

    /// Stop the background track and drop the session state.
    pub fn release(&self) {
        let was_started = {
            let mut state = self.state.lock().expect("audio state poisoned");
            let was = state.started;
            state.started = false;
            was
        };
        if was_started {
            let muted = self.is_muted();
            self.broadcast_background(false, muted);
        }
    }

    fn broadcast_background(&self, playing: bool, muted: bool) {
        self.broadcaster.broadcast(
            "audio.background",
            serde_json::json!({
                "playing": playing,
                "track": self.background_track,
                "muted": muted,
                "volume": if muted { 0.0 } else { BACKGROUND_VOLUME },
                "looped": true,
            }),
        );
    }
}
