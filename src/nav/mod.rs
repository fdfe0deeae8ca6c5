//! Navigation surface: an ordered stack of named screens.
//!
//! Two entry styles matter to the flows: `push` keeps the previous screen
//! reachable via back, `reset` replaces the whole stack and is used for
//! the one-way transitions — the bootstrap decision and post-sign-in
//! routing. Every change is broadcast as `nav.changed`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::Mutex;
use tracing::info;

use crate::ipc::event::EventBroadcaster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Splash,
    Intro,
    SignIn,
    SignUp,
    Onboarding,
    Dashboard,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Splash => "Splash",
            Screen::Intro => "Intro",
            Screen::SignIn => "SignIn",
            Screen::SignUp => "SignUp",
            Screen::Onboarding => "Onboarding",
            Screen::Dashboard => "Dashboard",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Splash" => Some(Screen::Splash),
            "Intro" => Some(Screen::Intro),
            "SignIn" => Some(Screen::SignIn),
            "SignUp" => Some(Screen::SignUp),
            "Onboarding" => Some(Screen::Onboarding),
            "Dashboard" => Some(Screen::Dashboard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct NavStack {
    stack: Mutex<Vec<Screen>>,
    broadcaster: Arc<EventBroadcaster>,
}

impl NavStack {
    /// A fresh stack starts on the splash screen.
    pub fn new(broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            stack: Mutex::new(vec![Screen::Splash]),
            broadcaster,
        }
    }

    pub fn current(&self) -> Screen {
        *self
            .stack
            .lock()
            .expect("nav stack poisoned")
            .last()
            .expect("nav stack never empty")
    }

    pub fn snapshot(&self) -> Vec<Screen> {
        self.stack.lock().expect("nav stack poisoned").clone()
    }

    /// Forward navigation; the previous screen stays reachable via back.
    pub fn push(&self, screen: Screen) {
        {
            let mut stack = self.stack.lock().expect("nav stack poisoned");
            if *stack.last().expect("nav stack never empty") == screen {
                return;
            }
            stack.push(screen);
        }
        self.changed(false);
    }

    /// Back navigation. The root screen is never popped.
    pub fn pop(&self) -> Screen {
        {
            let mut stack = self.stack.lock().expect("nav stack poisoned");
            if stack.len() > 1 {
                stack.pop();
            }
        }
        self.changed(false);
        self.current()
    }

    /// Replace the entire stack — not back-navigable.
    pub fn reset(&self, screen: Screen) {
        {
            let mut stack = self.stack.lock().expect("nav stack poisoned");
            stack.clear();
            stack.push(screen);
        }
        info!(screen = %screen, "navigation reset");
        self.changed(true);
    }

    fn changed(&self, reset: bool) {
        let stack = self.snapshot();
        let names: Vec<&str> = stack.iter().map(Screen::as_str).collect();
        self.broadcaster.broadcast(
            "nav.changed",
            serde_json::json!({
                "stack": names,
                "current": self.current().as_str(),
                "reset": reset,
            }),
        );
    }
}
