//! Screen flows: the imperative logic behind each screen's primary action.
//!
//! A flow owns its collaborators (backend seams, storage, navigation,
//! alerts, audio) plus a local in-flight flag that blocks duplicate
//! submissions from repeated taps. Flows are spawned by the RPC handlers
//! so an alert confirmation never blocks the connection loop.

pub mod intro;
pub mod onboarding;
pub mod sign_in;
pub mod sign_up;

pub use intro::IntroCarousel;
pub use onboarding::OnboardingFlow;
pub use sign_in::SignInFlow;
pub use sign_up::SignUpFlow;

use std::sync::Arc;
use tracing::warn;

use crate::nav::{NavStack, Screen};
use crate::storage::Storage;

/// What a submission attempt did. `Ignored` means another submission was
/// already in flight and this one was dropped without side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Completed,
    Ignored,
}

/// Explicit sign-out: clear the local slot and reset to the intro.
/// A failed clear is logged and the navigation proceeds anyway.
pub async fn sign_out(storage: &Arc<Storage>, nav: &NavStack) {
    if let Err(e) = storage.clear_uid().await {
        warn!("failed to clear local uid on sign-out: {e:#}");
    }
    nav.reset(Screen::Intro);
}
