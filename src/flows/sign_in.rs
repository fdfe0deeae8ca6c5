//! Sign-in flow.
//!
//! Validation happens before any remote call. On success the uid is
//! persisted locally and the onboarding-completeness check runs
//! concurrently with the success alert; the routing decision is taken
//! when the user confirms, using whichever result the check produced.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::alert::{AlertCenter, AlertStyle};
use crate::audio::AudioSession;
use crate::backend::{friendly_auth_message, IdentityService, ProfileStore};
use crate::nav::{NavStack, Screen};
use crate::storage::Storage;

use super::SubmitOutcome;

pub struct SignInFlow {
    identity: Arc<dyn IdentityService>,
    profiles: Arc<dyn ProfileStore>,
    storage: Arc<Storage>,
    nav: Arc<NavStack>,
    alerts: Arc<AlertCenter>,
    audio: Arc<AudioSession>,
    in_flight: AtomicBool,
}

impl SignInFlow {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        profiles: Arc<dyn ProfileStore>,
        storage: Arc<Storage>,
        nav: Arc<NavStack>,
        alerts: Arc<AlertCenter>,
        audio: Arc<AudioSession>,
    ) -> Self {
        Self {
            identity,
            profiles,
            storage,
            nav,
            alerts,
            audio,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The LOGIN button. Repeated taps while a submission is in flight
    /// are ignored.
    pub async fn submit(&self, email: &str, password: &str) -> SubmitOutcome {
        self.audio.play_click();
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return SubmitOutcome::Ignored;
        }
        self.run(email, password).await;
        self.in_flight.store(false, Ordering::Release);
        SubmitOutcome::Completed
    }

    async fn run(&self, email: &str, password: &str) {
        if email.is_empty() || password.is_empty() {
            self.alerts
                .show(
                    AlertStyle::Warning,
                    "Missing info",
                    "Please enter email and password",
                )
                .await;
            self.audio.play_click();
            return;
        }

        match self.identity.sign_in(email.trim(), password).await {
            Ok(uid) => {
                if let Err(e) = self.storage.save_uid(&uid).await {
                    // Degraded: next launch won't remember this session.
                    warn!("failed to persist uid locally: {e:#}");
                }

                // Completeness check runs while the welcome alert is up.
                let profiles = self.profiles.clone();
                let check_uid = uid.clone();
                let check = tokio::spawn(async move {
                    match profiles.get_user(&check_uid).await {
                        Ok(Some(doc)) => doc.onboarding_complete(),
                        Ok(None) => false,
                        Err(e) => {
                            warn!("post-sign-in profile check failed: {e:#}");
                            false
                        }
                    }
                });

                self.alerts
                    .show(AlertStyle::Success, "Welcome", "Signed in successfully")
                    .await;
                self.audio.play_click();

                let complete = check.await.unwrap_or(false);
                let target = if complete {
                    Screen::Dashboard
                } else {
                    Screen::Onboarding
                };
                info!(uid = %uid, complete, "sign-in routed");
                self.nav.reset(target);
            }
            Err(e) => {
                self.alerts
                    .show(
                        AlertStyle::Error,
                        "Sign in failed",
                        &friendly_auth_message(&e),
                    )
                    .await;
                self.audio.play_click();
            }
        }
    }
}
