//! Registration flow.
//!
//! Local validation first (all fields present, password equals confirm),
//! then account creation, display-name update, and the initial user
//! document. The uid is persisted and the Onboarding screen pushed only
//! after the user confirms the success alert.

use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::alert::{AlertCenter, AlertStyle};
use crate::audio::AudioSession;
use crate::backend::{friendly_auth_message, IdentityService, ProfileStore, UserDoc};
use crate::nav::{NavStack, Screen};
use crate::storage::Storage;

use super::SubmitOutcome;

pub struct SignUpFlow {
    identity: Arc<dyn IdentityService>,
    profiles: Arc<dyn ProfileStore>,
    storage: Arc<Storage>,
    nav: Arc<NavStack>,
    alerts: Arc<AlertCenter>,
    audio: Arc<AudioSession>,
    in_flight: AtomicBool,
}

impl SignUpFlow {
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

    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> SubmitOutcome {
        self.audio.play_click();
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return SubmitOutcome::Ignored;
        }
        self.run(name, email, password, confirm).await;
        self.in_flight.store(false, Ordering::Release);
        SubmitOutcome::Completed
    }

    async fn run(&self, name: &str, email: &str, password: &str, confirm: &str) {
        if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
            self.warning("Missing info", "Please fill all fields").await;
            return;
        }
        if password != confirm {
            self.warning("Password mismatch", "Password and confirm must match")
                .await;
            return;
        }

        let email = email.trim();
        let uid = match self.identity.create_account(email, password).await {
            Ok(uid) => uid,
            Err(e) => {
                self.failure(&friendly_auth_message(&e)).await;
                return;
            }
        };

        if let Err(e) = self.identity.update_display_name(&uid, name).await {
            self.failure(&friendly_auth_message(&e)).await;
            return;
        }

        let doc = UserDoc {
            uid: Some(uid.clone()),
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            created_at: Some(Utc::now().to_rfc3339()),
            ..Default::default()
        };
        if let Err(e) = self.profiles.put_user(&uid, &doc).await {
            self.failure(&e.to_string()).await;
            return;
        }

        self.alerts
            .show(AlertStyle::Success, "Success", "Account created")
            .await;
        self.audio.play_click();

        if let Err(e) = self.storage.save_uid(&uid).await {
            warn!("failed to persist uid locally: {e:#}");
        }
        info!(uid = %uid, "account created");
        self.nav.push(Screen::Onboarding);
    }

    async fn warning(&self, title: &str, subtitle: &str) {
        self.alerts
            .show(AlertStyle::Warning, title, subtitle)
            .await;
        self.audio.play_click();
    }

    async fn failure(&self, subtitle: &str) {
        self.alerts
            .show(AlertStyle::Error, "Register failed", subtitle)
            .await;
        self.audio.play_click();
    }
}
