//! Personal-details onboarding: class, state board, date of birth.
//!
//! Submission is rejected locally — no remote write — when any field is
//! missing or the day/month/year combination is not a real calendar date.
//! A valid submission is merge-written into `users/{uid}` so fields set
//! at registration are left alone.

use chrono::{Datelike, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::alert::{AlertCenter, AlertStyle};
use crate::audio::AudioSession;
use crate::backend::{Dob, ProfileStore, UserDoc};
use crate::nav::{NavStack, Screen};
use crate::storage::Storage;

use super::SubmitOutcome;

const SAVE_FAILED_FALLBACK: &str = "Unable to save details. Please try again.";

/// Years offered by the date-of-birth picker, newest first.
pub const DOB_YEAR_SPAN: u32 = 80;

/// Class options shown in the dropdown (label, value).
pub const CLASS_OPTIONS: &[(&str, &str)] = &[
    ("Class 6", "6"),
    ("Class 7", "7"),
    ("Class 8", "8"),
    ("Class 9", "9"),
    ("Class 10", "10"),
    ("Class 11", "11"),
    ("Class 12", "12"),
];

/// State/UT board options shown in the dropdown (label, value).
pub const BOARD_OPTIONS: &[(&str, &str)] = &[
    ("Andhra Pradesh", "AP"),
    ("Arunachal Pradesh", "AR"),
    ("Assam", "AS"),
    ("Bihar", "BR"),
    ("Chhattisgarh", "CT"),
    ("Goa", "GA"),
    ("Gujarat", "GJ"),
    ("Haryana", "HR"),
    ("Himachal Pradesh", "HP"),
    ("Jharkhand", "JH"),
    ("Karnataka", "KA"),
    ("Kerala", "KL"),
    ("Madhya Pradesh", "MP"),
    ("Maharashtra", "MH"),
    ("Manipur", "MN"),
    ("Meghalaya", "ML"),
    ("Mizoram", "MZ"),
    ("Nagaland", "NL"),
    ("Odisha", "OR"),
    ("Punjab", "PB"),
    ("Rajasthan", "RJ"),
    ("Sikkim", "SK"),
    ("Tamil Nadu", "TN"),
    ("Telangana", "TS"),
    ("Tripura", "TR"),
    ("Uttar Pradesh", "UP"),
    ("Uttarakhand", "UT"),
    ("West Bengal", "WB"),
    ("Andaman and Nicobar Islands", "AN"),
    ("Chandigarh", "CH"),
    ("Dadra and Nagar Haveli and Daman and Diu", "DN"),
    ("Delhi", "DL"),
    ("Jammu and Kashmir", "JK"),
    ("Ladakh", "LA"),
    ("Lakshadweep", "LD"),
    ("Puducherry", "PY"),
];

pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(month: u32, year: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

pub fn is_valid_dob(day: u32, month: u32, year: u32) -> bool {
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(month, year)
}

/// Raw form state as submitted by the shell. Everything optional — the
/// dropdowns start unselected.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct OnboardingSubmission {
    pub class: Option<String>,
    pub board: Option<String>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<u32>,
}

impl OnboardingSubmission {
    /// `Some((class, board, dob))` when every field is present and the
    /// date is a real calendar day.
    fn validate(&self) -> Option<(&str, &str, Dob)> {
        let class = self.class.as_deref().filter(|c| !c.is_empty())?;
        let board = self.board.as_deref().filter(|b| !b.is_empty())?;
        let (day, month, year) = (self.day?, self.month?, self.year?);
        if !is_valid_dob(day, month, year) {
            return None;
        }
        Some((class, board, Dob::new(day, month, year)))
    }
}

pub struct OnboardingFlow {
    profiles: Arc<dyn ProfileStore>,
    storage: Arc<Storage>,
    nav: Arc<NavStack>,
    alerts: Arc<AlertCenter>,
    audio: Arc<AudioSession>,
    in_flight: AtomicBool,
}

impl OnboardingFlow {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        storage: Arc<Storage>,
        nav: Arc<NavStack>,
        alerts: Arc<AlertCenter>,
        audio: Arc<AudioSession>,
    ) -> Self {
        Self {
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

    /// The dropdown/date-picker option sets, as one JSON document.
    pub fn options() -> serde_json::Value {
        let opt = |items: &[(&str, &str)]| -> Vec<serde_json::Value> {
            items
                .iter()
                .map(|(label, value)| serde_json::json!({ "label": label, "value": value }))
                .collect()
        };
        let months = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        let current_year = Utc::now().year() as u32;
        serde_json::json!({
            "classes": opt(CLASS_OPTIONS),
            "boards": opt(BOARD_OPTIONS),
            "days": (1..=31u32).collect::<Vec<_>>(),
            "months": months
                .iter()
                .enumerate()
                .map(|(i, label)| serde_json::json!({ "label": label, "value": i as u32 + 1 }))
                .collect::<Vec<_>>(),
            "years": (current_year - DOB_YEAR_SPAN..=current_year).rev().collect::<Vec<_>>(),
        })
    }

    pub async fn submit(&self, submission: OnboardingSubmission) -> SubmitOutcome {
        self.audio.play_click();
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return SubmitOutcome::Ignored;
        }
        self.run(submission).await;
        self.in_flight.store(false, Ordering::Release);
        SubmitOutcome::Completed
    }

    async fn run(&self, submission: OnboardingSubmission) {
        let Some((class, board, dob)) = submission.validate() else {
            self.alerts
                .show(
                    AlertStyle::Warning,
                    "Missing info",
                    "Please select class, state board, and a valid date of birth",
                )
                .await;
            self.audio.play_click();
            return;
        };

        let uid = match self.storage.get_uid().await {
            Ok(Some(uid)) => uid,
            Ok(None) => {
                self.alerts
                    .show(AlertStyle::Error, "Not signed in", "Please sign in again")
                    .await;
                return;
            }
            Err(e) => {
                warn!("uid read failed before onboarding save: {e:#}");
                self.alerts
                    .show(AlertStyle::Error, "Not signed in", "Please sign in again")
                    .await;
                return;
            }
        };

        let patch = UserDoc {
            class: Some(class.to_string()),
            board: Some(board.to_string()),
            dob: Some(dob),
            updated_at: Some(Utc::now().to_rfc3339()),
            ..Default::default()
        };

        match self.profiles.merge_user(&uid, &patch).await {
            Ok(()) => {
                info!(uid = %uid, "onboarding profile saved");
                self.alerts
                    .show(AlertStyle::Success, "Saved", "Your details have been recorded")
                    .await;
                self.audio.play_click();
                self.nav.push(Screen::Dashboard);
            }
            Err(e) => {
                let message = e.to_string();
                let subtitle = if message.is_empty() {
                    SAVE_FAILED_FALLBACK
                } else {
                    &message
                };
                self.alerts
                    .show(AlertStyle::Error, "Save failed", subtitle)
                    .await;
                self.audio.play_click();
            }
        }
    }
}
