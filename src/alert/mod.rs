//! Alert/dialog surface.
//!
//! One shape for everything: title, subtitle, style, a single confirm
//! button. `show` broadcasts the alert and suspends the calling flow
//! until the shell acknowledges it with an `alert.confirm` RPC, matching
//! the confirm-callback contract the flows are written against.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing::debug;
use uuid::Uuid;

use crate::ipc::event::EventBroadcaster;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStyle {
    Warning,
    Error,
    Success,
}

pub struct AlertCenter {
    broadcaster: Arc<EventBroadcaster>,
    pending: Mutex<HashMap<String, oneshot::Sender<()>>>,
}

impl AlertCenter {
    pub fn new(broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            broadcaster,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Present an alert and wait for the shell to confirm it.
    pub async fn show(&self, style: AlertStyle, title: &str, subtitle: &str) {
        let id = Uuid::new_v4().to_string();
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .expect("alert registry poisoned")
            .insert(id.clone(), tx);

        self.broadcaster.broadcast(
            "alert.show",
            serde_json::json!({
                "id": id,
                "title": title,
                "subTitle": subtitle,
                "style": style,
                "confirmButtonTitle": "OK",
            }),
        );
        debug!(id = %id, title, "alert shown");

        // A dropped sender only happens if the registry is torn down;
        // resume the flow either way.
        let _ = rx.await;
    }

    /// Resolve a pending alert. Errors when the id is unknown or the
    /// alert was already confirmed.
    pub fn confirm(&self, id: &str) -> anyhow::Result<()> {
        let tx = self
            .pending
            .lock()
            .expect("alert registry poisoned")
            .remove(id)
            .ok_or_else(|| anyhow::anyhow!("alert '{id}' not found or already confirmed"))?;
        let _ = tx.send(());
        self.broadcaster
            .broadcast("alert.confirmed", serde_json::json!({ "id": id }));
        Ok(())
    }

    /// Number of alerts currently awaiting confirmation.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().expect("alert registry poisoned").len()
    }
}
