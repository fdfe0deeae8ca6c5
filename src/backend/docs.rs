//! Remote document store — the `users` collection, keyed by uid.
//!
//! `merge_user` carries merge semantics (absent fields are left alone on
//! the server); `put_user` replaces the document. The onboarding gate
//! only cares about `class`, `board`, and the three dob components.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::BackendConfig;

#[derive(Debug, Error)]
pub enum DocError {
    #[error("document request failed with HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("network request failed: {0}")]
    Network(String),
}

impl From<reqwest::Error> for DocError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

/// Date-of-birth components as stored in the user document.
///
/// Components are individually optional: a legacy or partially written
/// document may carry only some of them, and the completeness check must
/// be able to see that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dob {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

impl Dob {
    pub fn new(day: u32, month: u32, year: u32) -> Self {
        Self {
            day: Some(day),
            month: Some(month),
            year: Some(year),
        }
    }

    fn filled(&self) -> bool {
        // Zero is treated like absent, matching the truthiness the
        // original gate applied.
        self.day.is_some_and(|d| d > 0)
            && self.month.is_some_and(|m| m > 0)
            && self.year.is_some_and(|y| y > 0)
    }
}

/// A document in the `users` collection. All fields optional — reads can
/// see documents written by either the sign-up or the onboarding flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<Dob>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl UserDoc {
    /// Whether the onboarding profile is complete: class, board, and all
    /// three dob components present. This is the sole signal gating the
    /// dashboard after sign-in.
    pub fn onboarding_complete(&self) -> bool {
        self.class.as_deref().is_some_and(|c| !c.is_empty())
            && self.board.as_deref().is_some_and(|b| !b.is_empty())
            && self.dob.as_ref().is_some_and(Dob::filled)
    }
}

/// Seam for the remote document store.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Read `users/{uid}`; `None` when the document does not exist.
    async fn get_user(&self, uid: &str) -> Result<Option<UserDoc>, DocError>;
    /// Merge-write fields into `users/{uid}` (creates the doc if absent).
    async fn merge_user(&self, uid: &str, patch: &UserDoc) -> Result<(), DocError>;
    /// Replace `users/{uid}` with `doc`.
    async fn put_user(&self, uid: &str, doc: &UserDoc) -> Result<(), DocError>;
}

// ─── HTTP implementation ─────────────────────────────────────────────────────

pub struct HttpProfiles {
    config: BackendConfig,
    client: reqwest::Client,
}

impl HttpProfiles {
    pub fn new(config: BackendConfig) -> Result<Self, DocError> {
        let client = config.client()?;
        Ok(Self { config, client })
    }

    fn doc_url(&self, uid: &str) -> String {
        format!("{}/documents/users/{}", self.config.api_base_url, uid)
    }

    async fn reject(resp: reqwest::Response) -> DocError {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        DocError::Http { status, message }
    }

    async fn write(&self, uid: &str, doc: &UserDoc, merge: bool) -> Result<(), DocError> {
        let url = self.doc_url(uid);
        debug!(url = %url, merge, "document write");
        let resp = self
            .client
            .patch(&url)
            .header("x-api-key", &self.config.api_key)
            .query(&[("merge", merge)])
            .json(doc)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for HttpProfiles {
    async fn get_user(&self, uid: &str) -> Result<Option<UserDoc>, DocError> {
        let url = self.doc_url(uid);
        debug!(url = %url, "document read");
        let resp = self
            .client
            .get(&url)
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(Some(resp.json::<UserDoc>().await?))
    }

    async fn merge_user(&self, uid: &str, patch: &UserDoc) -> Result<(), DocError> {
        self.write(uid, patch, true).await
    }

    async fn put_user(&self, uid: &str, doc: &UserDoc) -> Result<(), DocError> {
        self.write(uid, doc, false).await
    }
}
