//! Remote account operations: create account, sign in, update display name.
//!
//! Rejections come back as `auth/*` error codes in the response body and
//! are mapped onto [`AuthError`] variants here. Anything the service sends
//! that we don't recognise is carried through as [`AuthError::Other`] so
//! the alert layer can fall back to the raw message.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::BackendConfig;

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("wrong password")]
    WrongPassword,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid email")]
    InvalidEmail,
    #[error("user disabled")]
    UserDisabled,
    #[error("email already in use")]
    EmailInUse,
    #[error("weak password")]
    WeakPassword,
    #[error("too many requests")]
    TooManyRequests,
    #[error("network request failed: {0}")]
    Network(String),
    #[error("{message}")]
    Other { code: String, message: String },
}

impl AuthError {
    /// Map a wire error code (`auth/...`) onto a variant.
    pub fn from_code(code: &str, message: &str) -> Self {
        match code {
            "auth/wrong-password" | "auth/invalid-password" => Self::WrongPassword,
            "auth/user-not-found" => Self::UserNotFound,
            "auth/invalid-email" => Self::InvalidEmail,
            "auth/user-disabled" => Self::UserDisabled,
            "auth/email-already-in-use" => Self::EmailInUse,
            "auth/weak-password" => Self::WeakPassword,
            "auth/too-many-requests" => Self::TooManyRequests,
            "auth/network-request-failed" => Self::Network(message.to_string()),
            _ => Self::Other {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

/// Seam for the remote authentication service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Create an account; returns the new user identifier.
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AuthError>;
    /// Sign in with email/password; returns the user identifier.
    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError>;
    /// Set the account's display name.
    async fn update_display_name(&self, uid: &str, name: &str) -> Result<(), AuthError>;
}

// ─── HTTP implementation ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct UidResponse {
    uid: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

pub struct HttpIdentity {
    config: BackendConfig,
    client: reqwest::Client,
}

impl HttpIdentity {
    pub fn new(config: BackendConfig) -> Result<Self, AuthError> {
        let client = config.client()?;
        Ok(Self { config, client })
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<reqwest::Response, AuthError> {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!(url = %url, "identity request");
        Ok(self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?)
    }

    /// Turn a non-2xx response into the mapped [`AuthError`].
    async fn reject(resp: reqwest::Response) -> AuthError {
        let status = resp.status();
        match resp.json::<ErrorBody>().await {
            Ok(body) => AuthError::from_code(&body.error.code, &body.error.message),
            Err(_) => AuthError::Other {
                code: String::new(),
                message: format!("auth request failed with HTTP {status}"),
            },
        }
    }
}

#[async_trait]
impl IdentityService for HttpIdentity {
    async fn create_account(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let resp = self
            .post(
                "/auth/sign-up",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(resp.json::<UidResponse>().await?.uid)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let resp = self
            .post(
                "/auth/sign-in",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(resp.json::<UidResponse>().await?.uid)
    }

    async fn update_display_name(&self, uid: &str, name: &str) -> Result<(), AuthError> {
        let resp = self
            .post(
                "/auth/update-profile",
                serde_json::json!({ "uid": uid, "displayName": name }),
            )
            .await?;
        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(())
    }
}
