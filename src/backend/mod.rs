//! Client for the hosted identity and document-store service.
//!
//! The flows only ever see the [`IdentityService`] and [`ProfileStore`]
//! traits; the HTTP implementations live in `auth.rs` and `docs.rs`, and
//! integration tests substitute in-memory fakes. The remote service's
//! internals are opaque — this module owns nothing beyond the request
//! shapes and the error-code mapping.

pub mod auth;
pub mod docs;
pub mod messages;

pub use auth::{AuthError, HttpIdentity, IdentityService};
pub use docs::{Dob, DocError, HttpProfiles, ProfileStore, UserDoc};
pub use messages::friendly_auth_message;

use serde::Deserialize;

/// Remote API endpoints and credentials (`[backend]` in config.toml).
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the hosted service.
    pub api_base_url: String,
    /// Project API key sent as `x-api-key` on every request.
    pub api_key: String,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.zynko.app".to_string(),
            api_key: String::new(),
            request_timeout_secs: 10,
        }
    }
}

impl BackendConfig {
    pub(crate) fn client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(self.request_timeout_secs))
            .build()
    }
}
