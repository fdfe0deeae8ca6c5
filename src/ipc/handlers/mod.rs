pub mod alert;
pub mod app;
pub mod audio;
pub mod auth;
pub mod intro;
pub mod nav;
pub mod onboarding;

use serde_json::Value;

/// Pull a string field out of the params object.
pub(crate) fn sv<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key).and_then(|v| v.as_str())
}

pub(crate) fn require<'a>(v: &'a Value, key: &str) -> anyhow::Result<&'a str> {
    sv(v, key).ok_or_else(|| anyhow::anyhow!("missing field: {key}"))
}
