use crate::AppContext;
use anyhow::Result;
use serde_json::{json, Value};

/// `audio.start` — idempotent; screens call it on mount.
pub async fn start(_params: Value, ctx: &AppContext) -> Result<Value> {
    ctx.audio.start();
    Ok(json!({ "muted": ctx.audio.is_muted() }))
}

/// `audio.setMuted` — params: `{ muted: bool }`.
pub async fn set_muted(params: Value, ctx: &AppContext) -> Result<Value> {
    let muted = params
        .get("muted")
        .and_then(Value::as_bool)
        .ok_or_else(|| anyhow::anyhow!("missing field: muted"))?;
    ctx.audio.set_muted(muted);
    Ok(json!({ "muted": muted }))
}

/// `audio.toggleMute` — the speaker icon.
pub async fn toggle_mute(_params: Value, ctx: &AppContext) -> Result<Value> {
    Ok(json!({ "muted": ctx.audio.toggle_muted() }))
}

pub async fn status(_params: Value, ctx: &AppContext) -> Result<Value> {
    Ok(json!({ "muted": ctx.audio.is_muted() }))
}
