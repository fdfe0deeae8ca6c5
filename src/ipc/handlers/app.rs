use crate::AppContext;
use anyhow::Result;
use serde_json::{json, Value};

pub async fn ping(_params: Value, _ctx: &AppContext) -> Result<Value> {
    Ok(json!({ "pong": true }))
}

pub async fn status(_params: Value, ctx: &AppContext) -> Result<Value> {
    let uptime = ctx.started_at.elapsed().as_secs();
    Ok(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "uptime": uptime,
        "port": ctx.config.port,
        "screen": ctx.nav.current().as_str(),
        "bootstrapPhase": format!("{:?}", ctx.bootstrap.phase()),
        "pendingAlerts": ctx.alerts.pending_count(),
        "muted": ctx.audio.is_muted(),
    }))
}
