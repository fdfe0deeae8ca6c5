use crate::nav::Screen;
use crate::AppContext;
use anyhow::Result;
use serde_json::{json, Value};

use super::require;

fn stack_json(ctx: &AppContext) -> Value {
    let names: Vec<&str> = ctx.nav.snapshot().iter().map(Screen::as_str).collect();
    json!({ "stack": names, "current": ctx.nav.current().as_str() })
}

/// `nav.current` — catch-up for shells that connect mid-flight.
pub async fn current(_params: Value, ctx: &AppContext) -> Result<Value> {
    Ok(stack_json(ctx))
}

/// `nav.push` — shell-initiated forward navigation (e.g. the
/// "Register Now" link from SignIn to SignUp).
pub async fn push(params: Value, ctx: &AppContext) -> Result<Value> {
    let name = require(&params, "screen")?;
    let screen = Screen::parse(name).ok_or_else(|| anyhow::anyhow!("unknown screen: {name}"))?;
    ctx.nav.push(screen);
    Ok(stack_json(ctx))
}

/// `nav.pop` — hardware/gesture back.
pub async fn pop(_params: Value, ctx: &AppContext) -> Result<Value> {
    ctx.nav.pop();
    Ok(stack_json(ctx))
}
