//! RPC handlers for the sign-in / sign-up / sign-out buttons.
//!
//! Submissions are spawned so the connection loop can keep delivering the
//! alert and navigation notifications the flow produces; the response
//! only acknowledges that the press was accepted. A press that lands
//! while the same flow is already in flight is dropped by the flow's
//! in-progress guard.

use crate::AppContext;
use anyhow::Result;
use serde_json::{json, Value};

use super::require;

/// `auth.signIn` — params: `{ email, password }`.
pub async fn sign_in(params: Value, ctx: &AppContext) -> Result<Value> {
    let email = require(&params, "email")?.to_string();
    let password = require(&params, "password")?.to_string();
    let busy = ctx.sign_in.is_busy();
    let flow = ctx.sign_in.clone();
    tokio::spawn(async move {
        flow.submit(&email, &password).await;
    });
    Ok(json!({ "accepted": true, "busy": busy }))
}

/// `auth.signUp` — params: `{ name, email, password, confirm }`.
pub async fn sign_up(params: Value, ctx: &AppContext) -> Result<Value> {
    let name = require(&params, "name")?.to_string();
    let email = require(&params, "email")?.to_string();
    let password = require(&params, "password")?.to_string();
    let confirm = require(&params, "confirm")?.to_string();
    let busy = ctx.sign_up.is_busy();
    let flow = ctx.sign_up.clone();
    tokio::spawn(async move {
        flow.submit(&name, &email, &password, &confirm).await;
    });
    Ok(json!({ "accepted": true, "busy": busy }))
}

/// `auth.signOut` — clears the local slot and resets to Intro.
pub async fn sign_out(_params: Value, ctx: &AppContext) -> Result<Value> {
    crate::flows::sign_out(&ctx.storage, &ctx.nav).await;
    Ok(json!({ "ok": true }))
}
