use crate::AppContext;
use anyhow::Result;
use serde_json::{json, Value};

use super::require;

/// `alert.confirm` — params: `{ id }`. Resumes the flow suspended on the
/// alert; the confirm tap's click sound is the flow's responsibility.
pub async fn confirm(params: Value, ctx: &AppContext) -> Result<Value> {
    let id = require(&params, "id")?;
    ctx.alerts.confirm(id)?;
    Ok(json!({ "confirmed": true }))
}
