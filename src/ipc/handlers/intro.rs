use crate::flows::intro::AdvanceOutcome;
use crate::AppContext;
use anyhow::Result;
use serde_json::{json, Value};

/// `intro.open` — the shell mounted the intro screen.
pub async fn open(_params: Value, ctx: &AppContext) -> Result<Value> {
    ctx.intro.begin();
    Ok(json!({ "index": ctx.intro.current_index() }))
}

/// `intro.advance` — the Next/Start button.
pub async fn advance(_params: Value, ctx: &AppContext) -> Result<Value> {
    match ctx.intro.advance() {
        AdvanceOutcome::Slide(index) => Ok(json!({ "index": index, "finished": false })),
        AdvanceOutcome::Finished => Ok(json!({ "finished": true })),
    }
}
