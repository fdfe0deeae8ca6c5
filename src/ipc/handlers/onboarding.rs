use crate::flows::onboarding::{OnboardingFlow, OnboardingSubmission};
use crate::AppContext;
use anyhow::Result;
use serde_json::{json, Value};

/// `onboarding.options` — the dropdown/date-picker option sets.
pub async fn options(_params: Value, _ctx: &AppContext) -> Result<Value> {
    Ok(OnboardingFlow::options())
}

/// `onboarding.save` — params: `{ class?, board?, day?, month?, year? }`.
/// Validation (and the resulting alert) happens inside the flow.
pub async fn save(params: Value, ctx: &AppContext) -> Result<Value> {
    let submission: OnboardingSubmission = serde_json::from_value(params)
        .map_err(|e| anyhow::anyhow!("invalid params: {e}"))?;
    let busy = ctx.onboarding.is_busy();
    let flow = ctx.onboarding.clone();
    tokio::spawn(async move {
        flow.submit(submission).await;
    });
    Ok(json!({ "accepted": true, "busy": busy }))
}
