use crate::error::BridgeError;

use super::types::TravelPlan;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Strategy that turns generated text into a plan. The orchestrator only
/// depends on this signature.
pub type PlanParser = fn(&str) -> Result<TravelPlan, BridgeError>;

/// Strips code fences and surrounding prose, leaving the outermost
/// `{ ... }` span when there is one.
///
/// Every "```json" (any case) and every bare "```" is removed together with
/// the whitespace that follows it. The result is trimmed and then cut to the
/// first `{` through the last `}`. Nothing inside that span is repaired.
pub fn normalize_plan_text(raw: &str) -> String {
    let stripped = strip_code_fences(raw);

    match (stripped.find('{'), stripped.rfind('}')) {
        (Some(start), Some(end)) if start <= end => stripped[start..=end].to_string(),
        _ => stripped,
    }
}

/// Default [`PlanParser`]: normalize, then decode as a JSON object.
pub fn parse_travel_plan(raw: &str) -> Result<TravelPlan, BridgeError> {
    let normalized = normalize_plan_text(raw);
    serde_json::from_str::<TravelPlan>(&normalized)
        .map_err(|err| BridgeError::Parse(err.to_string()))
}

fn strip_code_fences(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(idx) = rest.find(FENCE) {
        output.push_str(&rest[..idx]);
        let mut after = &rest[idx + FENCE.len()..];
        if after
            .get(..JSON_TAG.len())
            .is_some_and(|tag| tag.eq_ignore_ascii_case(JSON_TAG))
        {
            after = &after[JSON_TAG.len()..];
        }
        rest = after.trim_start();
    }

    output.push_str(rest);
    output.trim().to_string()
}
