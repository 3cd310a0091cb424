use serde_json::Value;
use tracing::debug;

use crate::error::BridgeError;

const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";
const FINISH_REASON_POINTER: &str = "/candidates/0/finishReason";

/// Pulls `candidates[0].content.parts[0].text` out of a Gemini response body.
///
/// A link that is missing, `null` or of the wrong type anywhere on that path,
/// or an empty string at the end of it, is reported as
/// [`BridgeError::EmptyContent`]. A body that is not JSON at all is
/// [`BridgeError::Unexpected`].
pub fn extract_generated_text(body: &str) -> Result<String, BridgeError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|err| BridgeError::Unexpected(format!("Malformed AI response: {err}")))?;

    match envelope
        .pointer(TEXT_POINTER)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
    {
        Some(text) => Ok(text.to_string()),
        None => {
            debug!(
                finish_reason = envelope
                    .pointer(FINISH_REASON_POINTER)
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or("none"),
                "extract: envelope carried no text"
            );
            Err(BridgeError::EmptyContent)
        }
    }
}
