use serde::{Deserialize, Serialize};
use serde_json::Value;
use vroomy_model::{PredictionRequest, PredictionResponse};

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ErrorReply {
    pub detail: Option<String>,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PredictBody {
    text: String,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(req: &PredictionRequest) -> PredictBody {
    PredictBody {
        text: req.text.clone(),
    }
}

/// Decodes the body of a successful answer.
///
/// The body must be valid JSON. A missing, null or empty `generated_text`
/// yields no text rather than an error, while a `generated_text` of any
/// other non-string type is rejected.
pub fn parse_reply(
    body: &[u8],
) -> Result<PredictionResponse, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;
    let generated_text = match value.get("generated_text") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => {
            return Err(serde::de::Error::custom(format!(
                "unexpected generated_text: {other}"
            )));
        }
    };
    Ok(PredictionResponse { generated_text })
}

/// Extracts the `detail` field from an error body, if it can be found.
///
/// Parse failures are tolerated and simply yield no detail.
pub fn parse_error_detail(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorReply>(body)
        .ok()
        .and_then(|reply| reply.detail)
}
