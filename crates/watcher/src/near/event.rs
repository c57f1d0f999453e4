//! Publish events in NEAR receipt logs.
//!
//! Contracts emit structured events as log lines of the form
//! `EVENT_JSON:{"standard":..,"event":..,..}` (NEP-297).
use serde::Deserialize;

pub const EVENT_LOG_PREFIX: &str = "EVENT_JSON:";

const STANDARD: &str = "wormhole";
const PUBLISH: &str = "publish";

/// A message published by the core contract.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PublishEvent {
    /// Hex encoded emitter address.
    pub emitter: String,
    #[serde(rename = "seq")]
    pub sequence: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseEventError {
    #[error("event is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("publish event is missing required fields: {0}")]
    InvalidPublish(#[source] serde_json::Error),
}

/// Parses a single receipt log line.
///
/// Returns `None` for lines which are not events and for events of other
/// standards.
pub fn parse_publish_event(log: &str) -> Result<Option<PublishEvent>, ParseEventError> {
    let Some(raw) = log.strip_prefix(EVENT_LOG_PREFIX) else {
        return Ok(None);
    };

    let event: serde_json::Value = serde_json::from_str(raw).map_err(ParseEventError::InvalidJson)?;

    let tag = |name: &str| event.get(name).and_then(serde_json::Value::as_str);
    if tag("standard") != Some(STANDARD) || tag("event") != Some(PUBLISH) {
        return Ok(None);
    }

    serde_json::from_value(event)
        .map(Some)
        .map_err(ParseEventError::InvalidPublish)
}
