//! Extraction of structured data from raw model output.
//!
//! Two independent modes, one per caller shape:
//!
//! - [`extract_structured`] turns a (possibly code-fenced) JSON reply into an
//!   [`Extraction`]. Text that is not JSON degrades to [`Extraction::RawText`].
//! - [`parse_assistant_reply`] reads the two-section code-assistant protocol
//!   (`--- message ---` / `--- updatedFiles ---`). Malformed replies degrade to
//!   an [`AssistantOutcome::Degraded`] carrying the reason.
//!
//! Neither mode ever fails outward: model unreliability must not fail the
//! request.

use serde_json::Value;

use questforge_types::error::AssistantParseError;
use questforge_types::game::{AssistantReply, GameFile, GameRecord};

/// Header of the free-text section in the assistant protocol.
pub const MESSAGE_MARKER: &str = "--- message ---";

/// Header of the file-list section in the assistant protocol.
pub const UPDATED_FILES_MARKER: &str = "--- updatedFiles ---";

/// Prefix of the diagnostic message returned for unparseable assistant replies.
pub const ASSISTANT_PARSE_ERROR_PREFIX: &str = "⚠️ Error parsing assistant output: ";

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Outcome of generic JSON extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The (fence-stripped) output parsed as JSON.
    Structured(Value),
    /// The output was not JSON; carries the fence-stripped text unchanged.
    RawText(String),
}

impl Extraction {
    pub fn is_structured(&self) -> bool {
        matches!(self, Extraction::Structured(_))
    }

    /// The game record to persist, if the output is an object with a string `title`.
    pub fn titled_record(&self) -> Option<GameRecord> {
        match self {
            Extraction::Structured(value @ Value::Object(_)) => {
                GameRecord::from_value(value.clone()).filter(|record| record.title().is_some())
            }
            _ => None,
        }
    }

    /// The value sent back to the caller: the parsed JSON, or the raw text as a JSON string.
    pub fn into_value(self) -> Value {
        match self {
            Extraction::Structured(value) => value,
            Extraction::RawText(text) => Value::String(text),
        }
    }
}

/// Outcome of parsing a two-section assistant reply.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantOutcome {
    Parsed(AssistantReply),
    Degraded(AssistantParseError),
}

impl AssistantOutcome {
    /// Collapse into the reply sent to the caller.
    ///
    /// A degradation becomes a reply whose message explains the failure and
    /// whose file list is empty.
    pub fn into_reply(self) -> AssistantReply {
        match self {
            AssistantOutcome::Parsed(reply) => reply,
            AssistantOutcome::Degraded(reason) => AssistantReply {
                message: format!("{ASSISTANT_PARSE_ERROR_PREFIX}{reason}"),
                updated_files: Vec::new(),
            },
        }
    }
}

/// Strip a leading ```` ```json ```` or ```` ``` ```` fence and its closing fence.
///
/// Text that does not open with a fence (ignoring leading whitespace) is
/// returned untouched.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim_start();
    let body = if let Some(rest) = trimmed.strip_prefix(JSON_FENCE) {
        rest
    } else if let Some(rest) = trimmed.strip_prefix(FENCE) {
        rest
    } else {
        return raw;
    };

    let body = body.trim();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Mode A: parse model output as JSON, tolerating a surrounding code fence.
pub fn extract_structured(raw: &str) -> Extraction {
    let stripped = strip_code_fence(raw);

    match serde_json::from_str::<Value>(stripped) {
        Ok(value) => Extraction::Structured(value),
        Err(e) => {
            tracing::debug!(
                error = %e,
                content_preview = %preview(stripped),
                "Model output is not JSON; returning raw text"
            );
            Extraction::RawText(stripped.to_string())
        }
    }
}

/// Mode B: parse the two-section assistant protocol, degrading on failure.
pub fn parse_assistant_reply(raw: &str) -> AssistantOutcome {
    match try_parse_assistant_reply(raw) {
        Ok(reply) => AssistantOutcome::Parsed(reply),
        Err(reason) => {
            tracing::warn!(
                error = %reason,
                content_preview = %preview(raw),
                "Failed to parse assistant reply; degrading to diagnostic message"
            );
            AssistantOutcome::Degraded(reason)
        }
    }
}

/// Strict form of [`parse_assistant_reply`].
pub fn try_parse_assistant_reply(raw: &str) -> Result<AssistantReply, AssistantParseError> {
    let (message_part, files_part) = raw
        .split_once(UPDATED_FILES_MARKER)
        .ok_or(AssistantParseError::SectionMissing)?;

    let message = message_part.replace(MESSAGE_MARKER, "").trim().to_string();

    let files_json = strip_code_fence(files_part.trim());
    let updated_files: Vec<GameFile> = serde_json::from_str(files_json)
        .map_err(|e| AssistantParseError::MalformedFileList(e.to_string()))?;

    Ok(AssistantReply {
        message,
        updated_files,
    })
}

fn preview(text: &str) -> String {
    text.chars().take(200).collect()
}
