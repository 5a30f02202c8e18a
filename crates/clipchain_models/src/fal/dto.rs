//! fal.ai queue API wire format.

use serde::{Deserialize, Serialize};

/// Body of a queue submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalSubmitRequest {
    /// Generation prompt
    pub prompt: String,
    /// Output aspect ratio
    pub aspect_ratio: String,
}

/// Reply to a queue submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalQueueSubmission {
    /// Job id
    pub request_id: String,
    /// Where to poll job status
    #[serde(default)]
    pub status_url: Option<String>,
    /// Where to fetch the result once complete
    #[serde(default)]
    pub response_url: Option<String>,
}

/// Reply to a status poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalQueueStatus {
    /// `IN_QUEUE`, `IN_PROGRESS` or `COMPLETED`
    pub status: String,
    /// Queue position while waiting
    #[serde(default)]
    pub queue_position: Option<u64>,
    /// Failure text, when the job errored
    #[serde(default)]
    pub error: Option<String>,
}

impl FalQueueStatus {
    /// Whether the job has finished (successfully or not).
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }

    /// Whether the job is still waiting or running.
    pub fn is_pending(&self) -> bool {
        matches!(self.status.as_str(), "IN_QUEUE" | "IN_PROGRESS")
    }
}

/// Result payload of a completed video job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalVideoResult {
    /// Generated video file
    #[serde(default)]
    pub video: Option<FalFile>,
}

/// A hosted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FalFile {
    /// Download URL
    pub url: String,
    /// MIME type, when reported
    #[serde(default)]
    pub content_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValidationBody {
    detail: ValidationDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ValidationDetail {
    Items(Vec<ValidationItem>),
    Message(String),
}

#[derive(Debug, Deserialize)]
struct ValidationItem {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

/// Extract per-field messages from a validation error body.
///
/// Accepts `{"detail": [{"loc": [...], "msg": ...}]}` and
/// `{"detail": "..."}`. Each item becomes `field: message`, where `field` is
/// the location path with the leading `body` segment dropped.
///
/// # Examples
///
/// ```
/// use clipchain_models::parse_validation_details;
///
/// let body = r#"{"detail":[
///     {"loc":["body","duration"],"msg":"unexpected value","type":"value_error"}
/// ]}"#;
/// assert_eq!(
///     parse_validation_details(body),
///     Some(vec!["duration: unexpected value".to_string()])
/// );
/// assert_eq!(parse_validation_details("not json"), None);
/// ```
pub fn parse_validation_details(body: &str) -> Option<Vec<String>> {
    let parsed: ValidationBody = serde_json::from_str(body).ok()?;
    let details = match parsed.detail {
        ValidationDetail::Message(message) => vec![message],
        ValidationDetail::Items(items) => items
            .into_iter()
            .map(|item| {
                let field = item
                    .loc
                    .iter()
                    .filter_map(|segment| match segment {
                        serde_json::Value::String(s) => Some(s.clone()),
                        serde_json::Value::Number(n) => Some(n.to_string()),
                        _ => None,
                    })
                    .filter(|segment| segment != "body")
                    .collect::<Vec<_>>()
                    .join(".");
                if field.is_empty() {
                    item.msg
                } else {
                    format!("{}: {}", field, item.msg)
                }
            })
            .collect(),
    };
    Some(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_locations_are_dotted() {
        let body = r#"{"detail":[{"loc":["body","input",0,"prompt"],"msg":"too long"}]}"#;
        assert_eq!(
            parse_validation_details(body).unwrap(),
            vec!["input.0.prompt: too long"]
        );
    }

    #[test]
    fn string_detail_is_kept() {
        let body = r#"{"detail":"Prompt flagged by content checker"}"#;
        assert_eq!(
            parse_validation_details(body).unwrap(),
            vec!["Prompt flagged by content checker"]
        );
    }

    #[test]
    fn status_helpers() {
        let status: FalQueueStatus =
            serde_json::from_str(r#"{"status":"IN_QUEUE","queue_position":3}"#).unwrap();
        assert!(status.is_pending());
        assert!(!status.is_completed());
    }
}
