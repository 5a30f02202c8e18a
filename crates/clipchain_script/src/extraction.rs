//! Pull a JSON array of scene strings out of a model reply.
//!
//! Replies often wrap JSON in markdown fences or surround it with prose.

use clipchain_error::{ScriptError, ScriptErrorKind};

/// Find the JSON array in a reply.
///
/// Tries a fenced code block first, then the first balanced `[...]`.
///
/// # Examples
///
/// ```
/// use clipchain_script::extract_json_array;
///
/// let reply = "Here you go:\n```json\n[\"one\", \"two\"]\n```";
/// assert_eq!(extract_json_array(reply).unwrap(), "[\"one\", \"two\"]");
/// ```
pub fn extract_json_array(response: &str) -> Result<String, ScriptError> {
    if let Some(block) = extract_from_code_block(response).filter(|b| b.starts_with('[')) {
        return Ok(block);
    }
    if let Some(array) = extract_balanced(response, '[', ']') {
        return Ok(array);
    }

    tracing::debug!(response_length = response.len(), "No JSON array in reply");
    Err(ScriptError::new(ScriptErrorKind::NoJsonArray(preview(
        response,
    ))))
}

/// Extract and decode a list of scene strings.
///
/// # Errors
///
/// Fails if no array is present or its elements are not strings.
pub fn parse_scene_array(response: &str) -> Result<Vec<String>, ScriptError> {
    let json = extract_json_array(response)?;
    serde_json::from_str::<Vec<String>>(&json)
        .map(|scenes| scenes.into_iter().map(|s| s.trim().to_string()).collect())
        .map_err(|e| ScriptError::new(ScriptErrorKind::MalformedArray(e.to_string())))
}

fn extract_from_code_block(response: &str) -> Option<String> {
    let start = response.find("```")?;
    let after_fence = start + 3;
    let content_start = response[after_fence..]
        .find('\n')
        .map(|n| after_fence + n + 1)
        .unwrap_or(after_fence);
    let end = response[content_start..]
        .find("```")
        .map(|n| content_start + n)
        .unwrap_or(response.len());
    Some(response[content_start..end].trim().to_string())
}

fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

fn preview(text: &str) -> String {
    const LIMIT: usize = 120;
    match text.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_array() {
        let scenes = parse_scene_array(r#"["a", "b", "c"]"#).unwrap();
        assert_eq!(scenes, vec!["a", "b", "c"]);
    }

    #[test]
    fn array_with_brackets_inside_strings() {
        let reply = r#"Sure! ["The sign reads [OPEN]", "b \"quoted\"", "c"] Enjoy."#;
        let scenes = parse_scene_array(reply).unwrap();
        assert_eq!(scenes[0], "The sign reads [OPEN]");
        assert_eq!(scenes[1], "b \"quoted\"");
    }

    #[test]
    fn unlabelled_fence() {
        let reply = "```\n[\"x\"]\n```";
        assert_eq!(parse_scene_array(reply).unwrap(), vec!["x"]);
    }

    #[test]
    fn prose_without_array_fails() {
        let err = parse_scene_array("Scene one: the wizard walks in.").unwrap_err();
        assert!(matches!(err.kind, ScriptErrorKind::NoJsonArray(_)));
    }

    #[test]
    fn array_of_objects_is_malformed() {
        let err = parse_scene_array(r#"[{"scene": 1}]"#).unwrap_err();
        assert!(matches!(err.kind, ScriptErrorKind::MalformedArray(_)));
    }
}
