//! Normalize model scenes before they reach the video stage.

use clipchain_core::CLIP_SECONDS;

/// Ensure a scene carries the scene label, the canonical character
/// description, a duration marker and a continuity marker.
///
/// Existing `Scene N:` labels are replaced so numbering always follows
/// array order.
///
/// # Examples
///
/// ```
/// use clipchain_script::enhance_scene;
///
/// let scene = enhance_scene("The hero waves.", "a tall knight in silver armor", 1);
/// assert!(scene.starts_with("Scene 2: "));
/// assert!(scene.contains("a tall knight in silver armor"));
/// assert!(scene.contains("8-second"));
/// ```
pub fn enhance_scene(script: &str, description: &str, index: usize) -> String {
    let mut body = strip_scene_label(script.trim()).to_string();

    if !description.is_empty() && !body.contains(description) {
        body = format!("Featuring {}. {}", description, body);
    }

    let lowered = body.to_lowercase();
    let duration_marker = format!("{}-second", CLIP_SECONDS);
    let duration_words = format!("{} second", CLIP_SECONDS);
    if !lowered.contains(&duration_marker) && !lowered.contains(&duration_words) {
        body.push_str(&format!(" Duration: {} clip.", duration_marker));
    }
    if !lowered.contains("continuous action") {
        body.push_str(" Continuous action throughout the shot.");
    }

    format!("Scene {}: {}", index + 1, body)
}

fn strip_scene_label(script: &str) -> &str {
    let Some(rest) = script
        .strip_prefix("Scene ")
        .or_else(|| script.strip_prefix("scene "))
    else {
        return script;
    };
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return script;
    }
    match rest[digits..].strip_prefix(':') {
        Some(body) => body.trim_start(),
        None => script,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_label_is_renumbered() {
        let scene = enhance_scene("Scene 7: wizard", "wizard", 0);
        assert!(scene.starts_with("Scene 1: wizard"));
        assert!(!scene.contains("Scene 7"));
    }

    #[test]
    fn markers_are_not_duplicated() {
        let input = "wizard in an 8-second clip with continuous action";
        let scene = enhance_scene(input, "wizard", 2);
        assert_eq!(scene, format!("Scene 3: {}", input));
    }

    #[test]
    fn description_is_prepended_once() {
        let scene = enhance_scene("walks in", "an old wizard", 0);
        assert_eq!(scene.matches("an old wizard").count(), 1);
        assert!(scene.starts_with("Scene 1: Featuring an old wizard. walks in"));
    }

    #[test]
    fn non_label_prefix_is_kept() {
        assert_eq!(strip_scene_label("Scenery: a hill"), "Scenery: a hill");
        assert_eq!(strip_scene_label("Scene x: a hill"), "Scene x: a hill");
    }
}
