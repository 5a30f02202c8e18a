//! Prompt text sent to the script model.

use clipchain_core::{CLIP_SECONDS, Character, SCENE_COUNT};

/// System instruction listing the structural rules every scene must follow.
pub fn system_instruction(character: &Character) -> String {
    let mut text = format!(
        "You are a script writer for short-form AI video. Turn a character and a story prompt \
into exactly {count} scene descriptions, one per {secs}-second video clip, that together tell a \
cohesive {total}-second story.

Rules for every scene:
- Exactly one paragraph sized for a {secs}-second clip.
- Cover each of these elements explicitly: Subject, Context, Action, Camera (angle and movement), \
Style, Ambiance (lighting and color), Audio.
- Audio is continuous for the whole clip: ambient sound plus any dialogue, with no silent gaps.
- Describe only what is present. Avoid negation words such as \"no\", \"not\", \"without\" or \
\"don't\"; the video model renders whatever is named.
- Write dialogue as: <character> says: <line>. Leave out quotation marks so the model does not \
render subtitles.
- Keep the character's appearance identical in every scene by repeating this description \
verbatim: {description}",
        count = SCENE_COUNT,
        secs = CLIP_SECONDS,
        total = SCENE_COUNT as u32 * CLIP_SECONDS,
        description = character.description(),
    );
    if let Some(preset) = character.preset() {
        text.push_str(&format!(
            "\n- Voice: {}.\n- Mannerisms: {}.\n- Equipment: {}.",
            preset.voice(),
            preset.mannerisms(),
            preset.equipment()
        ));
    }
    text.push_str(&format!(
        "\n\nRespond with ONLY a JSON array of exactly {} strings, \
         one complete scene description each.",
        SCENE_COUNT
    ));
    text
}

/// User message naming the character and the story.
pub fn user_prompt(character: &str, prompt: &str) -> String {
    format!(
        "Character: {}\nStory prompt: {}\n\nPlease create {} scene scripts \
         that tell a complete story featuring this character.",
        character, prompt, SCENE_COUNT
    )
}

/// Follow-up asking the model to reformat its own reply as clean JSON.
pub fn extraction_prompt(previous_reply: &str) -> String {
    format!(
        "The text below describes {count} video scenes but is not valid JSON. \
         Reformat it as a JSON array of exactly {count} strings, one per scene, \
         keeping the wording. Output ONLY the JSON array.\n\n{reply}",
        count = SCENE_COUNT,
        reply = previous_reply
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipchain_core::CharacterCatalog;

    #[test]
    fn preset_details_are_included() {
        let catalog = CharacterCatalog::bundled().unwrap();
        let wizard = catalog.resolve("wizard");
        let text = system_instruction(&wizard);
        assert!(text.contains(wizard.description()));
        assert!(text.contains("Mannerisms:"));
        assert!(text.contains("JSON array of exactly 3 strings"));
    }

    #[test]
    fn custom_character_has_no_preset_lines() {
        let text = system_instruction(&Character::Custom("a shy dragon".into()));
        assert!(text.contains("a shy dragon"));
        assert!(!text.contains("Mannerisms:"));
    }

    #[test]
    fn user_prompt_layout() {
        let prompt = user_prompt("wizard", "finds a phone");
        assert!(prompt.starts_with("Character: wizard\nStory prompt: finds a phone"));
        assert!(prompt.ends_with("tell a complete story featuring this character."));
    }
}
