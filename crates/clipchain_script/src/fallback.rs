//! Deterministic template scenes used when the model cannot be used.

use clipchain_core::Character;

/// Keyword → setting table, checked in order against the words of the lowercased prompt.
const ENVIRONMENTS: &[(&[&str], &str)] = &[
    (
        &["space", "galaxy", "planet", "alien"],
        "a futuristic space station with panoramic windows onto the stars",
    ),
    (
        &["ocean", "sea", "beach", "underwater"],
        "a sunlit beach with rolling turquoise waves",
    ),
    (
        &["forest", "woods", "jungle"],
        "an ancient misty forest with shafts of golden light",
    ),
    (
        &["technology", "computer", "phone", "robot", "modern"],
        "a modern electronics store filled with glowing screens and gadgets",
    ),
    (
        &["city", "street", "urban", "downtown"],
        "a bustling neon-lit city street at dusk",
    ),
    (
        &["castle", "medieval", "kingdom", "dragon"],
        "a torch-lit medieval castle hall with tall stained-glass windows",
    ),
    (
        &["desert", "sand"],
        "a vast desert of rippling golden dunes under a blazing sun",
    ),
    (
        &["snow", "winter", "mountain", "ice"],
        "a snowy mountain pass with drifting flakes and distant peaks",
    ),
    (
        &["kitchen", "cook", "cooking", "food", "restaurant"],
        "a busy restaurant kitchen full of steam and clattering pans",
    ),
];

const DEFAULT_ENVIRONMENT: &str = "a cozy, warmly lit everyday setting";

/// Pick a setting for the story from keywords in the prompt.
///
/// # Examples
///
/// ```
/// use clipchain_script::select_environment;
///
/// assert!(select_environment("lost in space").contains("space station"));
/// assert!(select_environment("discovers modern technology").contains("electronics store"));
/// ```
pub fn select_environment(prompt: &str) -> &'static str {
    let lowered = prompt.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();
    ENVIRONMENTS
        .iter()
        .find(|(keywords, _)| {
            keywords
                .iter()
                .any(|k| words.iter().any(|word| matches_keyword(word, k)))
        })
        .map(|(_, environment)| *environment)
        .unwrap_or(DEFAULT_ENVIRONMENT)
}

/// Whole-word match, accepting a plain `s`/`es` plural.
fn matches_keyword(word: &str, keyword: &str) -> bool {
    match word.strip_prefix(keyword) {
        Some(rest) => matches!(rest, "" | "s" | "es"),
        None => false,
    }
}

/// Three template scenes built from static character data.
pub fn fallback_scripts(character: &Character, prompt: &str) -> Vec<String> {
    let environment = select_environment(prompt);
    let description = character.description();
    let (voice, mannerisms, equipment) = match character.preset() {
        Some(p) => (
            p.voice().as_str(),
            p.mannerisms().as_str(),
            p.equipment().as_str(),
        ),
        None => (
            "a clear, expressive voice",
            "expressive gestures",
            "whatever the moment calls for",
        ),
    };
    let story = prompt.trim();

    vec![
        format!(
            "Subject: {description}. Context: {environment}. Action: the character arrives and \
looks around with curiosity as the story begins: {story}. Camera: wide establishing shot slowly \
pushing in. Style: cinematic, photorealistic. Ambiance: warm key light with soft shadows. \
Audio: ambient sound of the setting and a {voice}; the character says: What do we have here."
        ),
        format!(
            "Subject: {description}. Context: {environment}. Action: the character engages with \
the heart of the story ({story}) showing {mannerisms}, handling {equipment}. Camera: medium \
tracking shot at eye level. Style: cinematic, photorealistic. Ambiance: dynamic lighting with \
rising energy. Audio: continuous ambient sound, footsteps and the character's {voice}."
        ),
        format!(
            "Subject: {description}. Context: {environment}. Action: the character reaches the \
story's resolution and turns to the camera with a satisfied expression. Camera: slow orbiting \
close-up ending on a wide shot. Style: cinematic, photorealistic. Ambiance: golden backlight for \
a reflective finale. Audio: swelling ambient music under the character's {voice}; the character \
says: That was quite an adventure."
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipchain_core::CharacterCatalog;

    #[test]
    fn unknown_prompt_uses_default_setting() {
        assert_eq!(select_environment("a quiet afternoon"), DEFAULT_ENVIRONMENT);
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert!(select_environment("A trip to the BEACH").contains("beach"));
    }

    #[test]
    fn keywords_match_whole_words_only() {
        for prompt in [
            "a nice afternoon at the office",
            "a season of research",
            "cookie party",
            "a thousand friends",
        ] {
            assert_eq!(select_environment(prompt), DEFAULT_ENVIRONMENT, "{prompt}");
        }
    }

    #[test]
    fn plural_and_punctuated_keywords_match() {
        assert!(select_environment("hopping between planets").contains("space station"));
        assert!(select_environment("two beaches, one day").contains("beach"));
        assert!(select_environment("slipping on the ice!").contains("snowy mountain"));
        assert!(select_environment("cooking for friends").contains("restaurant kitchen"));
    }

    #[test]
    fn every_template_carries_description() {
        let catalog = CharacterCatalog::bundled().unwrap();
        let pirate = catalog.resolve("pirate");
        let scenes = fallback_scripts(&pirate, "sails into a storm at sea");
        assert_eq!(scenes.len(), 3);
        for scene in &scenes {
            assert!(scene.contains(pirate.description()));
            assert!(scene.contains("rolling turquoise waves"));
        }
    }
}
