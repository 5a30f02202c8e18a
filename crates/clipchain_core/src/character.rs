//! Character presets and free-text characters.

use clipchain_error::{
    ClipchainResult, ConfigError, ConfigErrorKind, StorageError, StorageErrorKind,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUNDLED_CHARACTERS: &str = include_str!("../data/characters.toml");

/// A known character with a canonical look.
///
/// # Examples
///
/// ```
/// use clipchain_core::CharacterCatalog;
///
/// let catalog = CharacterCatalog::bundled().unwrap();
/// let wizard = catalog.get("Wizard").unwrap();
/// assert!(wizard.description().contains("silver beard"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct CharacterPreset {
    /// Lookup key
    key: String,
    /// Display name
    name: String,
    /// Canonical physical description, inserted verbatim into scenes
    description: String,
    /// How the character sounds
    voice: String,
    /// Characteristic gestures and behaviour
    mannerisms: String,
    /// Props the character carries
    equipment: String,
}

/// A character as used by the script generator: either a preset or the
/// caller's own wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Character {
    /// Matched a preset
    Preset(CharacterPreset),
    /// Arbitrary free text with no preset
    Custom(String),
}

impl Character {
    /// The description that must appear verbatim in every scene.
    pub fn description(&self) -> &str {
        match self {
            Self::Preset(preset) => preset.description(),
            Self::Custom(text) => text,
        }
    }

    /// Short name for prompts and file names.
    pub fn name(&self) -> &str {
        match self {
            Self::Preset(preset) => preset.name(),
            Self::Custom(text) => text,
        }
    }

    /// The preset, if this character matched one.
    pub fn preset(&self) -> Option<&CharacterPreset> {
        match self {
            Self::Preset(preset) => Some(preset),
            Self::Custom(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    character: Vec<CharacterPreset>,
}

/// Read-only mapping from normalized character name to preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterCatalog {
    presets: BTreeMap<String, CharacterPreset>,
}

impl CharacterCatalog {
    /// The presets compiled into the binary.
    pub fn bundled() -> ClipchainResult<Self> {
        Self::from_toml_str(BUNDLED_CHARACTERS)
    }

    /// Parse presets from TOML containing `[[character]]` tables.
    pub fn from_toml_str(content: &str) -> ClipchainResult<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Presets(e.to_string())))?;
        let presets = file
            .character
            .into_iter()
            .map(|preset| (normalize_key(&preset.key), preset))
            .collect();
        Ok(Self { presets })
    }

    /// Load presets from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ClipchainResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), count = catalog.len(), "Loaded character presets");
        Ok(catalog)
    }

    /// Look up a preset by name, ignoring case and separators.
    pub fn get(&self, name: &str) -> Option<&CharacterPreset> {
        self.presets.get(&normalize_key(name))
    }

    /// Resolve a caller-supplied character to a preset or free text.
    ///
    /// # Examples
    ///
    /// ```
    /// use clipchain_core::{Character, CharacterCatalog};
    ///
    /// let catalog = CharacterCatalog::bundled().unwrap();
    /// assert!(matches!(catalog.resolve("pirate"), Character::Preset(_)));
    /// assert_eq!(
    ///     catalog.resolve("a tap-dancing octopus"),
    ///     Character::Custom("a tap-dancing octopus".to_string())
    /// );
    /// ```
    pub fn resolve(&self, name: &str) -> Character {
        match self.get(name) {
            Some(preset) => Character::Preset(preset.clone()),
            None => Character::Custom(name.trim().to_string()),
        }
    }

    /// Number of presets.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// True when no presets are loaded.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Iterate presets in key order.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterPreset> {
        self.presets.values()
    }
}

/// Lowercase, treat `_` and `-` as spaces, collapse runs of whitespace.
pub fn normalize_key(name: &str) -> String {
    name.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_separators_and_case() {
        assert_eq!(normalize_key("  Space_Pirate-Captain "), "space pirate captain");
    }

    #[test]
    fn bundled_presets_have_all_fields() {
        let catalog = CharacterCatalog::bundled().unwrap();
        assert!(catalog.len() >= 5);
        for preset in catalog.iter() {
            assert!(!preset.description().is_empty());
            assert!(!preset.voice().is_empty());
            assert!(!preset.mannerisms().is_empty());
            assert!(!preset.equipment().is_empty());
        }
    }

    #[test]
    fn custom_character_description_is_its_text() {
        let catalog = CharacterCatalog::default();
        let character = catalog.resolve(" a shy dragon ");
        assert_eq!(character.description(), "a shy dragon");
        assert!(character.preset().is_none());
    }
}
