//! Tests for loading character presets from disk.

use clipchain_core::{Character, CharacterCatalog};
use std::io::Write;

#[test]
fn test_load_presets_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[character]]
key = "space_cowboy"
name = "Space Cowboy"
description = "a lanky cowboy in a chrome-plated duster and a glass bubble helmet"
voice = "slow drawl"
mannerisms = "tips his helmet"
equipment = "laser lasso"
"#
    )
    .unwrap();

    let catalog = CharacterCatalog::load(file.path()).unwrap();
    assert_eq!(catalog.len(), 1);

    match catalog.resolve("Space Cowboy") {
        Character::Preset(preset) => {
            assert_eq!(preset.name(), "Space Cowboy");
            assert!(preset.description().contains("chrome-plated duster"));
        }
        Character::Custom(_) => panic!("expected preset"),
    }
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = CharacterCatalog::load(dir.path().join("nope.toml"));
    assert!(result.is_err());
}

#[test]
fn test_invalid_toml_is_an_error() {
    assert!(CharacterCatalog::from_toml_str("[[character]]\nkey = 3").is_err());
}

#[test]
fn test_bundled_wizard_matches_any_casing() {
    let catalog = CharacterCatalog::bundled().unwrap();
    let lower = catalog.resolve("wizard");
    let upper = catalog.resolve("WIZARD");
    assert_eq!(lower, upper);
    assert!(lower.preset().is_some());
}
