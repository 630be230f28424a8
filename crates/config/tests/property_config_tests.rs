//! Property-based tests for key combinations.
//!
//! Test coverage:
//! - Equality ignores the order modifiers are spelled in.
//! - Canonical display output parses back to the same combination.
//! - Serialized combinations deserialize unchanged.

use proptest::prelude::*;

use shortcuts_config::{Key, KeyCombination, KeyModifiers};

fn modifier_strategy() -> impl Strategy<Value = KeyModifiers> {
    (0u8..16).prop_map(KeyModifiers::from_bits_truncate)
}

fn key_strategy() -> impl Strategy<Value = Key> {
    prop_oneof![
        "[a-zA-Z0-9*/?.,;=_-]".prop_map(|s| Key::Char(s.chars().next().unwrap_or('a'))),
        (1u8..=24).prop_map(Key::F),
        Just(Key::Enter),
        Just(Key::Esc),
        Just(Key::Backspace),
        Just(Key::Tab),
        Just(Key::Space),
        Just(Key::PageDown),
        Just(Key::Left),
    ]
}

fn modifier_names(modifiers: KeyModifiers) -> Vec<&'static str> {
    [
        (KeyModifiers::CTRL, "Ctrl"),
        (KeyModifiers::ALT, "Alt"),
        (KeyModifiers::SHIFT, "Shift"),
        (KeyModifiers::META, "Meta"),
    ]
    .into_iter()
    .filter(|(flag, _)| modifiers.contains(*flag))
    .map(|(_, name)| name)
    .collect()
}

#[test]
fn test_permuted_modifier_spellings_are_equal() {
    let a = KeyCombination::parse("Alt+Ctrl+K").unwrap();
    let b = KeyCombination::parse("Ctrl+Alt+K").unwrap();
    let c = KeyCombination::parse("shift+meta+alt+ctrl+k").unwrap();
    let d = KeyCombination::parse("Ctrl+Alt+Shift+Meta+K").unwrap();
    assert_eq!(a, b);
    assert_eq!(c, d);
    assert_ne!(a, d);
}

proptest! {
    #[test]
    fn equality_ignores_modifier_order(
        (key, modifiers, names) in (key_strategy(), modifier_strategy())
            .prop_flat_map(|(key, modifiers)| {
                (Just(key), Just(modifiers), Just(modifier_names(modifiers)).prop_shuffle())
            })
    ) {
        let primary = KeyCombination::key(key).unwrap().to_string();
        let spelled = names
            .iter()
            .copied()
            .chain(std::iter::once(primary.as_str()))
            .collect::<Vec<_>>()
            .join("+");

        let parsed = KeyCombination::parse(&spelled).unwrap();
        prop_assert_eq!(parsed, KeyCombination::new(key, modifiers).unwrap());
    }

    #[test]
    fn display_parses_back(key in key_strategy(), modifiers in modifier_strategy()) {
        let combo = KeyCombination::new(key, modifiers).unwrap();
        let parsed = KeyCombination::parse(&combo.to_string()).unwrap();
        prop_assert_eq!(parsed, combo);
    }

    #[test]
    fn different_modifiers_are_unequal(
        key in key_strategy(),
        a in modifier_strategy(),
        b in modifier_strategy(),
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(
            KeyCombination::new(key, a).unwrap(),
            KeyCombination::new(key, b).unwrap()
        );
    }

    #[test]
    fn serde_preserves_combination(key in key_strategy(), modifiers in modifier_strategy()) {
        let combo = KeyCombination::new(key, modifiers).unwrap();
        let json = serde_json::to_string(&combo).unwrap();
        let back: KeyCombination = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, combo);
    }
}
