//! Property-based tests for the flat key-value parser.
//!
//! Randomly generated inputs cover edge cases the unit tests do not:
//! arbitrary byte streams must never panic the parser, and generated
//! well-formed entries must survive parsing with last-write-wins semantics.

use proptest::prelude::*;

use propload::{Loader, PropertiesLoader, PropertyMap};

/// Strategy for keys that need no escaping in the flat format.
fn plain_key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9.]{0,15}".prop_map(String::from)
}

/// Strategy for values that need no escaping in the flat format.
fn plain_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9/_.-]{0,24}".prop_map(String::from)
}

fn parse(input: &[u8]) -> Result<PropertyMap, propload::ParseError> {
    let mut map = PropertyMap::new();
    PropertiesLoader::new().load(&mut map, &mut &input[..])?;
    Ok(map)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Arbitrary bytes may be rejected but must never panic the parser.
    #[test]
    fn test_parser_never_panics(input in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = parse(&input);
    }

    /// Well-formed entries parse back exactly.
    #[test]
    fn test_plain_entries_parse_back(
        entries in proptest::collection::btree_map(plain_key_strategy(), plain_value_strategy(), 0..8)
    ) {
        let text: String = entries
            .iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect();

        let map = parse(text.as_bytes()).unwrap();

        prop_assert_eq!(map.len(), entries.len());
        for (key, value) in &entries {
            prop_assert_eq!(map.get(key), Some(value.as_str()));
        }
    }

    /// When one key appears twice, the later occurrence wins.
    #[test]
    fn test_duplicate_key_resolves_to_last(
        key in plain_key_strategy(),
        first in plain_value_strategy(),
        second in plain_value_strategy(),
    ) {
        let text = format!("{key}={first}\n{key}={second}\n");
        let map = parse(text.as_bytes()).unwrap();

        prop_assert_eq!(map.len(), 1);
        prop_assert_eq!(map.get(&key), Some(second.as_str()));
    }
}
