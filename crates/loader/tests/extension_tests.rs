//! Consumer-side extension of the loader registry.
//!
//! Verifies that custom formats plug in through `register` alone, that the
//! newest registration wins ties, and that a registry without a matching
//! loader fails deterministically.

use std::io::Read;
use std::sync::Arc;

use propload::{
    Dispatcher, Loader, LoaderRegistry, Locator, ParseError, PropertyMap, XmlLoader,
};

/// One entry per line, keyed by position: `<stem>.0`, `<stem>.1`, ...
struct LineListLoader;

impl Loader for LineListLoader {
    fn name(&self) -> &str {
        "line-list"
    }

    fn accept(&self, locator: &Locator) -> bool {
        locator.extension() == Some("list")
    }

    fn load(&self, map: &mut PropertyMap, stream: &mut dyn Read) -> Result<(), ParseError> {
        let mut text = String::new();
        stream.read_to_string(&mut text)?;
        for (idx, line) in text.lines().filter(|l| !l.trim().is_empty()).enumerate() {
            map.insert(format!("entry.{idx}"), line.trim());
        }
        Ok(())
    }
}

#[test]
fn test_custom_format_plugs_in_without_registry_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hosts.list");
    std::fs::write(&path, "alpha\nbeta\n\ngamma\n").unwrap();

    let dispatcher = Dispatcher::new();
    dispatcher.registry().register(LineListLoader);

    let mut map = PropertyMap::new();
    let found = dispatcher
        .load_into(&mut map, &Locator::from_path(&path).unwrap())
        .unwrap();

    assert!(found);
    assert_eq!(map.get("entry.0"), Some("alpha"));
    assert_eq!(map.get("entry.1"), Some("beta"));
    assert_eq!(map.get("entry.2"), Some("gamma"));
}

#[test]
fn test_custom_loader_shadows_builtin_for_same_locator() {
    struct ClaimEverything;

    impl Loader for ClaimEverything {
        fn name(&self) -> &str {
            "claim-everything"
        }

        fn accept(&self, _locator: &Locator) -> bool {
            true
        }

        fn load(&self, map: &mut PropertyMap, _stream: &mut dyn Read) -> Result<(), ParseError> {
            map.insert("claimed", "true");
            Ok(())
        }
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.xml");
    std::fs::write(&path, "<a><b>1</b></a>").unwrap();

    let dispatcher = Dispatcher::new();
    dispatcher.registry().register(ClaimEverything);

    let mut map = PropertyMap::new();
    dispatcher
        .load_into(&mut map, &Locator::from_path(&path).unwrap())
        .unwrap();

    assert_eq!(map.get("claimed"), Some("true"));
    assert!(!map.contains_key("a.b"));
}

#[test]
fn test_registry_without_fallback_rejects_unknown_formats() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.properties");
    std::fs::write(&path, "key=value\n").unwrap();

    // Only the markup loader: no loader claims .properties locators.
    let registry = Arc::new(LoaderRegistry::empty());
    registry.register(XmlLoader::new());
    let dispatcher = Dispatcher::with_registry(registry);

    let mut map = PropertyMap::new();
    let result = dispatcher.load_into(&mut map, &Locator::from_path(&path).unwrap());

    assert!(matches!(
        result,
        Err(propload::Error::UnsupportedResource { .. })
    ));
    assert!(map.is_empty());
}
