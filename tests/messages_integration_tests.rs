use deepmsg::{Error, Loader, Messages, Node, Options, recursion_marker};
use indoc::indoc;
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn write_catalog() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(
        dir.path().join("en_US.hjson"),
        indoc! {r#"
            {
                # Greeting shown on /start
                welcome: Hello, ${user.name}!
                menu: {
                    title: Menu
                    items: ["Tea", "Coffee", "Juice"]
                }
                greetings: ["Hi", "Hello", "Hey", "Howdy"]
                single: ["only"]
                status: ["Balance:", 42, "credits"]
                mixed: ["a", {"x": 1}, "b"]
                order: You ordered ${item}
                drinks: {
                    tea: a cup of tea for ${price}
                }
                loop: ${self}
            }
        "#},
    )
    .expect("write en_US");
    fs::write(
        dir.path().join("ru_RU.json"),
        r#"{"welcome": "Привет, ${user.name}!", "menu": {"title": "Меню"}}"#,
    )
    .expect("write ru_RU");
    fs::write(
        dir.path().join("de_DE.yaml"),
        "welcome: Hallo, ${user.name}!\nmenu:\n  title: Speisekarte\n",
    )
    .expect("write de_DE");
    fs::write(dir.path().join("README.md"), "# not a catalog").expect("write readme");
    dir
}

#[test]
fn test_missing_directory_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let err = Messages::new(&missing, None).unwrap_err();
    assert!(matches!(err, Error::DirectoryNotFound(_)));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_loads_every_format_as_a_locale() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    let locales: Vec<_> = messages.store().locales().collect();
    assert_eq!(locales, vec!["de_DE", "en_US", "ru_RU"]);
    assert_eq!(messages.default_locale(), "en_US");
}

#[test]
fn test_placeholder_from_data() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    let data = Node::from(json!({"user": {"name": "Ann"}}));
    assert_eq!(messages.message_with("welcome", &data).unwrap(), "Hello, Ann!");
    assert_eq!(
        messages.get_message("welcome", &data, Some("ru_RU")).unwrap(),
        "Привет, Ann!"
    );
    assert_eq!(
        messages.get_message("welcome", &data, Some("de_DE")).unwrap(),
        "Hallo, Ann!"
    );
}

#[test]
fn test_constructor_locale_sets_default() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), Some("ru_RU")).unwrap();
    assert_eq!(messages.message("menu.title").unwrap(), "Меню");
}

#[test]
fn test_unknown_locale_matches_default() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    assert_eq!(
        messages.message_in("menu.title", "fr_FR").unwrap(),
        messages.message_in("menu.title", "en_US").unwrap()
    );
}

#[test]
fn test_absent_default_falls_back_to_first_locale() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), Some("it_IT")).unwrap();
    assert_eq!(messages.message_in("menu.title", "fr_FR").unwrap(), "Speisekarte");
}

#[test]
fn test_runtime_locale_override() {
    let dir = write_catalog();
    let mut messages = Messages::new(dir.path(), None).unwrap();
    assert_eq!(messages.message("menu.title").unwrap(), "Menu");
    messages.set_default_locale("de_DE");
    assert_eq!(messages.message("menu.title").unwrap(), "Speisekarte");
    assert_eq!(messages.message_in("menu.title", "en_US").unwrap(), "Menu");
}

#[test]
fn test_sequence_collapse() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    assert_eq!(messages.message("status").unwrap(), "Balance: 42 credits");
    assert_eq!(messages.message("mixed").unwrap(), "a b");
    assert_eq!(messages.message("menu.items").unwrap(), "Tea Coffee Juice");
    assert_eq!(messages.message("menu.items.1").unwrap(), "Coffee");
}

#[test]
fn test_nested_substitution_through_catalog() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    let data = Node::from(json!({"item": "${drinks.tea}", "price": "2 EUR"}));
    assert_eq!(
        messages.message_with("order", &data).unwrap(),
        "You ordered a cup of tea for 2 EUR"
    );
}

#[test]
fn test_self_reference_is_marked() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    let data = Node::from(json!({"self": "again ${loop}"}));
    let text = messages.message_with("loop", &data).unwrap();
    assert_eq!(text, format!("again {}", recursion_marker("loop")));
}

#[test]
fn test_resolution_is_idempotent() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    let data = Node::from(json!({"item": "${drinks.tea}", "price": "1"}));
    let first = messages.message_with("order", &data).unwrap();
    let second = messages.message_with("order", &data).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_wildcard_covers_every_element() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let empty = Node::empty();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..2000 {
        let text = messages
            .get_message_with_rng("greetings.*", &empty, None, &mut rng)
            .unwrap();
        *counts.entry(text).or_default() += 1;
    }
    assert_eq!(counts.len(), 4);
    for greeting in ["Hi", "Hello", "Hey", "Howdy"] {
        let seen = counts[greeting];
        assert!(seen > 350 && seen < 650, "{greeting} picked {seen} times");
    }
}

#[test]
fn test_wildcard_single_element_is_stable() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    for _ in 0..50 {
        assert_eq!(messages.message("single.*").unwrap(), "only");
    }
}

#[test]
fn test_wildcard_over_mapping_values() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    let picked = messages.message("menu.*").unwrap();
    assert!(picked == "Menu" || picked == "Tea Coffee Juice", "got {picked}");
}

#[test]
fn test_shared_loader_reuses_parsed_trees() {
    let dir = write_catalog();
    let mut loader = Loader::new();
    let first = Messages::from_loader(&mut loader, dir.path(), Options::new()).unwrap();
    let second = Messages::from_loader(
        &mut loader,
        dir.path(),
        Options::new().with_default_locale("ru_RU"),
    )
    .unwrap();
    assert_eq!(loader.cached_len(), 3);
    for locale in ["en_US", "ru_RU", "de_DE"] {
        let a = first.store().get(locale).unwrap();
        let b = second.store().get(locale).unwrap();
        assert!(Arc::ptr_eq(a, b), "{locale} parsed twice");
    }
    assert_eq!(second.message("menu.title").unwrap(), "Меню");
}

#[test]
fn test_strict_mode_reports_missing_keys() {
    let dir = write_catalog();
    let mut loader = Loader::new();
    let messages =
        Messages::from_loader(&mut loader, dir.path(), Options::new().with_strict(true)).unwrap();
    assert!(matches!(
        messages.message("order"),
        Err(Error::Unresolved { key }) if key == "item"
    ));
    assert!(matches!(
        messages.message("menu.nope"),
        Err(Error::Unresolved { .. })
    ));
}

#[test]
fn test_missing_parent_in_data_is_type_mismatch() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    assert!(matches!(
        messages.message("welcome"),
        Err(Error::TypeMismatch { key, .. }) if key == "user.name"
    ));
    assert!(matches!(
        messages.message("drinks.coffee.hot"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_later_file_with_same_stem_wins() {
    let dir = write_catalog();
    fs::write(
        dir.path().join("en_US.json"),
        r#"{"menu": {"title": "Card"}}"#,
    )
    .expect("write en_US.json");
    let messages = Messages::new(dir.path(), None).unwrap();
    let locales: Vec<_> = messages.store().locales().collect();
    assert_eq!(locales, vec!["de_DE", "en_US", "ru_RU"]);
    assert_eq!(messages.message("menu.title").unwrap(), "Card");
}

#[test]
fn test_lookup_through_text_is_type_mismatch() {
    let dir = write_catalog();
    let messages = Messages::new(dir.path(), None).unwrap();
    assert!(matches!(
        messages.message("menu.title.first"),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_messages_is_shareable_across_threads() {
    let dir = write_catalog();
    let messages = Arc::new(Messages::new(dir.path(), None).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let messages = Arc::clone(&messages);
            std::thread::spawn(move || {
                let data = Node::from(json!({"user": {"name": format!("user{i}")}}));
                messages.message_with("welcome", &data).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("Hello, user{i}!"));
    }
}
