use super::*;
use indexmap::IndexMap;

fn text(s: &str) -> AttributeValue {
    AttributeValue::Text(s.to_string())
}

#[test]
fn test_make_from_string() {
    let attrs = AttributeMap::make(r#"id="app" disabled data-x="1""#);
    assert_eq!(attrs.get_text("id"), Some("app"));
    assert_eq!(attrs.get("data-x"), Some(&text("1")));
    // Bare tokens are read as flags
    assert!(attrs.has("disabled"));
    assert_eq!(attrs.get("disabled"), Some(&AttributeValue::Flag(true)));
    assert_eq!(attrs.to_string(), r#"id="app" disabled data-x="1""#);

    assert_eq!(
        AttributeMap::try_from_str(r#"id="app" disabled data-x="1""#),
        Err(AttributeError::MalformedToken {
            token: "disabled".to_string(),
            index: 1,
        })
    );
    assert_eq!(
        AttributeMap::try_from_str(r#"id="app" data-x="1""#),
        Ok(AttributeMap::make([("id", "app"), ("data-x", "1")]))
    );
}

#[test]
fn test_construct_sources() {
    let target = attributes!(class => "btn", disabled);

    let mapping = IndexMap::from([
        ("class".to_string(), text("btn")),
        ("disabled".to_string(), AttributeValue::Flag(true)),
    ]);
    assert_eq!(AttributeMap::construct(mapping), target);
    assert_eq!(AttributeMap::construct(r#"class="btn" disabled"#), target);
    assert_eq!(AttributeMap::construct(&target), target);
    assert_eq!(
        AttributeMap::construct(vec![("class", text("btn")), ("disabled", AttributeValue::Flag(true))]),
        target
    );
    assert_eq!(AttributeMap::construct([("class", "btn")]).len(), 1);

    assert!(AttributeMap::construct(()).is_empty());
    assert!(AttributeMap::construct(None::<&str>).is_empty());
    assert!(AttributeMap::construct(AttributeSource::Empty).is_empty());
    assert_eq!(AttributeMap::construct(Some("a=1")).get_text("a"), Some("1"));
}

#[test]
fn test_construct_copies_instance() {
    let mut original = attributes!(class => "btn");
    let copy = AttributeMap::make(&original);
    original.set("class", "link").set("id", "main");
    assert_eq!(copy, attributes!(class => "btn"));
    assert_eq!(original.len(), 2);
}

#[test]
fn test_normalize() {
    assert!(AttributeMap::normalize(()).is_empty());
    assert_eq!(
        AttributeMap::normalize("a=1 b"),
        IndexMap::from([("a".to_string(), text("1")), ("b".to_string(), AttributeValue::Flag(true))])
    );
    let map = attributes!(a => "1");
    assert_eq!(AttributeMap::normalize(&map), map.to_map());
}

#[test]
fn test_order_preserved() {
    let mut attrs = AttributeMap::new();
    attrs.set("a", "1").set("b", "2").set("c", "3").set("b", "changed");
    let names: Vec<&str> = attrs.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(attrs.get_text("b"), Some("changed"));

    attrs.delete("a");
    let names: Vec<&str> = attrs.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b", "c"]);
}

#[test]
fn test_equality_is_ordered() {
    assert_ne!(attributes!(a => "1", b => "2"), attributes!(b => "2", a => "1"));
    assert_eq!(attributes!(a => "1", b => "2"), AttributeMap::make("a=1 b=2"));
}

#[test]
fn test_set_trims_and_coerces() {
    let mut attrs = AttributeMap::new();
    attrs.set("class", "  btn  ").set("tabindex", 3).set("ratio", 0.5).set("hidden", false);
    assert_eq!(attrs.get("class"), Some(&text("btn")));
    assert_eq!(attrs.get("tabindex"), Some(&text("3")));
    assert_eq!(attrs.get("ratio"), Some(&text("0.5")));
    assert_eq!(attrs.get("hidden"), Some(&AttributeValue::Flag(false)));
}

#[test]
fn test_set_is_idempotent() {
    let mut attrs = attributes!(class => "btn primary", disabled);
    let before = attrs.clone();
    let value = attrs.get("class").cloned().unwrap();
    attrs.set("class", value);
    assert_eq!(attrs, before);
}

#[test]
fn test_flags() {
    let mut attrs = AttributeMap::new();
    attrs.set_flag("disabled");
    assert_eq!(attrs.serialize(), "disabled");
    attrs.set("disabled", false);
    assert_eq!(attrs.serialize(), "");
    assert!(attrs.has("disabled"));
    assert_eq!(attrs.count(), 1);
}

#[test]
fn test_get_or() {
    let attrs = attributes!(id => "app");
    let fallback = text("none");
    assert_eq!(attrs.get_or("id", &fallback), &text("app"));
    assert_eq!(attrs.get_or("missing", &fallback), &fallback);
    assert_eq!(attrs.get("missing"), None);
}

#[test]
fn test_get_as_array() {
    let attrs = attributes!(class => "btn primary", rel => "a,b,c", disabled);
    assert_eq!(attrs.get_as_array("class"), vec!["btn", "primary"]);
    assert_eq!(attrs.get_as_array_with("rel", ","), vec!["a", "b", "c"]);
    assert!(attrs.get_as_array("missing").is_empty());
    assert!(attrs.get_as_array("disabled").is_empty());
}

#[test]
fn test_has_value() {
    let attrs = attributes!(id => "1", disabled, hidden => false);
    assert!(attrs.has_value("id", "1"));
    assert!(attrs.has_value("id", "1".to_string()));
    assert!(attrs.has_value("id", text("1")));
    assert!(!attrs.has_value("id", "01"));
    assert!(!attrs.has_value("id", " 1"));
    assert!(!attrs.has_value("id", true));
    assert!(!attrs.has_value("id", AttributeValue::Flag(true)));
    assert!(attrs.has_value("disabled", true));
    assert!(!attrs.has_value("disabled", "true"));
    assert!(attrs.has_value("hidden", false));
    assert!(!attrs.has_value("missing", false));
}

#[test]
fn test_value_kinds() {
    let attrs = attributes!(id => "1", disabled, hidden => false, tabindex => 3);
    let flags: Vec<&str> = attrs.iter().filter(|(_, v)| v.is_flag()).map(|(n, _)| n).collect();
    let texts: Vec<&str> = attrs.iter().filter(|(_, v)| v.is_text()).map(|(n, _)| n).collect();
    assert_eq!(flags, vec!["disabled", "hidden"]);
    assert_eq!(texts, vec!["id", "tabindex"]);
    assert_eq!(attrs.get("disabled").and_then(AttributeValue::as_text), None);
    assert_eq!(AttributeValue::Flag(false).to_string(), "false");
}

#[test]
fn test_contains() {
    let attrs = attributes!(class => "btn primary", disabled);
    assert!(attrs.contains("class", "prim"));
    assert!(!attrs.contains("class", "xyz"));
    assert!(attrs.contains("class", ""));
    assert!(!attrs.contains("missing", "x"));
    assert!(!attrs.contains("disabled", ""));
}

#[test]
fn test_append_prepend() {
    let mut attrs = AttributeMap::new();
    attrs.append("class", "btn").append("class", " primary");
    assert_eq!(attrs.get_text("class"), Some("btn primary"));

    attrs.prepend("class", "large ");
    assert_eq!(attrs.get_text("class"), Some("large btn primary"));

    attrs.prepend("id", "main");
    assert_eq!(attrs.get_text("id"), Some("main"));

    // A flag is replaced rather than concatenated
    attrs.set_flag("hidden").append("hidden", "until-found");
    assert_eq!(attrs.get_text("hidden"), Some("until-found"));
}

#[test]
fn test_populate_and_merge() {
    let mut attrs = attributes!(id => "app", class => "btn");
    attrs.populate(r#"class="link" href="/""#);
    assert_eq!(attrs.to_string(), r#"id="app" class="link" href="/""#);

    let mut merged = attributes!(id => "app", class => "btn");
    merged.merge(r#"class="link" href="/""#);
    assert_eq!(merged, attrs);

    merged.merge(attributes!(title => " Home ")).merge(());
    assert_eq!(merged.get_text("title"), Some("Home"));
    assert_eq!(merged.len(), 4);
}

#[test]
fn test_delete_and_clear() {
    let mut attrs = attributes!(a => "1", b => "2");
    attrs.delete("missing").delete("a");
    assert_eq!(attrs, attributes!(b => "2"));
    attrs.clear();
    assert!(attrs.is_empty());
    assert_eq!(attrs.serialize(), "");
}

#[test]
fn test_round_trip() {
    let mut attrs = AttributeMap::new();
    attrs
        .set("id", "app")
        .set("class", "btn")
        .set("data-count", 42)
        .set("href", "/a?b=c");
    let text = attrs.serialize();
    assert_eq!(text, r#"id="app" class="btn" data-count="42" href="/a?b=c""#);
    assert_eq!(AttributeMap::make(AttributeMap::parse(&text)), attrs);
    assert_eq!(text.parse::<AttributeMap>(), Ok(attrs));
}

#[test]
fn test_iteration() {
    let attrs = attributes!(a => "1", b);
    let pairs: Vec<(&str, &AttributeValue)> = attrs.iter().collect();
    assert_eq!(pairs, vec![("a", &text("1")), ("b", &AttributeValue::Flag(true))]);

    let mut count = 0;
    for (name, _) in &attrs {
        assert!(attrs.has(name));
        count += 1;
    }
    assert_eq!(count, attrs.count());

    let owned: Vec<(String, AttributeValue)> = attrs.clone().into_iter().collect();
    assert_eq!(owned[0], ("a".to_string(), text("1")));
    assert_eq!(attrs.all(), &attrs.to_map());
}

#[test]
fn test_from_iter() {
    let attrs: AttributeMap = vec![("class", " btn "), ("id", "x")].into_iter().collect();
    assert_eq!(attrs, attributes!(class => "btn", id => "x"));

    let mut extended = attrs.clone();
    extended.extend([("lang", "en")]);
    assert_eq!(extended.to_string(), r#"class="btn" id="x" lang="en""#);
    assert_eq!(AttributeMap::from("a=1"), attributes!(a => 1));
}
