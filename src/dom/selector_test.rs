use super::*;

fn attrs<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<&'a str> {
    move |name| pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
}

#[test]
fn parses_supported_forms() {
    assert_eq!(Selector::parse("#contactForm"), Some(Selector::Id("contactForm".to_owned())));
    assert_eq!(Selector::parse(".menu-links"), Some(Selector::Class("menu-links".to_owned())));
    assert_eq!(Selector::parse("p"), Some(Selector::Tag("p".to_owned())));
    assert_eq!(
        Selector::parse(r#"[data-testid="test-user-time"]"#),
        Some(Selector::Attr { name: "data-testid".to_owned(), value: Some("test-user-time".to_owned()) })
    );
    assert_eq!(
        Selector::parse("[hidden]"),
        Some(Selector::Attr { name: "hidden".to_owned(), value: None })
    );
}

#[test]
fn rejects_compound_and_empty_selectors() {
    assert_eq!(Selector::parse(""), None);
    assert_eq!(Selector::parse("#"), None);
    assert_eq!(Selector::parse(".upload-wrap .upload-trigger"), None);
    assert_eq!(Selector::parse("div > p"), None);
    assert_eq!(Selector::parse("[=x]"), None);
}

#[test]
fn class_matches_any_token_in_list() {
    let sel = Selector::parse(".show").unwrap();
    assert!(sel.matches("div", attrs(&[("class", "menu-links show")])));
    assert!(!sel.matches("div", attrs(&[("class", "menu-links shown")])));
    assert!(!sel.matches("div", attrs(&[])));
}

#[test]
fn attribute_value_must_match_exactly() {
    let sel = Selector::parse("[data-testid='test-user-avatar']").unwrap();
    assert!(sel.matches("img", attrs(&[("data-testid", "test-user-avatar")])));
    assert!(!sel.matches("img", attrs(&[("data-testid", "test-user-time")])));
}

#[test]
fn tag_matches_case_insensitively() {
    let sel = Selector::parse("FORM").unwrap();
    assert!(sel.matches("form", attrs(&[])));
    assert!(!sel.matches("input", attrs(&[])));
}
