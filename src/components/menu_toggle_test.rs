use super::*;
use crate::dom::memory::{MemoryPage, NodeId};

struct Fixture {
    page: MemoryPage,
    trigger: NodeId,
    panel: NodeId,
    link: NodeId,
    outside: NodeId,
    menu: Rc<MenuToggle<MemoryPage>>,
}

fn fixture(panel_class: &str) -> Fixture {
    let page = MemoryPage::new();
    let nav = page.append(page.body(), "nav", &[]);
    let trigger = page.append(nav, "button", &[("class", "menu-trigger")]);
    page.append(trigger, "span", &[("class", "dots")]);
    let panel = page.append(nav, "ul", &[("class", panel_class), ("aria-hidden", "true")]);
    let link = page.append(panel, "a", &[("href", "#about")]);
    let outside = page.append(page.body(), "main", &[]);
    let menu = MenuToggle::install(&page, &MenuConfig::default()).unwrap();
    Fixture { page, trigger, panel, link, outside, menu }
}

fn shown(f: &Fixture) -> bool {
    f.page.has_class(&f.panel, "show")
}

fn aria_hidden(f: &Fixture) -> Option<String> {
    f.page.attribute(&f.panel, "aria-hidden")
}

#[test]
fn trigger_click_toggles_class_and_aria_inversely() {
    let f = fixture("menu-links");
    f.page.click(f.trigger);
    assert!(shown(&f));
    assert_eq!(aria_hidden(&f).as_deref(), Some("false"));
    assert_eq!(f.menu.state(), Disclosure::Open);

    f.page.click(f.trigger);
    assert!(!shown(&f));
    assert_eq!(aria_hidden(&f).as_deref(), Some("true"));
    assert_eq!(f.menu.state(), Disclosure::Closed);
}

#[test]
fn click_on_trigger_child_counts_as_trigger() {
    let f = fixture("menu-links");
    let dots = f.page.query(".dots").unwrap();
    f.page.click(dots);
    assert!(shown(&f));
}

#[test]
fn outside_click_closes_open_menu() {
    let f = fixture("menu-links");
    f.page.click(f.trigger);
    f.page.click(f.outside);
    assert!(!shown(&f));
    assert_eq!(aria_hidden(&f).as_deref(), Some("true"));
    assert_eq!(f.menu.state(), Disclosure::Closed);
}

#[test]
fn click_inside_panel_keeps_menu_open() {
    let f = fixture("menu-links");
    f.page.click(f.trigger);
    f.page.click(f.link);
    assert!(shown(&f));
}

#[test]
fn outside_click_while_closed_is_noop() {
    let f = fixture("menu-links");
    f.page.remove_attribute(&f.panel, "aria-hidden").unwrap();
    f.page.click(f.outside);
    assert_eq!(aria_hidden(&f), None);
    assert!(!f.menu.close());
}

#[test]
fn initial_state_follows_show_class() {
    let f = fixture("menu-links show");
    assert_eq!(f.menu.state(), Disclosure::Open);
    f.page.click(f.trigger);
    assert!(!shown(&f));
    assert!(f.page.has_class(&f.panel, "menu-links"));
}

#[test]
fn install_fails_without_panel() {
    let page = MemoryPage::new();
    page.append(page.body(), "button", &[("class", "menu-trigger")]);
    let err = MenuToggle::install(&page, &MenuConfig::default()).err().unwrap();
    assert_eq!(err.to_string(), "missing element: .menu-links");
    assert_eq!(page.listener_count(), 0);
}
