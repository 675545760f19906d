use std::cell::RefCell;
use std::rc::Rc;

use super::*;

#[test]
fn object_url_releases_exactly_once_on_drop() {
    let released = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&released);
    let url = ObjectUrl::new("blob:one", move |u| sink.borrow_mut().push(u.to_owned()));
    assert_eq!(url.as_str(), "blob:one");
    assert!(released.borrow().is_empty());
    drop(url);
    assert_eq!(*released.borrow(), vec!["blob:one".to_owned()]);
}

#[test]
fn dom_event_tracks_prevent_default() {
    let ev: DomEvent<u8> = DomEvent::new(EventKind::Submit, Some(1), None);
    assert!(!ev.default_prevented());
    ev.prevent_default();
    assert!(ev.default_prevented());
}

#[test]
fn blur_and_visibility_do_not_bubble() {
    assert!(!EventKind::Blur.bubbles());
    assert!(!EventKind::VisibilityChange.bubbles());
    assert!(EventKind::Click.bubbles());
    assert!(EventKind::Submit.bubbles());
}

#[test]
fn event_names_match_dom() {
    assert_eq!(EventKind::KeyDown.name(), "keydown");
    assert_eq!(EventKind::VisibilityChange.name(), "visibilitychange");
}

#[test]
fn require_maps_none_to_missing_element() {
    let err = require::<u8>(None, "#contactForm").unwrap_err();
    assert_eq!(err.to_string(), "missing element: #contactForm");
    assert_eq!(require(Some(3), "x").unwrap(), 3);
}
