//! In-memory [`Page`] used by tests and headless embedding.
//!
//! DESIGN
//! ======
//! A flat arena of elements rooted at a `<body>`, plus a listener table.
//! Dispatch walks from the target up through its ancestors to the document,
//! the same order the browser's bubbling phase uses, so widget wiring can be
//! exercised end to end without a browser. Listener callbacks are cloned out
//! of the arena before they run, so handlers are free to mutate the tree.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use super::selector::Selector;
use super::{DomEvent, EventKind, Listener, ObjectUrl, Page, Target};
use crate::error::{Error, Result};

const FORM_CONTROLS: &[&str] = &["input", "textarea", "select"];

/// Arena index of an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One step in the object-URL lifecycle, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UrlEvent {
    Minted(String),
    Revoked(String),
}

/// A file "selected" in an in-memory file input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryFile {
    pub name: String,
}

struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    value: String,
    text: String,
    file: Option<MemoryFile>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            value: String::new(),
            text: String::new(),
            file: None,
            parent,
            children: Vec::new(),
        }
    }

    fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs.get("class").map(String::as_str).unwrap_or_default().split_whitespace()
    }
}

struct Tree {
    nodes: Vec<Element>,
    listeners: Vec<(Target<NodeId>, EventKind, Listener<NodeId>)>,
    pending_ready: Vec<Box<dyn FnOnce()>>,
    loaded: bool,
    hidden: bool,
    focused: Option<NodeId>,
    minted: usize,
    mint_fails: bool,
}

impl Tree {
    fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    /// Descendants of `root` in document order, excluding `root` itself.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.get(root).map(|e| e.children.iter().rev().copied().collect()).unwrap_or_default();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(el) = self.get(id) {
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    /// `node` followed by each of its ancestors up to the root.
    fn ancestry(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.get(id).and_then(|e| e.parent);
        }
        out
    }

    fn first_match(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let Some(sel) = Selector::parse(selector) else {
            log::debug!("memory page: unsupported selector {selector:?}");
            return None;
        };
        self.descendants(root).into_iter().find(|id| {
            self.get(*id)
                .is_some_and(|el| sel.matches(&el.tag, |name| el.attrs.get(name).map(String::as_str)))
        })
    }
}

/// Shared handle to an in-memory document.
#[derive(Clone)]
pub struct MemoryPage {
    tree: Rc<RefCell<Tree>>,
    url_log: Rc<RefCell<Vec<UrlEvent>>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    const BODY: NodeId = NodeId(0);

    /// A fully parsed, visible document with an empty `<body>`.
    #[must_use]
    pub fn new() -> Self {
        let page = Self::loading();
        page.tree.borrow_mut().loaded = true;
        page
    }

    /// A document still parsing; ready callbacks wait for [`Self::finish_loading`].
    #[must_use]
    pub fn loading() -> Self {
        let tree = Tree {
            nodes: vec![Element::new("body", None)],
            listeners: Vec::new(),
            pending_ready: Vec::new(),
            loaded: false,
            hidden: false,
            focused: None,
            minted: 0,
            mint_fails: false,
        };
        Self { tree: Rc::new(RefCell::new(tree)), url_log: Rc::new(RefCell::new(Vec::new())) }
    }

    #[must_use]
    pub fn body(&self) -> NodeId {
        Self::BODY
    }

    /// Append a `tag` element under `parent` with the given attributes.
    ///
    /// A `value` attribute also seeds the control's current value, the way
    /// the browser initializes inputs from markup.
    pub fn append(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let id = NodeId(tree.nodes.len());
        let mut el = Element::new(tag, Some(parent));
        for (name, value) in attrs {
            el.attrs.insert((*name).to_owned(), (*value).to_owned());
        }
        if let Some(value) = el.attrs.get("value") {
            el.value.clone_from(value);
        }
        tree.nodes.push(el);
        if let Some(parent) = tree.get_mut(parent) {
            parent.children.push(id);
        }
        id
    }

    /// Mark the document parsed and run queued ready callbacks.
    pub fn finish_loading(&self) {
        let pending = {
            let mut tree = self.tree.borrow_mut();
            tree.loaded = true;
            std::mem::take(&mut tree.pending_ready)
        };
        for f in pending {
            f();
        }
    }

    // --- Event dispatch ---

    /// Dispatch `kind` at `target` (or the document), returning whether a
    /// handler prevented the default action.
    pub fn dispatch(&self, kind: EventKind, target: Option<NodeId>, key: Option<&str>) -> bool {
        let path: Vec<Target<NodeId>> = {
            let tree = self.tree.borrow();
            match target {
                Some(node) if kind.bubbles() => tree
                    .ancestry(node)
                    .into_iter()
                    .map(Target::Node)
                    .chain(std::iter::once(Target::Document))
                    .collect(),
                Some(node) => vec![Target::Node(node)],
                None => vec![Target::Document],
            }
        };
        let event = DomEvent::new(kind, target, key.map(str::to_owned));
        for hop in path {
            let listeners: Vec<Listener<NodeId>> = self
                .tree
                .borrow()
                .listeners
                .iter()
                .filter(|(t, k, _)| *t == hop && *k == kind)
                .map(|(_, _, l)| Rc::clone(l))
                .collect();
            for listener in listeners {
                listener(&event);
            }
        }
        event.default_prevented()
    }

    pub fn click(&self, node: NodeId) {
        self.dispatch(EventKind::Click, Some(node), None);
    }

    /// Replace the control's value and fire `input`, as typing would.
    pub fn type_into(&self, node: NodeId, value: &str) {
        self.set_value(&node, value);
        self.dispatch(EventKind::Input, Some(node), None);
    }

    pub fn blur(&self, node: NodeId) {
        self.dispatch(EventKind::Blur, Some(node), None);
    }

    /// Fire `submit` at `form`; returns whether native submission was prevented.
    pub fn submit(&self, form: NodeId) -> bool {
        self.dispatch(EventKind::Submit, Some(form), None)
    }

    /// Fire `keydown` at the focused element, or the document if none.
    pub fn press_key(&self, key: &str) {
        let focused = self.tree.borrow().focused;
        self.dispatch(EventKind::KeyDown, focused, Some(key));
    }

    /// Flip `document.hidden` and fire `visibilitychange`.
    pub fn set_hidden(&self, hidden: bool) {
        self.tree.borrow_mut().hidden = hidden;
        self.dispatch(EventKind::VisibilityChange, None, None);
    }

    /// Put a file into a file input's selection, or clear it.
    pub fn select_file(&self, input: NodeId, name: Option<&str>) {
        if let Some(el) = self.tree.borrow_mut().get_mut(input) {
            el.file = name.map(|n| MemoryFile { name: n.to_owned() });
            el.value = name.map(|n| format!("C:\\fakepath\\{n}")).unwrap_or_default();
        }
    }

    /// Make subsequent object-URL minting fail.
    pub fn set_mint_failure(&self, fails: bool) {
        self.tree.borrow_mut().mint_fails = fails;
    }

    // --- Inspection ---

    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree.borrow().get(node).and_then(|e| e.style.get(property).cloned())
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> String {
        self.tree.borrow().get(node).map(|e| e.tag.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().get(node).map(|e| e.children.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.tree.borrow().focused
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.tree.borrow().listeners.len()
    }

    /// Object URLs minted and not yet revoked.
    #[must_use]
    pub fn live_object_urls(&self) -> usize {
        let log = self.url_log.borrow();
        let revoked = log.iter().filter(|e| matches!(e, UrlEvent::Revoked(_))).count();
        log.len() - 2 * revoked
    }

    /// Every revoked object URL, in revocation order.
    #[must_use]
    pub fn revoked_urls(&self) -> Vec<String> {
        self.url_log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                UrlEvent::Revoked(url) => Some(url.clone()),
                UrlEvent::Minted(_) => None,
            })
            .collect()
    }

    /// Mint and revoke history.
    #[must_use]
    pub fn url_log(&self) -> Vec<UrlEvent> {
        self.url_log.borrow().clone()
    }
}

impl Page for MemoryPage {
    type Node = NodeId;
    type File = MemoryFile;

    fn by_id(&self, id: &str) -> Option<NodeId> {
        self.query(&format!("#{id}"))
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.tree.borrow().first_match(Self::BODY, selector)
    }

    fn query_in(&self, root: &NodeId, selector: &str) -> Option<NodeId> {
        self.tree.borrow().first_match(*root, selector)
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.tree.borrow().ancestry(*node).contains(ancestor)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().get(*node).and_then(|e| e.attrs.get(name).cloned())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let el = tree.get_mut(*node).ok_or_else(|| detached(*node))?;
        el.attrs.insert(name.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let el = tree.get_mut(*node).ok_or_else(|| detached(*node))?;
        el.attrs.remove(name);
        Ok(())
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow().get(*node).is_some_and(|e| e.classes().any(|c| c == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) -> Result<()> {
        if self.has_class(node, class) {
            return Ok(());
        }
        let current = self.attribute(node, "class").unwrap_or_default();
        let next = if current.trim().is_empty() { class.to_owned() } else { format!("{} {class}", current.trim()) };
        self.set_attribute(node, "class", &next)
    }

    fn remove_class(&self, node: &NodeId, class: &str) -> Result<()> {
        let Some(current) = self.attribute(node, "class") else {
            return Ok(());
        };
        let next = current.split_whitespace().filter(|c| *c != class).collect::<Vec<_>>().join(" ");
        self.set_attribute(node, "class", &next)
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        let el = tree.get_mut(*node).ok_or_else(|| detached(*node))?;
        el.style.insert(property.to_owned(), value.to_owned());
        Ok(())
    }

    fn value(&self, node: &NodeId) -> String {
        self.tree.borrow().get(*node).map(|e| e.value.clone()).unwrap_or_default()
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        if let Some(el) = self.tree.borrow_mut().get_mut(*node) {
            value.clone_into(&mut el.value);
            if value.is_empty() {
                el.file = None;
            }
        }
    }

    fn text(&self, node: &NodeId) -> String {
        self.tree.borrow().get(*node).map(|e| e.text.clone()).unwrap_or_default()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        if let Some(el) = self.tree.borrow_mut().get_mut(*node) {
            text.clone_into(&mut el.text);
        }
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let parent = tree.get(*node)?.parent?;
        let siblings = &tree.get(parent)?.children;
        let at = siblings.iter().position(|id| id == node)?;
        siblings.get(at + 1).copied()
    }

    fn insert_after(&self, anchor: &NodeId, tag: &str) -> Result<NodeId> {
        let mut tree = self.tree.borrow_mut();
        let parent = tree
            .get(*anchor)
            .and_then(|e| e.parent)
            .ok_or_else(|| Error::Dom(format!("{anchor:?} has no parent to insert into")))?;
        let id = NodeId(tree.nodes.len());
        tree.nodes.push(Element::new(tag, Some(parent)));
        let siblings = &mut tree.get_mut(parent).ok_or_else(|| detached(parent))?.children;
        let at = siblings.iter().position(|n| n == anchor).map_or(siblings.len(), |i| i + 1);
        siblings.insert(at, id);
        Ok(id)
    }

    fn focus(&self, node: &NodeId) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if tree.get(*node).is_none() {
            return Err(detached(*node));
        }
        tree.focused = Some(*node);
        Ok(())
    }

    fn reset_form(&self, form: &NodeId) -> Result<()> {
        let mut tree = self.tree.borrow_mut();
        if tree.get(*form).is_none() {
            return Err(detached(*form));
        }
        for id in tree.descendants(*form) {
            if let Some(el) = tree.get_mut(id) {
                if FORM_CONTROLS.contains(&el.tag.as_str()) {
                    el.value = el.attrs.get("value").cloned().unwrap_or_default();
                    el.file = None;
                }
            }
        }
        Ok(())
    }

    fn is_hidden(&self) -> bool {
        self.tree.borrow().hidden
    }

    fn selected_file(&self, input: &NodeId) -> Option<MemoryFile> {
        self.tree.borrow().get(*input).and_then(|e| e.file.clone())
    }

    fn file_name(&self, file: &MemoryFile) -> String {
        file.name.clone()
    }

    fn mint_object_url(&self, file: &MemoryFile) -> Result<ObjectUrl> {
        let mut tree = self.tree.borrow_mut();
        if tree.mint_fails {
            return Err(Error::Dom(format!("cannot create object URL for {:?}", file.name)));
        }
        tree.minted += 1;
        let url = format!("blob:memory/{}", tree.minted);
        self.url_log.borrow_mut().push(UrlEvent::Minted(url.clone()));
        let sink = Rc::clone(&self.url_log);
        Ok(ObjectUrl::new(url, move |u| sink.borrow_mut().push(UrlEvent::Revoked(u.to_owned()))))
    }

    fn listen(&self, target: Target<NodeId>, kind: EventKind, listener: Listener<NodeId>) {
        self.tree.borrow_mut().listeners.push((target, kind, listener));
    }

    fn when_ready(&self, f: Box<dyn FnOnce()>) {
        let mut tree = self.tree.borrow_mut();
        if tree.loaded {
            drop(tree);
            f();
        } else {
            tree.pending_ready.push(f);
        }
    }
}

fn detached(node: NodeId) -> Error {
    Error::Dom(format!("{node:?} is not in the document"))
}
