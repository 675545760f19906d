//! Thin adapter over the host page's DOM.
//!
//! SYSTEM CONTEXT
//! ==============
//! Widgets never touch `web_sys` directly. They talk to a [`Page`], which is
//! backed by the real document in the browser ([`browser::BrowserPage`],
//! `hydrate` only) or by an in-memory tree in tests ([`memory::MemoryPage`]).
//!
//! DESIGN
//! ======
//! Node handles are cheap clones. Mutations that the browser can reject
//! return [`Result`]; reads that can only "not find" return `Option`.
//! Listener registration is fire-and-forget: the widgets live for the page's
//! lifetime, so nothing is ever unregistered.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod memory;
pub mod selector;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};

/// DOM events the widgets subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Blur,
    Submit,
    KeyDown,
    VisibilityChange,
}

impl EventKind {
    /// The DOM event type string.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Blur => "blur",
            Self::Submit => "submit",
            Self::KeyDown => "keydown",
            Self::VisibilityChange => "visibilitychange",
        }
    }

    /// Whether the event propagates from its target up to the document.
    #[must_use]
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Blur | Self::VisibilityChange)
    }
}

/// Where a listener is attached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target<N> {
    Node(N),
    Document,
}

/// An event as seen by a widget handler.
pub struct DomEvent<N> {
    pub kind: EventKind,
    /// The element the event was dispatched at, if it was an element.
    pub target: Option<N>,
    /// `KeyboardEvent.key` for key events.
    pub key: Option<String>,
    default_prevented: Cell<bool>,
}

impl<N> DomEvent<N> {
    #[must_use]
    pub fn new(kind: EventKind, target: Option<N>, key: Option<String>) -> Self {
        Self { kind, target, key, default_prevented: Cell::new(false) }
    }

    /// Suppress the browser's default action (native form submission).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    #[must_use]
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Shared event handler.
pub type Listener<N> = Rc<dyn Fn(&DomEvent<N>)>;

/// A temporary `blob:` reference minted for a locally selected file.
///
/// Revokes itself exactly once, when dropped. Holding one of these is the
/// only way to keep an object URL alive.
pub struct ObjectUrl {
    url: String,
    release: Option<Box<dyn FnOnce(&str)>>,
}

impl ObjectUrl {
    pub fn new(url: impl Into<String>, release: impl FnOnce(&str) + 'static) -> Self {
        Self { url: url.into(), release: Some(Box::new(release)) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(&self.url);
        }
    }
}

impl fmt::Debug for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectUrl").field(&self.url).finish()
    }
}

/// Everything the widgets need from the host document.
pub trait Page: Clone + 'static {
    /// Handle to an element.
    type Node: Clone + PartialEq + fmt::Debug + 'static;
    /// A file picked through an `<input type="file">`.
    type File: 'static;

    fn by_id(&self, id: &str) -> Option<Self::Node>;
    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// First descendant of `root` matching `selector`.
    fn query_in(&self, root: &Self::Node, selector: &str) -> Option<Self::Node>;
    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<()>;
    fn remove_attribute(&self, node: &Self::Node, name: &str) -> Result<()>;
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str) -> Result<()>;
    fn remove_class(&self, node: &Self::Node, class: &str) -> Result<()>;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str) -> Result<()>;

    /// Current value of a form control; empty for anything else.
    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Next element sibling.
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Create a `tag` element and insert it directly after `anchor`.
    fn insert_after(&self, anchor: &Self::Node, tag: &str) -> Result<Self::Node>;
    fn focus(&self, node: &Self::Node) -> Result<()>;
    fn reset_form(&self, form: &Self::Node) -> Result<()>;

    /// `document.hidden`.
    fn is_hidden(&self) -> bool;

    fn selected_file(&self, input: &Self::Node) -> Option<Self::File>;
    /// File name as reported by the browser; may be empty.
    fn file_name(&self, file: &Self::File) -> String;
    fn mint_object_url(&self, file: &Self::File) -> Result<ObjectUrl>;

    fn listen(&self, target: Target<Self::Node>, kind: EventKind, listener: Listener<Self::Node>);
    /// Run `f` once the document has finished parsing (immediately if it has).
    fn when_ready(&self, f: Box<dyn FnOnce()>);
}

/// Turn a failed lookup into [`Error::MissingElement`].
pub fn require<N>(found: Option<N>, what: &str) -> Result<N> {
    found.ok_or_else(|| Error::MissingElement(what.to_owned()))
}

/// Log a failed DOM mutation and keep going.
pub fn report(result: Result<()>, context: &str) {
    if let Err(err) = result {
        log::warn!("{context}: {err}");
    }
}
