//! [`Page`] over the live document via `web-sys`.
//!
//! Listener closures are leaked with `forget`: widgets are installed once and
//! live until the page unloads.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document, Element, Event, EventTarget, File, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, KeyboardEvent, Url,
};

use super::{DomEvent, EventKind, Listener, ObjectUrl, Page, Target};
use crate::error::{Error, Result};

#[derive(Clone, Debug)]
pub struct BrowserPage {
    document: Document,
}

impl BrowserPage {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| Error::Dom("no window.document".to_owned()))?;
        Ok(Self { document })
    }

    fn html(node: &Element) -> Result<&HtmlElement> {
        node.dyn_ref::<HtmlElement>().ok_or_else(|| Error::Dom(format!("<{}> is not an HTML element", node.tag_name())))
    }
}

fn dom_error(err: wasm_bindgen::JsValue) -> Error {
    Error::Dom(format!("{err:?}"))
}

fn first(found: std::result::Result<Option<Element>, wasm_bindgen::JsValue>, selector: &str) -> Option<Element> {
    match found {
        Ok(node) => node,
        Err(err) => {
            log::warn!("invalid selector {selector:?}: {err:?}");
            None
        }
    }
}

impl Page for BrowserPage {
    type Node = Element;
    type File = File;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        first(self.document.query_selector(selector), selector)
    }

    fn query_in(&self, root: &Element, selector: &str) -> Option<Element> {
        first(root.query_selector(selector), selector)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<()> {
        node.set_attribute(name, value).map_err(dom_error)
    }

    fn remove_attribute(&self, node: &Element, name: &str) -> Result<()> {
        node.remove_attribute(name).map_err(dom_error)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) -> Result<()> {
        node.class_list().add_1(class).map_err(dom_error)
    }

    fn remove_class(&self, node: &Element, class: &str) -> Result<()> {
        node.class_list().remove_1(class).map_err(dom_error)
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) -> Result<()> {
        Self::html(node)?.style().set_property(property, value).map_err(dom_error)
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn next_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn insert_after(&self, anchor: &Element, tag: &str) -> Result<Element> {
        let created = self.document.create_element(tag).map_err(dom_error)?;
        anchor.insert_adjacent_element("afterend", &created).map_err(dom_error)?;
        Ok(created)
    }

    fn focus(&self, node: &Element) -> Result<()> {
        Self::html(node)?.focus().map_err(dom_error)
    }

    fn reset_form(&self, form: &Element) -> Result<()> {
        let form = form.dyn_ref::<HtmlFormElement>().ok_or_else(|| Error::Dom("not a <form>".to_owned()))?;
        form.reset();
        Ok(())
    }

    fn is_hidden(&self) -> bool {
        self.document.hidden()
    }

    fn selected_file(&self, input: &Element) -> Option<File> {
        input.dyn_ref::<HtmlInputElement>()?.files()?.get(0)
    }

    fn file_name(&self, file: &File) -> String {
        file.name()
    }

    fn mint_object_url(&self, file: &File) -> Result<ObjectUrl> {
        let url = Url::create_object_url_with_blob(file).map_err(dom_error)?;
        Ok(ObjectUrl::new(url, |url| {
            if let Err(err) = Url::revoke_object_url(url) {
                log::warn!("revoke {url}: {err:?}");
            }
        }))
    }

    fn listen(&self, target: Target<Element>, kind: EventKind, listener: Listener<Element>) {
        let handler = Closure::<dyn Fn(Event)>::new(move |event: Event| {
            let target = event.target().and_then(|t| t.dyn_ref::<Element>().cloned());
            let key = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key);
            let ev = DomEvent::new(kind, target, key);
            listener(&ev);
            if ev.default_prevented() {
                event.prevent_default();
            }
        });
        let host: &EventTarget = match &target {
            Target::Node(node) => node.as_ref(),
            Target::Document => self.document.as_ref(),
        };
        if let Err(err) = host.add_event_listener_with_callback(kind.name(), handler.as_ref().unchecked_ref()) {
            log::warn!("cannot listen for {}: {err:?}", kind.name());
            return;
        }
        handler.forget();
    }

    fn when_ready(&self, f: Box<dyn FnOnce()>) {
        if self.document.ready_state() != "loading" {
            f();
            return;
        }
        let once = Closure::once_into_js(move || f());
        if let Err(err) = self.document.add_event_listener_with_callback("DOMContentLoaded", once.unchecked_ref()) {
            log::error!("cannot wait for DOMContentLoaded: {err:?}");
        }
    }
}
