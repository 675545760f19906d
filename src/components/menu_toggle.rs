//! Three-dot navigation menu: the trigger toggles the panel, any click
//! outside both closes it.

#[cfg(test)]
#[path = "menu_toggle_test.rs"]
mod menu_toggle_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::config::MenuConfig;
use crate::dom::{DomEvent, EventKind, Page, Target, report, require};
use crate::error::Result;
use crate::state::disclosure::Disclosure;

pub struct MenuToggle<P: Page> {
    page: P,
    trigger: P::Node,
    panel: P::Node,
    shown_class: String,
    state: Cell<Disclosure>,
}

impl<P: Page> MenuToggle<P> {
    /// Resolve the trigger and panel and attach listeners.
    ///
    /// Initial state is read once from the panel's shown class.
    pub fn install(page: &P, config: &MenuConfig) -> Result<Rc<Self>> {
        let trigger = require(page.query(&config.trigger_selector), &config.trigger_selector)?;
        let panel = require(page.query(&config.panel_selector), &config.panel_selector)?;
        let state = Disclosure::from_open(page.has_class(&panel, &config.shown_class));

        let menu = Rc::new(Self {
            page: page.clone(),
            trigger: trigger.clone(),
            panel,
            shown_class: config.shown_class.clone(),
            state: Cell::new(state),
        });

        let this = Rc::clone(&menu);
        page.listen(Target::Node(trigger), EventKind::Click, Rc::new(move |_: &DomEvent<P::Node>| this.toggle()));
        let this = Rc::clone(&menu);
        page.listen(
            Target::Document,
            EventKind::Click,
            Rc::new(move |ev: &DomEvent<P::Node>| this.on_document_click(ev.target.as_ref())),
        );
        Ok(menu)
    }

    #[must_use]
    pub fn state(&self) -> Disclosure {
        self.state.get()
    }

    pub fn toggle(&self) {
        self.state.set(self.state.get().toggled());
        self.reflect();
    }

    /// Close the panel. Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        let mut state = self.state.get();
        if !state.close() {
            return false;
        }
        self.state.set(state);
        self.reflect();
        true
    }

    /// Close when the click landed outside both trigger and panel.
    pub fn on_document_click(&self, target: Option<&P::Node>) {
        let inside = target.is_some_and(|t| self.page.contains(&self.trigger, t) || self.page.contains(&self.panel, t));
        if !inside {
            self.close();
        }
    }

    fn reflect(&self) {
        let open = self.state.get().is_open();
        let class = if open {
            self.page.add_class(&self.panel, &self.shown_class)
        } else {
            self.page.remove_class(&self.panel, &self.shown_class)
        };
        report(class, "menu: update panel class");
        report(
            self.page.set_attribute(&self.panel, "aria-hidden", if open { "false" } else { "true" }),
            "menu: update aria-hidden",
        );
    }
}
