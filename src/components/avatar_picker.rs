//! Avatar upload popover: swap the profile image for a URL or a local file,
//! or put the original back.
//!
//! DESIGN
//! ======
//! Open/closed lives in a [`Disclosure`] mirrored onto `aria-hidden` of the
//! popover and `aria-expanded` of the trigger. The image and the object URL
//! behind a local file are owned by [`AvatarState`]; this widget only moves
//! its `src` and `alt` onto the page.

#[cfg(test)]
#[path = "avatar_picker_test.rs"]
mod avatar_picker_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::AvatarConfig;
use crate::dom::{DomEvent, EventKind, Page, Target, report, require};
use crate::error::Result;
use crate::state::avatar::{AvatarState, DEFAULT_ALT, UPLOADED_ALT};
use crate::state::disclosure::Disclosure;
use crate::timer::Timers;

struct Avatar<N> {
    image: N,
    state: RefCell<AvatarState>,
}

pub struct AvatarPicker<P: Page, T: Timers> {
    page: P,
    timers: T,
    trigger: P::Node,
    popover: P::Node,
    url_input: Option<P::Node>,
    file_input: Option<P::Node>,
    avatar: Option<Avatar<P::Node>>,
    focus_delay_ms: u32,
    state: Cell<Disclosure>,
}

impl<P: Page, T: Timers> AvatarPicker<P, T> {
    /// Resolve the popover and its controls and attach listeners.
    ///
    /// Fails when the trigger or popover is missing. Without the avatar image
    /// the popover still opens and closes, but apply and reset are not wired.
    pub fn install(page: &P, timers: &T, config: &AvatarConfig) -> Result<Rc<Self>> {
        let wrap = require(page.query(&config.wrap_selector), &config.wrap_selector)?;
        let trigger = require(page.query_in(&wrap, &config.trigger_selector), &config.trigger_selector)?;
        let popover = require(page.by_id(&config.popover_id), &format!("#{}", config.popover_id))?;

        let close = page.query_in(&popover, &config.close_selector);
        let apply = page.query_in(&popover, &config.apply_selector);
        let reset = page.query_in(&popover, &config.reset_selector);
        let url_input = page.query_in(&popover, &config.url_input_selector);
        let file_input = config.file_input_selectors.iter().find_map(|s| page.query_in(&popover, s));

        let avatar = page.query(&config.image_selector).map(|image| {
            let original = page.attribute(&image, "src").unwrap_or_default();
            Avatar { image, state: RefCell::new(AvatarState::new(original)) }
        });
        if avatar.is_none() {
            log::info!("avatar: no {} on page, apply/reset disabled", config.image_selector);
        }
        let state = Disclosure::from_open(page.attribute(&trigger, "aria-expanded").as_deref() == Some("true"));

        let has_avatar = avatar.is_some();
        let picker = Rc::new(Self {
            page: page.clone(),
            timers: timers.clone(),
            trigger: trigger.clone(),
            popover,
            url_input,
            file_input,
            avatar,
            focus_delay_ms: config.focus_delay_ms,
            state: Cell::new(state),
        });

        let this = Rc::clone(&picker);
        page.listen(Target::Node(trigger), EventKind::Click, Rc::new(move |_: &DomEvent<P::Node>| this.toggle()));
        if let Some(close) = close {
            let this = Rc::clone(&picker);
            page.listen(
                Target::Node(close),
                EventKind::Click,
                Rc::new(move |_: &DomEvent<P::Node>| {
                    this.close();
                }),
            );
        }
        let this = Rc::clone(&picker);
        page.listen(
            Target::Document,
            EventKind::Click,
            Rc::new(move |ev: &DomEvent<P::Node>| this.on_document_click(ev.target.as_ref())),
        );
        let this = Rc::clone(&picker);
        page.listen(
            Target::Document,
            EventKind::KeyDown,
            Rc::new(move |ev: &DomEvent<P::Node>| {
                if ev.key.as_deref() == Some("Escape") {
                    this.close();
                }
            }),
        );
        if has_avatar {
            if let Some(apply) = apply {
                let this = Rc::clone(&picker);
                page.listen(Target::Node(apply), EventKind::Click, Rc::new(move |_: &DomEvent<P::Node>| this.apply()));
            }
            if let Some(reset) = reset {
                let this = Rc::clone(&picker);
                page.listen(Target::Node(reset), EventKind::Click, Rc::new(move |_: &DomEvent<P::Node>| this.reset()));
            }
        }
        Ok(picker)
    }

    #[must_use]
    pub fn state(&self) -> Disclosure {
        self.state.get()
    }

    /// The `src` the avatar currently carries, if there is an avatar.
    #[must_use]
    pub fn current_src(&self) -> Option<String> {
        self.avatar.as_ref().map(|a| a.state.borrow().src().to_owned())
    }

    pub fn toggle(self: &Rc<Self>) {
        if self.state.get().is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Show the popover and focus the URL field shortly after.
    ///
    /// Returns `false` if it was already open.
    pub fn open(self: &Rc<Self>) -> bool {
        let mut state = self.state.get();
        if !state.open() {
            return false;
        }
        self.state.set(state);
        self.reflect();
        if self.url_input.is_some() {
            let this = Rc::clone(self);
            self.timers.after(
                self.focus_delay_ms,
                Box::new(move || {
                    if let Some(input) = &this.url_input {
                        report(this.page.focus(input), "avatar: focus url field");
                    }
                }),
            );
        }
        true
    }

    /// Hide the popover and hand focus back to the trigger shortly after.
    ///
    /// Returns `false` if it was already closed.
    pub fn close(&self) -> bool {
        let mut state = self.state.get();
        if !state.close() {
            return false;
        }
        self.state.set(state);
        self.reflect();
        let page = self.page.clone();
        let trigger = self.trigger.clone();
        self.timers.after(
            self.focus_delay_ms,
            Box::new(move || report(page.focus(&trigger), "avatar: focus trigger")),
        );
        true
    }

    /// Close when the click landed outside both trigger and popover.
    pub fn on_document_click(&self, target: Option<&P::Node>) {
        if !self.state.get().is_open() {
            return;
        }
        let inside =
            target.is_some_and(|t| self.page.contains(&self.trigger, t) || self.page.contains(&self.popover, t));
        if !inside {
            self.close();
        }
    }

    /// Show the URL if one was typed, otherwise the selected file.
    ///
    /// With neither, nothing changes and the popover stays open.
    pub fn apply(&self) {
        let Some(avatar) = &self.avatar else {
            return;
        };
        let url = self.url_input.as_ref().map(|input| self.page.value(input).trim().to_owned()).unwrap_or_default();
        if !url.is_empty() {
            avatar.state.borrow_mut().set_remote(url);
            self.show(avatar, DEFAULT_ALT);
            log::debug!("avatar: applied remote url");
            self.close();
            return;
        }

        let Some(file) = self.file_input.as_ref().and_then(|input| self.page.selected_file(input)) else {
            return;
        };
        let result = avatar.state.borrow_mut().set_local(|| self.page.mint_object_url(&file));
        match result {
            Ok(()) => {
                let name = self.page.file_name(&file);
                self.show(avatar, if name.is_empty() { UPLOADED_ALT } else { name.as_str() });
                log::debug!("avatar: applied local file");
                self.close();
            }
            Err(err) => {
                log::warn!("avatar: cannot preview selected file: {err}");
                self.show(avatar, DEFAULT_ALT);
            }
        }
    }

    /// Put the original image back and clear both inputs.
    pub fn reset(&self) {
        let Some(avatar) = &self.avatar else {
            return;
        };
        avatar.state.borrow_mut().reset();
        self.show(avatar, DEFAULT_ALT);
        for input in self.url_input.iter().chain(self.file_input.iter()) {
            self.page.set_value(input, "");
        }
        self.close();
    }

    fn show(&self, avatar: &Avatar<P::Node>, alt: &str) {
        let src = avatar.state.borrow().src().to_owned();
        report(self.page.set_attribute(&avatar.image, "src", &src), "avatar: set src");
        report(self.page.set_attribute(&avatar.image, "alt", alt), "avatar: set alt");
    }

    fn reflect(&self) {
        let open = self.state.get().is_open();
        report(
            self.page.set_attribute(&self.popover, "aria-hidden", if open { "false" } else { "true" }),
            "avatar: update aria-hidden",
        );
        report(
            self.page.set_attribute(&self.trigger, "aria-expanded", if open { "true" } else { "false" }),
            "avatar: update aria-expanded",
        );
    }
}
