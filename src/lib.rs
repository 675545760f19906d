//! # folio
//!
//! WebAssembly behavior for a static portfolio page. The markup ships as
//! plain HTML; this crate finds its pieces after load and wires them up.
//!
//! | Module | Role |
//! |---|---|
//! | [`components`] | the four widgets |
//! | [`state`] | widget state and validation rules, no DOM |
//! | [`dom`] | the [`dom::Page`] adapter and its implementations |
//! | [`dialog`] | modal dialogs with an `alert` fallback |
//! | [`timer`] | intervals, delays, wall clock |
//! | [`config`] | selectors and timing, overridable from the page |
//! | [`error`] | crate error type |
//! | [`util`] | HTML escaping |
//!
//! With the `hydrate` feature the crate exports a `wasm_bindgen(start)`
//! entry point that mounts everything against the live document.

pub mod components;
pub mod config;
pub mod dialog;
pub mod dom;
pub mod error;
pub mod state;
pub mod timer;
pub mod util;

use std::cell::OnceCell;
use std::rc::Rc;

use components::avatar_picker::AvatarPicker;
use components::contact_form::ContactForm;
use components::live_clock::LiveClock;
use components::menu_toggle::MenuToggle;
use config::Config;
use dialog::Dialogs;
use dom::Page;
use timer::Timers;

/// Widgets that attached. `None` means the host markup was missing.
pub struct Mounted<P: Page, D: Dialogs, T: Timers> {
    pub contact: Option<Rc<ContactForm<P, D>>>,
    pub clock: Rc<LiveClock<P, T>>,
    pub avatar: Option<Rc<AvatarPicker<P, T>>>,
    pub menu: Option<Rc<MenuToggle<P>>>,
}

/// Install every widget against an already parsed page.
///
/// Each widget is independent: one failing to find its markup is logged and
/// the rest still install.
#[must_use]
pub fn install_all<P: Page, D: Dialogs, T: Timers>(page: &P, dialogs: &D, timers: &T, config: &Config) -> Mounted<P, D, T> {
    let contact = match ContactForm::install(page, dialogs, &config.contact) {
        Ok(contact) => Some(contact),
        Err(err) => {
            log::warn!("contact form disabled: {err}");
            None
        }
    };

    let clock = LiveClock::install(page, timers, &config.clock);
    clock.tick();
    if !page.is_hidden() {
        clock.start();
    }

    let avatar = match AvatarPicker::install(page, timers, &config.avatar) {
        Ok(avatar) => Some(avatar),
        Err(err) => {
            log::warn!("avatar picker disabled: {err}");
            None
        }
    };
    let menu = match MenuToggle::install(page, &config.menu) {
        Ok(menu) => Some(menu),
        Err(err) => {
            log::warn!("menu disabled: {err}");
            None
        }
    };

    log::info!(
        "folio mounted (contact: {}, avatar: {}, menu: {})",
        contact.is_some(),
        avatar.is_some(),
        menu.is_some()
    );
    Mounted { contact, clock, avatar, menu }
}

/// Install every widget once the document has finished parsing.
///
/// The returned cell is filled at that point; it is already filled when the
/// page was parsed on entry.
pub fn mount<P: Page, D: Dialogs, T: Timers>(
    page: &P,
    dialogs: &D,
    timers: &T,
    config: &Config,
) -> Rc<OnceCell<Mounted<P, D, T>>> {
    let slot = Rc::new(OnceCell::new());
    let fill = Rc::clone(&slot);
    let (ready, dialogs, timers, config) = (page.clone(), dialogs.clone(), timers.clone(), config.clone());
    page.when_ready(Box::new(move || {
        if fill.set(install_all(&ready, &dialogs, &timers, &config)).is_err() {
            log::warn!("folio already mounted");
        }
    }));
    slot
}

/// Browser entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("console_log init failed: {err}").into());
    }

    let page = match dom::browser::BrowserPage::new() {
        Ok(page) => page,
        Err(err) => {
            log::error!("folio not started: {err}");
            return;
        }
    };
    let ready = page.clone();
    page.when_ready(Box::new(move || {
        let config = Config::from_page(&ready);
        let dialogs = dialog::sweetalert::SweetAlert;
        let timers = timer::browser::BrowserTimers;
        mount(&ready, &dialogs, &timers, &config);
    }));
}
