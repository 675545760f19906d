//! Epoch-millisecond clock that refreshes while the page is visible.
//!
//! ARCHITECTURE
//! ============
//! The running interval is held as `Option<Interval>`; `start` is a no-op
//! while one exists and `stop` drops it. Visibility changes drive the two.
//! The display element is looked up on every tick, so a page without one
//! simply never shows anything.

#[cfg(test)]
#[path = "live_clock_test.rs"]
mod live_clock_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ClockConfig;
use crate::dom::{DomEvent, EventKind, Page, Target};
use crate::timer::Timers;

pub struct LiveClock<P: Page, T: Timers> {
    page: P,
    timers: T,
    display_selector: String,
    period_ms: u32,
    interval: RefCell<Option<T::Interval>>,
}

impl<P: Page, T: Timers> LiveClock<P, T> {
    /// Attach the visibility listener. Call [`Self::resume`] once the page is ready.
    pub fn install(page: &P, timers: &T, config: &ClockConfig) -> Rc<Self> {
        let clock = Rc::new(Self {
            page: page.clone(),
            timers: timers.clone(),
            display_selector: config.display_selector.clone(),
            period_ms: config.period_ms.max(1),
            interval: RefCell::new(None),
        });
        let this = Rc::clone(&clock);
        page.listen(
            Target::Document,
            EventKind::VisibilityChange,
            Rc::new(move |_: &DomEvent<P::Node>| this.resume()),
        );
        clock
    }

    /// Write the current time into the display element, if there is one.
    pub fn tick(&self) {
        let Some(display) = self.page.query(&self.display_selector) else {
            return;
        };
        let now = self.timers.now_ms().floor();
        self.page.set_text(&display, &format!("{now:.0}"));
    }

    /// Refresh now and start the interval if visible; stop it if hidden.
    pub fn resume(self: &Rc<Self>) {
        if self.page.is_hidden() {
            self.stop();
            return;
        }
        self.tick();
        self.start();
    }

    /// Start refreshing. Does nothing if already running.
    pub fn start(self: &Rc<Self>) {
        if self.is_running() {
            return;
        }
        let weak = Rc::downgrade(self);
        let handle = self.timers.every(
            self.period_ms,
            Box::new(move || {
                if let Some(clock) = weak.upgrade() {
                    clock.tick();
                }
            }),
        );
        *self.interval.borrow_mut() = Some(handle);
        log::debug!("clock: started ({}ms)", self.period_ms);
    }

    pub fn stop(&self) {
        let handle = self.interval.borrow_mut().take();
        if handle.is_some() {
            log::debug!("clock: paused");
        }
        drop(handle);
    }

    /// Refresh period actually in use; a configured 0 runs at 1ms.
    #[must_use]
    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.borrow().is_some()
    }
}
