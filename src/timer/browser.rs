//! [`Timers`] on top of `gloo-timers` and `Date.now()`.

use gloo_timers::callback::{Interval, Timeout};

use super::Timers;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimers;

impl Timers for BrowserTimers {
    type Interval = Interval;

    fn every(&self, period_ms: u32, mut tick: Box<dyn FnMut()>) -> Interval {
        Interval::new(period_ms.max(1), move || tick())
    }

    fn after(&self, delay_ms: u32, f: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, move || f()).forget();
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
