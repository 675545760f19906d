//! Timer boundary: recurring intervals, one-shot delays, and wall-clock time.
//!
//! An interval runs for as long as its handle is alive; dropping the handle
//! cancels it. Widgets hold at most one handle per recurring job, which makes
//! "never two concurrent loops" a property of ownership.

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod manual;

/// Scheduling and clock access.
pub trait Timers: Clone + 'static {
    /// Handle for a running interval. Dropping it stops the interval.
    type Interval: 'static;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> Self::Interval;
    /// Run `f` once after `delay_ms`.
    fn after(&self, delay_ms: u32, f: Box<dyn FnOnce()>);
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> f64;
}
