//! Virtual clock for tests: time only moves when [`ManualTimers::advance`]
//! is called, and every due callback fires in timestamp order.

#[cfg(test)]
#[path = "manual_test.rs"]
mod manual_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::Timers;

/// 2023-11-14T22:13:20Z, a fixed starting point for deterministic output.
pub const EPOCH_START_MS: f64 = 1_700_000_000_000.0;

type Tick = Rc<RefCell<Box<dyn FnMut()>>>;

struct Scheduled {
    period_ms: f64,
    next_due: f64,
    tick: Tick,
}

struct Clock {
    now: f64,
    next_id: u64,
    intervals: BTreeMap<u64, Scheduled>,
    timeouts: Vec<(f64, Box<dyn FnOnce()>)>,
}

enum Due {
    Timeout(usize),
    Interval(u64),
}

impl Clock {
    /// Earliest callback due at or before `limit`. Timeouts win ties.
    fn next_due(&self, limit: f64) -> Option<(f64, Due)> {
        let timeout = self
            .timeouts
            .iter()
            .enumerate()
            .filter(|(_, (due, _))| *due <= limit)
            .min_by(|a, b| a.1.0.total_cmp(&b.1.0))
            .map(|(i, (due, _))| (*due, Due::Timeout(i)));
        let interval = self
            .intervals
            .iter()
            .filter(|(_, s)| s.next_due <= limit)
            .min_by(|a, b| a.1.next_due.total_cmp(&b.1.next_due))
            .map(|(id, s)| (s.next_due, Due::Interval(*id)));
        match (timeout, interval) {
            (Some(t), Some(i)) => Some(if t.0 <= i.0 { t } else { i }),
            (t, i) => t.or(i),
        }
    }
}

/// Manually driven [`Timers`].
#[derive(Clone)]
pub struct ManualTimers {
    clock: Rc<RefCell<Clock>>,
}

impl Default for ManualTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualTimers {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(EPOCH_START_MS)
    }

    #[must_use]
    pub fn starting_at(now_ms: f64) -> Self {
        let clock = Clock { now: now_ms, next_id: 0, intervals: BTreeMap::new(), timeouts: Vec::new() };
        Self { clock: Rc::new(RefCell::new(clock)) }
    }

    /// Move time forward by `ms`, firing everything that comes due.
    pub fn advance(&self, ms: u32) {
        let limit = self.clock.borrow().now + f64::from(ms);
        loop {
            let due = self.clock.borrow().next_due(limit);
            let Some((at, which)) = due else {
                break;
            };
            match which {
                Due::Timeout(index) => {
                    let f = {
                        let mut clock = self.clock.borrow_mut();
                        clock.now = at;
                        clock.timeouts.remove(index).1
                    };
                    f();
                }
                Due::Interval(id) => {
                    let tick = {
                        let mut clock = self.clock.borrow_mut();
                        clock.now = at;
                        let Some(scheduled) = clock.intervals.get_mut(&id) else {
                            continue;
                        };
                        scheduled.next_due += scheduled.period_ms;
                        Rc::clone(&scheduled.tick)
                    };
                    let mut tick = tick.borrow_mut();
                    tick();
                }
            }
        }
        self.clock.borrow_mut().now = limit;
    }

    /// Intervals whose handles are still alive.
    #[must_use]
    pub fn active_intervals(&self) -> usize {
        self.clock.borrow().intervals.len()
    }

    #[must_use]
    pub fn pending_timeouts(&self) -> usize {
        self.clock.borrow().timeouts.len()
    }
}

/// Cancels its interval when dropped.
pub struct ManualInterval {
    id: u64,
    clock: Weak<RefCell<Clock>>,
}

impl Drop for ManualInterval {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            clock.borrow_mut().intervals.remove(&self.id);
        }
    }
}

impl Timers for ManualTimers {
    type Interval = ManualInterval;

    fn every(&self, period_ms: u32, tick: Box<dyn FnMut()>) -> ManualInterval {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let period_ms = f64::from(period_ms.max(1));
        let next_due = clock.now + period_ms;
        clock.intervals.insert(id, Scheduled { period_ms, next_due, tick: Rc::new(RefCell::new(tick)) });
        ManualInterval { id, clock: Rc::downgrade(&self.clock) }
    }

    fn after(&self, delay_ms: u32, f: Box<dyn FnOnce()>) {
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + f64::from(delay_ms);
        clock.timeouts.push((due, f));
    }

    fn now_ms(&self) -> f64 {
        self.clock.borrow().now
    }
}
