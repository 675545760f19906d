use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

fn counting_tick() -> (Rc<Cell<u32>>, Box<dyn FnMut()>) {
    let count = Rc::new(Cell::new(0));
    let sink = Rc::clone(&count);
    (count, Box::new(move || sink.set(sink.get() + 1)))
}

#[test]
fn interval_fires_once_per_period() {
    let timers = ManualTimers::new();
    let (count, tick) = counting_tick();
    let _handle = timers.every(100, tick);
    timers.advance(99);
    assert_eq!(count.get(), 0);
    timers.advance(1);
    assert_eq!(count.get(), 1);
    timers.advance(450);
    assert_eq!(count.get(), 5);
}

#[test]
fn dropping_handle_cancels_interval() {
    let timers = ManualTimers::new();
    let (count, tick) = counting_tick();
    let handle = timers.every(100, tick);
    timers.advance(200);
    assert_eq!(timers.active_intervals(), 1);
    drop(handle);
    assert_eq!(timers.active_intervals(), 0);
    timers.advance(1_000);
    assert_eq!(count.get(), 2);
}

#[test]
fn timeouts_fire_once_in_order() {
    let timers = ManualTimers::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for (delay, label) in [(30, "late"), (10, "early")] {
        let sink = Rc::clone(&order);
        timers.after(delay, Box::new(move || sink.borrow_mut().push(label)));
    }
    assert_eq!(timers.pending_timeouts(), 2);
    timers.advance(100);
    assert_eq!(*order.borrow(), vec!["early", "late"]);
    assert_eq!(timers.pending_timeouts(), 0);
}

#[test]
fn now_tracks_advanced_time_inside_callbacks() {
    let timers = ManualTimers::starting_at(1_000.0);
    let seen = Rc::new(Cell::new(0.0));
    let sink = Rc::clone(&seen);
    let clock = timers.clone();
    timers.after(10, Box::new(move || sink.set(clock.now_ms())));
    timers.advance(50);
    assert!((seen.get() - 1_010.0).abs() < f64::EPSILON);
    assert!((timers.now_ms() - 1_050.0).abs() < f64::EPSILON);
}

#[test]
fn callbacks_may_schedule_more_work() {
    let timers = ManualTimers::new();
    let (count, tick) = counting_tick();
    let inner = timers.clone();
    let slot = Rc::new(RefCell::new(None));
    let handle_slot = Rc::clone(&slot);
    timers.after(5, Box::new(move || *handle_slot.borrow_mut() = Some(inner.every(10, tick))));
    timers.advance(35);
    assert_eq!(count.get(), 3);
    assert_eq!(timers.active_intervals(), 1);
}
