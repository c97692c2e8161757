use std::rc::Rc;

use super::*;
use crate::frame::scheduler::{ManualScheduler, ObservedScheduler};

#[test]
fn started_counter_begins_at_zero() {
    let sched = Rc::new(ManualScheduler::new());
    let counter = FrameCounter::start(sched.clone());
    assert_eq!(counter.current(), FrameCount(0));
    assert_eq!(sched.pending(), 1);
}

#[test]
fn increments_once_per_frame_and_rearms() {
    let sched = Rc::new(ManualScheduler::new());
    let counter = FrameCounter::start(sched.clone());

    for expected in 1..=5 {
        sched.run_frame();
        assert_eq!(counter.current(), FrameCount(expected));
        assert_eq!(sched.pending(), 1);
    }
}

#[test]
fn clones_share_the_count() {
    let counter = FrameCounter::new();
    let other = counter.clone();
    counter.tick();
    counter.tick();
    assert_eq!(other.current(), FrameCount(2));
}

#[test]
fn counts_through_an_observed_scheduler() {
    let observed = Rc::new(ObservedScheduler::new(ManualScheduler::new()));
    let counter = FrameCounter::start(observed.clone());

    observed.inner().run_frame();
    observed.inner().run_frame();

    assert_eq!(counter.current(), FrameCount(2));
    assert_eq!(observed.requests(), 3);
}

#[test]
fn advance_to_only_moves_forward() {
    let counter = FrameCounter::new();
    counter.advance_to(FrameCount(7));
    assert_eq!(counter.current(), FrameCount(7));

    counter.advance_to(FrameCount(3));
    assert_eq!(counter.current(), FrameCount(7));

    counter.tick();
    assert_eq!(counter.current(), FrameCount(8));
}
