// Host-side tests for the frame loop's run state and tick release.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::*;
use std::cell::Cell;
use std::rc::{Rc, Weak};

// Stand-in for the rAF closure: holds the loop it reschedules
struct Tick {
    frames: Rc<FrameLoop<Tick>>,
}

#[test]
fn start_stores_tick_once() {
    let frames = FrameLoop::new();
    assert!(frames.start(1));
    assert!(frames.is_running());
    assert!(!frames.start(2));
    assert_eq!(frames.with_tick(|t| *t), Some(1));
}

#[test]
fn running_loop_keeps_its_tick() {
    let frames = FrameLoop::new();
    frames.start("tick");
    assert_eq!(frames.release_if_stopped(), None);
    assert!(frames.has_tick());
}

#[test]
fn stopped_loop_releases_tick_on_next_frame() {
    let frames = FrameLoop::new();
    frames.start("tick");
    frames.stop();
    assert!(!frames.is_running());
    assert_eq!(frames.release_if_stopped(), Some("tick"));
    assert_eq!(frames.release_if_stopped(), None);
    assert_eq!(frames.with_tick(|t| *t), None);
}

#[test]
fn releasing_breaks_the_tick_cycle() {
    let frames: Rc<FrameLoop<Tick>> = Rc::new(FrameLoop::new());
    let weak: Weak<FrameLoop<Tick>> = Rc::downgrade(&frames);
    frames.start(Tick {
        frames: frames.clone(),
    });
    assert_eq!(Rc::strong_count(&frames), 2);

    frames.stop();
    let stale = frames.release_if_stopped();
    drop(stale);
    assert_eq!(Rc::strong_count(&frames), 1);
    drop(frames);
    assert!(weak.upgrade().is_none());
}

#[test]
fn restart_waits_for_release() {
    let frames = FrameLoop::new();
    let released = Rc::new(Cell::new(false));
    frames.start(1);
    frames.stop();
    assert!(!frames.start(2));
    if frames.release_if_stopped().is_some() {
        released.set(true);
    }
    assert!(released.get());
    assert!(frames.start(3));
    assert_eq!(frames.with_tick(|t| *t), Some(3));
}
