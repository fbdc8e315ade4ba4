use std::cell::{Cell, RefCell};

/// Run state and tick storage of a self-rescheduling frame loop.
///
/// The tick callback lives here while the loop runs and usually holds a
/// handle back to its `FrameLoop`. Once stopped, the next tick takes itself
/// out with [`FrameLoop::release_if_stopped`], which breaks that cycle.
pub struct FrameLoop<T> {
    running: Cell<bool>,
    tick: RefCell<Option<T>>,
}

impl<T> Default for FrameLoop<T> {
    fn default() -> Self {
        Self {
            running: Cell::new(false),
            tick: RefCell::new(None),
        }
    }
}

impl<T> FrameLoop<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `tick` and mark the loop running.
    ///
    /// Returns `false` and drops `tick` while running, or while a stopped
    /// loop's last tick has not been released yet.
    pub fn start(&self, tick: T) -> bool {
        if self.running.get() || self.tick.borrow().is_some() {
            return false;
        }
        *self.tick.borrow_mut() = Some(tick);
        self.running.set(true);
        true
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn has_tick(&self) -> bool {
        self.tick.borrow().is_some()
    }

    /// Borrow the stored tick, e.g. to schedule it for the next frame.
    pub fn with_tick<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.tick.borrow().as_ref().map(f)
    }

    /// Hand the stored tick back once the loop has stopped; `None` while
    /// running.
    pub fn release_if_stopped(&self) -> Option<T> {
        if self.running.get() {
            return None;
        }
        self.tick.borrow_mut().take()
    }
}
