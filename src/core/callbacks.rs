use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Events the render-loop manager dispatches to its subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManagerEvent {
    Resize,
    Render,
}

type Callback = Rc<RefCell<dyn FnMut()>>;

struct Entry {
    id: u64,
    event: ManagerEvent,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Subscription registry shared between the manager and its subscribers.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct Callbacks {
    inner: Rc<RefCell<Registry>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, event: ManagerEvent, callback: impl FnMut() + 'static) -> CallbackHandle {
        let mut reg = self.inner.borrow_mut();
        let id = reg.next_id;
        reg.next_id += 1;
        reg.entries.push(Entry {
            id,
            event,
            callback: Rc::new(RefCell::new(callback)),
        });
        CallbackHandle {
            id,
            registry: Rc::downgrade(&self.inner),
        }
    }

    /// Run every callback registered for `event`, in registration order.
    ///
    /// The subscriber list is snapshotted first, so callbacks may add or
    /// remove subscriptions while being dispatched. A callback removed by an
    /// earlier one in the same dispatch is skipped. Re-entrant calls into a
    /// callback that is already running are dropped.
    pub fn fire(&self, event: ManagerEvent) {
        let snapshot: SmallVec<[(u64, Callback); 4]> = self
            .inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.event == event)
            .map(|e| (e.id, e.callback.clone()))
            .collect();
        for (id, callback) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            match callback.try_borrow_mut() {
                Ok(mut f) => (&mut *f)(),
                Err(_) => log::warn!("[callbacks] skipped re-entrant {:?} callback", event),
            }
        }
    }

    pub fn active_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn count_for(&self, event: ManagerEvent) -> usize {
        self.inner
            .borrow()
            .entries
            .iter()
            .filter(|e| e.event == event)
            .count()
    }

    fn is_registered(&self, id: u64) -> bool {
        self.inner.borrow().entries.iter().any(|e| e.id == id)
    }
}

/// Removal handle returned by [`Callbacks::add`].
///
/// Dropping the handle keeps the subscription alive; only `remove` ends it.
pub struct CallbackHandle {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl CallbackHandle {
    pub fn remove(self) {
        if let Some(reg) = self.registry.upgrade() {
            reg.borrow_mut().entries.retain(|e| e.id != self.id);
        }
    }
}

/// Disposal actions collected during construction and run once on teardown.
#[derive(Default)]
pub struct Disposer {
    actions: SmallVec<[Box<dyn FnOnce()>; 4]>,
}

impl Disposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: impl FnOnce() + 'static) {
        self.actions.push(Box::new(action));
    }

    pub fn push_callback(&mut self, handle: CallbackHandle) {
        self.push(move || handle.remove());
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Run and forget every action in insertion order. Calling it again is a
    /// no-op.
    pub fn dispose(&mut self) {
        for action in self.actions.drain(..) {
            action();
        }
    }
}

/// A host callback kept alive until the event it waits for has fired.
///
/// Arming again hands back the previous callback so the caller can detach it.
pub struct Pending<T> {
    slot: Option<T>,
}

impl<T> Default for Pending<T> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<T> Pending<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, value: T) -> Option<T> {
        self.slot.replace(value)
    }

    /// The awaited event fired, or was cancelled. Releases the callback once.
    pub fn settle(&mut self) -> Option<T> {
        self.slot.take()
    }

    pub fn is_armed(&self) -> bool {
        self.slot.is_some()
    }
}
