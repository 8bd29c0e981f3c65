//! Synchronous push streams.
//!
//! A [`Broadcast`] is a hot observer list: [`Broadcast::emit`] calls every live
//! subscriber in subscription order before returning. Nothing is queued or batched.
//! It also remembers the latest value, which [`Broadcast::subscribe`] replays to a
//! new subscriber immediately.
//!
//! Handlers may subscribe, unsubscribe or emit again while an emission is running.
//! An emission works on a snapshot of the subscriber list, and a subscriber that
//! is removed part way through is skipped.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use indexmap::IndexMap;
use smallvec::SmallVec;

struct Subscriber<T> {
    live: Cell<bool>,
    handler: Box<dyn Fn(&T)>,
}

impl<T> Subscriber<T> {
    fn call(&self, value: &T) {
        if self.live.get() {
            (self.handler)(value);
        }
    }
}

struct Inner<T> {
    latest: Option<T>,
    next_id: u64,
    subscribers: IndexMap<u64, Rc<Subscriber<T>>>,
}

pub struct Broadcast<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Broadcast<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> fmt::Debug for Broadcast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Broadcast")
            .field("subscribers", &inner.subscribers.len())
            .field("has_latest", &inner.latest.is_some())
            .finish()
    }
}

impl<T: Clone + 'static> Default for Broadcast<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Broadcast<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                latest: None,
                next_id: 0,
                subscribers: IndexMap::new(),
            })),
        }
    }

    /// A broadcast whose first subscribers already see `initial`.
    pub fn seeded(initial: T) -> Self {
        let broadcast = Self::new();
        broadcast.inner.borrow_mut().latest = Some(initial);
        broadcast
    }

    pub fn emit(&self, value: T) {
        let subscribers: SmallVec<[Rc<Subscriber<T>>; 8]> = {
            let mut inner = self.inner.borrow_mut();
            inner.latest = Some(value.clone());
            inner.subscribers.values().cloned().collect()
        };
        for subscriber in subscribers {
            subscriber.call(&value);
        }
    }

    /// Subscribes and replays the latest value, if any, before returning.
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        self.add(Box::new(handler), true)
    }

    /// Subscribes to future values only.
    pub fn listen(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        self.add(Box::new(handler), false)
    }

    pub fn latest(&self) -> Option<T> {
        self.inner.borrow().latest.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn add(&self, handler: Box<dyn Fn(&T)>, replay: bool) -> Subscription {
        let subscriber = Rc::new(Subscriber {
            live: Cell::new(true),
            handler,
        });
        let (id, latest) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.insert(id, subscriber.clone());
            (id, if replay { inner.latest.clone() } else { None })
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        let flag = subscriber.clone();
        let subscription = Subscription::new(move || {
            flag.live.set(false);
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().subscribers.shift_remove(&id);
            }
        });

        if let Some(latest) = latest {
            subscriber.call(&latest);
        }
        subscription
    }
}

/// Handle to a live subscription.
///
/// Unsubscribing is idempotent, and dropping the handle unsubscribes.
#[must_use = "dropping a Subscription unsubscribes it"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A subscription that was never attached to anything.
    pub fn closed() -> Self {
        Self { teardown: None }
    }

    pub fn unsubscribe(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.teardown.is_none()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

enum Stage<T> {
    Filter(Rc<dyn Fn(&T) -> bool>),
    Map(Rc<dyn Fn(T) -> T>),
}

impl<T> Clone for Stage<T> {
    fn clone(&self) -> Self {
        match self {
            Stage::Filter(f) => Stage::Filter(f.clone()),
            Stage::Map(f) => Stage::Map(f.clone()),
        }
    }
}

/// A view over a [`Broadcast`] with `filter` and `map` stages applied in order.
pub struct Observable<T> {
    source: Broadcast<T>,
    stages: Vec<Stage<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            stages: self.stages.clone(),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("source", &self.source)
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(source: Broadcast<T>) -> Self {
        Self {
            source,
            stages: Vec::new(),
        }
    }

    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + 'static) -> Self {
        self.stages.push(Stage::Filter(Rc::new(predicate)));
        self
    }

    pub fn map(mut self, f: impl Fn(T) -> T + 'static) -> Self {
        self.stages.push(Stage::Map(Rc::new(f)));
        self
    }

    /// Subscribes to the source. The source's latest value is replayed through
    /// the stages.
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let stages = self.stages.clone();
        self.source.subscribe(move |value| {
            if let Some(value) = run_stages(&stages, value) {
                handler(&value);
            }
        })
    }

    /// Like [`subscribe`](Self::subscribe) without the replay.
    pub fn listen(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let stages = self.stages.clone();
        self.source.listen(move |value| {
            if let Some(value) = run_stages(&stages, value) {
                handler(&value);
            }
        })
    }
}

fn run_stages<T: Clone>(stages: &[Stage<T>], value: &T) -> Option<T> {
    let mut value = value.clone();
    for stage in stages {
        match stage {
            Stage::Filter(predicate) => {
                if !predicate(&value) {
                    return None;
                }
            }
            Stage::Map(f) => value = f(value),
        }
    }
    Some(value)
}
