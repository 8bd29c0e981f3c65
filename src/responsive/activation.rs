use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use tracing::{debug, trace};

use super::KeyOptions;
use crate::{
    breakpoint::{BreakPoint, sort_descending_priority},
    media::{MediaChange, MediaObserver},
    stream::Subscription,
};

/// Passed to the change callback of a [`ResponsiveActivation`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueChange<V> {
    /// The base key, e.g. `layout`.
    pub property: String,
    /// The input key that won, e.g. `layoutGtSm`.
    pub key: String,
    /// `None` when nothing, not even a default, is bound.
    pub value: Option<V>,
    /// The media change that caused the update.
    pub change: MediaChange,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolverState {
    /// The base key is in effect.
    Inactive,
    /// A breakpoint specific key is in effect.
    Active(String),
}

struct Activated<V> {
    key: String,
    breakpoint: Option<BreakPoint>,
    value: Option<V>,
}

struct Shared<V> {
    options: RefCell<KeyOptions<V>>,
    activated: RefCell<Activated<V>>,
    destroyed: Cell<bool>,
    observer: Rc<MediaObserver>,
    on_change: Box<dyn Fn(&ValueChange<V>)>,
}

impl<V: Clone + PartialEq + 'static> Shared<V> {
    /// The input key of the highest ranked active breakpoint that has one, or
    /// the base key.
    ///
    /// `changed` is ranked in the state its change reports, whatever the
    /// platform answers for it right now.
    fn closest_active(
        &self,
        changed: Option<(&BreakPoint, bool)>,
    ) -> (String, Option<BreakPoint>) {
        let mut active = self.observer.active_breakpoints();
        if let Some((bp, matches)) = changed {
            active.retain(|other| other.alias != bp.alias);
            if matches {
                active.push(bp.clone());
                sort_descending_priority(&mut active);
            }
        }

        let options = self.options.borrow();
        let base_key = options.base_key().to_string();
        active
            .into_iter()
            .find(|bp| options.has_key(&bp.key_for(&base_key)))
            .map(|bp| (bp.key_for(&base_key), Some(bp)))
            .unwrap_or((base_key, None))
    }

    fn on_media_change(&self, change: &MediaChange) {
        if self.destroyed.get() {
            return;
        }
        let Some(bp) = self
            .observer
            .registry()
            .find_by_query(&change.media_query)
            .cloned()
        else {
            return;
        };

        // A deactivation only matters when it removes the breakpoint the
        // current key came from.
        if !change.matches {
            let was_source = self
                .activated
                .borrow()
                .breakpoint
                .as_ref()
                .is_some_and(|source| source.alias == bp.alias);
            if !was_source {
                return;
            }
        }

        let (key, breakpoint) = self.closest_active(Some((&bp, change.matches)));
        self.apply(key, breakpoint, change.clone());
    }

    /// Re-resolves after the inputs changed.
    fn refresh(&self) {
        if self.destroyed.get() {
            return;
        }
        let (key, breakpoint) = self.closest_active(None);
        let change = match &breakpoint {
            Some(bp) => MediaChange::new(true, bp.media_query.clone()).with_breakpoint(bp),
            None => MediaChange::all(),
        };
        self.apply(key, breakpoint, change);
    }

    fn apply(&self, key: String, breakpoint: Option<BreakPoint>, change: MediaChange) {
        let value = self.options.borrow().resolve(&key);
        let changed = {
            let mut activated = self.activated.borrow_mut();
            let changed = activated.value != value;
            activated.key.clone_from(&key);
            activated.breakpoint = breakpoint;
            activated.value = value.clone();
            changed
        };
        let property = self.options.borrow().base_key().to_string();
        trace!(%property, %key, changed, "resolved responsive value");

        if changed && !self.destroyed.get() {
            (self.on_change)(&ValueChange {
                property,
                key,
                value,
                change,
            });
        }
    }
}

/// Resolves which of a property's breakpoint specific values is in effect.
///
/// The input in effect belongs to the highest priority active breakpoint that has
/// one, and without one the base key wins. An activation can therefore only take
/// over when no higher priority active breakpoint has an input, so a `print` value
/// survives a width change and an exact range beats the overlaps containing it
/// whatever order the platform reports them in. When the breakpoint behind the
/// current key deactivates, the search runs again. The resolver picks its
/// initial input the same way on construction, then subscribes to every media
/// change. The callback only fires when the resolved value changes.
///
/// [`destroy`](Self::destroy) unsubscribes. It also runs on drop.
pub struct ResponsiveActivation<V: Clone + PartialEq + 'static> {
    shared: Rc<Shared<V>>,
    subscription: RefCell<Subscription>,
}

impl<V: Clone + PartialEq + fmt::Debug + 'static> fmt::Debug for ResponsiveActivation<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponsiveActivation")
            .field("options", &*self.shared.options.borrow())
            .field("activated_input_key", &self.shared.activated.borrow().key)
            .field("destroyed", &self.shared.destroyed.get())
            .finish()
    }
}

impl<V: Clone + PartialEq + 'static> ResponsiveActivation<V> {
    pub fn new(
        options: KeyOptions<V>,
        observer: Rc<MediaObserver>,
        on_change: impl Fn(&ValueChange<V>) + 'static,
    ) -> Self {
        let base_key = options.base_key().to_string();
        let shared = Rc::new(Shared {
            activated: RefCell::new(Activated {
                key: base_key.clone(),
                breakpoint: None,
                value: options.resolve(&base_key),
            }),
            options: RefCell::new(options),
            destroyed: Cell::new(false),
            observer,
            on_change: Box::new(on_change),
        });

        let (key, breakpoint) = shared.closest_active(None);
        let value = shared.options.borrow().resolve(&key);
        *shared.activated.borrow_mut() = Activated {
            key,
            breakpoint,
            value,
        };

        let weak: Weak<Shared<V>> = Rc::downgrade(&shared);
        let subscription = shared.observer.all_changes().listen(move |change| {
            if let Some(shared) = weak.upgrade() {
                shared.on_media_change(change);
            }
        });
        debug!(%base_key, "responsive activation created");

        Self {
            shared,
            subscription: RefCell::new(subscription),
        }
    }

    pub fn base_key(&self) -> String {
        self.shared.options.borrow().base_key().to_string()
    }

    /// The input key currently in effect: the base key or a suffixed key.
    pub fn activated_input_key(&self) -> String {
        self.shared.activated.borrow().key.clone()
    }

    pub fn activated_input(&self) -> Option<V> {
        self.shared.activated.borrow().value.clone()
    }

    /// The breakpoint behind the current key, `None` for the base key.
    pub fn activated_breakpoint(&self) -> Option<BreakPoint> {
        self.shared.activated.borrow().breakpoint.clone()
    }

    pub fn state(&self) -> ResolverState {
        let activated = self.shared.activated.borrow();
        match activated.breakpoint {
            Some(_) => ResolverState::Active(activated.key.clone()),
            None => ResolverState::Inactive,
        }
    }

    pub fn has_key_value(&self, key: &str) -> bool {
        self.shared.options.borrow().has_key(key)
    }

    pub fn input(&self, key: &str) -> Option<V> {
        self.shared.options.borrow().get(key).cloned()
    }

    pub fn options(&self) -> KeyOptions<V> {
        self.shared.options.borrow().clone()
    }

    /// Writes one input and re-resolves, firing the callback if the value changed.
    pub fn set_input(&self, key: impl Into<String>, value: V) {
        self.shared.options.borrow_mut().set(key, value);
        self.shared.refresh();
    }

    pub fn remove_input(&self, key: &str) -> Option<V> {
        let removed = self.shared.options.borrow_mut().remove(key);
        if removed.is_some() {
            self.shared.refresh();
        }
        removed
    }

    /// Stops listening for media changes. Calling it again does nothing.
    pub fn destroy(&self) {
        if self.shared.destroyed.replace(true) {
            return;
        }
        self.subscription.borrow_mut().unsubscribe();
        debug!(base_key = %self.base_key(), "responsive activation destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.shared.destroyed.get()
    }
}

impl<V: Clone + PartialEq + 'static> Drop for ResponsiveActivation<V> {
    fn drop(&mut self) {
        self.destroy();
    }
}
