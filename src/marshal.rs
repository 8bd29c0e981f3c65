//! Per element style bindings.
//!
//! The [`StyleMarshaller`] owns one [`ResponsiveActivation`] for every
//! `(element, property)` pair and turns its resolved values into calls of an
//! update function, or of a clear function when no value applies. UI code talks
//! to the marshaller only.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use floem_responsive::LayoutRoot;
//! use floem_responsive::config::LayoutConfig;
//!
//! let root = LayoutRoot::mocked(&LayoutConfig::default()).unwrap();
//! let display = Rc::new(RefCell::new(None::<String>));
//!
//! root.marshaller().init(
//!     1u32,
//!     "show",
//!     {
//!         let display = display.clone();
//!         move |value: &String| *display.borrow_mut() = Some(value.clone())
//!     },
//!     {
//!         let display = display.clone();
//!         move || *display.borrow_mut() = None
//!     },
//!     &[],
//! );
//! root.marshaller().set_value(&1, "show", "block".to_string(), "");
//! root.marshaller().set_value(&1, "show", "none".to_string(), "Xs");
//! assert_eq!(display.borrow().as_deref(), Some("block"));
//!
//! root.mock().unwrap().activate("xs", false);
//! assert_eq!(display.borrow().as_deref(), Some("none"));
//!
//! root.marshaller().release_element(&1);
//! ```

use std::{cell::RefCell, fmt, hash::Hash, rc::Rc};

use floem_reactive::{Scope, Trigger};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    media::MediaObserver,
    responsive::{KeyOptions, ResponsiveActivation},
};

type UpdateFn<V> = Rc<dyn Fn(&V)>;
type ClearFn = Rc<dyn Fn()>;

fn route<V>(value: Option<&V>, update: &UpdateFn<V>, clear: &ClearFn) {
    match value {
        Some(value) => update(value),
        None => clear(),
    }
}

struct Binding<V: Clone + PartialEq + 'static> {
    activation: Rc<ResponsiveActivation<V>>,
    update: UpdateFn<V>,
    clear: ClearFn,
    /// Owns the effect tracking the extra triggers, if any were given.
    scope: Option<Scope>,
}

impl<V: Clone + PartialEq + 'static> Binding<V> {
    fn apply(&self) {
        route(
            self.activation.activated_input().as_ref(),
            &self.update,
            &self.clear,
        );
    }

    fn dispose(&self) {
        self.activation.destroy();
        if let Some(scope) = self.scope {
            scope.dispose();
        }
    }
}

pub struct StyleMarshaller<E, V: Clone + PartialEq + 'static> {
    observer: Rc<MediaObserver>,
    bindings: RefCell<FxHashMap<E, IndexMap<String, Rc<Binding<V>>>>>,
}

impl<E: fmt::Debug, V: Clone + PartialEq + 'static> fmt::Debug for StyleMarshaller<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bindings = self.bindings.borrow();
        let mut map = f.debug_map();
        for (element, keys) in bindings.iter() {
            map.entry(element, &keys.keys().collect::<Vec<_>>());
        }
        map.finish()
    }
}

impl<E, V> StyleMarshaller<E, V>
where
    E: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Clone + PartialEq + 'static,
{
    pub fn new(observer: Rc<MediaObserver>) -> Self {
        Self {
            observer,
            bindings: RefCell::new(FxHashMap::default()),
        }
    }

    /// Binds `key` on `element` to the given update and clear functions.
    ///
    /// Initialising a pair again destroys the previous resolver first. Inputs
    /// already set for the pair carry over. Notifying any of `extra_triggers`
    /// re-applies the current value, until the binding is released.
    pub fn init(
        &self,
        element: E,
        key: &str,
        update: impl Fn(&V) + 'static,
        clear: impl Fn() + 'static,
        extra_triggers: &[Trigger],
    ) {
        let previous = self
            .bindings
            .borrow_mut()
            .get_mut(&element)
            .and_then(|keys| keys.shift_remove(key));
        let options = match previous {
            Some(previous) => {
                debug!(?element, key, "re-initialising style binding");
                previous.dispose();
                previous.activation.options()
            }
            None => KeyOptions::new(key),
        };

        let update: UpdateFn<V> = Rc::new(update);
        let clear: ClearFn = Rc::new(clear);
        let activation = Rc::new(ResponsiveActivation::new(options, self.observer.clone(), {
            let update = update.clone();
            let clear = clear.clone();
            move |change| route(change.value.as_ref(), &update, &clear)
        }));

        let scope = (!extra_triggers.is_empty()).then(|| {
            let scope = Scope::new();
            let triggers = extra_triggers.to_vec();
            let activation = Rc::downgrade(&activation);
            let update = update.clone();
            let clear = clear.clone();
            scope.create_updater(
                move || triggers.iter().for_each(Trigger::track),
                move |()| {
                    if let Some(activation) = activation
                        .upgrade()
                        .filter(|activation| !activation.is_destroyed())
                    {
                        route(activation.activated_input().as_ref(), &update, &clear);
                    }
                },
            );
            scope
        });

        debug!(?element, key, "style binding initialised");
        self.bindings
            .borrow_mut()
            .entry(element)
            .or_default()
            .insert(
                key.to_string(),
                Rc::new(Binding {
                    activation,
                    update,
                    clear,
                    scope,
                }),
            );
    }

    /// Writes the input for `key` plus `suffix` (`""` for the base value).
    ///
    /// Does nothing if the pair was never initialised.
    pub fn set_value(&self, element: &E, key: &str, value: V, suffix: &str) {
        if let Some(binding) = self.binding(element, key) {
            binding.activation.set_input(format!("{key}{suffix}"), value);
        }
    }

    /// The input for `key` plus `suffix`, or the value in effect without a suffix.
    pub fn get_value(&self, element: &E, key: &str, suffix: Option<&str>) -> Option<V> {
        let binding = self.binding(element, key)?;
        match suffix {
            Some(suffix) => binding.activation.input(&format!("{key}{suffix}")),
            None => binding.activation.activated_input(),
        }
    }

    pub fn has_value(&self, element: &E, key: &str) -> bool {
        self.binding(element, key)
            .is_some_and(|binding| binding.activation.activated_input().is_some())
    }

    pub fn is_registered(&self, element: &E, key: &str) -> bool {
        self.binding(element, key).is_some()
    }

    pub fn activation(&self, element: &E, key: &str) -> Option<Rc<ResponsiveActivation<V>>> {
        self.binding(element, key)
            .map(|binding| binding.activation.clone())
    }

    /// Re-applies current values without waiting for a media change. With
    /// `key` set only that binding is updated.
    pub fn trigger_update(&self, element: &E, key: Option<&str>) {
        let bindings: Vec<_> = match self.bindings.borrow().get(element) {
            Some(keys) => match key {
                Some(key) => keys.get(key).cloned().into_iter().collect(),
                None => keys.values().cloned().collect(),
            },
            None => Vec::new(),
        };
        for binding in bindings {
            binding.apply();
        }
    }

    /// Destroys one binding.
    pub fn release(&self, element: &E, key: &str) {
        let removed = {
            let mut bindings = self.bindings.borrow_mut();
            let removed = bindings
                .get_mut(element)
                .and_then(|keys| keys.shift_remove(key));
            if bindings.get(element).is_some_and(|keys| keys.is_empty()) {
                bindings.remove(element);
            }
            removed
        };
        if let Some(binding) = removed {
            binding.dispose();
        }
    }

    /// Destroys every binding of `element`. Call this once the element is gone.
    pub fn release_element(&self, element: &E) {
        let removed = self.bindings.borrow_mut().remove(element);
        if let Some(keys) = removed {
            debug!(?element, bindings = keys.len(), "releasing element");
            for binding in keys.values() {
                binding.dispose();
            }
        }
    }

    pub fn element_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    fn binding(&self, element: &E, key: &str) -> Option<Rc<Binding<V>>> {
        self.bindings
            .borrow()
            .get(element)
            .and_then(|keys| keys.get(key))
            .cloned()
    }
}

impl<E, V: Clone + PartialEq + 'static> Drop for StyleMarshaller<E, V> {
    fn drop(&mut self) {
        for keys in self.bindings.get_mut().values() {
            for binding in keys.values() {
                binding.dispose();
            }
        }
    }
}
