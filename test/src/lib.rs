//! Testing utilities for `floem_responsive`.
//!
//! Provides a [`Harness`] that wires a [`LayoutRoot`] to a mock media platform,
//! and a [`Recorder`] that captures callback invocations.
//!
//! # Example
//!
//! ```rust
//! use floem_responsive_test::prelude::*;
//!
//! let harness = Harness::new();
//! let recorder = Recorder::new();
//! let layout = harness.activation(
//!     KeyOptions::new("layout").base("row").input("layoutXs", "column"),
//!     &recorder,
//! );
//!
//! harness.activate("xs");
//! assert_eq!(layout.activated_input(), Some("column"));
//! assert_eq!(recorder.values(), vec![Some("column")]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use floem_responsive::LayoutRoot;
use floem_responsive::config::LayoutConfig;
use floem_responsive::media::mock::MockMediaPlatform;
use floem_responsive::responsive::{KeyOptions, ResponsiveActivation, ValueChange};

pub mod prelude {
    pub use crate::{Harness, Recorder, StyleCall, StyleLog};
    pub use floem_responsive::LayoutRoot;
    pub use floem_responsive::breakpoint::{BreakPoint, BreakPointRegistry, CustomBreakPoint};
    pub use floem_responsive::config::LayoutConfig;
    pub use floem_responsive::media::{MatchMedia, MediaChange, MediaObserver};
    pub use floem_responsive::responsive::{
        KeyOptions, ResolverState, ResponsiveActivation, ValueChange,
    };
    pub use floem_reactive::{Trigger, create_trigger};
}

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Filtered by `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A mocked layout root with shortcuts for driving breakpoints.
pub struct Harness<V: Clone + PartialEq + 'static = &'static str> {
    root: LayoutRoot<u32, V>,
}

impl Harness<&'static str> {
    pub fn new() -> Self {
        Self::with_config(&LayoutConfig::default())
    }
}

impl Default for Harness<&'static str> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + PartialEq + 'static> Harness<V> {
    pub fn with_config(config: &LayoutConfig) -> Self {
        init_tracing();
        let root = LayoutRoot::mocked(config).expect("valid test config");
        Self { root }
    }

    pub fn root(&self) -> &LayoutRoot<u32, V> {
        &self.root
    }

    pub fn mock(&self) -> &Rc<MockMediaPlatform> {
        self.root.mock().expect("harness roots are mocked")
    }

    /// Activates one breakpoint, deactivating everything else.
    pub fn activate(&self, alias: &str) -> bool {
        self.mock().activate(alias, false)
    }

    /// Activates a breakpoint together with the overlapping ranges containing it.
    pub fn activate_with_overlaps(&self, alias: &str) -> bool {
        self.mock().activate(alias, true)
    }

    pub fn activation(
        &self,
        options: KeyOptions<V>,
        recorder: &Recorder<V>,
    ) -> ResponsiveActivation<V> {
        self.root.activation(options, recorder.handler())
    }
}

/// Records every [`ValueChange`] a resolver reports.
pub struct Recorder<V> {
    changes: Rc<RefCell<Vec<ValueChange<V>>>>,
}

impl<V> Clone for Recorder<V> {
    fn clone(&self) -> Self {
        Self {
            changes: self.changes.clone(),
        }
    }
}

impl<V: Clone + 'static> Default for Recorder<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + 'static> Recorder<V> {
    pub fn new() -> Self {
        Self {
            changes: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn handler(&self) -> impl Fn(&ValueChange<V>) + 'static {
        let changes = self.changes.clone();
        move |change: &ValueChange<V>| changes.borrow_mut().push(change.clone())
    }

    pub fn changes(&self) -> Vec<ValueChange<V>> {
        self.changes.borrow().clone()
    }

    pub fn values(&self) -> Vec<Option<V>> {
        self.changes
            .borrow()
            .iter()
            .map(|change| change.value.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.changes.borrow().len()
    }

    pub fn clear(&self) {
        self.changes.borrow_mut().clear();
    }
}

/// What a style binding did, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StyleCall<V> {
    Update(V),
    Clear,
}

/// Collects update and clear calls from a marshaller binding.
pub struct StyleLog<V> {
    calls: Rc<RefCell<Vec<StyleCall<V>>>>,
}

impl<V> Clone for StyleLog<V> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
        }
    }
}

impl<V: Clone + 'static> Default for StyleLog<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + 'static> StyleLog<V> {
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn update_fn(&self) -> impl Fn(&V) + 'static {
        let calls = self.calls.clone();
        move |value: &V| calls.borrow_mut().push(StyleCall::Update(value.clone()))
    }

    pub fn clear_fn(&self) -> impl Fn() + 'static {
        let calls = self.calls.clone();
        move || calls.borrow_mut().push(StyleCall::Clear)
    }

    pub fn calls(&self) -> Vec<StyleCall<V>> {
        self.calls.borrow().clone()
    }

    pub fn last(&self) -> Option<StyleCall<V>> {
        self.calls.borrow().last().cloned()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}
