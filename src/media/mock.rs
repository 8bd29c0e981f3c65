//! A scriptable media platform for tests and demos.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use floem_responsive::breakpoint::BreakPointRegistry;
//! use floem_responsive::media::{MatchMedia, mock::MockMediaPlatform};
//!
//! let registry = Rc::new(BreakPointRegistry::with_defaults());
//! let platform = Rc::new(MockMediaPlatform::new(registry.clone()));
//! let match_media = MatchMedia::new(platform.clone());
//!
//! platform.activate("md", true);
//! match_media.register_query("(min-width: 960px)");
//! assert!(match_media.is_active("(min-width: 960px)"));
//! ```

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use super::{MediaPlatform, MediaQueryList, MediaQueryListener};
use crate::breakpoint::BreakPointRegistry;

/// The overlapping ranges that contain each exact range, widest last.
const OVERLAPS: [(&str, &[&str]); 4] = [
    ("xl", &["gt-lg", "gt-md", "gt-sm", "gt-xs"]),
    ("lg", &["gt-md", "gt-sm", "gt-xs"]),
    ("md", &["gt-sm", "gt-xs"]),
    ("sm", &["gt-xs"]),
];

pub struct MockMediaQueryList {
    media: String,
    matches: Cell<bool>,
    listeners: RefCell<Vec<MediaQueryListener>>,
}

impl fmt::Debug for MockMediaQueryList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockMediaQueryList")
            .field("media", &self.media)
            .field("matches", &self.matches.get())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

impl MockMediaQueryList {
    fn new(media: &str) -> Self {
        Self {
            media: media.to_string(),
            matches: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Updates the state and notifies listeners if it actually changed.
    pub fn set_matches(&self, matches: bool) {
        if self.matches.replace(matches) == matches {
            return;
        }
        trace!(query = %self.media, matches, "mock media change");
        let listeners: SmallVec<[MediaQueryListener; 4]> =
            self.listeners.borrow().iter().cloned().collect();
        for listener in listeners {
            listener(matches);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl MediaQueryList for MockMediaQueryList {
    fn media(&self) -> &str {
        &self.media
    }

    fn matches(&self) -> bool {
        self.matches.get()
    }

    fn add_listener(&self, listener: MediaQueryListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

/// Simulates a viewport by switching query lists on and off.
///
/// Aliases are resolved through the breakpoint registry, anything else is
/// treated as a raw query.
pub struct MockMediaPlatform {
    registry: Rc<BreakPointRegistry>,
    lists: RefCell<IndexMap<String, Rc<MockMediaQueryList>>>,
}

impl fmt::Debug for MockMediaPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockMediaPlatform")
            .field("lists", &self.lists.borrow().values().collect::<Vec<_>>())
            .finish()
    }
}

impl MockMediaPlatform {
    pub fn new(registry: Rc<BreakPointRegistry>) -> Self {
        Self {
            registry,
            lists: RefCell::new(IndexMap::new()),
        }
    }

    /// Deactivates every active query, then activates `alias_or_query`.
    ///
    /// With `use_overlaps` the overlapping ranges containing the target are
    /// activated first, so listeners of the target see them already active.
    /// Nothing happens if the target is already the active query and overlaps
    /// are not requested. Returns whether the target is active afterwards.
    pub fn activate(&self, alias_or_query: &str, use_overlaps: bool) -> bool {
        let query = self.to_query(alias_or_query);
        if use_overlaps || !self.is_active(&query) {
            self.deactivate_all();
            if use_overlaps {
                self.activate_overlaps(alias_or_query);
            }
            self.list(&query).set_matches(true);
        }
        self.is_active(&query)
    }

    /// Deactivates a single query. Returns whether it was active.
    pub fn deactivate(&self, alias_or_query: &str) -> bool {
        let query = self.to_query(alias_or_query);
        let list = self.lists.borrow().get(&query).cloned();
        match list {
            Some(list) if list.matches() => {
                list.set_matches(false);
                true
            }
            _ => false,
        }
    }

    /// Switches one query without touching the others, the way a real platform
    /// reports each query on its own. Returns whether the state changed.
    pub fn set_active(&self, alias_or_query: &str, active: bool) -> bool {
        let query = self.to_query(alias_or_query);
        let list = self.list(&query);
        let changed = list.matches() != active;
        list.set_matches(active);
        changed
    }

    pub fn deactivate_all(&self) {
        let lists: Vec<_> = self.lists.borrow().values().cloned().collect();
        for list in lists {
            list.set_matches(false);
        }
    }

    pub fn is_active(&self, alias_or_query: &str) -> bool {
        let query = self.to_query(alias_or_query);
        self.lists
            .borrow()
            .get(&query)
            .is_some_and(|list| list.matches())
    }

    pub fn has_activated(&self) -> bool {
        self.lists.borrow().values().any(|list| list.matches())
    }

    pub fn active_queries(&self) -> Vec<String> {
        self.lists
            .borrow()
            .values()
            .filter(|list| list.matches())
            .map(|list| list.media.clone())
            .collect()
    }

    fn activate_overlaps(&self, alias_or_query: &str) {
        let alias = self
            .registry
            .find(alias_or_query)
            .map(|bp| bp.alias.as_str())
            .unwrap_or(alias_or_query);
        let Some((_, overlaps)) = OVERLAPS.iter().find(|(exact, _)| *exact == alias) else {
            return;
        };
        for overlap in overlaps.iter() {
            if let Some(bp) = self.registry.find_by_alias(overlap) {
                self.list(&bp.media_query).set_matches(true);
            }
        }
    }

    fn to_query(&self, alias_or_query: &str) -> String {
        self.registry
            .find_by_alias(alias_or_query)
            .map(|bp| bp.media_query.clone())
            .unwrap_or_else(|| alias_or_query.to_string())
    }

    fn list(&self, query: &str) -> Rc<MockMediaQueryList> {
        self.lists
            .borrow_mut()
            .entry(query.to_string())
            .or_insert_with(|| Rc::new(MockMediaQueryList::new(query)))
            .clone()
    }
}

impl MediaPlatform for MockMediaPlatform {
    fn match_media(&self, query: &str) -> Option<Rc<dyn MediaQueryList>> {
        Some(self.list(query))
    }
}
