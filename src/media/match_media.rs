use std::{cell::RefCell, fmt, rc::Rc};

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use super::{
    MediaChange, MediaObservable, MediaPlatform, MediaQueryList, StaticMediaQueryList,
};
use crate::stream::{Broadcast, Observable};

/// The activation source: one platform listener per registered query, one
/// shared stream of changes.
///
/// The stream starts out holding [`MediaChange::all`] and afterwards always holds
/// the latest change, which a new subscriber receives straight away. Changes are
/// emitted synchronously from inside the platform listener callback, in the order
/// the platform reports them.
pub struct MatchMedia {
    platform: Rc<dyn MediaPlatform>,
    lists: RefCell<IndexMap<String, Rc<dyn MediaQueryList>>>,
    source: Broadcast<MediaChange>,
}

impl fmt::Debug for MatchMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchMedia")
            .field("queries", &self.lists.borrow().keys().collect::<Vec<_>>())
            .field("source", &self.source)
            .finish()
    }
}

impl MatchMedia {
    pub fn new(platform: Rc<dyn MediaPlatform>) -> Self {
        Self {
            platform,
            lists: RefCell::new(IndexMap::new()),
            source: Broadcast::seeded(MediaChange::all()),
        }
    }

    /// Starts tracking `query`. Does nothing if it is already tracked.
    ///
    /// A query that already matches is announced with an activation right away.
    pub fn register_query(&self, query: &str) {
        if self.lists.borrow().contains_key(query) {
            return;
        }

        let list = self.platform.match_media(query).unwrap_or_else(|| {
            warn!(query, "media queries unavailable, using a static list");
            Rc::new(StaticMediaQueryList::new(query))
        });
        self.lists
            .borrow_mut()
            .insert(query.to_string(), list.clone());
        debug!(query, matches = list.matches(), "registered media query");

        let source = self.source.clone();
        let media = query.to_string();
        list.add_listener(Rc::new(move |matches| {
            trace!(query = %media, matches, "media change");
            source.emit(MediaChange::new(matches, media.clone()));
        }));

        if list.matches() {
            self.source.emit(MediaChange::new(true, query));
        }
    }

    pub fn register_queries<'a>(&self, queries: impl IntoIterator<Item = &'a str>) {
        for query in queries {
            self.register_query(query);
        }
    }

    /// `false` for queries that were never registered.
    pub fn is_active(&self, query: &str) -> bool {
        let list = self.lists.borrow().get(query).cloned();
        list.is_some_and(|list| list.matches())
    }

    pub fn is_registered(&self, query: &str) -> bool {
        self.lists.borrow().contains_key(query)
    }

    pub fn registered_queries(&self) -> Vec<String> {
        self.lists.borrow().keys().cloned().collect()
    }

    pub fn active_queries(&self) -> Vec<String> {
        let lists: Vec<_> = self.lists.borrow().values().cloned().collect();
        lists
            .into_iter()
            .filter(|list| list.matches())
            .map(|list| list.media().to_string())
            .collect()
    }

    pub fn latest(&self) -> Option<MediaChange> {
        self.source.latest()
    }

    /// Changes for `query` only, registering it first. `None` gives every change.
    pub fn observe(&self, query: Option<&str>) -> MediaObservable {
        let changes = Observable::new(self.source.clone());
        match query {
            Some(query) => {
                self.register_query(query);
                let query = query.to_string();
                changes.filter(move |change| change.media_query == query)
            }
            None => changes,
        }
    }
}
