use std::rc::Rc;

use super::{MatchMedia, MediaChange, MediaObservable};
use crate::breakpoint::{BreakPoint, BreakPointRegistry, sort_descending_priority};

/// Breakpoint aware view of a [`MatchMedia`].
///
/// Every registry query is registered on construction so that activity can be
/// answered for any breakpoint. Changes coming out of this observer carry the
/// alias, priority and suffix of their breakpoint. Changes for queries outside
/// the registry keep empty alias fields.
#[derive(Debug)]
pub struct MediaObserver {
    match_media: Rc<MatchMedia>,
    registry: Rc<BreakPointRegistry>,
    filter_overlaps: bool,
}

impl MediaObserver {
    pub fn new(match_media: Rc<MatchMedia>, registry: Rc<BreakPointRegistry>) -> Self {
        match_media.register_queries(registry.iter().map(|bp| bp.media_query.as_str()));
        Self {
            match_media,
            registry,
            filter_overlaps: true,
        }
    }

    /// Whether [`media_changes`](Self::media_changes) drops overlapping breakpoints.
    pub fn filter_overlaps(mut self, filter_overlaps: bool) -> Self {
        self.filter_overlaps = filter_overlaps;
        self
    }

    pub fn registry(&self) -> &Rc<BreakPointRegistry> {
        &self.registry
    }

    pub fn match_media(&self) -> &Rc<MatchMedia> {
        &self.match_media
    }

    /// The general stream: activations only, overlapping breakpoints dropped
    /// unless overlap filtering was turned off.
    pub fn media_changes(&self) -> MediaObservable {
        let registry = self.registry.clone();
        let filter_overlaps = self.filter_overlaps;
        self.all_changes()
            .filter(|change| change.matches)
            .filter(move |change| {
                !filter_overlaps
                    || !registry
                        .find_by_query(&change.media_query)
                        .is_some_and(|bp| bp.overlapping)
            })
    }

    /// Activations and deactivations of one breakpoint, or of a raw query.
    ///
    /// Overlapping breakpoints are delivered here since they were asked for by name.
    pub fn observe(&self, alias_or_query: &str) -> MediaObservable {
        let query = self
            .registry
            .find(alias_or_query)
            .map(|bp| bp.media_query.clone())
            .unwrap_or_else(|| alias_or_query.to_string());
        let registry = self.registry.clone();
        self.match_media
            .observe(Some(&query))
            .map(move |change| inject_alias(&registry, change))
    }

    /// Every change, enriched, including deactivations and overlaps.
    pub fn all_changes(&self) -> MediaObservable {
        let registry = self.registry.clone();
        self.match_media
            .observe(None)
            .map(move |change| inject_alias(&registry, change))
    }

    pub fn is_active(&self, alias_or_query: &str) -> bool {
        match self.registry.find(alias_or_query) {
            Some(bp) => self.match_media.is_active(&bp.media_query),
            None => self.match_media.is_active(alias_or_query),
        }
    }

    /// Active breakpoints, highest priority first.
    pub fn active_breakpoints(&self) -> Vec<BreakPoint> {
        let mut active: Vec<_> = self
            .registry
            .iter()
            .filter(|bp| self.match_media.is_active(&bp.media_query))
            .cloned()
            .collect();
        sort_descending_priority(&mut active);
        active
    }

    /// The highest priority active breakpoint that is not an overlap.
    pub fn active(&self) -> Option<BreakPoint> {
        self.active_breakpoints()
            .into_iter()
            .find(|bp| !bp.overlapping)
    }

    pub fn active_overlaps(&self) -> Vec<BreakPoint> {
        self.active_breakpoints()
            .into_iter()
            .filter(|bp| bp.overlapping)
            .collect()
    }

    pub fn active_aliases(&self) -> Vec<String> {
        self.active_breakpoints()
            .into_iter()
            .map(|bp| bp.alias)
            .collect()
    }
}

fn inject_alias(registry: &BreakPointRegistry, change: MediaChange) -> MediaChange {
    match registry.find_by_query(&change.media_query) {
        Some(bp) => change.with_breakpoint(bp),
        None => change,
    }
}
