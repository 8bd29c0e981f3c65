use std::rc::Rc;

use super::ALL_MEDIA;

/// Called with the new match state whenever a query starts or stops matching.
pub type MediaQueryListener = Rc<dyn Fn(bool)>;

/// The platform's handle for one media query.
pub trait MediaQueryList {
    fn media(&self) -> &str;

    fn matches(&self) -> bool;

    fn add_listener(&self, listener: MediaQueryListener);
}

/// Creates [`MediaQueryList`]s.
///
/// Returning `None` means the platform cannot evaluate media queries at all,
/// for example when running headless. Callers then fall back to a
/// [`StaticMediaQueryList`].
pub trait MediaPlatform {
    fn match_media(&self, query: &str) -> Option<Rc<dyn MediaQueryList>>;
}

/// A query whose state never changes.
///
/// Only the universal query (`all`, or an empty string) matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaticMediaQueryList {
    media: String,
    matches: bool,
}

impl StaticMediaQueryList {
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            media: query.to_string(),
            matches: trimmed.is_empty() || trimmed == ALL_MEDIA,
        }
    }
}

impl MediaQueryList for StaticMediaQueryList {
    fn media(&self) -> &str {
        &self.media
    }

    fn matches(&self) -> bool {
        self.matches
    }

    fn add_listener(&self, _listener: MediaQueryListener) {}
}

/// A platform without any media query support.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessPlatform;

impl MediaPlatform for HeadlessPlatform {
    fn match_media(&self, _query: &str) -> Option<Rc<dyn MediaQueryList>> {
        None
    }
}
