//! Media query activation.
//!
//! [`MatchMedia`] tracks whether each registered query currently matches and
//! publishes every change on one shared stream. [`MediaObserver`] layers the
//! breakpoint registry on top of it, so that changes carry their alias.

mod match_media;
pub mod mock;
mod observer;
mod platform;

pub use match_media::MatchMedia;
pub use observer::MediaObserver;
pub use platform::{
    HeadlessPlatform, MediaPlatform, MediaQueryList, MediaQueryListener, StaticMediaQueryList,
};

use crate::{breakpoint::BreakPoint, stream::Observable};

/// The query every platform treats as always matching.
pub const ALL_MEDIA: &str = "all";

pub type MediaObservable = Observable<MediaChange>;

/// One activation or deactivation of a media query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MediaChange {
    pub matches: bool,
    pub media_query: String,
    /// Empty for queries that are not in the breakpoint registry.
    pub mq_alias: String,
    pub priority: i32,
    pub suffix: String,
}

impl MediaChange {
    pub fn new(matches: bool, media_query: impl Into<String>) -> Self {
        Self {
            matches,
            media_query: media_query.into(),
            mq_alias: String::new(),
            priority: 0,
            suffix: String::new(),
        }
    }

    /// The change every media stream starts with.
    pub fn all() -> Self {
        Self {
            mq_alias: ALL_MEDIA.to_string(),
            ..Self::new(true, ALL_MEDIA)
        }
    }

    pub fn with_breakpoint(mut self, bp: &BreakPoint) -> Self {
        self.mq_alias.clone_from(&bp.alias);
        self.priority = bp.priority;
        self.suffix.clone_from(&bp.suffix);
        self
    }

    pub fn has_alias(&self) -> bool {
        !self.mq_alias.is_empty()
    }
}
