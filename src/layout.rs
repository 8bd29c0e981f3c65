use std::{fmt, hash::Hash, rc::Rc};

use crate::{
    breakpoint::BreakPointRegistry,
    config::LayoutConfig,
    error::{BreakPointError, ConfigError},
    marshal::StyleMarshaller,
    media::{HeadlessPlatform, MatchMedia, MediaObserver, MediaPlatform, mock::MockMediaPlatform},
    responsive::{KeyOptions, ResponsiveActivation, ValueChange},
};

/// Owns the registry, activation source, observer and marshaller of one
/// application.
///
/// Everything here is shared by reference. Create one `LayoutRoot` at startup
/// and pass it (or the parts it hands out) to whatever needs it.
pub struct LayoutRoot<E, V: Clone + PartialEq + 'static> {
    config: LayoutConfig,
    registry: Rc<BreakPointRegistry>,
    match_media: Rc<MatchMedia>,
    observer: Rc<MediaObserver>,
    marshaller: StyleMarshaller<E, V>,
    mock: Option<Rc<MockMediaPlatform>>,
}

impl<E: fmt::Debug, V: Clone + PartialEq + 'static> fmt::Debug for LayoutRoot<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRoot")
            .field("config", &self.config)
            .field("breakpoints", &self.registry.len())
            .field("match_media", &self.match_media)
            .field("marshaller", &self.marshaller)
            .field("mocked", &self.mock.is_some())
            .finish()
    }
}

impl<E, V> LayoutRoot<E, V>
where
    E: Eq + Hash + Clone + fmt::Debug + 'static,
    V: Clone + PartialEq + 'static,
{
    pub fn new(
        config: &LayoutConfig,
        platform: Rc<dyn MediaPlatform>,
    ) -> Result<Self, BreakPointError> {
        let registry = Rc::new(BreakPointRegistry::from_config(config)?);
        Ok(Self::assemble(config, registry, platform, None))
    }

    pub fn from_json(json: &str, platform: Rc<dyn MediaPlatform>) -> Result<Self, ConfigError> {
        let config = LayoutConfig::from_json(json)?;
        Ok(Self::new(&config, platform)?)
    }

    /// A root without media query support. Only the universal query matches.
    pub fn headless(config: &LayoutConfig) -> Result<Self, BreakPointError> {
        Self::new(config, Rc::new(HeadlessPlatform))
    }

    /// A root driven by a [`MockMediaPlatform`], reachable through [`mock`](Self::mock).
    pub fn mocked(config: &LayoutConfig) -> Result<Self, BreakPointError> {
        let registry = Rc::new(BreakPointRegistry::from_config(config)?);
        let mock = Rc::new(MockMediaPlatform::new(registry.clone()));
        Ok(Self::assemble(config, registry, mock.clone(), Some(mock)))
    }

    fn assemble(
        config: &LayoutConfig,
        registry: Rc<BreakPointRegistry>,
        platform: Rc<dyn MediaPlatform>,
        mock: Option<Rc<MockMediaPlatform>>,
    ) -> Self {
        let match_media = Rc::new(MatchMedia::new(platform));
        let observer = Rc::new(
            MediaObserver::new(match_media.clone(), registry.clone())
                .filter_overlaps(config.filter_overlaps),
        );
        Self {
            config: config.clone(),
            registry,
            match_media,
            marshaller: StyleMarshaller::new(observer.clone()),
            observer,
            mock,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn registry(&self) -> &Rc<BreakPointRegistry> {
        &self.registry
    }

    pub fn match_media(&self) -> &Rc<MatchMedia> {
        &self.match_media
    }

    pub fn observer(&self) -> &Rc<MediaObserver> {
        &self.observer
    }

    pub fn marshaller(&self) -> &StyleMarshaller<E, V> {
        &self.marshaller
    }

    pub fn mock(&self) -> Option<&Rc<MockMediaPlatform>> {
        self.mock.as_ref()
    }

    /// A standalone resolver that is not managed by the marshaller.
    pub fn activation<T: Clone + PartialEq + 'static>(
        &self,
        options: KeyOptions<T>,
        on_change: impl Fn(&ValueChange<T>) + 'static,
    ) -> ResponsiveActivation<T> {
        ResponsiveActivation::new(options, self.observer.clone(), on_change)
    }
}
