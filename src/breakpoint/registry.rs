use tracing::warn;

use super::{
    BreakPoint, CustomBreakPoint, default_breakpoints, orientation_breakpoints, print_breakpoint,
    suffix_for,
};
use crate::{config::LayoutConfig, error::BreakPointError};

/// The ordered catalog of breakpoints known to the application.
///
/// Built once, then only read. Accessors that hand out lists return copies so
/// the registry itself can never be changed through them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreakPointRegistry {
    items: Vec<BreakPoint>,
}

impl BreakPointRegistry {
    pub fn new(items: Vec<BreakPoint>) -> Self {
        let items = items
            .into_iter()
            .map(|mut bp| {
                if bp.suffix.is_empty() {
                    bp.suffix = suffix_for(&bp.alias);
                }
                bp
            })
            .collect();
        Self { items }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_breakpoints())
    }

    pub fn from_config(config: &LayoutConfig) -> Result<Self, BreakPointError> {
        let mut items = if config.disable_default_bps {
            Vec::new()
        } else {
            default_breakpoints()
        };
        if config.add_orientation_bps {
            items.extend(orientation_breakpoints());
        }
        if config.add_print_bp {
            items.push(print_breakpoint());
        }
        Self::new(items).merged(&config.breakpoints)
    }

    /// Merges `customs` by alias.
    ///
    /// An entry whose alias already exists overwrites the fields it sets and keeps
    /// its position. Any other entry is appended. Merging the same list twice
    /// gives the same registry as merging it once.
    pub fn merged(mut self, customs: &[CustomBreakPoint]) -> Result<Self, BreakPointError> {
        for custom in customs {
            match self.items.iter_mut().find(|bp| bp.alias == custom.alias) {
                Some(existing) => {
                    custom.apply_to(existing);
                    if let Err(err) = existing.validate() {
                        warn!(alias = %custom.alias, %err, "rejected breakpoint override");
                        return Err(err);
                    }
                }
                None => {
                    let bp = custom.to_breakpoint().inspect_err(|err| {
                        warn!(alias = %custom.alias, %err, "rejected custom breakpoint");
                    })?;
                    self.items.push(bp);
                }
            }
        }
        Ok(self)
    }

    pub fn find_by_alias(&self, alias: &str) -> Option<&BreakPoint> {
        self.items.iter().find(|bp| bp.alias == alias)
    }

    pub fn find_by_query(&self, query: &str) -> Option<&BreakPoint> {
        self.items.iter().find(|bp| bp.media_query == query)
    }

    /// Looks `key` up as an alias first, then as a media query.
    pub fn find(&self, key: &str) -> Option<&BreakPoint> {
        self.find_by_alias(key).or_else(|| self.find_by_query(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BreakPoint> {
        self.items.iter()
    }

    pub fn items(&self) -> Vec<BreakPoint> {
        self.items.clone()
    }

    pub fn overlappings(&self) -> Vec<BreakPoint> {
        self.items
            .iter()
            .filter(|bp| bp.overlapping)
            .cloned()
            .collect()
    }

    pub fn aliases(&self) -> Vec<String> {
        self.items.iter().map(|bp| bp.alias.clone()).collect()
    }

    pub fn suffixes(&self) -> Vec<String> {
        self.items.iter().map(|bp| bp.suffix.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
