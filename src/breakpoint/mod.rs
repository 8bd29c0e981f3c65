//! Named breakpoints.
//!
//! A [`BreakPoint`] pairs a short alias (`"xs"`, `"gt-md"`, `"print"`) with the media
//! query that decides whether it is active. Breakpoints are collected into a
//! [`BreakPointRegistry`] once at startup and never change afterwards.

mod defaults;
mod registry;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub use defaults::{default_breakpoints, orientation_breakpoints, print_breakpoint};
pub use registry::BreakPointRegistry;

use crate::error::BreakPointError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreakPoint {
    pub alias: String,
    pub media_query: String,
    /// Higher wins when several breakpoints are active at once.
    #[serde(default)]
    pub priority: i32,
    /// Superset ranges such as `gt-sm`. These only act as fallbacks.
    #[serde(default)]
    pub overlapping: bool,
    /// Appended to a base property key to form the breakpoint specific input key.
    #[serde(default)]
    pub suffix: String,
}

impl BreakPoint {
    pub fn new(alias: impl Into<String>, media_query: impl Into<String>, priority: i32) -> Self {
        let alias = alias.into();
        let suffix = suffix_for(&alias);
        Self {
            alias,
            media_query: media_query.into(),
            priority,
            overlapping: false,
            suffix,
        }
    }

    pub fn overlapping(mut self) -> Self {
        self.overlapping = true;
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// The input key this breakpoint selects for `base_key`, e.g. `layoutGtSm`.
    pub fn key_for(&self, base_key: &str) -> String {
        format!("{base_key}{}", self.suffix)
    }

    pub(crate) fn validate(&self) -> Result<(), BreakPointError> {
        if self.alias.trim().is_empty() {
            return Err(BreakPointError::EmptyAlias);
        }
        if self.media_query.trim().is_empty() {
            return Err(BreakPointError::EmptyQuery {
                alias: self.alias.clone(),
            });
        }
        Ok(())
    }
}

/// A caller supplied breakpoint that is merged into the defaults by alias.
///
/// Fields left as `None` keep the value of the default entry with the same alias.
/// A custom entry with a novel alias must provide a media query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBreakPoint {
    pub alias: String,
    #[serde(default)]
    pub media_query: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub overlapping: Option<bool>,
    #[serde(default)]
    pub suffix: Option<String>,
}

impl CustomBreakPoint {
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            ..Default::default()
        }
    }

    pub fn media_query(mut self, query: impl Into<String>) -> Self {
        self.media_query = Some(query.into());
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn overlapping(mut self, overlapping: bool) -> Self {
        self.overlapping = Some(overlapping);
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Overwrites the fields this entry sets, keeping the rest of `target`.
    pub(crate) fn apply_to(&self, target: &mut BreakPoint) {
        if let Some(query) = &self.media_query {
            target.media_query.clone_from(query);
        }
        if let Some(priority) = self.priority {
            target.priority = priority;
        }
        if let Some(overlapping) = self.overlapping {
            target.overlapping = overlapping;
        }
        if let Some(suffix) = &self.suffix {
            target.suffix.clone_from(suffix);
        }
    }

    pub(crate) fn to_breakpoint(&self) -> Result<BreakPoint, BreakPointError> {
        if self.alias.trim().is_empty() {
            return Err(BreakPointError::EmptyAlias);
        }
        let Some(query) = &self.media_query else {
            return Err(BreakPointError::MissingQuery {
                alias: self.alias.clone(),
            });
        };
        let mut bp = BreakPoint::new(self.alias.clone(), query.clone(), 0);
        self.apply_to(&mut bp);
        bp.validate()?;
        Ok(bp)
    }
}

impl From<BreakPoint> for CustomBreakPoint {
    fn from(bp: BreakPoint) -> Self {
        Self {
            alias: bp.alias,
            media_query: Some(bp.media_query),
            priority: Some(bp.priority),
            overlapping: Some(bp.overlapping),
            suffix: (!bp.suffix.is_empty()).then_some(bp.suffix),
        }
    }
}

/// Builds the input key suffix for an alias: `gt-sm` becomes `GtSm` and
/// `handset.portrait` becomes `HandsetPortrait`.
pub fn suffix_for(alias: &str) -> String {
    alias
        .split(['-', '.', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Ordering used whenever several active breakpoints compete.
///
/// Priority is the only real key. Non-overlapping breakpoints sort ahead of
/// overlapping ones when priorities tie.
pub fn compare_priority(a: &BreakPoint, b: &BreakPoint) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.overlapping.cmp(&b.overlapping))
}

pub fn sort_descending_priority(list: &mut [BreakPoint]) {
    list.sort_by(compare_priority);
}

pub fn sort_ascending_priority(list: &mut [BreakPoint]) {
    list.sort_by(|a, b| compare_priority(b, a));
}
