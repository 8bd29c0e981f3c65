//! Error types for breakpoint and configuration setup.
//!
//! Only construction can fail. Once a registry and a [`MatchMedia`](crate::media::MatchMedia)
//! exist, every lookup and resolution degrades to `None` or empty metadata instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BreakPointError {
    #[error("breakpoint alias must not be empty")]
    EmptyAlias,
    #[error("breakpoint `{alias}` has an empty media query")]
    EmptyQuery { alias: String },
    #[error("breakpoint `{alias}` is new and needs a media query")]
    MissingQuery { alias: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse layout config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    BreakPoint(#[from] BreakPointError),
}
