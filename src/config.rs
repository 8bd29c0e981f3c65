//! Layout configuration.
//!
//! ```rust
//! use floem_responsive::config::LayoutConfig;
//!
//! let config = LayoutConfig::from_json(
//!     r#"{ "add_print_bp": true, "breakpoints": [{ "alias": "md", "priority": 10 }] }"#,
//! )
//! .unwrap();
//! assert!(config.add_print_bp);
//! assert!(config.filter_overlaps);
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    breakpoint::CustomBreakPoint,
    error::{BreakPointError, ConfigError},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Start from an empty breakpoint list instead of the defaults.
    pub disable_default_bps: bool,
    /// Append the handset / tablet / web orientation breakpoints.
    pub add_orientation_bps: bool,
    /// Append the `print` breakpoint.
    pub add_print_bp: bool,
    /// Keep overlapping breakpoints out of the general media change stream.
    pub filter_overlaps: bool,
    /// Merged by alias into the breakpoint list.
    pub breakpoints: Vec<CustomBreakPoint>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            disable_default_bps: false,
            add_orientation_bps: false,
            add_print_bp: false,
            filter_overlaps: true,
            breakpoints: Vec::new(),
        }
    }
}

impl LayoutConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        // Queries are only known to be required once merged, so check aliases here.
        for custom in &config.breakpoints {
            if custom.alias.trim().is_empty() {
                return Err(BreakPointError::EmptyAlias.into());
            }
        }
        Ok(config)
    }
}
