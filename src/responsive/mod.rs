//! Breakpoint driven value resolution.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use floem_responsive::breakpoint::BreakPointRegistry;
//! use floem_responsive::media::{MatchMedia, MediaObserver, mock::MockMediaPlatform};
//! use floem_responsive::responsive::{KeyOptions, ResponsiveActivation};
//!
//! let registry = Rc::new(BreakPointRegistry::with_defaults());
//! let platform = Rc::new(MockMediaPlatform::new(registry.clone()));
//! let match_media = Rc::new(MatchMedia::new(platform.clone()));
//! let observer = Rc::new(MediaObserver::new(match_media, registry));
//!
//! let layout = ResponsiveActivation::new(
//!     KeyOptions::new("layout").base("row").input("layoutGtSm", "row-reverse"),
//!     observer,
//!     |change| println!("{} -> {:?}", change.property, change.value),
//! );
//!
//! platform.activate("md", true);
//! assert_eq!(layout.activated_input(), Some("row-reverse"));
//! platform.activate("xs", true);
//! assert_eq!(layout.activated_input(), Some("row"));
//! ```

mod activation;
mod key_options;

pub use activation::{ResolverState, ResponsiveActivation, ValueChange};
pub use key_options::KeyOptions;
