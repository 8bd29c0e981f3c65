//! # Floem Responsive
//! Breakpoint driven values for responsive layouts.
//!
//! A property such as `layout` can be bound to several values at once, each scoped
//! to a named breakpoint:
//!
//! ```text
//! layout        = "row"
//! layoutXs      = "column"
//! layoutGtSm    = "row-reverse"
//! ```
//!
//! Whenever the set of active breakpoints changes, the value that applies is
//! recomputed and handed to a style callback.
//!
//! ## Pieces
//!
//! - [`BreakPointRegistry`](breakpoint::BreakPointRegistry): the named breakpoints,
//!   built once from the defaults, optional extra sets and custom entries.
//! - [`MatchMedia`](media::MatchMedia): tracks which media queries match and
//!   broadcasts every activation and deactivation on a single stream. The
//!   platform's query primitive is abstracted as a
//!   [`MediaPlatform`](media::MediaPlatform); without one every query falls
//!   back to a static answer.
//! - [`MediaObserver`](media::MediaObserver): adds breakpoint aliases to that
//!   stream and hides overlapping breakpoints from general listeners.
//! - [`ResponsiveActivation`](responsive::ResponsiveActivation): resolves the value
//!   in effect for one property.
//! - [`StyleMarshaller`](marshal::StyleMarshaller): one resolver per element and
//!   property, routed to update and clear callbacks.
//!
//! [`LayoutRoot`] wires all of them together.
//!
//! ## Example
//! ```rust
//! use floem_responsive::LayoutRoot;
//! use floem_responsive::config::LayoutConfig;
//! use floem_responsive::responsive::KeyOptions;
//!
//! let root: LayoutRoot<u32, &str> = LayoutRoot::mocked(&LayoutConfig::default()).unwrap();
//! let layout = root.activation(
//!     KeyOptions::new("layout")
//!         .base("row")
//!         .input("layoutXs", "column")
//!         .input("layoutGtSm", "row-reverse"),
//!     |_| {},
//! );
//!
//! let mock = root.mock().unwrap();
//! mock.activate("xs", false);
//! assert_eq!(layout.activated_input(), Some("column"));
//! mock.activate("md", true);
//! assert_eq!(layout.activated_input(), Some("row-reverse"));
//! ```
//!
//! Everything runs on one thread. Changes are delivered synchronously from the
//! platform callback that reported them, and nothing is queued.

pub mod breakpoint;
pub mod config;
pub mod error;
mod layout;
pub mod marshal;
pub mod media;
pub mod responsive;
pub mod stream;

pub use layout::LayoutRoot;
