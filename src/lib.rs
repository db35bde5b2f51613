//! # peak-map
//!
//! peak-map is an in-memory, dynamically-updatable ordered mapping from an
//! argument domain to a value range (a function in the mathematical sense)
//! that simultaneously maintains, incrementally, the set of locally-maximal
//! points of that function. No mutation ever rescans the full domain: each
//! update reclassifies at most the mutated point and its two neighbors.
//!
//! ## Features
//! - Argument-ordered domain traversal and best-value-first maxima traversal
//! - A single fallible strict-weak ordering primitive per type, supplied as
//!   a strategy object ([`TryOrder`], defaulting to [`NaturalOrder`] for
//!   `Ord` types); no `==`, no `>`, no total order required
//! - Strong rollback guarantee: a failing comparison partway through
//!   [`PeakMap::set_value`] or [`PeakMap::erase`] leaves the map untouched
//! - Feature-gated invariant validation ([`DebugInvariants`]) for debugging
//!   and CI
//!
//! ## Usage
//! Add `peak-map` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! peak-map = "0.4.2"
//! # Optional features:
//! # features = ["check-invariants"]
//! ```
//!
//! ```rust
//! use peak_map::PeakMap;
//!
//! let mut f = PeakMap::new();
//! f.set_value("low", 1)?;
//! f.set_value("mid", 9)?;
//! f.set_value("top", 4)?;
//! assert_eq!(f.peak().map(|p| *p.arg()), Some("mid"));
//! # Ok::<(), peak_map::PeakMapError>(())
//! ```
//!
//! This structure is purely synchronous and not internally synchronized;
//! mutation requires `&mut self`, so exclusion across threads is the
//! caller's, and the borrow checker's, business.

pub mod debug_invariants;
pub mod error;
pub mod map;
pub mod order;

pub use debug_invariants::DebugInvariants;
pub use error::PeakMapError;
pub use map::{PeakMap, Point};
pub use order::{NaturalOrder, TryOrder};

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::error::PeakMapError;
    pub use crate::map::{PeakMap, Point};
    pub use crate::order::{NaturalOrder, TryOrder};
}
