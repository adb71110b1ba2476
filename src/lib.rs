//! Domain-agnostic two-sided matching.
//!
//! Provides:
//!
//! - **Stable matching**: Deferred acceptance (Gale-Shapley) over two
//!   groups that rank each other, with configurable proposer order,
//!   optional rank annotations, and a blocking-pair checker.
//!
//! # Architecture
//!
//! This crate sits at Layer 2 (Algorithms) in the U-Engine ecosystem. It
//! contains no domain-specific concepts: students and schools, workers and
//! shifts, etc. are defined by consumers at higher layers. Agents are any
//! hashable key type.
//!
//! Weighted assignment (Hungarian-style) and non-bipartite matching are
//! out of scope.
//!
//! # Example
//!
//! ```
//! use u_matching::stable::{is_stable, stable_match, PreferenceTable};
//!
//! let students = PreferenceTable::new()
//!     .with_agent("ann", ["north", "south"])
//!     .with_agent("bob", ["north", "south"]);
//! let schools = PreferenceTable::new()
//!     .with_agent("north", ["bob", "ann"])
//!     .with_agent("south", ["ann", "bob"]);
//!
//! let matches = stable_match(&students, &schools, false)?;
//! assert!(is_stable(&students, &schools, &matches));
//! # Ok::<(), u_matching::MatchError>(())
//! ```

pub mod error;
pub mod stable;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{MatchError, ValidationError};
