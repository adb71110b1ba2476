//! Two-sided stable matching by deferred acceptance (Gale-Shapley).
//!
//! Two groups of agents each rank every member of the other group. The
//! smaller group proposes, the other group tentatively accepts and trades
//! up, and the final pairing has no blocking pair: no two agents who are
//! not matched together both prefer each other to their partners.
//!
//! Every member of the smaller group is matched. Members of the larger
//! group may stay alone.
//!
//! # References
//!
//! - Gale, D. & Shapley, L. S. (1962). "College Admissions and the Stability
//!   of Marriage", *The American Mathematical Monthly* 69(1), 9-15.
//! - Gusfield, D. & Irving, R. W. (1989). *The Stable Marriage Problem:
//!   Structure and Algorithms*. MIT Press.

mod config;
mod runner;
mod types;
mod verify;

pub use config::{ProposalOrder, StableConfig};
pub use runner::{stable_match, StableResult, StableRunner};
pub use types::{Agent, Group, Match, MatchRanks, MatchWarning, PreferenceTable};
pub use verify::{blocking_pairs, is_stable};
