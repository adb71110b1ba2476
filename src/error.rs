//! Error types for matching runs.
//!
//! Input problems are reported as [`ValidationError`] before any proposal
//! is made. A [`MatchError::InvariantViolation`] means the proposal loop
//! reached a state that valid, normalized input can never produce.

use thiserror::Error;

use crate::stable::Group;

/// Malformed preference tables.
///
/// Agents are rendered with their `Debug` representation so the error type
/// does not depend on the agent type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A group contains no agents.
    #[error("{group} has no agents")]
    EmptyGroup { group: Group },

    /// The same agent appears twice as a key of one table.
    #[error("{group} lists agent {agent} more than once")]
    DuplicateAgent { group: Group, agent: String },

    /// A ranking names an agent that is not in the opposing group.
    #[error("ranking of {agent} in {group} names {candidate}, which is not in the opposing group")]
    UnknownCandidate {
        group: Group,
        agent: String,
        candidate: String,
    },

    /// A ranking lists the same opposing agent twice.
    #[error("ranking of {agent} in {group} lists {candidate} more than once")]
    DuplicateCandidate {
        group: Group,
        agent: String,
        candidate: String,
    },

    /// A ranking leaves out a member of the opposing group.
    #[error("ranking of {agent} in {group} does not rank {candidate}")]
    MissingCandidate {
        group: Group,
        agent: String,
        candidate: String,
    },
}

/// Errors returned by [`StableRunner`](crate::stable::StableRunner).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The input tables are not valid preference tables.
    #[error("invalid preferences: {0}")]
    Validation(#[from] ValidationError),

    /// A proposer ran out of candidates. Not recoverable by the caller.
    #[error("invariant violated: {agent} exhausted all {ranked} candidates without being accepted")]
    InvariantViolation { agent: String, ranked: usize },
}

impl MatchError {
    /// Whether this error was caused by the input rather than by the matcher.
    pub fn is_validation(&self) -> bool {
        matches!(self, MatchError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_agents() {
        let err = ValidationError::MissingCandidate {
            group: Group::First,
            agent: "\"A\"".into(),
            candidate: "\"Y\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "ranking of \"A\" in group 1 does not rank \"Y\""
        );
    }

    #[test]
    fn test_from_validation_error() {
        let err: MatchError = ValidationError::EmptyGroup {
            group: Group::Second,
        }
        .into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "invalid preferences: group 2 has no agents");
    }

    #[test]
    fn test_invariant_violation_is_not_validation() {
        let err = MatchError::InvariantViolation {
            agent: "0".into(),
            ranked: 3,
        };
        assert!(!err.is_validation());
    }
}
