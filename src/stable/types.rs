//! Core data types for two-sided matching.

use std::fmt;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An agent identifier.
///
/// Anything that can be cloned, compared, hashed and debug-printed can act
/// as an agent: `&str`, `String`, integers, or a user-defined key type.
pub trait Agent: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Agent for T {}

/// One of the two sides of a matching problem, in the caller's order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Group {
    /// The group passed first.
    First,
    /// The group passed second.
    Second,
}

impl Group {
    /// Returns the opposing group.
    pub fn other(self) -> Self {
        match self {
            Group::First => Group::Second,
            Group::Second => Group::First,
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::First => write!(f, "group 1"),
            Group::Second => write!(f, "group 2"),
        }
    }
}

/// Rankings of one group over the members of the other group.
///
/// Each entry maps an agent to its ranking of the opposing group, best
/// first. Insertion order is kept: it decides the order in which matches
/// are reported and the initial order of proposers.
///
/// The table itself accepts anything; consistency with the opposing table
/// (every ranking a permutation of the opposing keys, no duplicate keys) is
/// checked when a run starts.
///
/// # Examples
///
/// ```
/// use u_matching::stable::PreferenceTable;
///
/// let students: PreferenceTable<&str> = [
///     ("A", vec!["X", "Y"]),
///     ("B", vec!["Y", "X"]),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(students.len(), 2);
/// assert_eq!(students.ranking(&"B"), Some(&["Y", "X"][..]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PreferenceTable<A> {
    entries: Vec<(A, Vec<A>)>,
}

impl<A> Default for PreferenceTable<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<A: Agent> PreferenceTable<A> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an agent with its ranking and returns the table.
    pub fn with_agent<I>(mut self, agent: A, ranking: I) -> Self
    where
        I: IntoIterator<Item = A>,
    {
        self.insert(agent, ranking);
        self
    }

    /// Appends an agent with its ranking.
    pub fn insert<I>(&mut self, agent: A, ranking: I)
    where
        I: IntoIterator<Item = A>,
    {
        self.entries.push((agent, ranking.into_iter().collect()));
    }

    /// Number of agents in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no agents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Agents in insertion order.
    pub fn agents(&self) -> impl Iterator<Item = &A> {
        self.entries.iter().map(|(agent, _)| agent)
    }

    /// `(agent, ranking)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&A, &[A])> {
        self.entries
            .iter()
            .map(|(agent, ranking)| (agent, ranking.as_slice()))
    }

    /// Ranking of `agent`, if present. Linear in the table size.
    pub fn ranking(&self, agent: &A) -> Option<&[A]> {
        self.entries
            .iter()
            .find(|(a, _)| a == agent)
            .map(|(_, ranking)| ranking.as_slice())
    }

    /// Zero-based position of `candidate` in `agent`'s ranking.
    pub fn rank_of(&self, agent: &A, candidate: &A) -> Option<usize> {
        self.ranking(agent)?.iter().position(|c| c == candidate)
    }
}

impl<A: Agent, R> FromIterator<(A, R)> for PreferenceTable<A>
where
    R: IntoIterator<Item = A>,
{
    fn from_iter<T: IntoIterator<Item = (A, R)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (agent, ranking) in iter {
            table.insert(agent, ranking);
        }
        table
    }
}

/// Each partner's position in the other's original ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchRanks {
    /// Position of `agent2` in `agent1`'s ranking (0 = first choice).
    pub rank_by_agent1: usize,
    /// Position of `agent1` in `agent2`'s ranking (0 = first choice).
    pub rank_by_agent2: usize,
}

/// A matched pair, always oriented as (group 1 agent, group 2 agent).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match<A> {
    /// Agent from the first group.
    pub agent1: A,
    /// Agent from the second group.
    pub agent2: A,
    /// Ranks, present when the run was configured with `include_ranks`.
    pub ranks: Option<MatchRanks>,
}

impl<A> Match<A> {
    /// The pair without ranks.
    pub fn pair(&self) -> (&A, &A) {
        (&self.agent1, &self.agent2)
    }
}

/// Non-fatal notices about the shape of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchWarning {
    /// The groups differ in size; some members of the larger group stay alone.
    GroupSizeMismatch { group1: usize, group2: usize },
    /// Group 1 was larger, so group 2 proposed. Output is still reported in
    /// the caller's order.
    GroupsSwapped { group1: usize, group2: usize },
}

impl fmt::Display for MatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchWarning::GroupSizeMismatch { group1, group2 } => write!(
                f,
                "groups differ in size ({group1} vs {group2}); some agents will remain unmatched"
            ),
            MatchWarning::GroupsSwapped { group1, group2 } => write!(
                f,
                "group 1 ({group1}) is larger than group 2 ({group2}); group 2 proposes"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_keeps_insertion_order() {
        let table = PreferenceTable::new()
            .with_agent("B", ["X", "Y"])
            .with_agent("A", ["Y", "X"]);
        let agents: Vec<_> = table.agents().copied().collect();
        assert_eq!(agents, vec!["B", "A"]);
    }

    #[test]
    fn test_rank_of() {
        let table: PreferenceTable<u32> = [(1, vec![10, 20, 30])].into_iter().collect();
        assert_eq!(table.rank_of(&1, &30), Some(2));
        assert_eq!(table.rank_of(&1, &40), None);
        assert_eq!(table.rank_of(&2, &10), None);
    }

    #[test]
    fn test_group_other_and_display() {
        assert_eq!(Group::First.other(), Group::Second);
        assert_eq!(Group::Second.other(), Group::First);
        assert_eq!(Group::First.to_string(), "group 1");
    }

    #[test]
    fn test_warning_display() {
        let w = MatchWarning::GroupsSwapped {
            group1: 3,
            group2: 2,
        };
        assert_eq!(
            w.to_string(),
            "group 1 (3) is larger than group 2 (2); group 2 proposes"
        );
    }
}
