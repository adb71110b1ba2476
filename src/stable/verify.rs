//! Blocking-pair detection.

use std::collections::HashMap;

use super::types::{Agent, Match, PreferenceTable};

/// Lists every blocking pair of `matches` as (group 1 agent, group 2 agent).
///
/// A pair `(a, b)` blocks when they are not matched to each other, `a`
/// ranks `b` above its partner, and `b` ranks `a` above its partner. An
/// agent without a partner prefers anyone on its list to staying alone.
///
/// Tables are assumed to be valid; agents or candidates that do not appear
/// in both tables are ignored.
///
/// # Examples
///
/// ```
/// use u_matching::stable::{blocking_pairs, Match, PreferenceTable};
///
/// let g1 = PreferenceTable::new().with_agent("A", ["X", "Y"]);
/// let g2 = PreferenceTable::new()
///     .with_agent("X", ["A"])
///     .with_agent("Y", ["A"]);
///
/// let worse = vec![Match { agent1: "A", agent2: "Y", ranks: None }];
/// assert_eq!(blocking_pairs(&g1, &g2, &worse), vec![("A", "X")]);
/// ```
pub fn blocking_pairs<A: Agent>(
    group1: &PreferenceTable<A>,
    group2: &PreferenceTable<A>,
    matches: &[Match<A>],
) -> Vec<(A, A)> {
    let partner1: HashMap<&A, &A> = matches.iter().map(|m| (&m.agent1, &m.agent2)).collect();
    let partner2: HashMap<&A, &A> = matches.iter().map(|m| (&m.agent2, &m.agent1)).collect();

    // rank2[b][a]: position of a in b's ranking.
    let rank2: HashMap<&A, HashMap<&A, usize>> = group2
        .iter()
        .map(|(b, ranking)| (b, ranking.iter().enumerate().map(|(i, a)| (a, i)).collect()))
        .collect();

    let mut blocking = Vec::new();
    for (a, ranking) in group1.iter() {
        let current = partner1.get(a).copied();
        for b in ranking {
            if Some(b) == current {
                break;
            }
            let Some(b_ranks) = rank2.get(b) else {
                continue;
            };
            let Some(&a_rank) = b_ranks.get(a) else {
                continue;
            };
            let b_prefers_a = match partner2.get(b) {
                None => true,
                Some(held) => b_ranks.get(*held).map_or(true, |&held_rank| a_rank < held_rank),
            };
            if b_prefers_a {
                blocking.push((a.clone(), b.clone()));
            }
        }
    }
    blocking
}

/// Whether `matches` has no blocking pair.
pub fn is_stable<A: Agent>(
    group1: &PreferenceTable<A>,
    group2: &PreferenceTable<A>,
    matches: &[Match<A>],
) -> bool {
    blocking_pairs(group1, group2, matches).is_empty()
}
