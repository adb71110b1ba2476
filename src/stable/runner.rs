//! Deferred acceptance execution engine.
//!
//! # Algorithm
//!
//! 1. Validate both tables and replace agents by dense indices
//! 2. Let the not-larger group propose (swap roles if needed)
//! 3. While some proposer is free:
//!    a. Take a free proposer according to [`ProposalOrder`]
//!    b. Propose to the best receiver it has not proposed to yet
//!    c. An unheld receiver accepts; a held receiver keeps whichever of
//!       the two suitors it ranks higher and frees the other
//! 4. Report held pairs in the caller's group order
//!
//! Every proposer proposes at most once to each receiver, so a run makes
//! at most `|G1| * |G2|` proposals.
//!
//! # Reference
//!
//! Gale, D. & Shapley, L. S. (1962). "College Admissions and the Stability
//! of Marriage", *The American Mathematical Monthly* 69(1), 9-15.

use std::collections::{HashMap, VecDeque};

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::{ProposalOrder, StableConfig};
use super::types::{Agent, Group, Match, MatchRanks, MatchWarning, PreferenceTable};
use crate::error::{MatchError, ValidationError};

/// Result of a stable matching run.
#[derive(Debug, Clone)]
pub struct StableResult<A> {
    /// Matched pairs as (group 1 agent, group 2 agent), in the table order
    /// of the receiving group.
    pub matches: Vec<Match<A>>,
    /// Members of the larger group left without a partner, in table order.
    pub unmatched: Vec<A>,
    /// Notices about the input shape.
    pub warnings: Vec<MatchWarning>,
    /// Total proposals made.
    pub proposals: usize,
    /// Whether group 2 proposed because group 1 was larger.
    pub swapped: bool,
}

/// Stable matching runner.
pub struct StableRunner;

impl StableRunner {
    /// Computes a stable matching between two groups.
    ///
    /// The smaller group (group 1 on ties) proposes, so every member of it
    /// ends up matched and the result is optimal for that side.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Validation`] when a table is empty, has a
    /// duplicate key, or contains a ranking that is not a permutation of
    /// the opposing group.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_matching::stable::{PreferenceTable, StableConfig, StableRunner};
    ///
    /// let g1 = PreferenceTable::new().with_agent("A", ["X", "Y"]);
    /// let g2 = PreferenceTable::new()
    ///     .with_agent("X", ["A"])
    ///     .with_agent("Y", ["A"]);
    ///
    /// let result = StableRunner::run(&g1, &g2, &StableConfig::default()).unwrap();
    /// assert_eq!(result.matches[0].pair(), (&"A", &"X"));
    /// assert_eq!(result.unmatched, vec!["Y"]);
    /// ```
    pub fn run<A: Agent>(
        group1: &PreferenceTable<A>,
        group2: &PreferenceTable<A>,
        config: &StableConfig,
    ) -> Result<StableResult<A>, MatchError> {
        let (first, second) = index_groups(group1, group2)?;
        let (n1, n2) = (first.agents.len(), second.agents.len());

        let mut warnings = Vec::new();
        if n1 != n2 {
            warn!("groups differ in size ({n1} vs {n2}); some agents will remain unmatched");
            warnings.push(MatchWarning::GroupSizeMismatch {
                group1: n1,
                group2: n2,
            });
        }

        let swapped = n1 > n2;
        let (proposers, receivers) = if swapped {
            warn!("group 1 ({n1}) is larger than group 2 ({n2}); group 2 proposes");
            warnings.push(MatchWarning::GroupsSwapped {
                group1: n1,
                group2: n2,
            });
            (&second, &first)
        } else {
            (&first, &second)
        };

        let state = propose(proposers, receivers, config)?;

        let mut matches = Vec::with_capacity(proposers.agents.len());
        let mut unmatched = Vec::new();
        for (r, suitor) in state.suitor.iter().enumerate() {
            let receiver = receivers.agents[r];
            let Some(p) = *suitor else {
                unmatched.push(receiver.clone());
                continue;
            };
            let proposer = proposers.agents[p];

            // A held proposer's partner is always its most recent proposal.
            let by_proposer = state.next_proposal[p] - 1;
            let by_receiver = state.receiver_rank[r][p];

            let (agent1, agent2, rank_by_agent1, rank_by_agent2) = if swapped {
                (receiver, proposer, by_receiver, by_proposer)
            } else {
                (proposer, receiver, by_proposer, by_receiver)
            };
            matches.push(Match {
                agent1: agent1.clone(),
                agent2: agent2.clone(),
                ranks: config.include_ranks.then_some(MatchRanks {
                    rank_by_agent1,
                    rank_by_agent2,
                }),
            });
        }

        debug!(
            "stable matching: {} pairs, {} unmatched, {} proposals ({:?} order)",
            matches.len(),
            unmatched.len(),
            state.proposals,
            config.proposal_order
        );

        Ok(StableResult {
            matches,
            unmatched,
            warnings,
            proposals: state.proposals,
            swapped,
        })
    }

    /// Solves several independent matching problems with the same config.
    ///
    /// With the `parallel` feature the problems are spread over the rayon
    /// thread pool. Results keep the input order.
    pub fn run_batch<A: Agent + Send + Sync>(
        problems: &[(PreferenceTable<A>, PreferenceTable<A>)],
        config: &StableConfig,
    ) -> Vec<Result<StableResult<A>, MatchError>> {
        #[cfg(feature = "parallel")]
        {
            problems
                .par_iter()
                .map(|(group1, group2)| Self::run(group1, group2, config))
                .collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            problems
                .iter()
                .map(|(group1, group2)| Self::run(group1, group2, config))
                .collect()
        }
    }
}

/// Computes a stable matching with default settings.
///
/// Returns the matched pairs as (group 1 agent, group 2 agent), annotated
/// with ranks when `include_ranks` is set. Use [`StableRunner::run`] to get
/// warnings, unmatched agents, and the proposal count.
///
/// # Examples
///
/// ```
/// use u_matching::stable::{stable_match, PreferenceTable};
///
/// let g1: PreferenceTable<&str> = [("A", ["X", "Y"]), ("B", ["Y", "X"])]
///     .into_iter()
///     .collect();
/// let g2: PreferenceTable<&str> = [("X", ["B", "A"]), ("Y", ["A", "B"])]
///     .into_iter()
///     .collect();
///
/// let matches = stable_match(&g1, &g2, true).unwrap();
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].ranks.unwrap().rank_by_agent1, 0);
/// ```
pub fn stable_match<A: Agent>(
    group1: &PreferenceTable<A>,
    group2: &PreferenceTable<A>,
    include_ranks: bool,
) -> Result<Vec<Match<A>>, MatchError> {
    let config = StableConfig::default().with_include_ranks(include_ranks);
    StableRunner::run(group1, group2, &config).map(|result| result.matches)
}

/// A validated table with agents replaced by dense indices.
struct IndexedGroup<'a, A> {
    agents: Vec<&'a A>,
    /// `rankings[i]` holds opposing indices, best first.
    rankings: Vec<Vec<usize>>,
}

fn index_groups<'a, A: Agent>(
    group1: &'a PreferenceTable<A>,
    group2: &'a PreferenceTable<A>,
) -> Result<(IndexedGroup<'a, A>, IndexedGroup<'a, A>), ValidationError> {
    let keys1 = index_keys(group1, Group::First)?;
    let keys2 = index_keys(group2, Group::Second)?;
    let agents1: Vec<&A> = group1.agents().collect();
    let agents2: Vec<&A> = group2.agents().collect();

    let first = index_rankings(group1, Group::First, &keys2, &agents2)?;
    let second = index_rankings(group2, Group::Second, &keys1, &agents1)?;
    Ok((first, second))
}

fn index_keys<A: Agent>(
    table: &PreferenceTable<A>,
    group: Group,
) -> Result<HashMap<&A, usize>, ValidationError> {
    if table.is_empty() {
        return Err(ValidationError::EmptyGroup { group });
    }
    let mut keys = HashMap::with_capacity(table.len());
    for (i, agent) in table.agents().enumerate() {
        if keys.insert(agent, i).is_some() {
            return Err(ValidationError::DuplicateAgent {
                group,
                agent: format!("{agent:?}"),
            });
        }
    }
    Ok(keys)
}

fn index_rankings<'a, A: Agent>(
    table: &'a PreferenceTable<A>,
    group: Group,
    opposing: &HashMap<&A, usize>,
    opposing_agents: &[&A],
) -> Result<IndexedGroup<'a, A>, ValidationError> {
    let mut agents = Vec::with_capacity(table.len());
    let mut rankings = Vec::with_capacity(table.len());

    for (agent, ranking) in table.iter() {
        let mut seen = vec![false; opposing_agents.len()];
        let mut indexed = Vec::with_capacity(ranking.len());

        for candidate in ranking {
            let &c = opposing
                .get(candidate)
                .ok_or_else(|| ValidationError::UnknownCandidate {
                    group,
                    agent: format!("{agent:?}"),
                    candidate: format!("{candidate:?}"),
                })?;
            if seen[c] {
                return Err(ValidationError::DuplicateCandidate {
                    group,
                    agent: format!("{agent:?}"),
                    candidate: format!("{candidate:?}"),
                });
            }
            seen[c] = true;
            indexed.push(c);
        }

        if let Some(missing) = seen.iter().position(|&s| !s) {
            return Err(ValidationError::MissingCandidate {
                group,
                agent: format!("{agent:?}"),
                candidate: format!("{:?}", opposing_agents[missing]),
            });
        }

        agents.push(agent);
        rankings.push(indexed);
    }

    Ok(IndexedGroup { agents, rankings })
}

/// Free proposers, handed out in the configured order.
struct FreeProposers {
    order: ProposalOrder,
    queue: VecDeque<usize>,
    rng: StdRng,
}

impl FreeProposers {
    fn new(count: usize, config: &StableConfig) -> Self {
        Self {
            order: config.proposal_order,
            queue: (0..count).collect(),
            rng: StdRng::seed_from_u64(config.seed.unwrap_or(42)),
        }
    }

    fn pop(&mut self) -> Option<usize> {
        match self.order {
            ProposalOrder::Lifo => self.queue.pop_back(),
            ProposalOrder::Fifo => self.queue.pop_front(),
            ProposalOrder::Random => {
                if self.queue.is_empty() {
                    return None;
                }
                let i = self.rng.random_range(0..self.queue.len());
                self.queue.swap_remove_back(i)
            }
        }
    }

    fn push(&mut self, proposer: usize) {
        self.queue.push_back(proposer);
    }
}

/// Final state of the proposal loop.
struct ProposalState {
    /// Receiver index -> held proposer.
    suitor: Vec<Option<usize>>,
    /// Proposer index -> position of its next candidate.
    next_proposal: Vec<usize>,
    /// `receiver_rank[r][p]` is the position of proposer `p` in `r`'s ranking.
    receiver_rank: Vec<Vec<usize>>,
    proposals: usize,
}

fn propose<A: Agent>(
    proposers: &IndexedGroup<'_, A>,
    receivers: &IndexedGroup<'_, A>,
    config: &StableConfig,
) -> Result<ProposalState, MatchError> {
    let receiver_rank: Vec<Vec<usize>> = receivers
        .rankings
        .iter()
        .map(|ranking| {
            let mut rank = vec![0; ranking.len()];
            for (position, &p) in ranking.iter().enumerate() {
                rank[p] = position;
            }
            rank
        })
        .collect();

    let mut suitor: Vec<Option<usize>> = vec![None; receivers.agents.len()];
    let mut next_proposal = vec![0usize; proposers.agents.len()];
    let mut free = FreeProposers::new(proposers.agents.len(), config);
    let mut proposals = 0usize;

    while let Some(s) = free.pop() {
        let ranking = &proposers.rankings[s];
        let Some(&favourite) = ranking.get(next_proposal[s]) else {
            return Err(MatchError::InvariantViolation {
                agent: format!("{:?}", proposers.agents[s]),
                ranked: ranking.len(),
            });
        };
        next_proposal[s] += 1;
        proposals += 1;

        match suitor[favourite] {
            None => {
                trace!(
                    "{:?} accepts {:?}",
                    receivers.agents[favourite],
                    proposers.agents[s]
                );
                suitor[favourite] = Some(s);
            }
            Some(prev) if receiver_rank[favourite][s] < receiver_rank[favourite][prev] => {
                trace!(
                    "{:?} dumps {:?} for {:?}",
                    receivers.agents[favourite],
                    proposers.agents[prev],
                    proposers.agents[s]
                );
                suitor[favourite] = Some(s);
                free.push(prev);
            }
            Some(_) => {
                trace!(
                    "{:?} rejects {:?}",
                    receivers.agents[favourite],
                    proposers.agents[s]
                );
                free.push(s);
            }
        }
    }

    Ok(ProposalState {
        suitor,
        next_proposal,
        receiver_rank,
        proposals,
    })
}
