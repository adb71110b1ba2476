//! Property tests for stable matching on random complete preference tables.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use u_matching::stable::{
    is_stable, stable_match, PreferenceTable, ProposalOrder, StableConfig, StableRunner,
};
use u_matching::{MatchError, ValidationError};

/// Group 1 agents are `0..n1`, group 2 agents are `1000..1000 + n2`.
fn random_instance(n1: usize, n2: usize, seed: u64) -> (PreferenceTable<u32>, PreferenceTable<u32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let ids1: Vec<u32> = (0..n1 as u32).collect();
    let ids2: Vec<u32> = (1000..1000 + n2 as u32).collect();

    let mut shuffled = |ids: &[u32]| {
        let mut ranking = ids.to_vec();
        ranking.shuffle(&mut rng);
        ranking
    };

    let mut g1 = PreferenceTable::new();
    for &a in &ids1 {
        g1.insert(a, shuffled(&ids2));
    }
    let mut g2 = PreferenceTable::new();
    for &b in &ids2 {
        g2.insert(b, shuffled(&ids1));
    }
    (g1, g2)
}

fn pair_set(matches: &[u_matching::stable::Match<u32>]) -> HashSet<(u32, u32)> {
    matches.iter().map(|m| (m.agent1, m.agent2)).collect()
}

proptest! {
    #[test]
    fn prop_result_is_stable(n1 in 1usize..9, n2 in 1usize..9, seed in any::<u64>()) {
        let (g1, g2) = random_instance(n1, n2, seed);
        let matches = stable_match(&g1, &g2, false).unwrap();
        prop_assert!(is_stable(&g1, &g2, &matches));
    }

    #[test]
    fn prop_smaller_side_fully_matched(n1 in 1usize..9, n2 in 1usize..9, seed in any::<u64>()) {
        let (g1, g2) = random_instance(n1, n2, seed);
        let result = StableRunner::run(&g1, &g2, &StableConfig::default()).unwrap();

        prop_assert_eq!(result.matches.len(), n1.min(n2));
        prop_assert_eq!(result.unmatched.len(), n1.max(n2) - n1.min(n2));

        let firsts: HashSet<u32> = result.matches.iter().map(|m| m.agent1).collect();
        let seconds: HashSet<u32> = result.matches.iter().map(|m| m.agent2).collect();
        prop_assert_eq!(firsts.len(), result.matches.len());
        prop_assert_eq!(seconds.len(), result.matches.len());
        prop_assert!(firsts.iter().all(|a| *a < 1000));
        prop_assert!(seconds.iter().all(|b| *b >= 1000));
    }

    #[test]
    fn prop_proposals_bounded(n1 in 1usize..9, n2 in 1usize..9, seed in any::<u64>()) {
        let (g1, g2) = random_instance(n1, n2, seed);
        let result = StableRunner::run(&g1, &g2, &StableConfig::default()).unwrap();
        prop_assert!(result.proposals >= n1.min(n2));
        prop_assert!(result.proposals <= n1 * n2);
    }

    #[test]
    fn prop_swap_symmetry(n1 in 1usize..9, extra in 1usize..5, seed in any::<u64>()) {
        // First group strictly larger.
        let (small, large) = random_instance(n1, n1 + extra, seed);
        let forward = stable_match(&large, &small, true).unwrap();
        let backward = stable_match(&small, &large, true).unwrap();

        let swapped_back: HashSet<(u32, u32)> =
            backward.iter().map(|m| (m.agent2, m.agent1)).collect();
        prop_assert_eq!(pair_set(&forward), swapped_back);

        for m in &forward {
            let ranks = m.ranks.unwrap();
            prop_assert_eq!(large.rank_of(&m.agent1, &m.agent2), Some(ranks.rank_by_agent1));
            prop_assert_eq!(small.rank_of(&m.agent2, &m.agent1), Some(ranks.rank_by_agent2));
        }
    }

    #[test]
    fn prop_orders_agree(n1 in 1usize..9, n2 in 1usize..9, seed in any::<u64>()) {
        let (g1, g2) = random_instance(n1, n2, seed);
        let lifo = stable_match(&g1, &g2, false).unwrap();

        for order in [ProposalOrder::Fifo, ProposalOrder::Random] {
            let config = StableConfig::default().with_proposal_order(order).with_seed(seed);
            let other = StableRunner::run(&g1, &g2, &config).unwrap();
            prop_assert_eq!(pair_set(&other.matches), pair_set(&lifo));
        }
    }

    #[test]
    fn prop_deterministic(n1 in 1usize..9, n2 in 1usize..9, seed in any::<u64>()) {
        let (g1, g2) = random_instance(n1, n2, seed);
        let config = StableConfig::default()
            .with_proposal_order(ProposalOrder::Random)
            .with_seed(seed)
            .with_include_ranks(true);

        let a = StableRunner::run(&g1, &g2, &config).unwrap();
        let b = StableRunner::run(&g1, &g2, &config).unwrap();
        prop_assert_eq!(a.matches, b.matches);
        prop_assert_eq!(a.proposals, b.proposals);
    }

    #[test]
    fn prop_truncated_ranking_rejected(n in 2usize..9, seed in any::<u64>()) {
        let (g1, g2) = random_instance(n, n, seed);
        let mut truncated = PreferenceTable::new();
        for (i, (agent, ranking)) in g1.iter().enumerate() {
            let ranking = if i == 0 { &ranking[..ranking.len() - 1] } else { ranking };
            truncated.insert(*agent, ranking.iter().copied());
        }

        let err = stable_match(&truncated, &g2, false).unwrap_err();
        let is_missing = matches!(
            err,
            MatchError::Validation(ValidationError::MissingCandidate { .. })
        );
        prop_assert!(is_missing);
    }
}
