//! Stable matching configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which free proposers take their turn.
///
/// For a fixed proposing side every order produces the same
/// (proposer-optimal) stable matching. The order only changes the sequence
/// and number of proposals along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProposalOrder {
    /// Last freed proposes first. Initially the last agent of the table
    /// proposes first.
    #[default]
    Lifo,
    /// Free proposers queue up in table order; a rejected or dumped
    /// proposer goes to the back.
    Fifo,
    /// A free proposer is drawn uniformly at random (seeded).
    Random,
}

/// Configuration parameters for a stable matching run.
///
/// # Examples
///
/// ```
/// use u_matching::stable::{ProposalOrder, StableConfig};
///
/// let config = StableConfig::default()
///     .with_include_ranks(true)
///     .with_proposal_order(ProposalOrder::Random)
///     .with_seed(7);
/// assert!(config.include_ranks);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StableConfig {
    /// Annotate every match with both partners' ranks of each other.
    pub include_ranks: bool,
    /// Which free proposer goes next.
    pub proposal_order: ProposalOrder,
    /// Random seed for [`ProposalOrder::Random`] (None uses a fixed seed).
    pub seed: Option<u64>,
}

impl Default for StableConfig {
    fn default() -> Self {
        Self {
            include_ranks: false,
            proposal_order: ProposalOrder::Lifo,
            seed: None,
        }
    }
}

impl StableConfig {
    /// Enables or disables rank annotations on matches.
    pub fn with_include_ranks(mut self, include_ranks: bool) -> Self {
        self.include_ranks = include_ranks;
        self
    }

    /// Sets the proposer selection order.
    pub fn with_proposal_order(mut self, order: ProposalOrder) -> Self {
        self.proposal_order = order;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
