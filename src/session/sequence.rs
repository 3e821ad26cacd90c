//! Playthrough sequence construction.
//!
//! A sequence is an optional fixed opener followed by a shuffled
//! selection of the remaining games, cut to the configured length.

use im::Vector;

use crate::catalog::{MiniGameDefinition, MiniGameId};
use crate::core::GateRng;

/// How to build a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SequencePlan {
    /// Game placed first when it is in the catalog.
    pub opener: Option<MiniGameId>,
    /// Maximum number of games.
    pub total: usize,
}

impl SequencePlan {
    /// Create a plan.
    #[must_use]
    pub fn new(opener: Option<MiniGameId>, total: usize) -> Self {
        Self { opener, total }
    }
}

/// Build the game sequence for one playthrough.
///
/// The opener comes first if the catalog has it. The rest is shuffled
/// with `GateRng::shuffle` (Fisher–Yates) and the whole list is truncated
/// to `plan.total`. Ids are unique as long as the catalog's are.
///
/// ## Example
///
/// ```
/// use consent_gate::catalog::{MiniGameId, MiniGameRegistry};
/// use consent_gate::core::GateRng;
/// use consent_gate::session::{build_sequence, SequencePlan};
///
/// let registry = MiniGameRegistry::standard();
/// let catalog: Vec<_> = registry.implemented().cloned().collect();
/// let mut rng = GateRng::new(42);
///
/// let sequence = build_sequence(&catalog, SequencePlan::new(Some(MiniGameId::BasicAgree), 10), &mut rng);
///
/// assert_eq!(sequence.len(), 10);
/// assert_eq!(sequence[0].id, MiniGameId::BasicAgree);
/// ```
pub fn build_sequence(
    catalog: &[MiniGameDefinition],
    plan: SequencePlan,
    rng: &mut GateRng,
) -> Vector<MiniGameDefinition> {
    let opener = plan
        .opener
        .and_then(|id| catalog.iter().find(|def| def.id == id));

    let mut rest: Vec<&MiniGameDefinition> = catalog
        .iter()
        .filter(|def| Some(def.id) != opener.map(|o| o.id))
        .collect();
    rng.shuffle(&mut rest);

    opener
        .into_iter()
        .chain(rest)
        .take(plan.total)
        .cloned()
        .collect()
}
