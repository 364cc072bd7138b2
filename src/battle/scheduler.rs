//! Turn scheduling: art selection and effective-speed ordering
//!
//! Selection is an injectable policy so deterministic or smarter pickers can
//! replace the uniform-random placeholder without touching the round loop.

use rand::{Rng, RngCore};
use tracing::warn;

use crate::battle::ledger;
use crate::catalog::constants::ScheduleConstants;
use crate::catalog::{Art, ArtCatalog};
use crate::core::types::{ArtId, CharacterId};
use crate::party::Character;

/// One scheduled action for the coming round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub actor: CharacterId,
    pub art: ArtId,
    pub effective_speed: i32,
}

/// Decides which eligible art a character commits to this round.
pub trait ActionPolicy {
    /// `eligible` is never empty. Returning `None` makes the character sit
    /// the round out.
    fn choose(
        &self,
        character: &Character,
        eligible: &[&Art],
        rng: &mut dyn RngCore,
    ) -> Option<ArtId>;
}

/// Placeholder policy: uniform-random among eligible arts.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPolicy;

impl ActionPolicy for UniformPolicy {
    fn choose(
        &self,
        _character: &Character,
        eligible: &[&Art],
        rng: &mut dyn RngCore,
    ) -> Option<ArtId> {
        let index = rng.gen_range(0..eligible.len());
        Some(eligible[index].id.clone())
    }
}

/// Arts the character both knows and can currently pay for. Learned entries
/// with no catalog match are skipped as a non-fatal anomaly.
pub fn eligible_arts<'a>(character: &Character, catalog: &'a ArtCatalog) -> Vec<&'a Art> {
    character
        .learned_arts
        .iter()
        .filter_map(|id| {
            let art = catalog.get(id);
            if art.is_none() {
                warn!(art = %id, character = %character.name, "learned art missing from catalog, skipping");
            }
            art
        })
        .filter(|art| ledger::can_use(character, art))
        .collect()
}

/// Build the ordered action list for one round.
///
/// Characters that already acted or have no usable art sit the round out.
/// Sorting is stable, so equal effective speeds keep roster order and the
/// whole plan is reproducible under a fixed seed.
pub fn plan_round(
    party: &[Character],
    catalog: &ArtCatalog,
    schedule: ScheduleConstants,
    policy: &dyn ActionPolicy,
    rng: &mut dyn RngCore,
) -> Vec<PlannedAction> {
    let mut plan = Vec::new();

    for character in party {
        if character.resources.has_acted {
            continue;
        }
        let eligible = eligible_arts(character, catalog);
        if eligible.is_empty() {
            continue;
        }
        let Some(art_id) = policy.choose(character, &eligible, rng) else {
            continue;
        };
        let Some(art) = catalog.get(&art_id) else {
            warn!(art = %art_id, "policy chose an art missing from the catalog, skipping");
            continue;
        };

        let jitter = if schedule.speed_jitter > 0 {
            rng.gen_range(0..schedule.speed_jitter)
        } else {
            0
        };
        let effective_speed =
            character.stats.qui + jitter + art.timing.fast_bonus - art.timing.delay_penalty;

        plan.push(PlannedAction {
            actor: character.id,
            art: art_id,
            effective_speed,
        });
    }

    plan.sort_by(|a, b| b.effective_speed.cmp(&a.effective_speed));
    plan
}
