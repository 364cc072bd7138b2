//! Damage resolution for solo actions and resonance chains
//!
//! Each participant contributes independently (scaling, variance, crit,
//! mitigation, chain bonus); the contributions sum into one combined event.

use rand::{Rng, RngCore};

use crate::catalog::constants::DamageConstants;
use crate::catalog::Art;
use crate::party::{Character, Enemy};

/// One combined damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Total integer damage, always >= 1 when participants is non-empty.
    pub total: i32,
    /// How many participant contributions rolled a critical hit.
    pub crits: u32,
    /// Whether the chain multiplier applied.
    pub chain_boosted: bool,
}

/// Resolve damage for an action or chain against the defender.
///
/// `chain_count` is the linker's current count; the chain bonus applies
/// when it exceeds one, regardless of how many participants flush together.
pub fn resolve(
    participants: &[(&Character, &Art)],
    defender: &Enemy,
    chain_count: u32,
    constants: DamageConstants,
    rng: &mut dyn RngCore,
) -> DamageOutcome {
    let chain_boosted = chain_count > 1;
    let chain_multiplier = if chain_boosted {
        1.0 + chain_count as f64 * constants.chain_bonus
    } else {
        1.0
    };
    let mitigation = defender.stats.defense as f64 * constants.defense_factor;

    let mut total = 0.0;
    let mut crits = 0;

    for (character, art) in participants {
        let scaling = character.stats.highest() as f64;
        let mut base = scaling * art.base_power as f64 / 100.0;

        if constants.variance > 0.0 {
            base *= 1.0 + rng.gen_range(-constants.variance..constants.variance);
        }

        let crit_chance = constants.crit_base_chance
            + constants.crit_dexterity_factor * character.stats.dexterity as f64;
        if crit_chance > 0.0 && rng.gen::<f64>() < crit_chance {
            base *= constants.crit_multiplier;
            crits += 1;
        }

        let mitigated = (base - mitigation).max(1.0);
        total += mitigated * chain_multiplier;
    }

    DamageOutcome {
        total: (total.floor() as i32).max(if participants.is_empty() { 0 } else { 1 }),
        crits,
        chain_boosted,
    }
}
