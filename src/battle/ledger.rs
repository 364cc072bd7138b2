//! Resource ledger: energy, cooldown, and charge bookkeeping
//!
//! `consume` trusts its caller to have checked `can_use` first; the round
//! loop re-checks right before resolving each action.

use crate::catalog::constants::EnergyConstants;
use crate::catalog::{Art, ArtCatalog};
use crate::party::{Character, HistoryEntry};

/// Bound on the recent-use history kept per character.
pub const HISTORY_LIMIT: usize = 5;

/// Advance a character's resources by one round: restore energy toward max,
/// tick cooldowns down, tick charge regeneration, clear the acted flag.
pub fn regen(character: &mut Character, catalog: &ArtCatalog, energy: EnergyConstants) {
    let res = &mut character.resources;

    res.energy.current = (res.energy.current + energy.regen_per_turn).min(res.energy.max);

    for remaining in res.cooldowns.values_mut() {
        *remaining = remaining.saturating_sub(1);
    }
    res.cooldowns.retain(|_, remaining| *remaining > 0);

    for (id, charge) in res.charges.iter_mut() {
        let Some(spec) = catalog.get(id).and_then(|a| a.charges) else {
            continue;
        };
        if charge.current >= spec.max {
            continue;
        }
        charge.turns_until_regen = charge.turns_until_regen.saturating_sub(1);
        if charge.turns_until_regen == 0 {
            charge.current += 1;
            charge.turns_until_regen = spec.regen_interval;
        }
    }

    res.has_acted = false;
}

/// Pay for an art: subtract energy, arm the cooldown, spend a charge, and
/// append to the bounded history.
pub fn consume(character: &mut Character, art: &Art) {
    let res = &mut character.resources;

    res.energy.current -= art.energy_cost;

    if art.cooldown_turns > 0 {
        res.cooldowns.insert(art.id.clone(), art.cooldown_turns);
    }

    if art.charges.is_some() {
        if let Some(charge) = res.charges.get_mut(&art.id) {
            charge.current = charge.current.saturating_sub(1);
        }
    }

    res.history.push_back(HistoryEntry {
        art: art.id.clone(),
        attribute: art.attribute,
    });
    while res.history.len() > HISTORY_LIMIT {
        res.history.pop_front();
    }
}

/// Eligibility gate: enough energy, no cooldown lockout, a charge in hand.
pub fn can_use(character: &Character, art: &Art) -> bool {
    let res = &character.resources;

    if res.energy.current < art.energy_cost {
        return false;
    }
    if res.cooldowns.get(&art.id).copied().unwrap_or(0) > 0 {
        return false;
    }
    if art.charges.is_some() {
        let available = res.charges.get(&art.id).map(|c| c.current).unwrap_or(0);
        if available == 0 {
            return false;
        }
    }
    true
}
