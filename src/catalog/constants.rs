//! Tunable battle constants with documented defaults
//!
//! All magic numbers are collected here. Each group can be overridden from a
//! TOML or JSON snippet; absent fields fall back to the tuned defaults.

use serde::{Deserialize, Serialize};

/// Energy (BP) pool tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnergyConstants {
    /// Pool size every character starts a battle with
    pub max_energy: i32,
    /// Energy restored at the top of every round
    pub regen_per_turn: i32,
}

impl Default for EnergyConstants {
    fn default() -> Self {
        Self {
            max_energy: 10,
            regen_per_turn: 3,
        }
    }
}

/// Resonance chain linking tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ResonanceConstants {
    /// Chance that a second action links onto a fresh chain (count 1 -> 2)
    pub chain_start_chance: f64,
    /// Chance that each further action keeps an established chain going
    pub chain_continue_chance: f64,
    /// Hard cap on chain count; reaching it forces a reset on the next link
    pub max_chain: u32,
}

impl Default for ResonanceConstants {
    fn default() -> Self {
        Self {
            chain_start_chance: 0.30,
            chain_continue_chance: 0.50,
            max_chain: 5,
        }
    }
}

/// Glimmer (spontaneous learning) tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GlimmerConstants {
    /// Base chance per candidate art after any action
    pub base_chance: f64,
    /// Added per point of current chain count
    pub chain_bonus: f64,
}

impl Default for GlimmerConstants {
    fn default() -> Self {
        Self {
            base_chance: 0.05,
            chain_bonus: 0.02,
        }
    }
}

/// Damage formula tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConstants {
    /// Symmetric variance fraction v; each hit is scaled by 1 + U(-v, v)
    pub variance: f64,
    /// Flat critical-hit chance before the dexterity contribution
    pub crit_base_chance: f64,
    /// Added crit chance per point of dexterity
    pub crit_dexterity_factor: f64,
    /// Damage multiplier on a critical hit
    pub crit_multiplier: f64,
    /// Mitigation subtracted per point of defender defense
    pub defense_factor: f64,
    /// Chain multiplier slope: each contribution scales by 1 + count * bonus
    pub chain_bonus: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        Self {
            variance: 0.15,
            crit_base_chance: 0.05,
            crit_dexterity_factor: 0.002,
            crit_multiplier: 1.5,
            defense_factor: 0.5,
            chain_bonus: 0.10,
        }
    }
}

/// Round loop tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConstants {
    /// Upper bound (exclusive) of the uniform jitter added to qui each round
    pub speed_jitter: i32,
    /// Absolute round budget before a battle is forced to a stalemate
    pub max_rounds: u32,
    /// Consecutive rounds without a single action before declaring stalemate
    pub stalemate_rounds: u32,
}

impl Default for ScheduleConstants {
    fn default() -> Self {
        Self {
            speed_jitter: 6,
            max_rounds: 200,
            stalemate_rounds: 5,
        }
    }
}

/// Complete tunable-constants bundle consumed by a battle session
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Constants {
    pub energy: EnergyConstants,
    pub resonance: ResonanceConstants,
    pub glimmer: GlimmerConstants,
    pub damage: DamageConstants,
    pub schedule: ScheduleConstants,
}

impl Constants {
    /// Parse a (possibly partial) TOML override; absent fields keep defaults.
    pub fn from_toml_str(text: &str) -> crate::core::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> crate::core::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let c = Constants::default();
        assert!(c.resonance.chain_start_chance < c.resonance.chain_continue_chance);
        assert!(c.resonance.max_chain >= 2);
        assert!(c.energy.regen_per_turn > 0);
        assert!(c.damage.crit_multiplier > 1.0);
        assert!(c.schedule.max_rounds > 0);
    }

    #[test]
    fn partial_toml_override_keeps_other_defaults() {
        let c = Constants::from_toml_str(
            "[resonance]\nchain_start_chance = 1.0\n\n[damage]\nvariance = 0.0\n",
        )
        .unwrap();
        assert_eq!(c.resonance.chain_start_chance, 1.0);
        assert_eq!(c.damage.variance, 0.0);
        // Untouched groups keep their defaults
        assert_eq!(c.energy.max_energy, 10);
        assert_eq!(c.resonance.max_chain, 5);
    }
}
