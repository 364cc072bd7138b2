//! Art (skill) definitions - immutable catalog data
//!
//! Every optional field degrades to a safe default when absent so a sparse
//! catalog entry never halts the simulation.

use serde::{Deserialize, Serialize};

use crate::core::types::ArtId;

/// Element/type tag of an Art
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Slash,
    Blunt,
    Pierce,
    Fire,
    Ice,
    Thunder,
    Wind,
    Light,
    Dark,
}

impl Attribute {
    pub fn name(self) -> &'static str {
        match self {
            Self::Slash => "Slash",
            Self::Blunt => "Blunt",
            Self::Pierce => "Pierce",
            Self::Fire => "Fire",
            Self::Ice => "Ice",
            Self::Thunder => "Thunder",
            Self::Wind => "Wind",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Position an Art prefers inside a combo sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComboRole {
    #[default]
    Starter,
    Connector,
    Finisher,
}

/// Tag-based chain compatibility data.
///
/// Present in the data model for catalog authors; the linker itself decides
/// by probability threshold and does not consult tags.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboSpec {
    #[serde(default)]
    pub send_tags: Vec<String>,
    #[serde(default)]
    pub receive_tags: Vec<String>,
    #[serde(default)]
    pub interrupts_chain: bool,
    #[serde(default)]
    pub role: ComboRole,
    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: u32,
}

fn default_max_chain_depth() -> u32 {
    1
}

/// Limited-use charge bookkeeping for an Art
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChargeSpec {
    pub max: u32,
    pub start: u32,
    /// Rounds between restoring one charge while below max
    pub regen_interval: u32,
}

/// Turn-order modifiers
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TimingSpec {
    #[serde(default)]
    pub fast_bonus: i32,
    #[serde(default)]
    pub delay_penalty: i32,
}

/// Decay curves for repeated use of the same skill or attribute.
///
/// Reserved extension point: stored but not yet consumed by any resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepeatPenaltySpec {
    #[serde(default)]
    pub same_skill_decay: Vec<f64>,
    #[serde(default)]
    pub same_attribute_decay: Vec<f64>,
    #[serde(default)]
    pub reset_after_turns: u32,
}

/// A catalog-defined skill a character can use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Art {
    pub id: ArtId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_power: i32,
    pub attribute: Attribute,
    #[serde(default)]
    pub energy_cost: i32,
    #[serde(default)]
    pub cooldown_turns: u32,
    #[serde(default)]
    pub charges: Option<ChargeSpec>,
    #[serde(default)]
    pub combo: ComboSpec,
    #[serde(default)]
    pub timing: TimingSpec,
    /// Arts whose use may inspire learning this one mid-battle
    #[serde(default)]
    pub inspiration_source: Vec<ArtId>,
    #[serde(default)]
    pub repeat_penalty: Option<RepeatPenaltySpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_entry_degrades_to_defaults() {
        let art: Art = serde_json::from_str(
            r#"{"id": "bare_strike", "name": "Bare Strike", "base_power": 50, "attribute": "Blunt"}"#,
        )
        .expect("sparse art should deserialize");

        assert_eq!(art.energy_cost, 0);
        assert_eq!(art.cooldown_turns, 0);
        assert!(art.charges.is_none());
        assert!(art.combo.send_tags.is_empty());
        assert!(!art.combo.interrupts_chain);
        assert_eq!(art.combo.role, ComboRole::Starter);
        assert_eq!(art.timing.fast_bonus, 0);
        assert!(art.inspiration_source.is_empty());
    }

    #[test]
    fn combo_role_parses_lowercase() {
        let spec: ComboSpec =
            serde_json::from_str(r#"{"send_tags": ["Slash"], "role": "finisher"}"#).unwrap();
        assert_eq!(spec.role, ComboRole::Finisher);
        assert_eq!(spec.max_chain_depth, 1);
    }
}
