//! Party roster: characters, their battle resources, and the enemy
//!
//! `BattleResources` is the only mutable part of a character during a battle
//! and is owned exclusively by that character; it is rebuilt at battle start.

use std::collections::VecDeque;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::catalog::constants::EnergyConstants;
use crate::catalog::{ArtCatalog, Attribute};
use crate::core::types::{ArtId, CharacterId};

/// Base stats; qui drives turn order, the highest stat drives damage scaling
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub vitality: i32,
    pub dexterity: i32,
    pub agility: i32,
    pub intellect: i32,
    pub spirit: i32,
    pub qui: i32,
}

impl Stats {
    /// Highest non-speed stat, the scaling heuristic for damage.
    pub fn highest(&self) -> i32 {
        [
            self.strength,
            self.vitality,
            self.dexterity,
            self.agility,
            self.intellect,
            self.spirit,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Consumable action-resource pool
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergyPool {
    pub current: i32,
    pub max: i32,
    pub regen: i32,
}

/// Per-art limited-use charge state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChargeState {
    pub current: u32,
    pub turns_until_regen: u32,
}

/// One entry of the bounded recent-use history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub art: ArtId,
    pub attribute: Attribute,
}

/// Mutable per-character battle state, reset at battle start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleResources {
    pub energy: EnergyPool,
    /// Art id -> remaining lockout turns
    pub cooldowns: AHashMap<ArtId, u32>,
    /// Art id -> charge state, tracked only for arts with a charge spec
    pub charges: AHashMap<ArtId, ChargeState>,
    /// Last five actions, oldest first
    pub history: VecDeque<HistoryEntry>,
    pub has_acted: bool,
}

impl BattleResources {
    pub fn new(energy: EnergyConstants) -> Self {
        Self {
            energy: EnergyPool {
                current: energy.max_energy,
                max: energy.max_energy,
                regen: energy.regen_per_turn,
            },
            cooldowns: AHashMap::new(),
            charges: AHashMap::new(),
            history: VecDeque::new(),
            has_acted: false,
        }
    }
}

/// A party member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub stats: Stats,
    pub learned_arts: Vec<ArtId>,
    pub resources: BattleResources,
}

impl Character {
    pub fn new(id: CharacterId, name: impl Into<String>, stats: Stats, learned: Vec<ArtId>) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
            learned_arts: learned,
            resources: BattleResources::new(EnergyConstants::default()),
        }
    }

    /// Rebuild battle state: full energy, no cooldowns, charge counters
    /// seeded from each learned art's charge spec.
    pub fn reset_battle_state(&mut self, catalog: &ArtCatalog, energy: EnergyConstants) {
        self.resources = BattleResources::new(energy);
        for id in &self.learned_arts {
            if let Some(spec) = catalog.get(id).and_then(|a| a.charges) {
                self.resources.charges.insert(
                    id.clone(),
                    ChargeState {
                        current: spec.start,
                        turns_until_regen: spec.regen_interval,
                    },
                );
            }
        }
    }

    pub fn knows(&self, id: &ArtId) -> bool {
        self.learned_arts.contains(id)
    }
}

/// Defensive/offensive stats of the battle target
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EnemyStats {
    pub strength: i32,
    pub defense: i32,
    pub agility: i32,
    pub intellect: i32,
}

/// The single defending target of a battle session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub stats: EnemyStats,
}

impl Enemy {
    pub fn new(name: impl Into<String>, max_hp: i32, stats: EnemyStats) -> Self {
        Self {
            name: name.into(),
            hp: max_hp,
            max_hp,
            stats,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Apply damage, clamping at zero.
    pub fn apply_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }
}
