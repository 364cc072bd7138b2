//! The battle engine: resources, scheduling, resonance, damage, and the
//! session loop that orders them

pub mod damage;
pub mod events;
pub mod glimmer;
pub mod ledger;
pub mod naming;
pub mod resonance;
pub mod scheduler;
pub mod session;

pub use damage::DamageOutcome;
pub use events::{BattleEvent, BattleEventLog, BattleEventType};
pub use resonance::{ChainState, Grimoire, GrimoireEntry, LinkOutcome, ResonanceLinker};
pub use scheduler::{ActionPolicy, PlannedAction, UniformPolicy};
pub use session::{BattleOutcome, BattleSession, BattleStats, ResourceSnapshot};
