//! Battle session: the seeded round loop tying every subsystem together
//!
//! A round runs in phases: REGEN restores resources, SELECT plans and orders
//! actions, RESOLVE feeds them through the resonance linker and accumulates
//! damage, CHECK_END decides the outcome. All randomness flows through one
//! `ChaCha8Rng`, so a seed fully determines the event log.
//!
//! Linked actions do not strike individually. They accumulate into a pending
//! damage group that lands as a single combined event when the chain breaks,
//! the round ends, or the enemy falls. Chain state itself survives round
//! boundaries; only the damage grouping is round-scoped.

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::battle::events::{BattleEventLog, BattleEventType};
use crate::battle::resonance::{ChainState, Grimoire, LinkOutcome, ResonanceLinker};
use crate::battle::scheduler::{self, ActionPolicy};
use crate::battle::{damage, glimmer, ledger};
use crate::catalog::{Art, ArtCatalog, Constants};
use crate::core::types::{ArtId, CharacterId, Round, SessionId};
use crate::core::{EngineError, Result};
use crate::party::{Character, Enemy, EnergyPool};

/// Terminal state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleOutcome {
    Undecided,
    Victory,
    Stalemate,
}

impl BattleOutcome {
    fn label(self) -> &'static str {
        match self {
            Self::Undecided => "undecided",
            Self::Victory => "victory",
            Self::Stalemate => "stalemate",
        }
    }
}

/// Aggregate numbers for the post-battle report
#[derive(Debug, Clone, Default, Serialize)]
pub struct BattleStats {
    pub total_damage: i64,
    pub max_damage: i32,
    /// Successful chain links over the whole battle.
    pub resonance_total: u32,
    pub art_usage: AHashMap<ArtId, u32>,
}

/// Point-in-time view of one character's resources
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSnapshot {
    pub name: String,
    pub energy: EnergyPool,
    /// Sorted by art id for stable output.
    pub cooldowns: Vec<(ArtId, u32)>,
    pub charges: Vec<(ArtId, u32)>,
    pub has_acted: bool,
    pub arts_known: usize,
}

/// One party-versus-enemy battle, driven round by round
#[derive(Debug)]
pub struct BattleSession {
    pub id: SessionId,
    party: Vec<Character>,
    enemy: Enemy,
    catalog: ArtCatalog,
    constants: Constants,
    rng: ChaCha8Rng,
    linker: ResonanceLinker,
    grimoire: Grimoire,
    round: Round,
    outcome: BattleOutcome,
    rounds_without_action: u32,
    /// Actions awaiting their combined damage flush.
    pending: Vec<(CharacterId, ArtId)>,
    pub log: BattleEventLog,
    stats: BattleStats,
}

impl BattleSession {
    pub fn new(
        mut party: Vec<Character>,
        enemy: Enemy,
        catalog: ArtCatalog,
        constants: Constants,
        seed: u64,
    ) -> Result<Self> {
        if party.is_empty() {
            return Err(EngineError::EmptyParty);
        }
        if enemy.is_defeated() {
            return Err(EngineError::EnemyAlreadyDefeated(enemy.name));
        }
        for c in &mut party {
            c.reset_battle_state(&catalog, constants.energy);
        }

        let mut log = BattleEventLog::default();
        log.push(
            0,
            BattleEventType::BattleStarted,
            format!("The party engages {}", enemy.name),
        );
        info!(seed, enemy = %enemy.name, party = party.len(), "battle started");

        Ok(Self {
            id: SessionId::new(),
            party,
            enemy,
            catalog,
            constants,
            rng: ChaCha8Rng::seed_from_u64(seed),
            linker: ResonanceLinker::new(),
            grimoire: Grimoire::default(),
            round: 0,
            outcome: BattleOutcome::Undecided,
            rounds_without_action: 0,
            pending: Vec::new(),
            log,
            stats: BattleStats::default(),
        })
    }

    pub fn party(&self) -> &[Character] {
        &self.party
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn grimoire(&self) -> &Grimoire {
        &self.grimoire
    }

    pub fn chain(&self) -> &ChainState {
        self.linker.chain()
    }

    pub fn stats(&self) -> &BattleStats {
        &self.stats
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.outcome
    }

    pub fn round(&self) -> Round {
        self.round
    }

    pub fn resource_snapshot(&self) -> Vec<ResourceSnapshot> {
        self.party
            .iter()
            .map(|c| {
                let mut cooldowns: Vec<_> = c
                    .resources
                    .cooldowns
                    .iter()
                    .map(|(id, turns)| (id.clone(), *turns))
                    .collect();
                cooldowns.sort_by(|a, b| a.0 .0.cmp(&b.0 .0));
                let mut charges: Vec<_> = c
                    .resources
                    .charges
                    .iter()
                    .map(|(id, state)| (id.clone(), state.current))
                    .collect();
                charges.sort_by(|a, b| a.0 .0.cmp(&b.0 .0));
                ResourceSnapshot {
                    name: c.name.clone(),
                    energy: c.resources.energy,
                    cooldowns,
                    charges,
                    has_acted: c.resources.has_acted,
                    arts_known: c.learned_arts.len(),
                }
            })
            .collect()
    }

    /// Advance the battle by one round. A no-op once the outcome is decided.
    pub fn run_round(&mut self, policy: &dyn ActionPolicy) -> BattleOutcome {
        if self.outcome != BattleOutcome::Undecided {
            return self.outcome;
        }
        self.round += 1;

        // REGEN
        for c in &mut self.party {
            ledger::regen(c, &self.catalog, self.constants.energy);
        }

        // SELECT
        let plan = scheduler::plan_round(
            &self.party,
            &self.catalog,
            self.constants.schedule,
            policy,
            &mut self.rng,
        );
        if plan.is_empty() {
            debug!(round = self.round, "no character could act");
            self.check_stalemate(false);
            return self.outcome;
        }
        let turn_order: Vec<String> = plan
            .iter()
            .filter_map(|a| self.character(a.actor).map(|c| c.name.clone()))
            .collect();
        self.log.push(
            self.round,
            BattleEventType::RoundStarted {
                round: self.round,
                turn_order: turn_order.clone(),
            },
            format!("Round {}: {}", self.round, turn_order.join(", ")),
        );

        // RESOLVE
        let mut resolved_any = false;
        for action in &plan {
            if self.enemy.is_defeated() {
                break;
            }
            let Some(art) = self.catalog.get(&action.art).cloned() else {
                continue;
            };
            // Re-check right before resolution; an earlier glimmer or the
            // policy's optimism may have invalidated the plan entry.
            let Some(actor_name) = self
                .character(action.actor)
                .filter(|c| ledger::can_use(c, &art))
                .map(|c| c.name.clone())
            else {
                debug!(art = %art.id, "planned action no longer payable, skipped");
                continue;
            };

            self.resolve_action(action.actor, &actor_name, &art);
            resolved_any = true;

            if self.enemy.is_defeated() {
                self.flush_pending(self.linker.chain().count);
                self.declare_victory();
                return self.outcome;
            }
        }

        // Round boundary closes the damage group; the chain itself carries on.
        self.flush_pending(self.linker.chain().count);
        if self.enemy.is_defeated() {
            self.declare_victory();
            return self.outcome;
        }

        // CHECK_END
        self.check_stalemate(resolved_any);
        self.outcome
    }

    /// Run rounds until the battle decides itself or the round budget runs out.
    pub fn run_to_completion(&mut self, policy: &dyn ActionPolicy) -> BattleOutcome {
        while self.outcome == BattleOutcome::Undecided
            && self.round < self.constants.schedule.max_rounds
        {
            self.run_round(policy);
        }
        if self.outcome == BattleOutcome::Undecided {
            self.declare_stalemate("round budget exhausted");
        }
        self.outcome
    }

    fn character(&self, id: CharacterId) -> Option<&Character> {
        self.party.iter().find(|c| c.id == id)
    }

    fn resolve_action(&mut self, actor: CharacterId, actor_name: &str, art: &Art) {
        // A failed link settles the old group with the count it earned, not
        // the restarted one.
        let count_before_link = self.linker.chain().count;
        let outcome = self.linker.advance(
            actor,
            art,
            self.constants.resonance,
            &mut self.grimoire,
            &mut self.rng,
        );

        match outcome {
            LinkOutcome::Started => {
                self.log.push(
                    self.round,
                    BattleEventType::ChainStarted {
                        actor: actor_name.to_string(),
                        art: art.id.clone(),
                        name: art.name.clone(),
                    },
                    format!("{} opens with {}", actor_name, art.name),
                );
                self.pending.push((actor, art.id.clone()));
            }
            LinkOutcome::Extended { discovered } => {
                self.stats.resonance_total += 1;
                let chain = self.linker.chain();
                let participants: Vec<String> = chain
                    .participants
                    .iter()
                    .filter_map(|id| self.character(*id).map(|c| c.name.clone()))
                    .collect();
                let name = chain.name.clone();
                let count = chain.count;
                self.log.push(
                    self.round,
                    BattleEventType::ChainExtended {
                        name: name.clone(),
                        count,
                        participants,
                        discovered,
                    },
                    if discovered {
                        format!("Resonance! {} ({} links, new discovery)", name, count)
                    } else {
                        format!("Resonance! {} ({} links)", name, count)
                    },
                );
                self.pending.push((actor, art.id.clone()));
            }
            LinkOutcome::Broken => {
                // The old group lands before the breaker starts its own
                // chain. The linker keeps the broken chain intact until the
                // breaking action is known to resolve.
                self.flush_pending(count_before_link);
                if self.enemy.is_defeated() {
                    return;
                }
                self.linker.restart(actor, art);
                self.log.push(
                    self.round,
                    BattleEventType::ChainBroken {
                        actor: actor_name.to_string(),
                    },
                    format!("{} breaks the flow with {}", actor_name, art.name),
                );
                self.pending.push((actor, art.id.clone()));
            }
        }

        let chain_count = self.linker.chain().count;
        if let Some(c) = self.party.iter_mut().find(|c| c.id == actor) {
            ledger::consume(c, art);
            c.resources.has_acted = true;
            let learned = glimmer::roll_glimmer(
                c,
                &art.id,
                chain_count,
                &self.catalog,
                self.constants.glimmer,
                &mut self.rng,
            );
            if let Some(new_art) = learned {
                let flavor = self
                    .catalog
                    .get(&new_art)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| new_art.to_string());
                self.log.push(
                    self.round,
                    BattleEventType::ArtGlimmered {
                        character: actor_name.to_string(),
                        art: new_art,
                    },
                    format!("{} glimmers {}!", actor_name, flavor),
                );
            }
        }
        *self.stats.art_usage.entry(art.id.clone()).or_insert(0) += 1;
    }

    /// Land the accumulated damage group as one combined event.
    ///
    /// `chain_count` is the count the group earned, which differs from the
    /// linker's current count when a failed link triggered the flush.
    fn flush_pending(&mut self, chain_count: u32) {
        if self.pending.is_empty() {
            return;
        }
        let group = std::mem::take(&mut self.pending);
        let party = &self.party;
        let catalog = &self.catalog;
        let participants: Vec<(&Character, &Art)> = group
            .iter()
            .filter_map(|(actor, art_id)| {
                let c = party.iter().find(|c| c.id == *actor)?;
                let a = catalog.get(art_id)?;
                Some((c, a))
            })
            .collect();
        if participants.is_empty() {
            return;
        }

        let result = damage::resolve(
            &participants,
            &self.enemy,
            chain_count,
            self.constants.damage,
            &mut self.rng,
        );
        self.enemy.apply_damage(result.total);

        self.stats.total_damage += i64::from(result.total);
        self.stats.max_damage = self.stats.max_damage.max(result.total);

        self.log.push(
            self.round,
            BattleEventType::DamageDealt {
                amount: result.total,
                chain_boosted: result.chain_boosted,
                crits: result.crits,
            },
            if result.chain_boosted {
                format!("The chain lands for {} damage", result.total)
            } else {
                format!("It lands for {} damage", result.total)
            },
        );
    }

    fn declare_victory(&mut self) {
        self.log.push(
            self.round,
            BattleEventType::EnemyDefeated,
            format!("{} collapses", self.enemy.name),
        );
        self.outcome = BattleOutcome::Victory;
        self.log.push(
            self.round,
            BattleEventType::BattleEnded {
                outcome: self.outcome.label().to_string(),
            },
            "Victory!",
        );
        info!(round = self.round, "battle won");
    }

    fn declare_stalemate(&mut self, reason: &str) {
        self.outcome = BattleOutcome::Stalemate;
        self.log.push(
            self.round,
            BattleEventType::BattleEnded {
                outcome: self.outcome.label().to_string(),
            },
            format!("Stalemate: {}", reason),
        );
        info!(round = self.round, reason, "battle stalled out");
    }

    fn check_stalemate(&mut self, resolved_any: bool) {
        if resolved_any {
            self.rounds_without_action = 0;
            return;
        }
        self.rounds_without_action += 1;
        if self.rounds_without_action >= self.constants.schedule.stalemate_rounds {
            self.declare_stalemate("nobody has acted for too long");
        }
    }
}
