//! Resonance linker: decides whether consecutive actions fuse into a chain
//!
//! Probability-threshold linking: every action after the first rolls against
//! a tunable chance. A failed roll never cancels the action; the actor simply
//! restarts the chain alone.

use ahash::AHashSet;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::battle::naming;
use crate::catalog::constants::ResonanceConstants;
use crate::catalog::{Art, Attribute};
use crate::core::types::{ArtId, CharacterId};

/// Current chain: who is linked, the running composite name, and the count.
///
/// `count` and `participants` grow and reset together; a chain that carries
/// over a round boundary keeps both until a link fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainState {
    pub participants: Vec<CharacterId>,
    pub name: String,
    pub count: u32,
}

impl ChainState {
    fn restart(&mut self, actor: CharacterId, name: &str) {
        self.participants.clear();
        self.participants.push(actor);
        self.name = name.to_string();
        self.count = 1;
    }
}

/// A discovered chain pairing, keyed by the ordered art pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrimoireEntry {
    pub previous: ArtId,
    pub current: ArtId,
    pub name: String,
}

/// Append-only record of discovered resonance pairings.
///
/// Pure side-record for player review; never consulted for mechanics.
/// Deserialization rebuilds the key index from the entries so duplicate
/// protection survives a round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GrimoireData")]
pub struct Grimoire {
    entries: Vec<GrimoireEntry>,
    #[serde(skip)]
    keys: AHashSet<(ArtId, ArtId)>,
}

/// Serialized shape of a [`Grimoire`]
#[derive(Deserialize)]
struct GrimoireData {
    entries: Vec<GrimoireEntry>,
}

impl From<GrimoireData> for Grimoire {
    fn from(data: GrimoireData) -> Self {
        let keys = data
            .entries
            .iter()
            .map(|e| (e.previous.clone(), e.current.clone()))
            .collect();
        Self {
            entries: data.entries,
            keys,
        }
    }
}

impl Grimoire {
    /// Record a pairing; returns true only on first discovery.
    pub fn record(&mut self, previous: ArtId, current: ArtId, name: &str) -> bool {
        if !self.keys.insert((previous.clone(), current.clone())) {
            return false;
        }
        self.entries.push(GrimoireEntry {
            previous,
            current,
            name: name.to_string(),
        });
        true
    }

    pub fn entries(&self) -> &[GrimoireEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of feeding one action into the linker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// First action of the battle; a fresh chain of one.
    Started,
    /// The action fused onto the running chain.
    Extended {
        /// True when the (previous, current) pairing entered the grimoire.
        discovered: bool,
    },
    /// The link roll failed or the cap was hit. The chain is left intact so
    /// the caller can settle its accumulated damage, then restart it around
    /// the breaking actor via [`ResonanceLinker::restart`].
    Broken,
}

/// Per-battle chain state machine
#[derive(Debug, Clone, Default)]
pub struct ResonanceLinker {
    chain: ChainState,
    previous: Option<(ArtId, Attribute)>,
}

impl ResonanceLinker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chain(&self) -> &ChainState {
        &self.chain
    }

    /// Feed the next action in resolution order.
    pub fn advance(
        &mut self,
        actor: CharacterId,
        art: &Art,
        constants: ResonanceConstants,
        grimoire: &mut Grimoire,
        rng: &mut dyn RngCore,
    ) -> LinkOutcome {
        let Some((previous_art, previous_attribute)) = self.previous.take() else {
            self.chain.restart(actor, &art.name);
            self.previous = Some((art.id.clone(), art.attribute));
            return LinkOutcome::Started;
        };

        let chance = if self.chain.count == 1 {
            constants.chain_start_chance
        } else {
            constants.chain_continue_chance
        };
        let linked = rng.gen::<f64>() < chance && self.chain.count < constants.max_chain;

        if linked {
            self.chain.count += 1;
            self.chain.participants.push(actor);
            self.chain.name = naming::compose(
                &self.chain.name,
                previous_attribute,
                &art.name,
                art.attribute,
                self.chain.count,
                rng,
            );
            let discovered = grimoire.record(previous_art, art.id.clone(), &self.chain.name);
            self.previous = Some((art.id.clone(), art.attribute));
            LinkOutcome::Extended { discovered }
        } else {
            // The broken chain stays readable until the caller settles its
            // damage; `restart` then rebuilds the state around the breaker.
            self.previous = Some((previous_art, previous_attribute));
            LinkOutcome::Broken
        }
    }

    /// Rebuild the chain around the actor whose action broke it. Call only
    /// after that action actually resolves.
    pub fn restart(&mut self, actor: CharacterId, art: &Art) {
        self.chain.restart(actor, &art.name);
        self.previous = Some((art.id.clone(), art.attribute));
    }
}
