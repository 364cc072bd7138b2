//! Replayable presentation events
//!
//! Every observable outcome of a battle is appended to the event log in
//! resolution order. The log serializes to JSON, so two runs with the same
//! seed can be compared byte for byte.

use serde::{Deserialize, Serialize};

use crate::core::types::{ArtId, Round};

/// What happened, with enough payload to render it without engine access
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BattleEventType {
    BattleStarted,
    RoundStarted {
        round: Round,
        turn_order: Vec<String>,
    },
    ChainStarted {
        actor: String,
        art: ArtId,
        name: String,
    },
    ChainExtended {
        name: String,
        count: u32,
        participants: Vec<String>,
        discovered: bool,
    },
    ChainBroken {
        actor: String,
    },
    DamageDealt {
        amount: i32,
        chain_boosted: bool,
        crits: u32,
    },
    ArtGlimmered {
        character: String,
        art: ArtId,
    },
    EnemyDefeated,
    BattleEnded {
        outcome: String,
    },
}

/// One log entry: the round it happened in plus a rendered description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEvent {
    pub round: Round,
    pub event: BattleEventType,
    pub description: String,
}

/// Append-only event log for a single battle session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn push(&mut self, round: Round, event: BattleEventType, description: impl Into<String>) {
        self.events.push(BattleEvent {
            round,
            event,
            description: description.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tagged_type() {
        let mut log = BattleEventLog::default();
        log.push(
            2,
            BattleEventType::DamageDealt {
                amount: 42,
                chain_boosted: true,
                crits: 1,
            },
            "The chain lands for 42",
        );

        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains(r#""type":"damage_dealt""#));

        let back: BattleEventLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.events, log.events);
    }

    #[test]
    fn log_preserves_push_order() {
        let mut log = BattleEventLog::default();
        log.push(1, BattleEventType::BattleStarted, "begin");
        log.push(
            1,
            BattleEventType::RoundStarted {
                round: 1,
                turn_order: vec!["Hero".into()],
            },
            "round 1",
        );
        log.push(1, BattleEventType::EnemyDefeated, "down");

        let kinds: Vec<_> = log.iter().map(|e| &e.event).collect();
        assert!(matches!(kinds[0], BattleEventType::BattleStarted));
        assert!(matches!(kinds[2], BattleEventType::EnemyDefeated));
    }
}
