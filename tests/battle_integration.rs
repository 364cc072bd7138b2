//! End-to-end battles exercising the round loop against tuned constants

use resonance_engine::battle::{
    BattleEventType, BattleOutcome, BattleSession, UniformPolicy,
};
use resonance_engine::catalog::{
    ArtCatalog, Constants, DamageConstants, EnergyConstants, GlimmerConstants, ResonanceConstants,
    ScheduleConstants,
};
use resonance_engine::core::types::{ArtId, CharacterId};
use resonance_engine::party::{Character, Enemy, EnemyStats, Stats};

fn solo(name: &str, stats: Stats, arts: &[&str]) -> Vec<Character> {
    vec![Character::new(
        CharacterId(1),
        name,
        stats,
        arts.iter().map(|id| ArtId::from(*id)).collect(),
    )]
}

fn trio() -> Vec<Character> {
    vec![
        Character::new(
            CharacterId(1),
            "Hero",
            Stats {
                strength: 45,
                qui: 70,
                ..Stats::default()
            },
            vec![ArtId::from("basic_slash")],
        ),
        Character::new(
            CharacterId(2),
            "Mage",
            Stats {
                intellect: 50,
                qui: 40,
                ..Stats::default()
            },
            vec![ArtId::from("firebolt")],
        ),
        Character::new(
            CharacterId(3),
            "Monk",
            Stats {
                agility: 40,
                qui: 90,
                ..Stats::default()
            },
            vec![ArtId::from("straight_punch")],
        ),
    ]
}

fn durable_enemy() -> Enemy {
    Enemy::new("Abyssal Warden", 1_000_000, EnemyStats::default())
}

fn no_resonance() -> ResonanceConstants {
    ResonanceConstants {
        chain_start_chance: 0.0,
        chain_continue_chance: 0.0,
        max_chain: 5,
    }
}

fn no_glimmer() -> GlimmerConstants {
    GlimmerConstants {
        base_chance: 0.0,
        chain_bonus: 0.0,
    }
}

fn rounds_with_actions(session: &BattleSession) -> Vec<u32> {
    session
        .log
        .iter()
        .filter_map(|e| match e.event {
            BattleEventType::RoundStarted { round, .. } => Some(round),
            _ => None,
        })
        .collect()
}

#[test]
fn energy_starvation_forces_a_skipped_round() {
    // Two energy, regen one, cost two: act, starve, act again.
    let mut constants = Constants::default();
    constants.energy = EnergyConstants {
        max_energy: 2,
        regen_per_turn: 1,
    };
    constants.resonance = no_resonance();
    constants.glimmer = no_glimmer();

    let mut session = BattleSession::new(
        solo(
            "Hero",
            Stats {
                strength: 30,
                qui: 50,
                ..Stats::default()
            },
            &["basic_slash"],
        ),
        durable_enemy(),
        ArtCatalog::builtin(),
        constants,
        21,
    )
    .unwrap();

    for _ in 0..3 {
        session.run_round(&UniformPolicy);
    }
    assert_eq!(rounds_with_actions(&session), vec![1, 3]);
}

#[test]
fn forced_chain_combines_the_whole_party_into_one_hit() {
    let mut constants = Constants::default();
    constants.resonance = ResonanceConstants {
        chain_start_chance: 1.0,
        chain_continue_chance: 1.0,
        max_chain: 5,
    };
    constants.glimmer = no_glimmer();

    let mut session = BattleSession::new(
        trio(),
        durable_enemy(),
        ArtCatalog::builtin(),
        constants,
        42,
    )
    .unwrap();
    session.run_round(&UniformPolicy);

    let damage_events: Vec<_> = session
        .log
        .iter()
        .filter(|e| matches!(e.event, BattleEventType::DamageDealt { .. }))
        .collect();
    assert_eq!(damage_events.len(), 1, "linked actions land as one event");
    if let BattleEventType::DamageDealt {
        chain_boosted,
        amount,
        ..
    } = damage_events[0].event
    {
        assert!(chain_boosted);
        assert!(amount > 0);
    }

    // Three actions, two links, two fresh grimoire pairings.
    let counts: Vec<u32> = session
        .log
        .iter()
        .filter_map(|e| match &e.event {
            BattleEventType::ChainExtended { count, .. } => Some(*count),
            _ => None,
        })
        .collect();
    assert_eq!(counts, vec![2, 3]);
    assert_eq!(session.grimoire().len(), 2);
}

#[test]
fn mid_round_chain_break_still_pays_the_chain_bonus() {
    // Start always links, continue never does: Monk and Hero form a
    // two-link chain that Mage breaks mid-round. The settled group must
    // carry the multiplier it earned, not the restarted count.
    let mut constants = Constants::default();
    constants.resonance = ResonanceConstants {
        chain_start_chance: 1.0,
        chain_continue_chance: 0.0,
        max_chain: 5,
    };
    constants.glimmer = no_glimmer();
    constants.damage = DamageConstants {
        variance: 0.0,
        crit_base_chance: 0.0,
        crit_dexterity_factor: 0.0,
        ..DamageConstants::default()
    };

    let mut session = BattleSession::new(
        trio(),
        durable_enemy(),
        ArtCatalog::builtin(),
        constants,
        57,
    )
    .unwrap();
    session.run_round(&UniformPolicy);

    let hits: Vec<(i32, bool)> = session
        .log
        .iter()
        .filter_map(|e| match e.event {
            BattleEventType::DamageDealt {
                amount,
                chain_boosted,
                ..
            } => Some((amount, chain_boosted)),
            _ => None,
        })
        .collect();

    // Monk 30 + Hero 36, each scaled by 1 + 2 * 0.10; Mage lands alone.
    assert_eq!(hits, vec![(79, true), (42, false)]);
}

#[test]
fn charged_art_sits_out_until_its_charge_returns() {
    let mut constants = Constants::default();
    constants.resonance = no_resonance();
    constants.glimmer = no_glimmer();

    // bamboo_split: one charge, three-round regeneration.
    let mut session = BattleSession::new(
        solo(
            "Duelist",
            Stats {
                strength: 40,
                qui: 60,
                ..Stats::default()
            },
            &["bamboo_split"],
        ),
        durable_enemy(),
        ArtCatalog::builtin(),
        constants,
        9,
    )
    .unwrap();

    for _ in 0..4 {
        session.run_round(&UniformPolicy);
    }
    assert_eq!(rounds_with_actions(&session), vec![1, 4]);
}

#[test]
fn damage_floor_holds_against_absurd_defense() {
    let mut constants = Constants::default();
    constants.resonance = no_resonance();
    constants.glimmer = no_glimmer();

    let mut session = BattleSession::new(
        solo(
            "Pebble",
            Stats {
                strength: 1,
                qui: 30,
                ..Stats::default()
            },
            &["quick_thrust"],
        ),
        Enemy::new(
            "Fortress",
            1_000_000,
            EnemyStats {
                defense: 100_000,
                ..EnemyStats::default()
            },
        ),
        ArtCatalog::builtin(),
        constants,
        13,
    )
    .unwrap();
    session.run_round(&UniformPolicy);

    let amounts: Vec<i32> = session
        .log
        .iter()
        .filter_map(|e| match e.event {
            BattleEventType::DamageDealt { amount, .. } => Some(amount),
            _ => None,
        })
        .collect();
    assert_eq!(amounts.len(), 1);
    assert!(amounts[0] >= 1);
}

#[test]
fn unpayable_roster_ends_in_stalemate() {
    let mut constants = Constants::default();
    constants.energy = EnergyConstants {
        max_energy: 5,
        regen_per_turn: 0,
    };
    constants.schedule = ScheduleConstants {
        speed_jitter: 6,
        max_rounds: 200,
        stalemate_rounds: 5,
    };

    let mut session = BattleSession::new(
        solo("Dreamer", Stats::default(), &["gravity_press"]),
        durable_enemy(),
        ArtCatalog::builtin(),
        constants,
        17,
    )
    .unwrap();

    let outcome = session.run_to_completion(&UniformPolicy);
    assert_eq!(outcome, BattleOutcome::Stalemate);
    assert_eq!(session.round(), 5);
}

#[test]
fn guaranteed_glimmer_expands_the_roster_mid_battle() {
    let mut constants = Constants::default();
    constants.resonance = no_resonance();
    constants.glimmer = GlimmerConstants {
        base_chance: 1.0,
        chain_bonus: 0.0,
    };

    let mut session = BattleSession::new(
        solo(
            "Novice",
            Stats {
                strength: 30,
                qui: 50,
                ..Stats::default()
            },
            &["basic_slash"],
        ),
        durable_enemy(),
        ArtCatalog::builtin(),
        constants,
        31,
    )
    .unwrap();
    session.run_round(&UniformPolicy);

    assert!(session
        .log
        .iter()
        .any(|e| matches!(e.event, BattleEventType::ArtGlimmered { .. })));
    assert!(session.party()[0].knows(&ArtId::from("cross_cut")));
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed: u64| {
        let mut session = BattleSession::new(
            trio(),
            Enemy::new("Warden", 800, EnemyStats::default()),
            ArtCatalog::builtin(),
            Constants::default(),
            seed,
        )
        .unwrap();
        session.run_to_completion(&UniformPolicy);
        serde_json::to_string(&session.log).unwrap()
    };

    assert_eq!(run(1234), run(1234));
    assert_ne!(run(1234), run(1235));
}

#[test]
fn overkill_stops_the_remaining_turn_order() {
    // Tiny enemy, no variance or crits so the first hit is decisive.
    let mut constants = Constants::default();
    constants.resonance = no_resonance();
    constants.glimmer = no_glimmer();
    constants.damage = DamageConstants {
        variance: 0.0,
        crit_base_chance: 0.0,
        crit_dexterity_factor: 0.0,
        ..DamageConstants::default()
    };

    let mut session = BattleSession::new(
        trio(),
        Enemy::new("Wisp", 3, EnemyStats::default()),
        ArtCatalog::builtin(),
        constants,
        77,
    )
    .unwrap();
    let outcome = session.run_to_completion(&UniformPolicy);

    assert_eq!(outcome, BattleOutcome::Victory);
    assert_eq!(session.enemy().hp, 0);
    assert_eq!(session.round(), 1);
}
