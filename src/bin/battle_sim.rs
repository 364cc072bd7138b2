//! Headless Battle Simulator
//!
//! Runs a seeded party-versus-enemy battle and prints a JSON or text summary.

use clap::Parser;
use serde::Serialize;

use resonance_engine::battle::{BattleEventType, BattleOutcome, BattleSession, UniformPolicy};
use resonance_engine::catalog::{ArtCatalog, Constants};
use resonance_engine::core::types::{ArtId, CharacterId};
use resonance_engine::party::{Character, Enemy, EnemyStats, Stats};

/// Headless Battle Simulator - seeded replayable battles
#[derive(Parser, Debug)]
#[command(name = "battle_sim")]
#[command(about = "Run a seeded battle and output a summary")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum rounds before declaring a stalemate
    #[arg(long, default_value_t = 200)]
    max_rounds: u32,

    /// Enemy hit points
    #[arg(long, default_value_t = 1500)]
    enemy_hp: i32,

    /// Enemy defense stat
    #[arg(long, default_value_t = 15)]
    enemy_defense: i32,

    /// Optional TOML file overriding tuning constants
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Print every battle event to stderr as it resolves
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct BattleSummary {
    outcome: String,
    rounds: u32,
    total_damage: i64,
    max_damage: i32,
    resonance_links: u32,
    discoveries: Vec<String>,
    arts_glimmered: u32,
    events: usize,
    seed: u64,
}

fn demo_party() -> Vec<Character> {
    vec![
        Character::new(
            CharacterId(1),
            "Hero",
            Stats {
                strength: 48,
                vitality: 30,
                dexterity: 22,
                agility: 25,
                intellect: 12,
                spirit: 14,
                qui: 70,
            },
            vec![ArtId::from("basic_slash"), ArtId::from("helm_smash")],
        ),
        Character::new(
            CharacterId(2),
            "Mage",
            Stats {
                strength: 8,
                vitality: 18,
                dexterity: 16,
                agility: 20,
                intellect: 52,
                spirit: 40,
                qui: 40,
            },
            vec![ArtId::from("firebolt"), ArtId::from("ice_needle")],
        ),
        Character::new(
            CharacterId(3),
            "Monk",
            Stats {
                strength: 38,
                vitality: 34,
                dexterity: 30,
                agility: 42,
                intellect: 15,
                spirit: 22,
                qui: 90,
            },
            vec![ArtId::from("straight_punch"), ArtId::from("quick_thrust")],
        ),
    ]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut constants = match &args.config {
        Some(path) => Constants::from_toml_file(path).unwrap_or_else(|e| {
            eprintln!("Failed to load config {}: {}", path.display(), e);
            std::process::exit(1);
        }),
        None => Constants::default(),
    };
    constants.schedule.max_rounds = args.max_rounds;

    let enemy = Enemy::new(
        "Abyssal Warden",
        args.enemy_hp,
        EnemyStats {
            strength: 30,
            defense: args.enemy_defense,
            agility: 20,
            intellect: 10,
        },
    );

    let mut session = match BattleSession::new(
        demo_party(),
        enemy,
        ArtCatalog::builtin(),
        constants,
        seed,
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to start battle: {}", e);
            std::process::exit(1);
        }
    };

    let policy = UniformPolicy;
    if args.verbose {
        while session.outcome() == BattleOutcome::Undecided && session.round() < args.max_rounds {
            let events_before = session.log.len();
            session.run_round(&policy);
            for event in session.log.iter().skip(events_before) {
                eprintln!("  [{}] {}", event.round, event.description);
            }
        }
    }
    // Declares a stalemate if the round budget ran out without a decision.
    session.run_to_completion(&policy);

    let glimmered = session
        .log
        .iter()
        .filter(|e| matches!(e.event, BattleEventType::ArtGlimmered { .. }))
        .count() as u32;

    let result = BattleSummary {
        outcome: format!("{:?}", session.outcome()).to_lowercase(),
        rounds: session.round(),
        total_damage: session.stats().total_damage,
        max_damage: session.stats().max_damage,
        resonance_links: session.stats().resonance_total,
        discoveries: session
            .grimoire()
            .entries()
            .iter()
            .map(|e| e.name.clone())
            .collect(),
        arts_glimmered: glimmered,
        events: session.log.len(),
        seed,
    };

    match args.format.as_str() {
        "json" => match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize summary: {}", e),
        },
        "text" => {
            println!("Battle Summary");
            println!("==============");
            println!("Outcome: {}", result.outcome);
            println!("Rounds: {}", result.rounds);
            println!("Total damage: {}", result.total_damage);
            println!("Biggest hit: {}", result.max_damage);
            println!("Resonance links: {}", result.resonance_links);
            for name in &result.discoveries {
                println!("  discovered: {}", name);
            }
            println!("Arts glimmered: {}", result.arts_glimmered);
            println!("Seed: {}", result.seed);
        }
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
    }
}
