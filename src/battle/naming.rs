//! Resonance naming: composite names for linked actions
//!
//! Decorative but deterministic under a fixed seed. Names are built from
//! attribute-keyed word pools, occasionally short-circuited by hard-coded
//! special pairings or escalated with honorific and epic prefixes.

use rand::{Rng, RngCore};

use crate::catalog::Attribute;

/// Chance a hard-coded pairing name is used when a chain reaches count 2.
pub const SPECIAL_PAIR_CHANCE: f64 = 0.30;
/// Chance a longer chain grows by honorific prefix instead of a new compound.
pub const HONORIFIC_CHANCE: f64 = 0.40;
/// Chance the suffix slot is filled with the literal skill name.
pub const LITERAL_SUFFIX_CHANCE: f64 = 0.35;

const HONORIFICS: [&str; 4] = ["True-", "Ultimate-", "Apex-", "Zenith-"];
const EPIC_PREFIXES: [&str; 4] = ["Grand ", "Mythic ", "Celestial ", "Transcendent "];
/// None, a particle, a bullet separator, or a space.
const CONNECTORS: [&str; 4] = ["", "-", "・", " "];

fn prefix_pool(attribute: Attribute) -> &'static [&'static str] {
    match attribute {
        Attribute::Slash => &["Moonlit", "Razor", "Crescent"],
        Attribute::Blunt => &["Iron", "Quaking", "Granite"],
        Attribute::Pierce => &["Needle", "Viper", "Comet"],
        Attribute::Fire => &["Blazing", "Ember", "Scorching"],
        Attribute::Ice => &["Frost", "Glacier", "Winter"],
        Attribute::Thunder => &["Storm", "Volt", "Thunderous"],
        Attribute::Wind => &["Gale", "Zephyr", "Tempest"],
        Attribute::Light => &["Radiant", "Halo", "Dawning"],
        Attribute::Dark => &["Umbral", "Gloom", "Eclipse"],
    }
}

fn suffix_pool(attribute: Attribute) -> &'static [&'static str] {
    match attribute {
        Attribute::Slash => &["Fang", "Edge", "Cleave"],
        Attribute::Blunt => &["Crush", "Breaker", "Impact"],
        Attribute::Pierce => &["Lance", "Sting", "Drill"],
        Attribute::Fire => &["Flare", "Pyre", "Burst"],
        Attribute::Ice => &["Shard", "Veil", "Lock"],
        Attribute::Thunder => &["Bolt", "Arc", "Roar"],
        Attribute::Wind => &["Dance", "Rend", "Spiral"],
        Attribute::Light => &["Ray", "Grace", "Lumen"],
        Attribute::Dark => &["Maw", "Shroud", "Pall"],
    }
}

/// Hard-coded names for famous two-art attribute pairings.
fn special_pair(previous: Attribute, current: Attribute) -> Option<&'static str> {
    use Attribute::*;
    match (previous, current) {
        (Slash, Slash) => Some("Twin Moon Cross"),
        (Fire, Ice) | (Ice, Fire) => Some("Thermal Schism"),
        (Thunder, Fire) => Some("Plasma Cascade"),
        (Light, Dark) | (Dark, Light) => Some("Eclipse Communion"),
        (Blunt, Pierce) => Some("Shatterpoint Drive"),
        (Wind, Slash) => Some("Vacuum Waltz"),
        _ => None,
    }
}

fn has_separator(name: &str) -> bool {
    name.contains('・') || name.contains('-')
}

fn pick<'a>(rng: &mut dyn RngCore, pool: &[&'a str]) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Combine the running composite name with a newly linked action's name.
///
/// `count` is the chain count after the link. The result is always
/// non-empty and attribute-flavored; two calls with identical inputs and an
/// identically seeded RNG produce identical names.
pub fn compose(
    previous_name: &str,
    previous_attribute: Attribute,
    current_name: &str,
    current_attribute: Attribute,
    count: u32,
    rng: &mut dyn RngCore,
) -> String {
    if count == 2 {
        if let Some(name) = special_pair(previous_attribute, current_attribute) {
            if rng.gen::<f64>() < SPECIAL_PAIR_CHANCE {
                return name.to_string();
            }
        }
    }

    if count > 2 && !has_separator(previous_name) && rng.gen::<f64>() < HONORIFIC_CHANCE {
        let name = format!("{}{}", pick(rng, &HONORIFICS), previous_name);
        return escalate(name, count);
    }

    let prefix = pick(rng, prefix_pool(previous_attribute));
    let connector = pick(rng, &CONNECTORS);
    let suffix = if rng.gen::<f64>() < LITERAL_SUFFIX_CHANCE {
        current_name
    } else {
        pick(rng, suffix_pool(current_attribute))
    };

    escalate(format!("{}{}{}", prefix, connector, suffix), count)
}

fn escalate(name: String, count: u32) -> String {
    if count >= 4 {
        // One fixed escalation word per tier above 3, cycling if the chain
        // somehow exceeds the pool.
        let tier = ((count - 4) as usize) % EPIC_PREFIXES.len();
        format!("{}{}", EPIC_PREFIXES[tier], name)
    } else {
        name
    }
}
