//! Builtin art roster
//!
//! A self-contained catalog so the engine runs without any external data
//! source. Inspiration links are wired so glimmer is reachable from the
//! basic arts each weapon school starts with.

use crate::catalog::art::{Art, Attribute, ChargeSpec, ComboRole, ComboSpec, TimingSpec};
use crate::core::types::ArtId;

fn art(id: &str, name: &str, attribute: Attribute, base_power: i32, energy_cost: i32) -> Art {
    Art {
        id: ArtId::from(id),
        name: name.to_string(),
        description: String::new(),
        base_power,
        attribute,
        energy_cost,
        cooldown_turns: 0,
        charges: None,
        combo: ComboSpec::default(),
        timing: TimingSpec::default(),
        inspiration_source: Vec::new(),
        repeat_penalty: None,
    }
}

fn combo(send: &[&str], receive: &[&str], role: ComboRole, max_depth: u32) -> ComboSpec {
    ComboSpec {
        send_tags: send.iter().map(|t| t.to_string()).collect(),
        receive_tags: receive.iter().map(|t| t.to_string()).collect(),
        interrupts_chain: false,
        role,
        max_chain_depth: max_depth,
    }
}

fn inspired_by(ids: &[&str]) -> Vec<ArtId> {
    ids.iter().map(|id| ArtId::from(*id)).collect()
}

/// Build the full builtin roster in catalog order.
pub fn builtin_arts() -> Vec<Art> {
    use Attribute::*;
    use ComboRole::*;

    vec![
        // Sword / greatsword
        Art {
            combo: combo(&["Slash"], &["Slash", "Blunt", "Pierce", "Magic"], Starter, 1),
            ..art("basic_slash", "Basic Slash", Slash, 80, 2)
        },
        Art {
            cooldown_turns: 1,
            combo: combo(&["Slash", "Cross"], &["Slash"], Connector, 3),
            inspiration_source: inspired_by(&["basic_slash"]),
            ..art("cross_cut", "Cross Cut", Slash, 110, 3)
        },
        Art {
            combo: combo(&["Slash", "Wind"], &["Slash", "Wind"], Starter, 2),
            inspiration_source: inspired_by(&["basic_slash", "cross_cut"]),
            ..art("sonic_blade", "Sonic Blade", Wind, 90, 3)
        },
        Art {
            combo: combo(&["Blunt", "Down"], &["Slash", "Pierce", "Blunt"], Starter, 1),
            ..art("helm_smash", "Helm Smash", Blunt, 100, 3)
        },
        Art {
            cooldown_turns: 2,
            combo: combo(&["Down", "Quake"], &["Down", "Blunt"], Connector, 4),
            inspiration_source: inspired_by(&["helm_smash"]),
            ..art("ground_breaker", "Ground Breaker", Slash, 140, 6)
        },
        // Dagger / katana
        Art {
            timing: TimingSpec {
                fast_bonus: 10,
                delay_penalty: 0,
            },
            combo: combo(&["Pierce"], &["Slash", "Blunt", "Pierce", "Magic"], Starter, 1),
            ..art("quick_thrust", "Quick Thrust", Pierce, 70, 1)
        },
        Art {
            combo: combo(&["InstantStop", "Dark"], &["Pierce"], Connector, 2),
            inspiration_source: inspired_by(&["quick_thrust"]),
            ..art("shadow_stitch", "Shadow Stitch", Dark, 50, 2)
        },
        Art {
            timing: TimingSpec {
                fast_bonus: 15,
                delay_penalty: 0,
            },
            combo: combo(&["Slash", "InstantStop"], &["Slash", "InstantStop"], Starter, 1),
            ..art("iai_strike", "Iai Strike", Slash, 95, 3)
        },
        Art {
            charges: Some(ChargeSpec {
                max: 1,
                start: 1,
                regen_interval: 3,
            }),
            timing: TimingSpec {
                fast_bonus: 0,
                delay_penalty: 10,
            },
            combo: combo(&["DeadStop"], &["InstantStop", "Slash"], Finisher, 99),
            inspiration_source: inspired_by(&["iai_strike"]),
            ..art("bamboo_split", "Bamboo Split", Slash, 160, 7)
        },
        // Fist
        Art {
            combo: combo(&["Blunt"], &["Blunt", "Slash", "Pierce"], Starter, 1),
            ..art("straight_punch", "Straight Punch", Blunt, 75, 2)
        },
        Art {
            cooldown_turns: 1,
            combo: combo(&["Spark", "Blunt"], &["Blunt", "Spark"], Connector, 3),
            inspiration_source: inspired_by(&["straight_punch"]),
            ..art("lightning_kick", "Lightning Kick", Thunder, 110, 4)
        },
        Art {
            cooldown_turns: 2,
            combo: combo(&["Magic", "Light"], &["Blunt", "Magic"], Connector, 4),
            inspiration_source: inspired_by(&["straight_punch", "lightning_kick"]),
            ..art("aura_blast", "Aura Blast", Light, 130, 5)
        },
        // Magic
        Art {
            combo: combo(&["Hot", "Magic"], &["Magic", "Slash", "Blunt"], Starter, 1),
            ..art("firebolt", "Firebolt", Fire, 85, 2)
        },
        Art {
            cooldown_turns: 3,
            combo: combo(&["Hot", "Down"], &["Hot", "Down"], Connector, 3),
            inspiration_source: inspired_by(&["firebolt"]),
            ..art("eruption", "Eruption", Fire, 140, 5)
        },
        Art {
            combo: combo(&["Cold", "Magic"], &["Magic", "Pierce"], Starter, 1),
            ..art("ice_needle", "Ice Needle", Ice, 85, 2)
        },
        Art {
            charges: Some(ChargeSpec {
                max: 2,
                start: 1,
                regen_interval: 2,
            }),
            combo: combo(&["Cold", "Snow"], &["Cold", "Magic"], Finisher, 99),
            inspiration_source: inspired_by(&["ice_needle"]),
            ..art("blizzard", "Blizzard", Ice, 130, 6)
        },
        Art {
            combo: combo(&["Dark", "Magic"], &["Magic", "Blunt", "Slash", "Pierce"], Connector, 3),
            ..art("shadow_ball", "Shadow Ball", Dark, 90, 3)
        },
        Art {
            cooldown_turns: 3,
            charges: Some(ChargeSpec {
                max: 1,
                start: 1,
                regen_interval: 4,
            }),
            combo: combo(&["DeadStop"], &["Dark", "Magic", "Down"], Finisher, 99),
            inspiration_source: inspired_by(&["shadow_ball", "shadow_stitch"]),
            ..art("gravity_press", "Gravity Press", Dark, 170, 8)
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let arts = builtin_arts();
        let mut ids: Vec<_> = arts.iter().map(|a| a.id.clone()).collect();
        ids.sort_by(|a, b| a.0.cmp(&b.0));
        ids.dedup();
        assert_eq!(ids.len(), arts.len());
    }

    #[test]
    fn inspiration_links_resolve_within_roster() {
        let arts = builtin_arts();
        for a in &arts {
            for src in &a.inspiration_source {
                assert!(
                    arts.iter().any(|other| &other.id == src),
                    "{} points at missing inspiration source {}",
                    a.id,
                    src
                );
            }
        }
    }

    #[test]
    fn finishers_carry_charges_or_cooldowns() {
        let arts = builtin_arts();
        for a in arts
            .iter()
            .filter(|a| a.combo.role == ComboRole::Finisher)
        {
            assert!(a.charges.is_some() || a.cooldown_turns > 0, "{}", a.id);
        }
    }
}
