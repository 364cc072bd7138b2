//! Glimmer: spontaneous mid-battle learning of new arts
//!
//! After each resolved action the actor may flash onto an art inspired by the
//! one just used. Candidates are scanned in catalog order so a fixed seed
//! always glimmers the same art; at most one art is learned per action.

use rand::{Rng, RngCore};
use tracing::info;

use crate::catalog::constants::GlimmerConstants;
use crate::catalog::ArtCatalog;
use crate::core::types::ArtId;
use crate::party::{ChargeState, Character};

/// Roll glimmer for `character` after using `used` at chain count `chain_count`.
///
/// Returns the newly learned art's id, if any. Learning also seeds the art's
/// charge counter so it is usable on a later turn without a special case.
pub fn roll_glimmer(
    character: &mut Character,
    used: &ArtId,
    chain_count: u32,
    catalog: &ArtCatalog,
    constants: GlimmerConstants,
    rng: &mut dyn RngCore,
) -> Option<ArtId> {
    let chance = constants.base_chance + constants.chain_bonus * chain_count as f64;

    for candidate in catalog.inspired_by(used) {
        if character.knows(&candidate.id) {
            continue;
        }
        if rng.gen::<f64>() < chance {
            character.learned_arts.push(candidate.id.clone());
            if let Some(spec) = candidate.charges {
                character.resources.charges.insert(
                    candidate.id.clone(),
                    ChargeState {
                        current: spec.start,
                        turns_until_regen: spec.regen_interval,
                    },
                );
            }
            info!(
                character = %character.name,
                art = %candidate.id,
                chance,
                "glimmered a new art"
            );
            return Some(candidate.id.clone());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::core::types::CharacterId;
    use crate::party::Stats;

    fn novice() -> Character {
        Character::new(
            CharacterId(1),
            "Novice",
            Stats::default(),
            vec![ArtId::from("basic_slash")],
        )
    }

    fn sure_thing() -> GlimmerConstants {
        GlimmerConstants {
            base_chance: 1.0,
            chain_bonus: 0.0,
        }
    }

    #[test]
    fn guaranteed_glimmer_learns_first_unknown_candidate() {
        let catalog = ArtCatalog::builtin();
        let mut c = novice();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let learned = roll_glimmer(
            &mut c,
            &ArtId::from("basic_slash"),
            1,
            &catalog,
            sure_thing(),
            &mut rng,
        );
        // cross_cut precedes sonic_blade in catalog order
        assert_eq!(learned, Some(ArtId::from("cross_cut")));
        assert!(c.knows(&ArtId::from("cross_cut")));
        assert!(!c.knows(&ArtId::from("sonic_blade")));
    }

    #[test]
    fn zero_chance_never_learns() {
        let catalog = ArtCatalog::builtin();
        let mut c = novice();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let none = GlimmerConstants {
            base_chance: 0.0,
            chain_bonus: 0.0,
        };

        for _ in 0..50 {
            assert_eq!(
                roll_glimmer(&mut c, &ArtId::from("basic_slash"), 5, &catalog, none, &mut rng),
                None
            );
        }
        assert_eq!(c.learned_arts.len(), 1);
    }

    #[test]
    fn known_candidates_are_skipped() {
        let catalog = ArtCatalog::builtin();
        let mut c = novice();
        c.learned_arts.push(ArtId::from("cross_cut"));
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let learned = roll_glimmer(
            &mut c,
            &ArtId::from("basic_slash"),
            1,
            &catalog,
            sure_thing(),
            &mut rng,
        );
        assert_eq!(learned, Some(ArtId::from("sonic_blade")));
    }

    #[test]
    fn glimmered_charged_art_gets_a_charge_counter() {
        let catalog = ArtCatalog::builtin();
        let mut c = Character::new(
            CharacterId(2),
            "Duelist",
            Stats::default(),
            vec![ArtId::from("iai_strike")],
        );
        let mut rng = ChaCha8Rng::seed_from_u64(10);

        let learned = roll_glimmer(
            &mut c,
            &ArtId::from("iai_strike"),
            1,
            &catalog,
            sure_thing(),
            &mut rng,
        );
        assert_eq!(learned, Some(ArtId::from("bamboo_split")));
        let charge = c.resources.charges.get(&ArtId::from("bamboo_split")).unwrap();
        assert_eq!(charge.current, 1);
        assert_eq!(charge.turns_until_regen, 3);
    }
}
