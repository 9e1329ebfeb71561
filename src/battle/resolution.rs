//! Attack resolution: roll to hit, apply wounds, report knockout
//!
//! The chance and damage formulas live in [`calculations`]; this module
//! samples the roll and mutates the defender. Randomness comes in through
//! the caller's `Rng` so encounters stay replayable from a seed.
//!
//! [`calculations`]: crate::battle::calculations

use rand::Rng;

use crate::battle::calculations::{attack_damage, chance_to_hit, CombatOverrides, DamageType, WeaponProfile};
use crate::battle::units::CombatUnit;

/// Everything that happened in one attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackOutcome {
    pub chance: f32,
    pub hit: bool,
    pub damage: u32,
    /// Defender crossed the knockout threshold on this attack
    pub knocked_out: bool,
}

/// Resolve one attack against the defender, applying wounds on a hit.
///
/// A defender knocked out here keeps its tile; the manifest is untouched.
/// Attacks against an already knocked-out defender still roll but report
/// `knocked_out: false`.
pub fn resolve_attack(
    attacker: &CombatUnit,
    defender: &mut CombatUnit,
    weapon: Option<&WeaponProfile>,
    damage_type: DamageType,
    overrides: &CombatOverrides,
    rng: &mut impl Rng,
) -> AttackOutcome {
    let chance = chance_to_hit(attacker, defender, damage_type, overrides);
    let hit = rng.gen::<f32>() < chance;

    if !hit {
        tracing::info!(
            attacker = %attacker.name,
            defender = %defender.name,
            chance,
            "attack missed"
        );
        return AttackOutcome {
            chance,
            hit: false,
            damage: 0,
            knocked_out: false,
        };
    }

    let was_out = defender.is_knocked_out();
    let damage = attack_damage(attacker, weapon, defender, damage_type, overrides);
    defender.apply_damage(damage);
    let knocked_out = !was_out && defender.is_knocked_out();

    tracing::info!(
        attacker = %attacker.name,
        defender = %defender.name,
        chance,
        damage,
        knocked_out,
        "attack hit"
    );

    AttackOutcome {
        chance,
        hit: true,
        damage,
        knocked_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::units::{ClassKind, UnitStats};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn unit(stats: UnitStats) -> CombatUnit {
        CombatUnit::new("test", ClassKind::Knight, stats)
    }

    #[test]
    fn test_forced_hit_applies_damage() {
        let attacker = unit(UnitStats {
            physical_power: 25,
            ..UnitStats::default()
        });
        let mut defender = unit(UnitStats::default());
        let overrides = CombatOverrides::default().force_hit_chance(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            None,
            DamageType::Physical,
            &overrides,
            &mut rng,
        );
        assert!(outcome.hit);
        assert_eq!(outcome.damage, 25);
        assert_eq!(defender.wounds, 25);
        assert!(!outcome.knocked_out);
    }

    #[test]
    fn test_forced_miss_leaves_defender_untouched() {
        let attacker = unit(UnitStats::default());
        let mut defender = unit(UnitStats::default());
        let overrides = CombatOverrides::default().force_hit_chance(0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            None,
            DamageType::Physical,
            &overrides,
            &mut rng,
        );
        assert!(!outcome.hit);
        assert_eq!(outcome.damage, 0);
        assert_eq!(defender.wounds, 0);
    }

    #[test]
    fn test_knockout_reported_once() {
        let attacker = unit(UnitStats::default());
        let mut defender = unit(UnitStats {
            max_health: 10,
            ..UnitStats::default()
        });
        let overrides = CombatOverrides::default().force_hit_chance(1.0).force_damage(10);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let first = resolve_attack(
            &attacker,
            &mut defender,
            None,
            DamageType::Physical,
            &overrides,
            &mut rng,
        );
        assert!(first.knocked_out);
        assert!(defender.is_knocked_out());

        let second = resolve_attack(
            &attacker,
            &mut defender,
            None,
            DamageType::Physical,
            &overrides,
            &mut rng,
        );
        assert!(!second.knocked_out);
    }

    #[test]
    fn test_seeded_rng_replays_identically() {
        let attacker = unit(UnitStats::default());
        let overrides = CombatOverrides::NONE;

        let run = |seed: u64| {
            let mut defender = unit(UnitStats::default());
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..20)
                .map(|_| {
                    resolve_attack(
                        &attacker,
                        &mut defender,
                        None,
                        DamageType::Physical,
                        &overrides,
                        &mut rng,
                    )
                    .hit
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_weapon_flows_through() {
        let attacker = unit(UnitStats {
            magic_power: 12,
            ..UnitStats::default()
        });
        let mut defender = unit(UnitStats::default());
        let staff = WeaponProfile {
            magical_modifier: 6,
            magical_multiplier: 2.0,
            ..WeaponProfile::UNARMED
        };
        let overrides = CombatOverrides::default().force_hit_chance(1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            Some(&staff),
            DamageType::Magical,
            &overrides,
            &mut rng,
        );
        // (12 + 6) * 2.0 = 36
        assert_eq!(outcome.damage, 36);
    }
}
