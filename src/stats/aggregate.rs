//! Stat aggregation
//!
//! Combines a base profile with a set of items into one aggregate profile.

use crate::items::Item;
use crate::roster::BaseProfile;

use super::{AggregateStats, Stat, COOLDOWN_MULTIPLIER_FLOOR, DAMAGE_REDUCTION_CAP};

/// Resolve the stats a character ends up with after buying `items`.
///
/// Pure and deterministic: the same base and item set always yield the same
/// profile, and nothing is carried over between calls. Flat stats stack
/// additively; Cooldown Reduction stacks multiplicatively on the remaining
/// multiplier, so two 10% reductions give 19%, not 20%. The clamped
/// multiplier then scales Ability Power, coupling cooldown investment to
/// effective ability output.
///
/// Special effects are evaluated last, each against the same post-fold
/// snapshot, so item ordering within the set never changes the result.
pub fn aggregate(base: &BaseProfile, items: &[&Item]) -> AggregateStats {
    let mut stats = AggregateStats::from_base(base.hp, base.shields, base.armor);

    for item in items {
        for modifier in &item.modifiers {
            match modifier.stat {
                // Each reduction applies to what remains, not the baseline.
                Stat::CooldownReduction => stats.cooldown_multiplier *= 1.0 - modifier.value,
                Stat::Hp => stats.hp += modifier.value,
                Stat::Shields => stats.shields += modifier.value,
                Stat::Armor => stats.armor += modifier.value,
                Stat::WeaponPower => stats.weapon_power += modifier.value,
                Stat::AbilityPower => stats.ability_power += modifier.value,
                Stat::AttackSpeed => stats.attack_speed += modifier.value,
                Stat::ReloadSpeed => stats.reload_speed += modifier.value,
                Stat::DamageReduction => stats.damage_reduction += modifier.value,
                Stat::WeaponLifesteal => stats.weapon_lifesteal += modifier.value,
                Stat::AbilityLifesteal => stats.ability_lifesteal += modifier.value,
                Stat::MoveSpeed => stats.move_speed += modifier.value,
                Stat::MeleeDamage => stats.melee_damage += modifier.value,
                Stat::CriticalHitDamage => stats.critical_hit_damage += modifier.value,
                Stat::MaxAmmo => stats.max_ammo += modifier.value,
            }
        }
    }

    // Total reduction caps at 90%; keeps the DPS division away from zero.
    stats.cooldown_multiplier = stats.cooldown_multiplier.max(COOLDOWN_MULTIPLIER_FLOOR);
    stats.ability_power *= stats.cooldown_multiplier;
    stats.damage_reduction = stats.damage_reduction.min(DAMAGE_REDUCTION_CAP);
    stats.total_hp = stats.hp + stats.shields + stats.armor;

    // Effects read one shared snapshot, never each other's contributions.
    let snapshot = stats.clone();
    for item in items {
        if let Some(effect) = &item.effect {
            stats.bonus_damage += effect.bonus_damage(&snapshot);
        }
    }

    stats
}
