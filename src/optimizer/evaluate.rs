//! Target scoring
//!
//! Reduces an aggregate profile to the single number a search maximizes.

use serde::{Deserialize, Serialize};

use crate::stats::{AggregateStats, Stat};

/// What a search is asked to maximize: either a direct stat read or one of
/// the derived formulas.
///
/// A closed dispatch table — an unknown target cannot reach the evaluator,
/// it fails at parse time instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Stat(Stat),
    TotalHp,
    EffectiveHp,
    WeaponDps,
    AbilityDps,
}

/// Every selectable target, in display order.
pub const ALL_TARGETS: &[Target] = &[
    Target::Stat(Stat::Hp),
    Target::Stat(Stat::Shields),
    Target::Stat(Stat::Armor),
    Target::TotalHp,
    Target::EffectiveHp,
    Target::Stat(Stat::WeaponPower),
    Target::Stat(Stat::AbilityPower),
    Target::Stat(Stat::AttackSpeed),
    Target::Stat(Stat::ReloadSpeed),
    Target::Stat(Stat::CooldownReduction),
    Target::Stat(Stat::DamageReduction),
    Target::Stat(Stat::WeaponLifesteal),
    Target::Stat(Stat::AbilityLifesteal),
    Target::Stat(Stat::MoveSpeed),
    Target::Stat(Stat::MeleeDamage),
    Target::Stat(Stat::CriticalHitDamage),
    Target::Stat(Stat::MaxAmmo),
    Target::WeaponDps,
    Target::AbilityDps,
];

impl Target {
    pub fn name(&self) -> &'static str {
        match self {
            Target::Stat(stat) => stat.name(),
            Target::TotalHp => "Total HP",
            Target::EffectiveHp => "Effective HP",
            Target::WeaponDps => "Weapon DPS",
            Target::AbilityDps => "Ability DPS",
        }
    }

    /// Parse a display name back into a target.
    pub fn parse(name: &str) -> Option<Target> {
        ALL_TARGETS.iter().copied().find(|t| t.name() == name)
    }

    /// Stats that can move this target's score.
    ///
    /// Drives the search pre-filter and the report's stat breakdown. Ability
    /// Power and Cooldown Reduction are mutually relevant because the
    /// aggregator couples them.
    pub fn relevant_stats(&self) -> &'static [Stat] {
        match self {
            Target::Stat(Stat::Hp) => &[Stat::Hp],
            Target::Stat(Stat::Shields) => &[Stat::Shields],
            Target::Stat(Stat::Armor) => &[Stat::Armor],
            Target::Stat(Stat::WeaponPower) => &[Stat::WeaponPower],
            Target::Stat(Stat::AbilityPower) => &[Stat::AbilityPower, Stat::CooldownReduction],
            Target::Stat(Stat::AttackSpeed) => &[Stat::AttackSpeed],
            Target::Stat(Stat::ReloadSpeed) => &[Stat::ReloadSpeed],
            Target::Stat(Stat::CooldownReduction) => {
                &[Stat::CooldownReduction, Stat::AbilityPower]
            }
            Target::Stat(Stat::DamageReduction) => &[Stat::DamageReduction],
            Target::Stat(Stat::WeaponLifesteal) => &[Stat::WeaponLifesteal],
            Target::Stat(Stat::AbilityLifesteal) => &[Stat::AbilityLifesteal],
            Target::Stat(Stat::MoveSpeed) => &[Stat::MoveSpeed],
            Target::Stat(Stat::MeleeDamage) => &[Stat::MeleeDamage],
            Target::Stat(Stat::CriticalHitDamage) => &[Stat::CriticalHitDamage],
            Target::Stat(Stat::MaxAmmo) => &[Stat::MaxAmmo],
            Target::TotalHp => &[Stat::Hp, Stat::Shields, Stat::Armor],
            Target::EffectiveHp => &[Stat::Hp, Stat::Shields, Stat::Armor, Stat::DamageReduction],
            Target::WeaponDps => &[
                Stat::WeaponPower,
                Stat::AttackSpeed,
                Stat::ReloadSpeed,
                Stat::CriticalHitDamage,
            ],
            Target::AbilityDps => &[Stat::AbilityPower, Stat::CooldownReduction],
        }
    }

    /// Whether this target's score consumes the bonus-damage accumulator.
    pub fn is_dps(&self) -> bool {
        matches!(self, Target::WeaponDps | Target::AbilityDps)
    }
}

/// Tunable constants of the DPS formulas.
///
/// Historical versions of the scoring disagreed on the Ability-DPS details
/// (divide by the remaining multiplier vs. the reduction fraction, lifesteal
/// in or out), so the knobs live here instead of being baked into the
/// evaluator. Defaults follow the canonical rule: divide by the remaining
/// cooldown multiplier, lifesteal excluded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpsPolicy {
    /// Baseline weapon damage per second before modifiers.
    pub base_weapon_damage: f64,
    /// Baseline ability damage per cast cycle.
    pub base_ability_damage: f64,
    /// Multiply Ability DPS by `(1 + Ability Lifesteal)`.
    pub include_ability_lifesteal: bool,
}

impl Default for DpsPolicy {
    fn default() -> Self {
        Self {
            base_weapon_damage: 100.0,
            base_ability_damage: 80.0,
            include_ability_lifesteal: false,
        }
    }
}

/// Score an aggregate profile against a target.
///
/// Direct targets read the stat; the four derived targets compute their
/// formulas from the aggregate. Division safety comes from the aggregator's
/// clamps, not from checks here.
pub fn evaluate(stats: &AggregateStats, target: Target, policy: &DpsPolicy) -> f64 {
    match target {
        Target::Stat(stat) => stats.get(stat),
        Target::TotalHp => stats.total_hp,
        Target::EffectiveHp => stats.total_hp / (1.0 - stats.damage_reduction),
        Target::WeaponDps => {
            policy.base_weapon_damage
                * (1.0 + stats.weapon_power)
                * (1.0 + stats.attack_speed)
                * (1.0 + stats.reload_speed)
                * (1.0 + stats.critical_hit_damage)
                + stats.bonus_damage
        }
        Target::AbilityDps => {
            let numerator =
                policy.base_ability_damage * (1.0 + stats.ability_power) + stats.bonus_damage;
            let dps = numerator / stats.cooldown_multiplier;
            if policy.include_ability_lifesteal {
                dps * (1.0 + stats.ability_lifesteal)
            } else {
                dps
            }
        }
    }
}
