//! Stat registry
//!
//! The closed vocabulary of stats shared by items, base profiles, and
//! optimization targets, plus the aggregate profile a build resolves to.

pub mod aggregate;

use serde::{Deserialize, Serialize};

pub use aggregate::aggregate;

/// Lowest the remaining-cooldown multiplier can go (90% total reduction).
pub const COOLDOWN_MULTIPLIER_FLOOR: f64 = 0.1;

/// Highest effective damage reduction (never reaches 100%).
pub const DAMAGE_REDUCTION_CAP: f64 = 0.99;

/// Every stat an item, base profile, or target may reference.
///
/// Keeping this a closed enum (rather than free-form strings) is what makes
/// aggregation well-defined: a catalog file naming anything else fails to
/// parse instead of silently contributing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Hp,
    Shields,
    Armor,
    WeaponPower,
    AbilityPower,
    AttackSpeed,
    ReloadSpeed,
    CooldownReduction,
    DamageReduction,
    WeaponLifesteal,
    AbilityLifesteal,
    MoveSpeed,
    MeleeDamage,
    CriticalHitDamage,
    MaxAmmo,
}

impl Stat {
    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Shields => "Shields",
            Stat::Armor => "Armor",
            Stat::WeaponPower => "Weapon Power",
            Stat::AbilityPower => "Ability Power",
            Stat::AttackSpeed => "Attack Speed",
            Stat::ReloadSpeed => "Reload Speed",
            Stat::CooldownReduction => "Cooldown Reduction",
            Stat::DamageReduction => "Damage Reduction",
            Stat::WeaponLifesteal => "Weapon Lifesteal",
            Stat::AbilityLifesteal => "Ability Lifesteal",
            Stat::MoveSpeed => "Move Speed",
            Stat::MeleeDamage => "Melee Damage",
            Stat::CriticalHitDamage => "Critical Hit Damage",
            Stat::MaxAmmo => "Max Ammo",
        }
    }

    /// Parse a display name back into a stat
    pub fn parse(name: &str) -> Option<Stat> {
        Stat::all().iter().copied().find(|s| s.name() == name)
    }

    /// All registered stats, in display order
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Hp,
            Stat::Shields,
            Stat::Armor,
            Stat::WeaponPower,
            Stat::AbilityPower,
            Stat::AttackSpeed,
            Stat::ReloadSpeed,
            Stat::CooldownReduction,
            Stat::DamageReduction,
            Stat::WeaponLifesteal,
            Stat::AbilityLifesteal,
            Stat::MoveSpeed,
            Stat::MeleeDamage,
            Stat::CriticalHitDamage,
            Stat::MaxAmmo,
        ]
    }

    /// Whether this stat is a fraction of baseline (displayed as a percentage)
    /// rather than a flat amount like HP or ammo.
    pub fn is_fractional(&self) -> bool {
        !matches!(self, Stat::Hp | Stat::Shields | Stat::Armor | Stat::MaxAmmo)
    }
}

/// The combined stat profile of a base character plus a set of items.
///
/// Produced fresh by [`aggregate`] for every candidate build and never
/// mutated afterwards. Cooldown Reduction is carried as the remaining
/// multiplier (`1.0` = no reduction); [`AggregateStats::cooldown_reduction`]
/// converts it back to the reduction fraction for display and direct reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    pub hp: f64,
    pub shields: f64,
    pub armor: f64,
    pub weapon_power: f64,
    pub ability_power: f64,
    pub attack_speed: f64,
    pub reload_speed: f64,
    /// Remaining cooldown as a fraction of baseline, floored at
    /// [`COOLDOWN_MULTIPLIER_FLOOR`].
    pub cooldown_multiplier: f64,
    /// Clamped at [`DAMAGE_REDUCTION_CAP`].
    pub damage_reduction: f64,
    pub weapon_lifesteal: f64,
    pub ability_lifesteal: f64,
    pub move_speed: f64,
    pub melee_damage: f64,
    pub critical_hit_damage: f64,
    pub max_ammo: f64,
    /// HP + Shields + Armor, derived for convenience.
    pub total_hp: f64,
    /// Flat damage contributed by special-effect items; consumed only by the
    /// DPS evaluators, never by direct stat reads.
    pub bonus_damage: f64,
}

impl AggregateStats {
    /// A profile seeded from base HP/Shields/Armor with every other stat at
    /// its additive identity and no cooldown reduction applied.
    pub fn from_base(hp: f64, shields: f64, armor: f64) -> Self {
        Self {
            hp,
            shields,
            armor,
            weapon_power: 0.0,
            ability_power: 0.0,
            attack_speed: 0.0,
            reload_speed: 0.0,
            cooldown_multiplier: 1.0,
            damage_reduction: 0.0,
            weapon_lifesteal: 0.0,
            ability_lifesteal: 0.0,
            move_speed: 0.0,
            melee_damage: 0.0,
            critical_hit_damage: 0.0,
            max_ammo: 0.0,
            total_hp: hp + shields + armor,
            bonus_damage: 0.0,
        }
    }

    /// Total cooldown reduction as a fraction (0.19 = 19% shorter cooldowns).
    pub fn cooldown_reduction(&self) -> f64 {
        1.0 - self.cooldown_multiplier
    }

    /// Direct read of a registered stat.
    ///
    /// Cooldown Reduction reads as the reduction fraction, not the internal
    /// multiplier.
    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Shields => self.shields,
            Stat::Armor => self.armor,
            Stat::WeaponPower => self.weapon_power,
            Stat::AbilityPower => self.ability_power,
            Stat::AttackSpeed => self.attack_speed,
            Stat::ReloadSpeed => self.reload_speed,
            Stat::CooldownReduction => self.cooldown_reduction(),
            Stat::DamageReduction => self.damage_reduction,
            Stat::WeaponLifesteal => self.weapon_lifesteal,
            Stat::AbilityLifesteal => self.ability_lifesteal,
            Stat::MoveSpeed => self.move_speed,
            Stat::MeleeDamage => self.melee_damage,
            Stat::CriticalHitDamage => self.critical_hit_damage,
            Stat::MaxAmmo => self.max_ammo,
        }
    }
}
