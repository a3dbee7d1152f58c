//! Item definitions
//!
//! Purchasable items: stat modifiers, cost, and optional capabilities
//! (character restriction, special effect).

pub mod catalog;

use serde::{Deserialize, Serialize};

use crate::stats::{AggregateStats, Stat};

pub use catalog::{default_pool, Catalog, CatalogError};

/// Cosmetic grouping used by shop tabs; has no effect on aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Ability,
    Survival,
}

impl ItemCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Ability => "Ability",
            ItemCategory::Survival => "Survival",
        }
    }
}

/// A single stat contribution on an item.
///
/// Flat stats carry whole amounts (`Hp: 25.0`); fractional stats carry
/// fractions of baseline (`AbilityPower: 0.10` = +10%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub stat: Stat,
    pub value: f64,
}

/// Special effects some items carry beyond their static modifiers.
///
/// Each variant is a pure function of the aggregate snapshot: it reads the
/// stats a build has already resolved to and yields extra flat damage for
/// the DPS evaluators. Effects never see each other's output, so item order
/// within a build cannot change the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpecialEffect {
    /// A fixed amount of extra damage per second.
    FlatBonusDamage { amount: f64 },
    /// Extra damage scaling with the build's final Ability Power
    /// (e.g. Pulsar Torpedos).
    AbilityPowerBonusDamage { base: f64 },
    /// Extra damage proportional to the build's Total HP.
    TotalHpBonusDamage { ratio: f64 },
}

impl SpecialEffect {
    /// Flat damage this effect contributes given the resolved stats.
    pub fn bonus_damage(&self, stats: &AggregateStats) -> f64 {
        match self {
            SpecialEffect::FlatBonusDamage { amount } => *amount,
            SpecialEffect::AbilityPowerBonusDamage { base } => {
                base * (1.0 + stats.ability_power)
            }
            SpecialEffect::TotalHpBonusDamage { ratio } => ratio * stats.total_hp,
        }
    }
}

/// A purchasable item. Immutable once defined; builds reference items from a
/// catalog, they never own mutated copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique display name within a catalog.
    pub name: String,
    pub category: ItemCategory,
    /// Price in credits.
    pub cost: u32,
    /// Stat contributions. An empty list is valid (a pure money sink).
    pub modifiers: Vec<Modifier>,
    /// Restricts the item to one character; `None` = anyone can buy it.
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub effect: Option<SpecialEffect>,
}

impl Item {
    pub fn new(name: impl Into<String>, category: ItemCategory, cost: u32) -> Self {
        Self {
            name: name.into(),
            category,
            cost,
            modifiers: Vec::new(),
            character: None,
            effect: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Vec<(Stat, f64)>) -> Self {
        self.modifiers = modifiers
            .into_iter()
            .map(|(stat, value)| Modifier { stat, value })
            .collect();
        self
    }

    pub fn with_character(mut self, character: impl Into<String>) -> Self {
        self.character = Some(character.into());
        self
    }

    pub fn with_effect(mut self, effect: SpecialEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    /// Whether the given character may purchase this item.
    pub fn usable_by(&self, character: &str) -> bool {
        match &self.character {
            Some(owner) => owner == character,
            None => true,
        }
    }

    /// Whether any modifier touches one of the given stats.
    pub fn touches_any(&self, stats: &[Stat]) -> bool {
        self.modifiers.iter().any(|m| stats.contains(&m.stat))
    }
}
