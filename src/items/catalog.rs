//! Item catalog
//!
//! Validated collections of purchasable items, with the built-in default
//! pool and RON file loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roster::Roster;
use crate::stats::Stat;

use super::{Item, ItemCategory, SpecialEffect};

/// Errors from loading or validating a catalog.
///
/// Validation is fail-fast: a search assumes a validated catalog and never
/// re-checks items mid-enumeration.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("catalog contains an item with an empty name")]
    EmptyName,
    #[error("duplicate item name '{0}'")]
    DuplicateItem(String),
    #[error("item '{item}' has a non-finite value for {stat}")]
    NonFiniteValue { item: String, stat: &'static str },
    #[error("item '{item}' has a negative value {value} for {stat}")]
    NegativeValue {
        item: String,
        stat: &'static str,
        value: f64,
    },
    #[error("item '{item}' has {stat} = {value}, outside [0, 1)")]
    FractionOutOfRange {
        item: String,
        stat: &'static str,
        value: f64,
    },
    #[error("item '{item}' is restricted to unknown character '{character}'")]
    UnknownCharacter { item: String, character: String },
    #[error("catalog file {0} contains no items")]
    EmptyFile(PathBuf),
}

/// An immutable, validated list of items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Wrap and validate an item list. An empty list is allowed (a search
    /// over it simply finds no build).
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogError> {
        for (i, item) in items.iter().enumerate() {
            if item.name.is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if items[..i].iter().any(|other| other.name == item.name) {
                return Err(CatalogError::DuplicateItem(item.name.clone()));
            }
            for modifier in &item.modifiers {
                let stat = modifier.stat.name();
                let value = modifier.value;
                if !value.is_finite() {
                    return Err(CatalogError::NonFiniteValue {
                        item: item.name.clone(),
                        stat,
                    });
                }
                if value < 0.0 {
                    return Err(CatalogError::NegativeValue {
                        item: item.name.clone(),
                        stat,
                        value,
                    });
                }
                // A reduction of 1.0 or more would zero out (or invert) the
                // remaining-cooldown multiplier.
                if modifier.stat == Stat::CooldownReduction && value >= 1.0 {
                    return Err(CatalogError::FractionOutOfRange {
                        item: item.name.clone(),
                        stat,
                        value,
                    });
                }
                if modifier.stat == Stat::DamageReduction && value >= 1.0 {
                    return Err(CatalogError::FractionOutOfRange {
                        item: item.name.clone(),
                        stat,
                        value,
                    });
                }
            }
        }
        Ok(Self { items })
    }

    /// Load a catalog from a RON file, failing fast on malformed data.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let items: Vec<Item> = ron::from_str(&content).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if items.is_empty() {
            return Err(CatalogError::EmptyFile(path.to_path_buf()));
        }
        Self::new(items)
    }

    /// Parse a catalog from RON text. Unlike [`Catalog::load`], an empty list
    /// is accepted here; only files are assumed to be non-empty.
    pub fn from_ron_str(content: &str) -> Result<Self, CatalogError> {
        let items: Vec<Item> = ron::from_str(content).map_err(|source| CatalogError::Parse {
            path: PathBuf::from("<string>"),
            source,
        })?;
        Self::new(items)
    }

    /// Check that every character restriction names someone in the roster.
    pub fn validate_characters(&self, roster: &Roster) -> Result<(), CatalogError> {
        for item in &self.items {
            if let Some(character) = &item.character {
                if !roster.contains(character) {
                    return Err(CatalogError::UnknownCharacter {
                        item: item.name.clone(),
                        character: character.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Items the given character may purchase, in catalog order.
    pub fn usable_by(&self, character: &str) -> Vec<&Item> {
        self.items.iter().filter(|i| i.usable_by(character)).collect()
    }
}

/// The built-in item pool.
pub fn default_pool() -> Catalog {
    use ItemCategory::{Ability, Survival, Weapon};
    use Stat::*;

    let items = vec![
        // Ability items
        Item::new("Power Playbook", Ability, 1000).with_modifiers(vec![(AbilityPower, 0.10)]),
        Item::new("Charged Plating", Ability, 1000)
            .with_modifiers(vec![(Armor, 25.0), (AbilityPower, 0.10)]),
        Item::new("Shady Spectacles", Ability, 1000)
            .with_modifiers(vec![(AbilityLifesteal, 0.10)]),
        Item::new("Winning Attitude", Ability, 1500).with_modifiers(vec![(Hp, 25.0)]),
        Item::new("Custom Stock", Ability, 3750)
            .with_modifiers(vec![(WeaponPower, 0.05), (AbilityPower, 0.10)]),
        Item::new("Biolight Overflow", Ability, 4000)
            .with_modifiers(vec![(Hp, 25.0), (AbilityPower, 0.05)]),
        Item::new("Energized Bracers", Ability, 4000)
            .with_modifiers(vec![(AbilityPower, 0.10), (AbilityLifesteal, 0.10)]),
        // Costs money, does nothing; valid on purpose.
        Item::new("Junker Whatchamajig", Ability, 4000),
        Item::new("Wrist Wraps", Ability, 4000)
            .with_modifiers(vec![(AbilityPower, 0.05), (AttackSpeed, 0.10)]),
        Item::new("Multi-Tool", Ability, 4500)
            .with_modifiers(vec![(AbilityPower, 0.10), (CooldownReduction, 0.05)]),
        Item::new("Nano-Cola", Ability, 6000).with_modifiers(vec![(AbilityPower, 0.20)]),
        Item::new("Three-Tap Tommygun", Ability, 9500)
            .with_modifiers(vec![(AbilityPower, 0.10), (AttackSpeed, 0.10)]),
        Item::new("Biotech Maximizer", Ability, 10000)
            .with_modifiers(vec![(Hp, 25.0), (AbilityPower, 0.10)]),
        Item::new("Catalytic Crystal", Ability, 10000).with_modifiers(vec![(AbilityPower, 0.15)]),
        Item::new("Lumerico Fusion Drive", Ability, 10000)
            .with_modifiers(vec![(Armor, 50.0), (AbilityPower, 0.15)]),
        Item::new("Superflexor", Ability, 10000).with_modifiers(vec![
            (Hp, 25.0),
            (WeaponPower, 0.10),
            (AbilityPower, 0.25),
        ]),
        Item::new("Cybervenom", Ability, 10500)
            .with_modifiers(vec![(AbilityPower, 0.10), (CooldownReduction, 0.05)]),
        Item::new("Iridescent Iris", Ability, 11000)
            .with_modifiers(vec![(AbilityPower, 0.20), (CooldownReduction, 0.10)]),
        Item::new("Liquid Nitrogen", Ability, 11000)
            .with_modifiers(vec![(Hp, 25.0), (AbilityPower, 0.10)]),
        Item::new("Mark of the Kitsune", Ability, 11000).with_modifiers(vec![(AbilityPower, 0.10)]),
        Item::new("Champion's Kit", Ability, 13500).with_modifiers(vec![(AbilityPower, 0.40)]),
        // Weapon items
        Item::new("Compensator", Weapon, 1000).with_modifiers(vec![(WeaponPower, 0.05)]),
        Item::new("Weapon Grease", Weapon, 1000).with_modifiers(vec![(AttackSpeed, 0.05)]),
        Item::new("Ammo Reserves", Weapon, 1000).with_modifiers(vec![(MaxAmmo, 20.0)]),
        Item::new("Icy Coolant", Weapon, 3750).with_modifiers(vec![(ReloadSpeed, 0.10)]),
        Item::new("Frenzy Amplifier", Weapon, 4000).with_modifiers(vec![(AttackSpeed, 0.10)]),
        Item::new("Nano Detonators", Weapon, 5000)
            .with_modifiers(vec![(WeaponPower, 0.05)])
            .with_effect(SpecialEffect::FlatBonusDamage { amount: 15.0 }),
        Item::new("Talon Modification Module", Weapon, 6000)
            .with_modifiers(vec![(WeaponPower, 0.10), (ReloadSpeed, 0.05)]),
        Item::new("Eye of the Spider", Weapon, 9000)
            .with_modifiers(vec![(CriticalHitDamage, 0.10)]),
        Item::new("Commander's Clip", Weapon, 10000)
            .with_modifiers(vec![(MaxAmmo, 40.0), (ReloadSpeed, 0.15)]),
        Item::new("Hardlight Accelerator", Weapon, 10000)
            .with_modifiers(vec![(WeaponPower, 0.10), (MoveSpeed, 0.05)]),
        Item::new("Pulsar Torpedos", Weapon, 12500)
            .with_modifiers(vec![(WeaponPower, 0.10)])
            .with_effect(SpecialEffect::AbilityPowerBonusDamage { base: 30.0 }),
        // Survival items
        Item::new("Armored Vest", Survival, 1000).with_modifiers(vec![(Armor, 25.0)]),
        Item::new("Vital-E-Tee", Survival, 1000).with_modifiers(vec![(Hp, 25.0)]),
        Item::new("Running Shoes", Survival, 1500).with_modifiers(vec![(MoveSpeed, 0.10)]),
        Item::new("Reinforced Titanium", Survival, 4000)
            .with_modifiers(vec![(Armor, 25.0), (DamageReduction, 0.05)]),
        Item::new("Crusader Hydraulics", Survival, 4000).with_modifiers(vec![(Hp, 50.0)]),
        Item::new("Ironclad Exhaust Ports", Survival, 10000)
            .with_modifiers(vec![(Armor, 50.0), (DamageReduction, 0.10)]),
        // Character-restricted items
        Item::new("Lux Loop", Ability, 10000)
            .with_modifiers(vec![(AbilityPower, 0.10), (MoveSpeed, 0.05)])
            .with_character("Juno"),
        Item::new("Cryo-Ammo", Weapon, 5500)
            .with_modifiers(vec![(WeaponPower, 0.10), (MaxAmmo, 10.0)])
            .with_character("Mei"),
    ];

    Catalog::new(items).expect("built-in pool is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::default_roster;

    #[test]
    fn test_default_pool_is_valid() {
        let catalog = default_pool();
        assert!(!catalog.is_empty());
        assert!(catalog.len() >= 21);
        assert!(catalog.find("Champion's Kit").is_some());
        assert!(catalog.validate_characters(&default_roster()).is_ok());
    }

    #[test]
    fn test_junker_whatchamajig_has_no_modifiers() {
        let catalog = default_pool();
        let junk = catalog.find("Junker Whatchamajig").expect("item present");
        assert!(junk.modifiers.is_empty());
        assert_eq!(junk.cost, 4000);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let items = vec![
            Item::new("Twin", ItemCategory::Ability, 100),
            Item::new("Twin", ItemCategory::Weapon, 200),
        ];
        assert!(matches!(
            Catalog::new(items),
            Err(CatalogError::DuplicateItem(name)) if name == "Twin"
        ));
    }

    #[test]
    fn test_full_cooldown_reduction_rejected() {
        let items = vec![Item::new("Time Stop", ItemCategory::Ability, 100)
            .with_modifiers(vec![(Stat::CooldownReduction, 1.0)])];
        assert!(matches!(
            Catalog::new(items),
            Err(CatalogError::FractionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_negative_modifier_rejected() {
        let items = vec![Item::new("Cursed Idol", ItemCategory::Survival, 100)
            .with_modifiers(vec![(Stat::Hp, -25.0)])];
        assert!(matches!(
            Catalog::new(items),
            Err(CatalogError::NegativeValue { .. })
        ));
    }

    #[test]
    fn test_unknown_character_restriction_rejected() {
        let catalog = Catalog::new(vec![Item::new("Ghost Gear", ItemCategory::Ability, 100)
            .with_character("Nobody")])
        .expect("structurally valid");
        assert!(matches!(
            catalog.validate_characters(&default_roster()),
            Err(CatalogError::UnknownCharacter { .. })
        ));
    }

    #[test]
    fn test_usable_by_filters_restricted_items() {
        let catalog = default_pool();
        let for_juno = catalog.usable_by("Juno");
        let for_mercy = catalog.usable_by("Mercy");
        assert!(for_juno.iter().any(|i| i.name == "Lux Loop"));
        assert!(!for_mercy.iter().any(|i| i.name == "Lux Loop"));
        assert!(!for_juno.iter().any(|i| i.name == "Cryo-Ammo"));
        assert_eq!(for_juno.len(), catalog.len() - 1);
    }

    #[test]
    fn test_catalog_parses_from_ron() {
        let catalog = Catalog::from_ron_str(
            r#"[
                (
                    name: "Power Playbook",
                    category: Ability,
                    cost: 1000,
                    modifiers: [(stat: AbilityPower, value: 0.10)],
                ),
            ]"#,
        )
        .expect("catalog should parse");
        assert_eq!(catalog.len(), 1);
        let item = catalog.find("Power Playbook").expect("item present");
        assert_eq!(item.character, None);
        assert_eq!(item.effect, None);
    }

    #[test]
    fn test_unknown_stat_name_fails_parse() {
        let result = Catalog::from_ron_str(
            r#"[
                (
                    name: "Mystery Box",
                    category: Ability,
                    cost: 1000,
                    modifiers: [(stat: Luck, value: 0.10)],
                ),
            ]"#,
        );
        assert!(matches!(result, Err(CatalogError::Parse { .. })));
    }
}
