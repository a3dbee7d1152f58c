//! Result reporting
//!
//! Turns search results into the text summary the CLI prints, or a
//! serializable report for machine consumption.

use std::fmt::Write;

use serde::Serialize;

use crate::optimizer::{BestBuild, Target};
use crate::stats::{AggregateStats, Stat};

/// A finished search, packaged for output.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub character: String,
    pub target: Target,
    pub budget: u32,
    /// Ranked best-first. Empty when nothing fit the budget.
    pub builds: Vec<BestBuild>,
}

impl BuildReport {
    pub fn new(
        character: impl Into<String>,
        target: Target,
        budget: u32,
        builds: Vec<BestBuild>,
    ) -> Self {
        Self {
            character: character.into(),
            target,
            budget,
            builds,
        }
    }

    /// Render the report as the CLI's text output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.builds.is_empty() {
            let _ = writeln!(
                out,
                "No build for {} fits a budget of {} credits.",
                self.character, self.budget
            );
            return out;
        }

        let _ = writeln!(
            out,
            "Best {} build{} for {} (budget {} credits):",
            self.target.name(),
            if self.builds.len() > 1 { "s" } else { "" },
            self.character,
            self.budget
        );

        for (rank, build) in self.builds.iter().enumerate() {
            let _ = writeln!(out);
            if self.builds.len() > 1 {
                let _ = writeln!(out, "#{}", rank + 1);
            }
            for item in &build.items {
                let _ = writeln!(
                    out,
                    "  {} ({}, {} credits)",
                    item.name,
                    item.category.name(),
                    item.cost
                );
            }
            let _ = writeln!(out, "  Total cost: {} credits", build.total_cost);
            let _ = writeln!(
                out,
                "  {}: {}",
                self.target.name(),
                format_score(self.target, build.score)
            );
            for line in stat_breakdown(self.target, &build.stats) {
                let _ = writeln!(out, "    {}", line);
            }
        }
        out
    }
}

/// Stat lines worth showing under a scored build: the stats that feed the
/// target, plus the survivability lines for the HP-derived targets.
fn stat_breakdown(target: Target, stats: &AggregateStats) -> Vec<String> {
    let mut lines = Vec::new();
    if matches!(target, Target::TotalHp | Target::EffectiveHp) {
        lines.push(format!("HP: {:.0}", stats.hp));
        if stats.shields > 0.0 {
            lines.push(format!("Shields: {:.0}", stats.shields));
        }
        if stats.armor > 0.0 {
            lines.push(format!("Armor: {:.0}", stats.armor));
        }
        lines.push(format!("Total HP: {:.0}", stats.total_hp));
    }
    for &stat in target.relevant_stats() {
        // Already covered by the survivability lines above.
        if matches!(target, Target::TotalHp | Target::EffectiveHp)
            && matches!(stat, Stat::Hp | Stat::Shields | Stat::Armor)
        {
            continue;
        }
        // Skip the line when the target itself is this stat's direct read.
        if target == Target::Stat(stat) {
            continue;
        }
        lines.push(format!(
            "{}: {}",
            stat.name(),
            format_stat_value(stat, stats.get(stat))
        ));
    }
    if target.is_dps() && stats.bonus_damage > 0.0 {
        lines.push(format!("Bonus damage: {:.1}", stats.bonus_damage));
    }
    lines
}

/// Fractional stats read as percentages, flat stats as whole amounts.
fn format_stat_value(stat: Stat, value: f64) -> String {
    if stat.is_fractional() {
        format!("{:.1}%", value * 100.0)
    } else {
        format!("{:.0}", value)
    }
}

fn format_score(target: Target, score: f64) -> String {
    match target {
        Target::Stat(stat) => format_stat_value(stat, score),
        Target::TotalHp | Target::EffectiveHp => format!("{:.0}", score),
        Target::WeaponDps | Target::AbilityDps => format!("{:.1}", score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Item, ItemCategory};
    use crate::stats::Stat;

    fn sample_build() -> BestBuild {
        let items = vec![
            Item::new("Nano-Cola", ItemCategory::Ability, 6000)
                .with_modifiers(vec![(Stat::AbilityPower, 0.20)]),
        ];
        let mut stats = AggregateStats::from_base(300.0, 0.0, 0.0);
        stats.ability_power = 0.20;
        BestBuild {
            items,
            total_cost: 6000,
            stats,
            score: 96.0,
        }
    }

    #[test]
    fn test_empty_report_says_no_build() {
        let report = BuildReport::new("Mei", Target::AbilityDps, 500, Vec::new());
        let text = report.render_text();
        assert!(text.contains("No build for Mei"));
        assert!(text.contains("500"));
    }

    #[test]
    fn test_text_report_lists_items_and_score() {
        let report = BuildReport::new("Mei", Target::AbilityDps, 10000, vec![sample_build()]);
        let text = report.render_text();
        assert!(text.contains("Nano-Cola (Ability, 6000 credits)"));
        assert!(text.contains("Total cost: 6000 credits"));
        assert!(text.contains("Ability DPS: 96.0"));
        assert!(text.contains("Ability Power: 20.0%"));
        // Single build gets no rank header.
        assert!(!text.contains("#1"));
    }

    #[test]
    fn test_ranked_report_numbers_builds() {
        let report = BuildReport::new(
            "Mei",
            Target::AbilityDps,
            20000,
            vec![sample_build(), sample_build()],
        );
        let text = report.render_text();
        assert!(text.contains("#1"));
        assert!(text.contains("#2"));
    }

    #[test]
    fn test_hp_targets_show_survivability_lines() {
        let mut build = sample_build();
        build.stats = AggregateStats::from_base(75.0, 150.0, 0.0);
        build.score = 225.0;
        let report = BuildReport::new("Juno", Target::TotalHp, 10000, vec![build]);
        let text = report.render_text();
        assert!(text.contains("HP: 75"));
        assert!(text.contains("Shields: 150"));
        assert!(!text.contains("Armor:"));
        assert!(text.contains("Total HP: 225"));
    }

    #[test]
    fn test_fractional_stats_render_as_percent() {
        assert_eq!(format_stat_value(Stat::AbilityPower, 0.195), "19.5%");
        assert_eq!(format_stat_value(Stat::Hp, 150.0), "150");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = BuildReport::new("Mei", Target::AbilityDps, 10000, vec![sample_build()]);
        let json = serde_json::to_string(&report).expect("report serializes");
        assert!(json.contains("\"character\":\"Mei\""));
        assert!(json.contains("\"total_cost\":6000"));
    }
}
