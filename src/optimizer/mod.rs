//! Build search
//!
//! Exhaustive enumeration of affordable item combinations, scored against a
//! target. Deliberately brute-force: correctness over the whole search space
//! is the point, and catalogs are small (tens of items).

pub mod evaluate;

use serde::Serialize;

use crate::items::{Catalog, Item};
use crate::roster::BaseProfile;
use crate::stats::{aggregate, AggregateStats};

pub use evaluate::{evaluate, DpsPolicy, Target, ALL_TARGETS};

/// Most items a single build may contain.
pub const MAX_BUILD_SIZE: usize = 6;

/// Bounds on a single search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLimits {
    /// Largest build to consider, clamped to `1..=MAX_BUILD_SIZE`.
    pub max_items: usize,
    /// Stop after this many subset evaluations and return the best build
    /// found so far. `None` = scan the full space. The only real operational
    /// risk here is the 2^N blow-up on oversized catalogs; this bounds it.
    pub max_evaluations: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_items: MAX_BUILD_SIZE,
            max_evaluations: None,
        }
    }
}

impl SearchLimits {
    fn build_size(&self) -> usize {
        self.max_items.clamp(1, MAX_BUILD_SIZE)
    }
}

/// Everything a search needs, passed explicitly — there is no ambient
/// catalog or character table, so independent searches cannot interfere.
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'a> {
    pub catalog: &'a Catalog,
    pub character: &'a str,
    pub base: &'a BaseProfile,
    /// Spending limit in credits.
    pub budget: u32,
    pub target: Target,
    pub limits: SearchLimits,
    pub policy: DpsPolicy,
}

/// A scored, affordable build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestBuild {
    pub items: Vec<Item>,
    pub total_cost: u32,
    pub stats: AggregateStats,
    pub score: f64,
}

impl BestBuild {
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }
}

/// Find the highest-scoring affordable build, or `None` when no combination
/// fits the budget.
///
/// Ties keep the first-seen build: a later combination must score strictly
/// higher to displace the incumbent.
pub fn search(request: &SearchRequest) -> Option<BestBuild> {
    let candidates = candidate_items(request);
    let mut best: Option<BestBuild> = None;

    let evaluated = enumerate_affordable(request, &candidates, |_, picked, cost| {
        let stats = aggregate(request.base, picked);
        let score = evaluate(&stats, request.target, &request.policy);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(BestBuild {
                items: picked.iter().map(|i| (*i).clone()).collect(),
                total_cost: cost,
                stats,
                score,
            });
        }
    });

    log::info!(
        "evaluated {} affordable builds for {} ({}): {}",
        evaluated,
        request.character,
        request.target.name(),
        match &best {
            Some(b) => format!("best score {:.3}", b.score),
            None => "no valid build".to_string(),
        }
    );
    best
}

/// Rank every affordable build and return the top `k`, highest score first.
/// Equal scores keep their enumeration order.
pub fn search_top_k(request: &SearchRequest, k: usize) -> Vec<BestBuild> {
    if k == 0 {
        return Vec::new();
    }
    let candidates = candidate_items(request);
    let mut scored: Vec<(f64, Vec<usize>, u32)> = Vec::new();

    enumerate_affordable(request, &candidates, |indices, picked, cost| {
        let stats = aggregate(request.base, picked);
        let score = evaluate(&stats, request.target, &request.policy);
        scored.push((score, indices.to_vec(), cost));
    });

    // Stable sort keeps enumeration order among equal scores.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(k);

    scored
        .into_iter()
        .map(|(score, indices, total_cost)| {
            let picked: Vec<&Item> = indices.iter().map(|&i| candidates[i]).collect();
            let stats = aggregate(request.base, &picked);
            BestBuild {
                items: picked.into_iter().cloned().collect(),
                total_cost,
                stats,
                score,
            }
        })
        .collect()
}

/// Catalog items worth enumerating for this request: usable by the
/// character, and either touching a stat the target cares about or carrying
/// a special effect (whose contribution static inspection cannot see).
/// Dropping anything else never changes the winning score.
fn candidate_items<'a>(request: &SearchRequest<'a>) -> Vec<&'a Item> {
    let usable = request.catalog.usable_by(request.character);
    let usable_count = usable.len();
    let relevant = request.target.relevant_stats();
    let candidates: Vec<&Item> = usable
        .into_iter()
        .filter(|item| item.effect.is_some() || item.touches_any(relevant))
        .collect();
    log::debug!(
        "{} of {} usable items relevant to {}",
        candidates.len(),
        usable_count,
        request.target.name()
    );
    candidates
}

/// Run `visit` over every affordable subset of `candidates` of size
/// `1..=max_items`, in enumeration order. Returns how many subsets were
/// visited; stops early if the evaluation cap is hit.
fn enumerate_affordable<'a>(
    request: &SearchRequest,
    candidates: &[&'a Item],
    mut visit: impl FnMut(&[usize], &[&'a Item], u32),
) -> u64 {
    let mut evaluated: u64 = 0;
    let mut picked: Vec<&Item> = Vec::with_capacity(request.limits.build_size());

    'sizes: for size in 1..=request.limits.build_size().min(candidates.len()) {
        let mut combos = Combinations::new(candidates.len(), size);
        while let Some(indices) = combos.next() {
            // Summed in u64: individual costs are u32, so a six-item total
            // can exceed u32::MAX without the sum wrapping.
            let cost: u64 = indices.iter().map(|&i| u64::from(candidates[i].cost)).sum();
            if cost > u64::from(request.budget) {
                continue;
            }
            if let Some(cap) = request.limits.max_evaluations {
                if evaluated >= cap {
                    log::warn!(
                        "evaluation cap of {} reached; result may not be optimal",
                        cap
                    );
                    break 'sizes;
                }
            }
            evaluated += 1;
            picked.clear();
            picked.extend(indices.iter().map(|&i| candidates[i]));
            // Within budget, so the total fits back into u32.
            visit(indices, &picked, cost as u32);
        }
    }
    evaluated
}

/// Lexicographic k-combinations of `0..n`, yielded as index slices.
struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
        }
    }

    fn next(&mut self) -> Option<&[usize]> {
        let k = self.indices.len();
        if k > self.n || k == 0 {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }
        // Rightmost index that can still move, then repack the tail.
        let mut i = k;
        loop {
            if i == 0 {
                return None;
            }
            i -= 1;
            if self.indices[i] < i + self.n - k {
                break;
            }
        }
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{ItemCategory, SpecialEffect};
    use crate::roster::BaseProfile;
    use crate::stats::Stat;

    fn hp_item(name: &str, hp: f64, cost: u32) -> Item {
        Item::new(name, ItemCategory::Survival, cost).with_modifiers(vec![(Stat::Hp, hp)])
    }

    fn request<'a>(catalog: &'a Catalog, base: &'a BaseProfile, budget: u32) -> SearchRequest<'a> {
        SearchRequest {
            catalog,
            character: "Mei",
            base,
            budget,
            target: Target::Stat(Stat::Hp),
            limits: SearchLimits::default(),
            policy: DpsPolicy::default(),
        }
    }

    #[test]
    fn test_combinations_enumerate_in_lex_order() {
        let mut combos = Combinations::new(4, 2);
        let mut seen = Vec::new();
        while let Some(indices) = combos.next() {
            seen.push(indices.to_vec());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_combinations_larger_than_pool_yield_nothing() {
        let mut combos = Combinations::new(2, 3);
        assert!(combos.next().is_none());
    }

    #[test]
    fn test_budget_forces_single_item_and_first_seen_tie() {
        let catalog = Catalog::new(vec![
            hp_item("A", 25.0, 100),
            hp_item("B", 25.0, 100),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        // {A, B} costs 200, over budget; A and B tie at 125 HP and the
        // first-seen build wins.
        let best = search(&request(&catalog, &base, 150)).expect("a build fits");
        assert_eq!(best.item_names(), vec!["A"]);
        assert_eq!(best.total_cost, 100);
        assert_eq!(best.score, 125.0);
    }

    #[test]
    fn test_pair_chosen_when_budget_allows() {
        let catalog = Catalog::new(vec![
            hp_item("A", 25.0, 100),
            hp_item("B", 25.0, 100),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        let best = search(&request(&catalog, &base, 200)).expect("a build fits");
        assert_eq!(best.item_names(), vec!["A", "B"]);
        assert_eq!(best.score, 150.0);
    }

    #[test]
    fn test_empty_catalog_has_no_build() {
        let catalog = Catalog::new(Vec::new()).expect("empty is valid");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        assert!(search(&request(&catalog, &base, 10000)).is_none());
    }

    #[test]
    fn test_zero_budget_without_free_items_has_no_build() {
        let catalog = Catalog::new(vec![hp_item("A", 25.0, 100)]).expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        assert!(search(&request(&catalog, &base, 0)).is_none());
    }

    #[test]
    fn test_zero_cost_item_fits_zero_budget() {
        let catalog = Catalog::new(vec![hp_item("Freebie", 10.0, 0)]).expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        let best = search(&request(&catalog, &base, 0)).expect("free build fits");
        assert_eq!(best.total_cost, 0);
        assert_eq!(best.score, 110.0);
    }

    #[test]
    fn test_huge_costs_do_not_wrap_below_budget() {
        // Two of these together exceed u32::MAX; a wrapping sum would make
        // the pair look nearly free.
        let catalog = Catalog::new(vec![
            hp_item("Vault A", 25.0, 2_147_483_650),
            hp_item("Vault B", 25.0, 2_147_483_650),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        assert!(search(&request(&catalog, &base, 100)).is_none());
    }

    #[test]
    fn test_no_result_ever_exceeds_budget() {
        let catalog = Catalog::new(vec![
            hp_item("A", 25.0, 100),
            hp_item("B", 30.0, 150),
            hp_item("C", 40.0, 250),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        let req = request(&catalog, &base, 300);
        for build in search_top_k(&req, 100) {
            assert!(build.total_cost <= 300);
        }
    }

    #[test]
    fn test_max_items_caps_build_size() {
        let catalog = Catalog::new(vec![
            hp_item("A", 10.0, 1),
            hp_item("B", 10.0, 1),
            hp_item("C", 10.0, 1),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        let mut req = request(&catalog, &base, 100);
        req.limits.max_items = 2;
        let best = search(&req).expect("a build fits");
        assert_eq!(best.items.len(), 2);
        assert_eq!(best.score, 120.0);
    }

    #[test]
    fn test_restricted_items_excluded_for_other_characters() {
        let catalog = Catalog::new(vec![
            hp_item("Common", 10.0, 100),
            Item::new("Mei Only", ItemCategory::Survival, 100)
                .with_modifiers(vec![(Stat::Hp, 50.0)])
                .with_character("Mei"),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);

        let mut req = request(&catalog, &base, 1000);
        let best = search(&req).expect("a build fits");
        assert!(best.item_names().contains(&"Mei Only"));

        req.character = "Mercy";
        let best = search(&req).expect("a build fits");
        assert_eq!(best.item_names(), vec!["Common"]);
    }

    #[test]
    fn test_effect_items_survive_relevance_filter() {
        // No modifier touches a Weapon-DPS stat, but the effect still adds
        // flat damage, so the filter must keep the item.
        let catalog = Catalog::new(vec![Item::new("Nano Detonators", ItemCategory::Weapon, 100)
            .with_effect(SpecialEffect::FlatBonusDamage { amount: 15.0 })])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        let mut req = request(&catalog, &base, 100);
        req.target = Target::WeaponDps;
        let best = search(&req).expect("a build fits");
        assert_eq!(best.item_names(), vec!["Nano Detonators"]);
        assert!((best.score - 115.0).abs() < 1e-9);
    }

    #[test]
    fn test_evaluation_cap_returns_best_so_far() {
        let catalog = Catalog::new(vec![
            hp_item("A", 10.0, 1),
            hp_item("B", 20.0, 1),
            hp_item("C", 30.0, 1),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        let mut req = request(&catalog, &base, 100);
        req.limits.max_evaluations = Some(1);
        // Only the first subset {A} gets evaluated.
        let best = search(&req).expect("partial scan still yields a build");
        assert_eq!(best.item_names(), vec!["A"]);
    }

    #[test]
    fn test_top_k_ranked_descending_with_stable_ties() {
        let catalog = Catalog::new(vec![
            hp_item("Small", 10.0, 100),
            hp_item("AlsoSmall", 10.0, 100),
            hp_item("Big", 50.0, 100),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        // Budget admits only single-item builds.
        let ranked = search_top_k(&request(&catalog, &base, 150), 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].item_names(), vec!["Big"]);
        // Tied scores keep enumeration order.
        assert_eq!(ranked[1].item_names(), vec!["Small"]);
        assert_eq!(ranked[2].item_names(), vec!["AlsoSmall"]);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn test_search_matches_top_of_ranking() {
        let catalog = Catalog::new(vec![
            hp_item("A", 25.0, 100),
            hp_item("B", 30.0, 150),
            hp_item("C", 40.0, 250),
        ])
        .expect("valid catalog");
        let base = BaseProfile::new(100.0, 0.0, 0.0);
        let req = request(&catalog, &base, 400);
        let best = search(&req).expect("a build fits");
        let ranked = search_top_k(&req, 1);
        assert_eq!(ranked[0], best);
    }
}
