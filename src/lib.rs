//! Buildforge - brute-force best-build calculator for arena loadouts
//!
//! Aggregates item stats onto a character's base profile and exhaustively
//! searches every affordable item combination for the one that maximizes a
//! chosen target.

pub mod items;
pub mod optimizer;
pub mod report;
pub mod roster;
pub mod stats;

// Re-export commonly used types
pub use items::{default_pool, Catalog, CatalogError, Item, ItemCategory, SpecialEffect};
pub use optimizer::{
    evaluate, search, search_top_k, BestBuild, DpsPolicy, SearchLimits, SearchRequest, Target,
    ALL_TARGETS, MAX_BUILD_SIZE,
};
pub use report::BuildReport;
pub use roster::{default_roster, BaseProfile, Roster, RosterError};
pub use stats::{aggregate, AggregateStats, Stat};
