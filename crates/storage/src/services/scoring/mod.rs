//! Visit scoring engine.
//!
//! `recalculate_visit` is the single public operation: given a visit id it
//! recomputes every point award for that visit's current state and replaces
//! the stored set, all inside one transaction. It is invoked after any visit
//! mutation and is idempotent for a fixed visit state.

mod eligibility;
mod engine;
mod queries;
mod rules;

pub use eligibility::{VisitTimes, is_ultraunique};
pub use engine::recalculate_visit;
pub use rules::{BathContext, NewAward, ParticipantFacts, RuleWeights, VisitContext, evaluate};

use chrono::{DateTime, Utc};

/// Process-wide scoring constants, supplied at startup rather than stored
/// in the rule-config table.
#[derive(Debug, Clone, Copy)]
pub struct ScoringPolicy {
    /// The season is an explicitly configured year, not the visit's own year:
    /// "first region/country this season" checks always run against it.
    pub season_year: i32,
    /// Visits before this instant never block ultra-unique eligibility.
    pub ultraunique_cutoff: DateTime<Utc>,
}

impl ScoringPolicy {
    pub fn new(season_year: i32, ultraunique_cutoff: DateTime<Utc>) -> Self {
        Self {
            season_year,
            ultraunique_cutoff,
        }
    }
}
