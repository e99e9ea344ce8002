use crate::models::{AwardReason, ConfigEntry};

/// Bonus weights loaded from `point_config`, with a fixed default for any
/// key the store does not carry. Read fresh at the start of every recompute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleWeights {
    pub base_points: f64,
    pub long_bonus: f64,
    pub region_bonus: f64,
    pub country_bonus: f64,
    pub ultraunique_bonus: f64,
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self {
            base_points: 1.0,
            long_bonus: 1.0,
            region_bonus: 1.0,
            country_bonus: 1.0,
            ultraunique_bonus: 1.0,
        }
    }
}

impl RuleWeights {
    pub fn from_entries(entries: &[ConfigEntry]) -> Self {
        let mut weights = Self::default();
        for entry in entries {
            match entry.key.as_str() {
                "base_points" => weights.base_points = entry.value,
                "long_bonus" => weights.long_bonus = entry.value,
                "region_bonus" => weights.region_bonus = entry.value,
                "country_bonus" => weights.country_bonus = entry.value,
                "ultraunique_bonus" => weights.ultraunique_bonus = entry.value,
                _ => {}
            }
        }
        weights
    }
}

/// Facts about the visit shared by every participant's evaluation.
#[derive(Debug, Clone, Copy)]
pub struct VisitContext {
    pub flag_long: bool,
    pub bath: Option<BathContext>,
    /// Decided once per recompute; a property of the visit, not the person.
    pub is_ultraunique: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct BathContext {
    pub region_id: Option<i32>,
    pub country_id: Option<i32>,
}

/// Per-participant history counts, excluding the visit being recomputed.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantFacts {
    pub user_id: i64,
    /// Active visits by this user to a same-region bath in the season year.
    pub prior_region_visits: i64,
    /// Active visits by this user to a same-country bath in the season year.
    pub prior_country_visits: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewAward {
    pub user_id: i64,
    pub points: f64,
    pub reason: AwardReason,
}

/// Evaluation order; each rule fires independently, zero or one award each.
const RULES: [AwardReason; 5] = [
    AwardReason::Base,
    AwardReason::Long,
    AwardReason::Ultraunique,
    AwardReason::NewRegion,
    AwardReason::NewCountry,
];

impl AwardReason {
    fn weight(&self, weights: &RuleWeights) -> f64 {
        match self {
            Self::Base => weights.base_points,
            Self::Long => weights.long_bonus,
            Self::Ultraunique => weights.ultraunique_bonus,
            Self::NewRegion => weights.region_bonus,
            Self::NewCountry => weights.country_bonus,
        }
    }

    fn fires(
        &self,
        visit: &VisitContext,
        participant: &ParticipantFacts,
        weights: &RuleWeights,
    ) -> bool {
        match self {
            Self::Base => true,
            Self::Long => visit.flag_long && weights.long_bonus > 0.0,
            Self::Ultraunique => visit.is_ultraunique && weights.ultraunique_bonus > 0.0,
            Self::NewRegion => {
                visit.bath.is_some_and(|b| b.region_id.is_some())
                    && weights.region_bonus > 0.0
                    && participant.prior_region_visits == 0
            }
            Self::NewCountry => {
                visit.bath.is_some_and(|b| b.country_id.is_some())
                    && weights.country_bonus > 0.0
                    && participant.prior_country_visits == 0
            }
        }
    }
}

/// Compute the full award set for one visit. Pure: the same inputs always
/// produce the same awards, which is what makes the recompute idempotent.
pub fn evaluate(
    visit: &VisitContext,
    participants: &[ParticipantFacts],
    weights: &RuleWeights,
) -> Vec<NewAward> {
    let mut awards = Vec::new();
    for participant in participants {
        for rule in RULES {
            if rule.fires(visit, participant, weights) {
                awards.push(NewAward {
                    user_id: participant.user_id,
                    points: rule.weight(weights),
                    reason: rule,
                });
            }
        }
    }
    awards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: f64) -> ConfigEntry {
        ConfigEntry {
            key: key.to_string(),
            value,
            description: String::new(),
        }
    }

    fn participant(user_id: i64) -> ParticipantFacts {
        ParticipantFacts {
            user_id,
            prior_region_visits: 0,
            prior_country_visits: 0,
        }
    }

    fn plain_visit() -> VisitContext {
        VisitContext {
            flag_long: false,
            bath: None,
            is_ultraunique: false,
        }
    }

    #[test]
    fn missing_keys_fall_back_to_one() {
        let weights = RuleWeights::from_entries(&[]);
        assert_eq!(weights, RuleWeights::default());
        assert_eq!(weights.base_points, 1.0);
    }

    #[test]
    fn stored_entries_override_only_their_key() {
        let weights = RuleWeights::from_entries(&[entry("long_bonus", 3.5), entry("other", 9.0)]);
        assert_eq!(weights.long_bonus, 3.5);
        assert_eq!(weights.base_points, 1.0);
        assert_eq!(weights.ultraunique_bonus, 1.0);
    }

    #[test]
    fn base_awarded_once_per_participant() {
        let weights = RuleWeights {
            base_points: 2.0,
            ..RuleWeights::default()
        };
        let participants = [participant(1), participant(2), participant(3)];
        let awards = evaluate(&plain_visit(), &participants, &weights);

        let base: Vec<_> = awards
            .iter()
            .filter(|a| a.reason == AwardReason::Base)
            .collect();
        assert_eq!(base.len(), 3);
        assert!(base.iter().all(|a| a.points == 2.0));
    }

    #[test]
    fn empty_participants_yield_no_awards() {
        let awards = evaluate(&plain_visit(), &[], &RuleWeights::default());
        assert!(awards.is_empty());
    }

    #[test]
    fn long_bonus_gated_on_flag_and_weight() {
        let weights = RuleWeights::default();
        let participants = [participant(1)];

        let mut visit = plain_visit();
        let without = evaluate(&visit, &participants, &weights);
        assert!(!without.iter().any(|a| a.reason == AwardReason::Long));

        visit.flag_long = true;
        let with = evaluate(&visit, &participants, &weights);
        assert_eq!(
            with.iter()
                .filter(|a| a.reason == AwardReason::Long)
                .count(),
            1
        );

        let zeroed = RuleWeights {
            long_bonus: 0.0,
            ..weights
        };
        let suppressed = evaluate(&visit, &participants, &zeroed);
        assert!(!suppressed.iter().any(|a| a.reason == AwardReason::Long));
    }

    #[test]
    fn ultraunique_pays_every_participant_the_same() {
        let weights = RuleWeights {
            ultraunique_bonus: 2.0,
            ..RuleWeights::default()
        };
        let visit = VisitContext {
            flag_long: false,
            bath: Some(BathContext {
                region_id: None,
                country_id: None,
            }),
            is_ultraunique: true,
        };
        let awards = evaluate(&visit, &[participant(1), participant(2)], &weights);
        let ultra: Vec<_> = awards
            .iter()
            .filter(|a| a.reason == AwardReason::Ultraunique)
            .collect();
        assert_eq!(ultra.len(), 2);
        assert!(ultra.iter().all(|a| a.points == 2.0));
    }

    #[test]
    fn region_bonus_requires_bath_region_and_empty_history() {
        let weights = RuleWeights::default();
        let visit = VisitContext {
            flag_long: false,
            bath: Some(BathContext {
                region_id: Some(7),
                country_id: None,
            }),
            is_ultraunique: false,
        };

        let fresh = participant(1);
        let seen = ParticipantFacts {
            user_id: 2,
            prior_region_visits: 1,
            prior_country_visits: 0,
        };
        let awards = evaluate(&visit, &[fresh, seen], &weights);

        let regions: Vec<_> = awards
            .iter()
            .filter(|a| a.reason == AwardReason::NewRegion)
            .collect();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].user_id, 1);

        // No bath at all: nothing regional can fire.
        let bathless = evaluate(&plain_visit(), &[fresh], &weights);
        assert!(!bathless.iter().any(|a| a.reason == AwardReason::NewRegion));
    }

    #[test]
    fn region_and_country_evaluate_independently() {
        let visit = VisitContext {
            flag_long: false,
            bath: Some(BathContext {
                region_id: Some(7),
                country_id: Some(3),
            }),
            is_ultraunique: false,
        };
        let p = ParticipantFacts {
            user_id: 1,
            prior_region_visits: 2,
            prior_country_visits: 0,
        };
        let awards = evaluate(&visit, &[p], &RuleWeights::default());
        assert!(!awards.iter().any(|a| a.reason == AwardReason::NewRegion));
        assert!(awards.iter().any(|a| a.reason == AwardReason::NewCountry));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let visit = VisitContext {
            flag_long: true,
            bath: Some(BathContext {
                region_id: Some(1),
                country_id: Some(1),
            }),
            is_ultraunique: true,
        };
        let participants = [participant(10), participant(20)];
        let weights = RuleWeights::from_entries(&[entry("base_points", 1.5)]);

        let first = evaluate(&visit, &participants, &weights);
        let second = evaluate(&visit, &participants, &weights);
        assert_eq!(first, second);
    }

    #[test]
    fn two_participant_long_ultraunique_scenario_totals_eight() {
        let weights = RuleWeights::from_entries(&[
            entry("base_points", 1.0),
            entry("long_bonus", 1.0),
            entry("ultraunique_bonus", 2.0),
        ]);
        let visit = VisitContext {
            flag_long: true,
            bath: Some(BathContext {
                region_id: None,
                country_id: None,
            }),
            is_ultraunique: true,
        };
        let awards = evaluate(&visit, &[participant(1), participant(2)], &weights);

        assert_eq!(awards.len(), 6);
        let total: f64 = awards.iter().map(|a| a.points).sum();
        assert_eq!(total, 8.0);
        for uid in [1, 2] {
            let per_user: Vec<_> = awards.iter().filter(|a| a.user_id == uid).collect();
            assert_eq!(per_user.len(), 3);
        }
    }
}
