use chrono::{DateTime, TimeZone, Utc};
use storage::models::AwardReason;
use storage::services::scoring::{
    BathContext, ParticipantFacts, RuleWeights, VisitContext, VisitTimes, evaluate, is_ultraunique,
};

fn cutoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
}

fn times(visited: &str, created: &str) -> VisitTimes {
    VisitTimes {
        visited_at: visited.parse().unwrap(),
        created_at: created.parse().unwrap(),
    }
}

fn participant(user_id: i64) -> ParticipantFacts {
    ParticipantFacts {
        user_id,
        prior_region_visits: 0,
        prior_country_visits: 0,
    }
}

#[test]
fn recomputing_a_fixed_state_is_idempotent() {
    let visit = VisitContext {
        flag_long: true,
        bath: Some(BathContext {
            region_id: Some(4),
            country_id: Some(2),
        }),
        is_ultraunique: true,
    };
    let participants = [participant(7), participant(8)];
    let weights = RuleWeights::default();

    let runs: Vec<_> = (0..5)
        .map(|_| evaluate(&visit, &participants, &weights))
        .collect();
    for run in &runs[1..] {
        assert_eq!(run, &runs[0]);
    }
}

#[test]
fn long_flag_toggle_adds_and_removes_exactly_one_award_per_participant() {
    let weights = RuleWeights::default();
    let participants = [participant(1), participant(2)];
    let mut visit = VisitContext {
        flag_long: false,
        bath: None,
        is_ultraunique: false,
    };

    let before = evaluate(&visit, &participants, &weights);
    visit.flag_long = true;
    let after = evaluate(&visit, &participants, &weights);
    visit.flag_long = false;
    let reverted = evaluate(&visit, &participants, &weights);

    let longs = |awards: &[storage::services::scoring::NewAward]| {
        awards
            .iter()
            .filter(|a| a.reason == AwardReason::Long)
            .count()
    };
    assert_eq!(longs(&before), 0);
    assert_eq!(longs(&after), 2);
    assert_eq!(reverted, before);
}

#[test]
fn second_same_region_visit_of_the_season_earns_nothing_regional() {
    let visit = VisitContext {
        flag_long: false,
        bath: Some(BathContext {
            region_id: Some(11),
            country_id: Some(3),
        }),
        is_ultraunique: false,
    };
    let weights = RuleWeights::default();

    // First visit of the season: empty history, both geo bonuses fire.
    let first = evaluate(&visit, &[participant(5)], &weights);
    assert!(first.iter().any(|a| a.reason == AwardReason::NewRegion));
    assert!(first.iter().any(|a| a.reason == AwardReason::NewCountry));

    // Second visit: the first one is now in the season history, and however
    // many times this is recomputed the geo bonuses stay off.
    let second_facts = [ParticipantFacts {
        user_id: 5,
        prior_region_visits: 1,
        prior_country_visits: 1,
    }];
    for _ in 0..3 {
        let second = evaluate(&visit, &second_facts, &weights);
        assert!(!second.iter().any(|a| a.reason == AwardReason::NewRegion));
        assert!(!second.iter().any(|a| a.reason == AwardReason::NewCountry));
    }
}

#[test]
fn same_day_tie_goes_to_the_earlier_report() {
    let first_reported = times("2026-02-07T12:00:00Z", "2026-02-07T12:30:00Z");
    let second_reported = times("2026-02-07T12:00:00Z", "2026-02-07T13:00:00Z");

    assert!(is_ultraunique(
        &first_reported,
        &[second_reported],
        cutoff()
    ));
    assert!(!is_ultraunique(
        &second_reported,
        &[first_reported],
        cutoff()
    ));
}

#[test]
fn confirmed_long_ultraunique_visit_with_two_participants_totals_eight() {
    let weights = RuleWeights::from_entries(&[]);
    // base_points:1, long_bonus:1 are the defaults; ultraunique_bonus:2 set.
    let weights = RuleWeights {
        ultraunique_bonus: 2.0,
        ..weights
    };
    let visit = VisitContext {
        flag_long: true,
        bath: Some(BathContext {
            region_id: None,
            country_id: None,
        }),
        is_ultraunique: true,
    };

    let awards = evaluate(&visit, &[participant(1), participant(2)], &weights);

    let total: f64 = awards.iter().map(|a| a.points).sum();
    assert_eq!(total, 8.0);
    for uid in [1, 2] {
        let mut reasons: Vec<_> = awards
            .iter()
            .filter(|a| a.user_id == uid)
            .map(|a| (a.reason, a.points))
            .collect();
        reasons.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
        assert_eq!(
            reasons,
            vec![
                (AwardReason::Base, 1.0),
                (AwardReason::Long, 1.0),
                (AwardReason::Ultraunique, 2.0),
            ]
        );
    }
}

#[test]
fn no_participants_means_no_awards() {
    let visit = VisitContext {
        flag_long: true,
        bath: Some(BathContext {
            region_id: Some(1),
            country_id: Some(1),
        }),
        is_ultraunique: true,
    };
    assert!(evaluate(&visit, &[], &RuleWeights::default()).is_empty());
}
