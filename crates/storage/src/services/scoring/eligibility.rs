use chrono::{DateTime, Utc};

/// The two timestamps that matter for the ultra-unique race: when the bath
/// was visited and when the visit was reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitTimes {
    pub visited_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A visit is ultra-unique when it is the first active visit to its bath
/// since the cutoff, with same-day ties broken by report order:
///
/// - no rival visited the bath strictly earlier (counting only rivals on or
///   after the cutoff), and
/// - no rival on the same calendar day was reported earlier.
///
/// A visit that is first by date but loses the same-day creation race is not
/// ultra-unique. `rivals` must already be restricted to other active visits
/// to the same bath.
pub fn is_ultraunique(current: &VisitTimes, rivals: &[VisitTimes], cutoff: DateTime<Utc>) -> bool {
    let visited_earlier = rivals
        .iter()
        .any(|r| r.visited_at >= cutoff && r.visited_at < current.visited_at);
    if visited_earlier {
        return false;
    }

    let day = current.visited_at.date_naive();
    !rivals
        .iter()
        .any(|r| r.visited_at.date_naive() == day && r.created_at < current.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn cutoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    }

    fn times(visited: &str, created: &str) -> VisitTimes {
        VisitTimes {
            visited_at: at(visited),
            created_at: at(created),
        }
    }

    #[test]
    fn first_visit_ever_is_ultraunique() {
        let current = times("2026-03-01T18:00:00Z", "2026-03-01T19:00:00Z");
        assert!(is_ultraunique(&current, &[], cutoff()));
    }

    #[test]
    fn strictly_earlier_rival_blocks() {
        let current = times("2026-03-01T18:00:00Z", "2026-03-01T19:00:00Z");
        let rival = times("2026-02-27T10:00:00Z", "2026-02-27T11:00:00Z");
        assert!(!is_ultraunique(&current, &[rival], cutoff()));
    }

    #[test]
    fn rivals_before_the_cutoff_do_not_block() {
        let current = times("2026-03-01T18:00:00Z", "2026-03-01T19:00:00Z");
        let ancient = times("2019-08-14T10:00:00Z", "2019-08-14T10:05:00Z");
        assert!(is_ultraunique(&current, &[ancient], cutoff()));
    }

    #[test]
    fn same_day_earlier_report_wins_the_race() {
        let loser = times("2026-03-01T18:00:00Z", "2026-03-01T21:00:00Z");
        let winner = times("2026-03-01T18:00:00Z", "2026-03-01T20:00:00Z");
        assert!(!is_ultraunique(&loser, &[winner], cutoff()));
        assert!(is_ultraunique(&winner, &[loser], cutoff()));
    }

    #[test]
    fn later_day_rival_is_irrelevant() {
        let current = times("2026-03-01T18:00:00Z", "2026-03-02T09:00:00Z");
        // Visited the day after, though reported before the current one.
        let rival = times("2026-03-02T08:00:00Z", "2026-03-01T08:00:00Z");
        assert!(is_ultraunique(&current, &[rival], cutoff()));
    }

    #[test]
    fn date_winner_can_still_lose_same_day_tiebreak() {
        // Both on the same earliest day; the current one reported second.
        let current = times("2026-03-01T23:00:00Z", "2026-03-01T23:30:00Z");
        let rival = times("2026-03-01T23:10:00Z", "2026-03-01T23:20:00Z");
        assert!(!is_ultraunique(&current, &[rival], cutoff()));
    }
}
