//! Visit mutation orchestration: every state change persists first, then the
//! scoring engine recomputes that visit synchronously, so callers always read
//! awards that match the state they just wrote.

use std::collections::BTreeSet;

use sqlx::PgPool;

use crate::dto::visit::CreateVisitRequest;
use crate::error::{Result, StorageError};
use crate::models::{Visit, VisitStatus};
use crate::repository::visit::VisitRepository;
use crate::services::scoring::{self, ScoringPolicy};

pub async fn create_visit(
    pool: &PgPool,
    policy: &ScoringPolicy,
    req: &CreateVisitRequest,
) -> Result<Visit> {
    let repo = VisitRepository::new(pool);

    let visit = match repo.insert(req).await {
        Err(e) if e.is_unique_violation() => {
            return Err(StorageError::ConstraintViolation(
                "visit already reported for this chat message".to_string(),
            ));
        }
        other => other?,
    };

    let participant_ids: BTreeSet<i64> = req.participant_ids.iter().copied().collect();
    repo.replace_participants(visit.id, &participant_ids).await?;

    scoring::recalculate_visit(pool, policy, visit.id).await?;
    tracing::info!(visit_id = visit.id, "visit created");

    Ok(visit)
}

pub async fn set_visit_status(
    pool: &PgPool,
    policy: &ScoringPolicy,
    visit_id: i32,
    status: VisitStatus,
) -> Result<Visit> {
    let repo = VisitRepository::new(pool);

    let visit = repo.set_status(visit_id, status).await?;
    scoring::recalculate_visit(pool, policy, visit_id).await?;
    tracing::info!(visit_id, status = %status, "visit status changed");

    Ok(visit)
}

pub async fn update_visit_bath(
    pool: &PgPool,
    policy: &ScoringPolicy,
    visit_id: i32,
    bath_id: i32,
) -> Result<Visit> {
    let repo = VisitRepository::new(pool);

    let visit = match repo.set_bath(visit_id, bath_id).await {
        Err(e) if e.is_foreign_key_violation() => {
            return Err(StorageError::ConstraintViolation(format!(
                "unknown bath: {bath_id}"
            )));
        }
        other => other?,
    };
    scoring::recalculate_visit(pool, policy, visit_id).await?;

    Ok(visit)
}

pub async fn set_flag_long(
    pool: &PgPool,
    policy: &ScoringPolicy,
    visit_id: i32,
    value: bool,
) -> Result<Visit> {
    let repo = VisitRepository::new(pool);

    let visit = repo.set_flag_long(visit_id, value).await?;
    scoring::recalculate_visit(pool, policy, visit_id).await?;

    Ok(visit)
}

/// Replace the participant set wholesale; duplicates in the input collapse.
pub async fn update_participants(
    pool: &PgPool,
    policy: &ScoringPolicy,
    visit_id: i32,
    user_ids: &[i64],
) -> Result<Visit> {
    let repo = VisitRepository::new(pool);

    // Surface NotFound before touching the membership table.
    repo.find_by_id(visit_id).await?;

    let participant_ids: BTreeSet<i64> = user_ids.iter().copied().collect();
    repo.replace_participants(visit_id, &participant_ids).await?;

    scoring::recalculate_visit(pool, policy, visit_id).await?;

    repo.find_by_id(visit_id).await
}
