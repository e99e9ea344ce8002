use sqlx::PgPool;
use storage::{
    ScoringPolicy,
    dto::visit::{CreateVisitRequest, UpdateVisitRequest, VisitFilter, VisitResponse},
    error::Result,
    models::{Visit, VisitStatus},
    repository::{award::AwardRepository, bath::BathRepository, visit::VisitRepository},
    services::{scoring, visit as visit_service},
};

/// Join a visit with its bath, participants and award rows.
async fn to_response(pool: &PgPool, visit: Visit) -> Result<VisitResponse> {
    let bath = match visit.bath_id {
        Some(bath_id) => Some(BathRepository::new(pool).find_by_id(bath_id).await?),
        None => None,
    };
    let participants = VisitRepository::new(pool).participants(visit.id).await?;
    let awards = AwardRepository::new(pool).for_visit(visit.id).await?;

    Ok(VisitResponse::assemble(visit, bath, participants, awards))
}

pub async fn list_visits(pool: &PgPool, filter: &VisitFilter) -> Result<Vec<VisitResponse>> {
    let visits = VisitRepository::new(pool).list(filter).await?;

    let mut responses = Vec::with_capacity(visits.len());
    for visit in visits {
        responses.push(to_response(pool, visit).await?);
    }
    Ok(responses)
}

pub async fn get_visit(pool: &PgPool, visit_id: i32) -> Result<VisitResponse> {
    let visit = VisitRepository::new(pool).find_by_id(visit_id).await?;
    to_response(pool, visit).await
}

pub async fn create_visit(
    pool: &PgPool,
    policy: &ScoringPolicy,
    req: &CreateVisitRequest,
) -> Result<VisitResponse> {
    let visit = visit_service::create_visit(pool, policy, req).await?;
    to_response(pool, visit).await
}

/// Apply the present fields one mutation at a time, each through the
/// orchestration so awards track every step.
pub async fn update_visit(
    pool: &PgPool,
    policy: &ScoringPolicy,
    visit_id: i32,
    req: &UpdateVisitRequest,
) -> Result<VisitResponse> {
    let mut visit = VisitRepository::new(pool).find_by_id(visit_id).await?;

    if let Some(ref status) = req.status {
        let status: VisitStatus = status.parse()?;
        visit = visit_service::set_visit_status(pool, policy, visit_id, status).await?;
    }
    if let Some(flag_long) = req.flag_long {
        visit = visit_service::set_flag_long(pool, policy, visit_id, flag_long).await?;
    }
    if let Some(bath_id) = req.bath_id {
        visit = visit_service::update_visit_bath(pool, policy, visit_id, bath_id).await?;
    }
    if let Some(ref participant_ids) = req.participant_ids {
        visit = visit_service::update_participants(pool, policy, visit_id, participant_ids).await?;
    }

    to_response(pool, visit).await
}

pub async fn set_status(
    pool: &PgPool,
    policy: &ScoringPolicy,
    visit_id: i32,
    status: VisitStatus,
) -> Result<VisitResponse> {
    let visit = visit_service::set_visit_status(pool, policy, visit_id, status).await?;
    to_response(pool, visit).await
}

pub async fn recalculate(pool: &PgPool, policy: &ScoringPolicy, visit_id: i32) -> Result<()> {
    scoring::recalculate_visit(pool, policy, visit_id).await
}
