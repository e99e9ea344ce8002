use sqlx::PgPool;

use super::eligibility::{self, VisitTimes};
use super::queries;
use super::rules::{BathContext, ParticipantFacts, RuleWeights, VisitContext, evaluate};
use super::ScoringPolicy;
use crate::error::{Result, StorageError};

/// Recompute every point award for a visit and replace the stored set.
///
/// Safe to call any number of times: for an unchanged visit the result is
/// identical on every call. All reads and writes run in one transaction, so
/// a failure leaves the previous awards in place. The only error surfaced
/// for a missing visit is `NotFound`; everything that fails mid-transaction
/// comes back as `Recalculation`.
pub async fn recalculate_visit(
    pool: &PgPool,
    policy: &ScoringPolicy,
    visit_id: i32,
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let visit = queries::load_visit(&mut *tx, visit_id)
        .await
        .map_err(StorageError::Recalculation)?
        .ok_or(StorageError::NotFound)?;
    let status = visit.status()?;

    if status.clears_awards() {
        queries::delete_awards(&mut *tx, visit_id)
            .await
            .map_err(StorageError::Recalculation)?;
        tx.commit().await.map_err(StorageError::Recalculation)?;
        tracing::debug!(visit_id, status = %status, "cleared awards for inactive visit");
        return Ok(());
    }

    let participant_ids = queries::participant_ids(&mut *tx, visit_id)
        .await
        .map_err(StorageError::Recalculation)?;

    // Replace, never patch: the old set goes before any rule is evaluated.
    queries::delete_awards(&mut *tx, visit_id)
        .await
        .map_err(StorageError::Recalculation)?;

    if participant_ids.is_empty() {
        tx.commit().await.map_err(StorageError::Recalculation)?;
        return Ok(());
    }

    let entries = queries::config_entries(&mut *tx)
        .await
        .map_err(StorageError::Recalculation)?;
    let weights = RuleWeights::from_entries(&entries);

    let bath = match visit.bath_id {
        Some(bath_id) => queries::load_bath(&mut *tx, bath_id)
            .await
            .map_err(StorageError::Recalculation)?,
        None => None,
    };

    let is_ultraunique = match &bath {
        Some(bath) if weights.ultraunique_bonus > 0.0 => {
            let rivals = queries::rival_visits(&mut *tx, bath.id, visit_id)
                .await
                .map_err(StorageError::Recalculation)?;
            eligibility::is_ultraunique(
                &VisitTimes {
                    visited_at: visit.visited_at,
                    created_at: visit.created_at,
                },
                &rivals,
                policy.ultraunique_cutoff,
            )
        }
        _ => false,
    };

    let context = VisitContext {
        flag_long: visit.flag_long,
        bath: bath.as_ref().map(|b| BathContext {
            region_id: b.region_id,
            country_id: b.country_id,
        }),
        is_ultraunique,
    };

    let mut participants = Vec::with_capacity(participant_ids.len());
    for user_id in participant_ids {
        let prior_region_visits = match bath.as_ref().and_then(|b| b.region_id) {
            Some(region_id) if weights.region_bonus > 0.0 => {
                queries::prior_region_visits(&mut *tx, user_id, region_id, visit_id, policy.season_year)
                    .await
                    .map_err(StorageError::Recalculation)?
            }
            _ => 0,
        };
        let prior_country_visits = match bath.as_ref().and_then(|b| b.country_id) {
            Some(country_id) if weights.country_bonus > 0.0 => {
                queries::prior_country_visits(
                    &mut *tx,
                    user_id,
                    country_id,
                    visit_id,
                    policy.season_year,
                )
                .await
                .map_err(StorageError::Recalculation)?
            }
            _ => 0,
        };
        participants.push(ParticipantFacts {
            user_id,
            prior_region_visits,
            prior_country_visits,
        });
    }

    let awards = evaluate(&context, &participants, &weights);

    queries::insert_awards(&mut *tx, visit_id, &awards)
        .await
        .map_err(StorageError::Recalculation)?;
    tx.commit().await.map_err(StorageError::Recalculation)?;

    tracing::debug!(
        visit_id,
        awards = awards.len(),
        is_ultraunique,
        "recalculated visit awards"
    );
    Ok(())
}
