use std::collections::BTreeSet;

use chrono::{Days, NaiveTime};
use sqlx::{PgPool, QueryBuilder};

use crate::dto::visit::{CreateVisitRequest, VisitFilter};
use crate::error::{Result, StorageError};
use crate::models::{User, Visit, VisitStatus};

const VISIT_COLUMNS: &str = "id, bath_id, created_by, message_id, chat_id, status, \
     visited_at, flag_long, flag_ultraunique, created_at, updated_at";

/// Repository for Visit database operations
pub struct VisitRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VisitRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Visit> {
        sqlx::query_as::<_, Visit>(&format!("SELECT {VISIT_COLUMNS} FROM visits WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// List visits newest-first with the admin filter set.
    pub async fn list(&self, filter: &VisitFilter) -> Result<Vec<Visit>> {
        let mut query = QueryBuilder::new(
            "SELECT v.id, v.bath_id, v.created_by, v.message_id, v.chat_id, v.status, \
             v.visited_at, v.flag_long, v.flag_ultraunique, v.created_at, v.updated_at \
             FROM visits v ",
        );

        if filter.user_id.is_some() {
            query.push("JOIN visit_participants vp ON vp.visit_id = v.id ");
        }
        query.push("WHERE 1=1 ");

        if let Some(ref status) = filter.status {
            query.push(" AND v.status = ");
            query.push_bind(status);
        }
        if let Some(bath_id) = filter.bath_id {
            query.push(" AND v.bath_id = ");
            query.push_bind(bath_id);
        }
        if let Some(user_id) = filter.user_id {
            query.push(" AND vp.user_id = ");
            query.push_bind(user_id);
        }
        if let Some(date_from) = filter.date_from {
            query.push(" AND v.visited_at >= ");
            query.push_bind(date_from.and_time(NaiveTime::MIN).and_utc());
        }
        if let Some(date_to) = filter.date_to {
            // Inclusive of the whole end day.
            let end = date_to
                .checked_add_days(Days::new(1))
                .unwrap_or(date_to)
                .and_time(NaiveTime::MIN)
                .and_utc();
            query.push(" AND v.visited_at < ");
            query.push_bind(end);
        }

        query.push(" ORDER BY v.visited_at DESC LIMIT ");
        query.push_bind(filter.limit());
        query.push(" OFFSET ");
        query.push_bind(filter.offset());

        let visits = query.build_query_as().fetch_all(self.pool).await?;
        Ok(visits)
    }

    /// Insert a new visit. Reported visits start out confirmed; drafts come
    /// from flows that have not picked a bath yet.
    pub async fn insert(&self, req: &CreateVisitRequest) -> Result<Visit> {
        let visit = sqlx::query_as::<_, Visit>(&format!(
            r#"
            INSERT INTO visits (bath_id, created_by, message_id, chat_id, status,
                                visited_at, flag_long)
            VALUES ($1, $2, $3, $4, 'confirmed', COALESCE($5, NOW()), $6)
            RETURNING {VISIT_COLUMNS}
            "#
        ))
        .bind(req.bath_id)
        .bind(req.created_by)
        .bind(req.message_id)
        .bind(req.chat_id)
        .bind(req.visited_at)
        .bind(req.flag_long)
        .fetch_one(self.pool)
        .await?;

        Ok(visit)
    }

    pub async fn set_status(&self, id: i32, status: VisitStatus) -> Result<Visit> {
        sqlx::query_as::<_, Visit>(&format!(
            "UPDATE visits SET status = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {VISIT_COLUMNS}"
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn set_bath(&self, id: i32, bath_id: i32) -> Result<Visit> {
        sqlx::query_as::<_, Visit>(&format!(
            "UPDATE visits SET bath_id = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {VISIT_COLUMNS}"
        ))
        .bind(id)
        .bind(bath_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn set_flag_long(&self, id: i32, value: bool) -> Result<Visit> {
        sqlx::query_as::<_, Visit>(&format!(
            "UPDATE visits SET flag_long = $2, updated_at = NOW() WHERE id = $1 \
             RETURNING {VISIT_COLUMNS}"
        ))
        .bind(id)
        .bind(value)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Full set-replace of the participant list. The stored set is a true
    /// set, so duplicate ids in the input collapse before this is called.
    pub async fn replace_participants(&self, visit_id: i32, user_ids: &BTreeSet<i64>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM visit_participants WHERE visit_id = $1")
            .bind(visit_id)
            .execute(&mut *tx)
            .await?;

        if !user_ids.is_empty() {
            let mut query = QueryBuilder::new("INSERT INTO visit_participants (visit_id, user_id) ");
            query.push_values(user_ids, |mut row, user_id| {
                row.push_bind(visit_id).push_bind(*user_id);
            });
            query.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    pub async fn participants(&self, visit_id: i32) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.full_name, u.is_admin, u.is_active, u.created_at
            FROM users u
            JOIN visit_participants vp ON vp.user_id = u.id
            WHERE vp.visit_id = $1
            ORDER BY u.id
            "#,
        )
        .bind(visit_id)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}
