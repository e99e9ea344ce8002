use sqlx::PgPool;

use crate::error::Result;
use crate::models::PointAward;

/// Read side of the award store. Writes belong to the scoring engine alone.
pub struct AwardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AwardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn for_visit(&self, visit_id: i32) -> Result<Vec<PointAward>> {
        let awards = sqlx::query_as::<_, PointAward>(
            r#"
            SELECT id, user_id, visit_id, points, reason, created_at
            FROM point_awards
            WHERE visit_id = $1
            ORDER BY user_id, id
            "#,
        )
        .bind(visit_id)
        .fetch_all(self.pool)
        .await?;

        Ok(awards)
    }

    pub async fn total_for_user(&self, user_id: i64) -> Result<f64> {
        let total = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(points), 0) FROM point_awards WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(total)
    }

    /// How many active visits the user took part in.
    pub async fn active_visit_count_for_user(&self, user_id: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(vp.visit_id)
            FROM visit_participants vp
            JOIN visits v ON v.id = vp.visit_id
            WHERE vp.user_id = $1
              AND v.status IN ('confirmed', 'draft', 'pending')
            "#,
        )
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }
}
