use sqlx::PgPool;
use storage::{
    dto::user::{UserSummary, UserWithPoints},
    error::Result,
    models::User,
    repository::{award::AwardRepository, user::UserRepository},
};

pub async fn list_users(pool: &PgPool) -> Result<Vec<UserWithPoints>> {
    let repo = UserRepository::new(pool);
    repo.list_with_points().await
}

pub async fn upsert_user(
    pool: &PgPool,
    id: i64,
    username: Option<&str>,
    full_name: &str,
) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.upsert(id, username, full_name).await
}

pub async fn get_user_summary(pool: &PgPool, user_id: i64) -> Result<UserSummary> {
    let user = UserRepository::new(pool).find_by_id(user_id).await?;

    let awards = AwardRepository::new(pool);
    let points = awards.total_for_user(user_id).await?;
    let visit_count = awards.active_visit_count_for_user(user_id).await?;

    Ok(UserSummary {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        is_admin: user.is_admin,
        points,
        visit_count,
    })
}

pub async fn update_user(
    pool: &PgPool,
    user_id: i64,
    is_admin: Option<bool>,
    is_active: Option<bool>,
) -> Result<User> {
    let repo = UserRepository::new(pool);
    repo.update_flags(user_id, is_admin, is_active).await
}
