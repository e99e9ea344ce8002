use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::visits::handlers::list_visits,
        features::visits::handlers::get_visit,
        features::visits::handlers::create_visit,
        features::visits::handlers::update_visit,
        features::visits::handlers::approve_visit,
        features::visits::handlers::cancel_visit,
        features::visits::handlers::dispute_visit,
        features::visits::handlers::recalculate_visit,
        features::baths::handlers::list_baths,
        features::baths::handlers::get_bath,
        features::baths::handlers::create_bath,
        features::baths::handlers::list_countries,
        features::baths::handlers::list_regions,
        features::leaderboard::handlers::get_leaderboard,
        features::users::handlers::list_users,
        features::users::handlers::upsert_user,
        features::users::handlers::get_user,
        features::users::handlers::update_user,
        features::settings::handlers::get_settings,
        features::settings::handlers::update_settings,
    ),
    components(
        schemas(
            storage::dto::visit::CreateVisitRequest,
            storage::dto::visit::UpdateVisitRequest,
            storage::dto::visit::VisitResponse,
            storage::dto::visit::BathSummary,
            storage::dto::visit::ParticipantInfo,
            storage::dto::visit::AwardInfo,
            storage::dto::bath::CreateBathRequest,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::Period,
            storage::dto::settings::UpdateSettingsRequest,
            storage::dto::settings::UpdateSettingsResponse,
            storage::dto::user::UpsertUserRequest,
            storage::dto::user::UserWithPoints,
            storage::dto::user::UserSummary,
            storage::dto::user::UpdateUserRequest,
            storage::models::Visit,
            storage::models::VisitStatus,
            storage::models::Bath,
            storage::models::Country,
            storage::models::Region,
            storage::models::User,
            storage::models::PointAward,
            storage::models::AwardReason,
            storage::models::ConfigEntry,
        )
    ),
    tags(
        (name = "visits", description = "Visit reporting, moderation and recalculation"),
        (name = "baths", description = "Bath directory and geography"),
        (name = "leaderboard", description = "Ranked point totals"),
        (name = "users", description = "Participant roster"),
        (name = "settings", description = "Scoring rule weights"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting bathhouse league API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(
        season_year = config.season_year,
        "Configuration loaded successfully"
    );

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let state = AppState {
        db,
        policy: config.scoring_policy(),
        api_keys: ApiKeys::from_comma_separated(&config.api_keys),
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/visits", features::visits::routes::routes())
        .nest("/api/baths", features::baths::routes::routes())
        .nest("/api/leaderboard", features::leaderboard::routes::routes())
        .nest("/api/users", features::users::routes::routes())
        .nest("/api/settings", features::settings::routes::routes())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .context("Failed to bind server address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
