use storage::{Database, ScoringPolicy};

use crate::middleware::auth::ApiKeys;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub policy: ScoringPolicy,
    pub api_keys: ApiKeys,
}
