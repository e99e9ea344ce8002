use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Partial update of the rule weights; present fields are upserted, the rest
/// stay untouched. Changes apply to subsequent recomputes only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub base_points: Option<f64>,
    pub long_bonus: Option<f64>,
    pub region_bonus: Option<f64>,
    pub country_bonus: Option<f64>,
    pub ultraunique_bonus: Option<f64>,
}

impl UpdateSettingsRequest {
    pub fn as_pairs(&self) -> Vec<(&'static str, f64)> {
        [
            ("base_points", self.base_points),
            ("long_bonus", self.long_bonus),
            ("region_bonus", self.region_bonus),
            ("country_bonus", self.country_bonus),
            ("ultraunique_bonus", self.ultraunique_bonus),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UpdateSettingsResponse {
    pub updated: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_fields_become_pairs() {
        let req = UpdateSettingsRequest {
            base_points: Some(2.0),
            long_bonus: None,
            region_bonus: None,
            country_bonus: None,
            ultraunique_bonus: Some(0.0),
        };
        assert_eq!(
            req.as_pairs(),
            vec![("base_points", 2.0), ("ultraunique_bonus", 0.0)]
        );
    }
}
