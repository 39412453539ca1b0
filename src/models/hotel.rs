use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use super::package::{default_active, Tier};

#[derive(Debug, Serialize, Deserialize, Clone, FromRow)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub destination: String,
    pub tiers: Json<Vec<Tier>>,
    pub images: Json<Vec<String>>,
    pub amenities: Json<Vec<String>>,
    pub rating: f64,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHotel {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub destination: String,
    #[validate(length(min = 1, message = "must list at least one tier"))]
    pub tiers: Vec<Tier>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "must be between 0 and 5"))]
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateHotel {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub destination: Option<String>,
    #[validate(length(min = 1, message = "must list at least one tier"))]
    pub tiers: Option<Vec<Tier>>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 5.0, message = "must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct HotelSearch {
    pub destination: Option<String>,
    pub tier: Option<Tier>,
}

/// Tier applicability is a set: duplicates collapse, order is cheapest first.
pub fn normalize_tiers(mut tiers: Vec<Tier>) -> Vec<Tier> {
    tiers.sort();
    tiers.dedup();
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tiers() {
        let tiers = normalize_tiers(vec![Tier::Elite, Tier::Lite, Tier::Elite, Tier::Pro]);
        assert_eq!(tiers, vec![Tier::Lite, Tier::Pro, Tier::Elite]);
    }
}
