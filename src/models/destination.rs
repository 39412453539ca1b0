use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use super::package::default_active;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Destination {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub tags: Json<Vec<String>>,
    pub hero_image: Option<String>,
    pub best_time: Option<String>,
    pub must_visit: Option<String>,
    pub tips: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDestination {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub hero_image: Option<String>,
    pub best_time: Option<String>,
    pub must_visit: Option<String>,
    pub tips: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDestination {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub hero_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub best_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub must_visit: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub tips: Option<Option<String>>,
    pub is_active: Option<bool>,
}
