use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Package quality level, cheapest first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
pub enum Tier {
    Lite,
    Standard,
    Pro,
    Premium,
    Elite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    Main,
    Location,
    Hero,
    Gallery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageImage {
    pub url: String,
    pub role: ImageRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub destination: String,
    pub tier: Tier,
    pub price: f64,
    pub original_price: Option<f64>,
    pub duration: String,
    pub group_size: String,
    pub description: String,
    pub itinerary: Json<Vec<ItineraryDay>>,
    pub images: Json<Vec<PackageImage>>,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePackage {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub destination: String,
    pub tier: Tier,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub original_price: Option<f64>,
    #[validate(length(min = 1, message = "is required"))]
    pub duration: String,
    #[validate(length(min = 1, message = "is required"))]
    pub group_size: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
    #[serde(default)]
    pub images: Vec<PackageImage>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePackage {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub destination: Option<String>,
    pub tier: Option<Tier>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    #[serde(default, deserialize_with = "super::nullable")]
    pub original_price: Option<Option<f64>>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub duration: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub group_size: Option<String>,
    pub description: Option<String>,
    pub itinerary: Option<Vec<ItineraryDay>>,
    pub images: Option<Vec<PackageImage>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct PackageFilter {
    pub destination: Option<String>,
    pub tier: Option<Tier>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub travelers: u32,
}

pub(crate) fn default_active() -> bool {
    true
}

/// Orders itinerary days by day number.
pub fn sorted_itinerary(mut days: Vec<ItineraryDay>) -> Vec<ItineraryDay> {
    days.sort_by_key(|d| d.day);
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itinerary_sorted_by_day() {
        let days = vec![
            ItineraryDay {
                day: 3,
                title: "Beach".into(),
                activities: vec![],
            },
            ItineraryDay {
                day: 1,
                title: "Arrival".into(),
                activities: vec!["Check-in".into()],
            },
        ];
        let sorted = sorted_itinerary(days);
        assert_eq!(sorted[0].day, 1);
        assert_eq!(sorted[1].day, 3);
    }

    #[test]
    fn test_tier_and_image_role_wire_names() {
        assert_eq!(serde_json::to_string(&Tier::Premium).unwrap(), "\"Premium\"");
        let image: PackageImage =
            serde_json::from_str(r#"{"url":"/a.jpg","role":"hero"}"#).unwrap();
        assert_eq!(image.role, ImageRole::Hero);
    }

    #[test]
    fn test_update_tells_null_from_absent() {
        let untouched: UpdatePackage = serde_json::from_str(r#"{"price": 900}"#).unwrap();
        assert_eq!(untouched.original_price, None);

        let cleared: UpdatePackage = serde_json::from_str(r#"{"original_price": null}"#).unwrap();
        assert_eq!(cleared.original_price, Some(None));

        let set: UpdatePackage = serde_json::from_str(r#"{"original_price": 1100}"#).unwrap();
        assert_eq!(set.original_price, Some(Some(1100.0)));
    }
}
