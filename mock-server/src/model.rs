//! Wire records served by the mock service.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    pub level: String,
    pub total_stars: u32,
    pub created_at: String,
}

#[derive(Deserialize, Default)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub level: Option<String>,
    pub total_stars: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProgress {
    pub user_id: String,
    pub total_stars: u32,
    pub level: String,
    pub completed_levels: u32,
    pub current_level_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyTrivia {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub featured_date: Option<String>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Level {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub order_index: u32,
    pub unlock_requirement: u32,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LevelProgress {
    pub id: Option<String>,
    pub user_id: String,
    pub level_id: String,
    pub status: String,
    pub score: u32,
    pub stars: u32,
    pub completion_percentage: u32,
    pub completed_at: Option<String>,
    pub level_name: Option<String>,
    pub level_order: Option<u32>,
}

#[derive(Deserialize, Default)]
pub struct UpdateLevelProgress {
    pub status: Option<String>,
    pub score: Option<u32>,
    pub stars: Option<u32>,
    pub completion_percentage: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Mistake {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub question: Option<String>,
    pub category: String,
    pub mastery_level: String,
    pub image_url: Option<String>,
    pub added_at: String,
}

#[derive(Deserialize)]
pub struct CreateMistake {
    pub user_id: String,
    pub title: String,
    pub question: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_mastery")]
    pub mastery_level: String,
    pub image_url: Option<String>,
}

fn default_category() -> String {
    "physical".to_string()
}

fn default_mastery() -> String {
    "low".to_string()
}

#[derive(Deserialize, Default)]
pub struct UpdateMistake {
    pub title: Option<String>,
    pub question: Option<String>,
    pub category: Option<String>,
    pub mastery_level: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeoFeature {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub feature_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region: Option<String>,
    pub image_url: Option<String>,
    pub stats: Option<HashMap<String, serde_json::Value>>,
    pub created_at: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArLandform {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub landform_type: String,
    pub image_url: Option<String>,
    pub elevation: Option<i32>,
    pub created_at: String,
}

pub const CATEGORIES: [&str; 3] = ["physical", "human", "regional"];
pub const MASTERY_LEVELS: [&str; 3] = ["low", "medium", "critical"];
pub const LEVEL_STATUSES: [&str; 3] = ["locked", "active", "completed"];
