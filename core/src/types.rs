//! Domain DTOs for the GeoExplorer API.
//!
//! # Design
//! These types mirror the service's JSON schema but are defined independently
//! of the mock server; integration tests catch drift between the two. Ids,
//! timestamps and dates are kept as the strings the service sends, since the
//! client never interprets them. Partial-update payloads skip unset fields so
//! the server leaves those columns untouched.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Topic area a missed question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MistakeCategory {
    Physical,
    Human,
    Regional,
}

impl MistakeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MistakeCategory::Physical => "physical",
            MistakeCategory::Human => "human",
            MistakeCategory::Regional => "regional",
        }
    }
}

/// How well the user has mastered a missed question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryLevel {
    Low,
    Medium,
    Critical,
}

impl MasteryLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MasteryLevel::Low => "low",
            MasteryLevel::Medium => "medium",
            MasteryLevel::Critical => "critical",
        }
    }
}

/// Kind of landform shown in the AR view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandformType {
    Basin,
    Peak,
    Valley,
    Cliff,
}

impl LandformType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LandformType::Basin => "basin",
            LandformType::Peak => "peak",
            LandformType::Valley => "valley",
            LandformType::Cliff => "cliff",
        }
    }
}

/// Per-user state of a level.
///
/// The intended lifecycle is locked → active → completed. The client does not
/// enforce it; `is_forward_of` is available to callers that want to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStatus {
    Locked,
    Active,
    Completed,
}

impl LevelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelStatus::Locked => "locked",
            LevelStatus::Active => "active",
            LevelStatus::Completed => "completed",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            LevelStatus::Locked => 0,
            LevelStatus::Active => 1,
            LevelStatus::Completed => 2,
        }
    }

    /// True when moving from `previous` to `self` does not go backwards.
    pub fn is_forward_of(&self, previous: LevelStatus) -> bool {
        self.rank() >= previous.rank()
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(MistakeCategory, MasteryLevel, LandformType, LevelStatus);

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub level: String,
    pub total_stars: u32,
    pub created_at: String,
}

/// Aggregate progress view. Read-only for the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: String,
    pub total_stars: u32,
    pub level: String,
    pub completed_levels: u32,
    #[serde(default)]
    pub current_level_id: Option<String>,
}

/// Partial user update. Only the fields that are `Some` are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_stars: Option<u32>,
}

// ---------------------------------------------------------------------------
// Trivia
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTrivia {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub featured_date: Option<String>,
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub order_index: u32,
    /// Star threshold that unlocks the level.
    pub unlock_requirement: u32,
    pub created_at: String,
}

/// A user's progress on one level, identified by `(user_id, level_id)`.
///
/// `id` is absent for levels the user has never touched; the service
/// synthesizes a `locked` record for those.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLevelProgress {
    #[serde(default)]
    pub id: Option<String>,
    pub user_id: String,
    pub level_id: String,
    pub status: LevelStatus,
    pub score: u32,
    pub stars: u32,
    pub completion_percentage: u32,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub level_name: Option<String>,
    #[serde(default)]
    pub level_order: Option<u32>,
}

/// Partial level-progress update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelProgressUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LevelStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<u32>,
}

// ---------------------------------------------------------------------------
// Mistakes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mistake {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub question: Option<String>,
    pub category: MistakeCategory,
    pub mastery_level: MasteryLevel,
    #[serde(default)]
    pub image_url: Option<String>,
    pub added_at: String,
}

/// Payload for recording a new mistake. The service assigns `id` and
/// `added_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMistake {
    pub user_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub category: MistakeCategory,
    pub mastery_level: MasteryLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Partial mistake update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MistakeUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MistakeCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mastery_level: Option<MasteryLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Confirmation returned by delete endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Geographic features and AR landforms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicFeature {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub feature_type: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Free-form facts (height, area, ...) keyed by name.
    #[serde(default)]
    pub stats: Option<HashMap<String, serde_json::Value>>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArLandform {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub landform_type: LandformType,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub elevation: Option<i32>,
    pub created_at: String,
}

/// Body of the service health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_serialize_as_lowercase_literals() {
        assert_eq!(serde_json::to_value(MistakeCategory::Regional).unwrap(), "regional");
        assert_eq!(serde_json::to_value(MasteryLevel::Critical).unwrap(), "critical");
        assert_eq!(serde_json::to_value(LevelStatus::Active).unwrap(), "active");
        assert_eq!(LandformType::Valley.to_string(), "valley");
    }

    #[test]
    fn unknown_enum_literal_is_rejected() {
        let result: Result<MasteryLevel, _> = serde_json::from_str(r#""expert""#);
        assert!(result.is_err());
    }

    #[test]
    fn partial_updates_omit_unset_fields() {
        let update = MistakeUpdate {
            mastery_level: Some(MasteryLevel::Medium),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "mastery_level": "medium" }));

        let empty = serde_json::to_value(LevelProgressUpdate::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }

    #[test]
    fn landform_type_uses_type_key() {
        let landform: ArLandform = serde_json::from_str(
            r#"{"id":"l1","name":"Grand Canyon","type":"valley","elevation":2400,"created_at":"2024-01-01T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(landform.landform_type, LandformType::Valley);
        assert_eq!(landform.elevation, Some(2400));
        assert!(landform.description.is_none());
    }

    #[test]
    fn level_progress_accepts_null_id() {
        let progress: UserLevelProgress = serde_json::from_str(
            r#"{"id":null,"user_id":"u1","level_id":"lv2","status":"locked","score":0,"stars":0,
                "completion_percentage":0,"completed_at":null,"level_name":"Rivers","level_order":2}"#,
        )
        .unwrap();
        assert!(progress.id.is_none());
        assert_eq!(progress.status, LevelStatus::Locked);
        assert_eq!(progress.level_order, Some(2));
    }

    #[test]
    fn status_forward_check() {
        assert!(LevelStatus::Completed.is_forward_of(LevelStatus::Active));
        assert!(LevelStatus::Active.is_forward_of(LevelStatus::Active));
        assert!(!LevelStatus::Locked.is_forward_of(LevelStatus::Completed));
    }

    #[test]
    fn feature_stats_are_open_map() {
        let feature: GeographicFeature = serde_json::from_str(
            r#"{"id":"f1","name":"Everest","stats":{"height_m":8849,"first_ascent":"1953"},"created_at":"2024-01-01"}"#,
        )
        .unwrap();
        let stats = feature.stats.unwrap();
        assert_eq!(stats["height_m"], 8849);
        assert_eq!(stats["first_ascent"], "1953");
    }
}
