//! In-memory tables behind the mock service.
//!
//! Each table is a `Vec` in insertion order; handlers apply the service's
//! own ordering (levels by `order_index`, mistakes newest first, ...) when
//! they answer.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use serde_json::json;

use crate::model::{ArLandform, DailyTrivia, GeoFeature, Level, LevelProgress, Mistake, User};

pub const DEMO_USER_ID: &str = "a0eebc99-9c0b-4ef8-bb6d-6bb9bd380a11";

/// Current time in the timestamp format the service emits.
pub fn now() -> String {
    Utc::now().to_rfc3339()
}

pub fn today() -> String {
    Utc::now().date_naive().to_string()
}

#[derive(Clone, Debug, Default)]
pub struct Store {
    pub users: Vec<User>,
    pub trivia: Vec<DailyTrivia>,
    pub levels: Vec<Level>,
    pub progress: Vec<LevelProgress>,
    pub mistakes: Vec<Mistake>,
    pub features: Vec<GeoFeature>,
    pub landforms: Vec<ArLandform>,
}

impl Store {
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Levels sorted by `order_index`.
    pub fn ordered_levels(&self) -> Vec<&Level> {
        let mut levels: Vec<&Level> = self.levels.iter().collect();
        levels.sort_by_key(|l| l.order_index);
        levels
    }

    pub fn progress_for(&self, user_id: &str, level_id: &str) -> Option<&LevelProgress> {
        self.progress
            .iter()
            .find(|p| p.user_id == user_id && p.level_id == level_id)
    }

    /// Recompute a user's star total from their level records.
    pub fn refresh_total_stars(&mut self, user_id: &str) {
        let total = self
            .progress
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.stars)
            .sum();
        if let Some(user) = self.user_mut(user_id) {
            user.total_stars = total;
        }
    }

    /// Demo content: one user, four levels, trivia, mistakes, features and
    /// landforms. Ids are fixed so tests can address them.
    pub fn seeded() -> Self {
        let base = Utc::now() - Duration::days(30);
        let at = |days: i64| (base + Duration::days(days)).to_rfc3339();

        let users = vec![User {
            id: DEMO_USER_ID.to_string(),
            name: "Alex".to_string(),
            avatar_url: None,
            level: "beginner".to_string(),
            total_stars: 5,
            created_at: at(0),
        }];

        let levels = [
            ("level-1", "Continents and Oceans", 1, 0),
            ("level-2", "Rivers of the World", 2, 3),
            ("level-3", "Mountain Ranges", 3, 6),
            ("level-4", "Climate Zones", 4, 9),
        ]
        .into_iter()
        .map(|(id, name, order_index, unlock_requirement)| Level {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            order_index,
            unlock_requirement,
            created_at: at(0),
        })
        .collect();

        let progress = vec![
            LevelProgress {
                id: Some("progress-1".to_string()),
                user_id: DEMO_USER_ID.to_string(),
                level_id: "level-1".to_string(),
                status: "completed".to_string(),
                score: 90,
                stars: 3,
                completion_percentage: 100,
                completed_at: Some(at(2)),
                level_name: None,
                level_order: None,
            },
            LevelProgress {
                id: Some("progress-2".to_string()),
                user_id: DEMO_USER_ID.to_string(),
                level_id: "level-2".to_string(),
                status: "active".to_string(),
                score: 40,
                stars: 2,
                completion_percentage: 45,
                completed_at: None,
                level_name: None,
                level_order: None,
            },
        ];

        let trivia = vec![
            DailyTrivia {
                id: "trivia-1".to_string(),
                title: "The Dead Sea is sinking".to_string(),
                description: Some("Its surface drops by about a metre each year.".to_string()),
                image_url: None,
                location: Some("Jordan Rift Valley".to_string()),
                region: Some("Middle East".to_string()),
                featured_date: None,
                created_at: at(1),
            },
            DailyTrivia {
                id: "trivia-2".to_string(),
                title: "Lake Baikal holds a fifth of Earth's fresh surface water".to_string(),
                description: None,
                image_url: None,
                location: Some("Siberia".to_string()),
                region: Some("Asia".to_string()),
                featured_date: Some(today()),
                created_at: at(2),
            },
        ];

        let mistake = |id: &str, title: &str, category: &str, mastery: &str, day: i64| Mistake {
            id: id.to_string(),
            user_id: DEMO_USER_ID.to_string(),
            title: title.to_string(),
            question: None,
            category: category.to_string(),
            mastery_level: mastery.to_string(),
            image_url: None,
            added_at: at(day),
        };
        let mistakes = vec![
            mistake("mistake-1", "Longest river in Africa", "physical", "low", 3),
            mistake("mistake-2", "Most populous city in Oceania", "human", "medium", 4),
            mistake("mistake-3", "Countries crossed by the Andes", "regional", "critical", 5),
            mistake("mistake-4", "Highest waterfall", "physical", "medium", 6),
        ];

        let feature = |id: &str, name: &str, kind: &str, region: &str, lat: f64, lon: f64| GeoFeature {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(format!("{name}, a {kind} in {region}.")),
            feature_type: Some(kind.to_string()),
            latitude: Some(lat),
            longitude: Some(lon),
            region: Some(region.to_string()),
            image_url: None,
            stats: None,
            created_at: at(0),
        };
        let mut features = vec![
            feature("feature-1", "Mount Everest", "mountain", "South Asia", 27.99, 86.93),
            feature("feature-2", "Amazon River", "river", "South America", -3.42, -60.0),
            feature("feature-3", "Sahara", "desert", "North Africa", 23.42, 25.66),
            feature("feature-4", "Mount Fuji", "volcano", "East Asia", 35.36, 138.73),
        ];
        features[0].stats = Some(HashMap::from([
            ("height_m".to_string(), json!(8849)),
            ("first_ascent".to_string(), json!("1953")),
        ]));

        let landform = |id: &str, name: &str, kind: &str, elevation: i32| ArLandform {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            landform_type: kind.to_string(),
            image_url: None,
            elevation: Some(elevation),
            created_at: at(0),
        };
        let landforms = vec![
            landform("landform-1", "Tarim Basin", "basin", 1000),
            landform("landform-2", "K2", "peak", 8611),
            landform("landform-3", "Yosemite Valley", "valley", 1200),
            landform("landform-4", "Cliffs of Moher", "cliff", 214),
        ];

        Self {
            users,
            trivia,
            levels,
            progress,
            mistakes,
            features,
            landforms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_total_stars_match_progress() {
        let mut store = Store::seeded();
        let before = store.user(DEMO_USER_ID).unwrap().total_stars;
        store.refresh_total_stars(DEMO_USER_ID);
        assert_eq!(store.user(DEMO_USER_ID).unwrap().total_stars, before);
    }

    #[test]
    fn ordered_levels_follow_order_index() {
        let mut store = Store::seeded();
        store.levels.reverse();
        let order: Vec<u32> = store.ordered_levels().iter().map(|l| l.order_index).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
    }
}
