use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::models::{Product, Reminder, ScoredRecommendation};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

/// Inner state that can be modified
///
/// Stands in for the persistence layer: reminders keyed by id, products kept
/// in catalog order (the recommendation fallback slices the front of the
/// list), and a history of generated recommendation sets.
pub struct AppStateInner {
    pub reminders: HashMap<i64, Reminder>,
    pub products: Vec<Product>,
    pub saved_recommendations: Vec<SavedRecommendationSet>,
    /// Default look-ahead window for upcoming-reminder queries
    pub reminder_window_days: i64,
    next_reminder_id: i64,
    next_product_id: i64,
}

/// Snapshot of a generated recommendation list, kept for history
#[derive(Debug, Clone, Serialize)]
pub struct SavedRecommendationSet {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub items: Vec<ScoredRecommendation>,
    pub created_at: DateTime<Utc>,
}

impl AppState {
    /// Creates a new empty application state
    pub fn new(reminder_window_days: i64) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                reminders: HashMap::new(),
                products: Vec::new(),
                saved_recommendations: Vec::new(),
                reminder_window_days,
                next_reminder_id: 0,
                next_product_id: 0,
            })),
        }
    }
}

impl AppStateInner {
    /// Allocates the next reminder id
    pub fn allocate_reminder_id(&mut self) -> i64 {
        self.next_reminder_id += 1;
        self.next_reminder_id
    }

    /// Allocates the next product id
    pub fn allocate_product_id(&mut self) -> i64 {
        self.next_product_id += 1;
        self.next_product_id
    }

    /// Persists a generated recommendation set and returns its id
    pub fn save_recommendations(
        &mut self,
        user_id: i64,
        title: &str,
        items: Vec<ScoredRecommendation>,
    ) -> i64 {
        let id = self.saved_recommendations.len() as i64 + 1;
        self.saved_recommendations.push(SavedRecommendationSet {
            id,
            user_id,
            title: title.to_string(),
            items,
            created_at: Utc::now(),
        });
        id
    }
}
