use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{FilterCriteria, Product, Reminder, ScheduledOccurrence, ScoredRecommendation};
use crate::services::{recommender, schedule};

use super::state::SavedRecommendationSet;
use super::AppState;

/// How many products the trending baseline returns
const TRENDING_LIMIT: usize = 10;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub user_id: i64,
    pub product_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub reminder_type: Option<String>,
    pub reminder_time: Option<NaiveTime>,
    pub frequency: Option<String>,
    pub is_active: Option<bool>,
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Deserialize)]
pub struct UpdateReminderRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reminder_type: Option<String>,
    pub reminder_time: Option<NaiveTime>,
    pub frequency: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: usize,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct SkincarePreferences {
    #[serde(default)]
    pub preferred_brands: Vec<String>,
    pub budget_range: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct MakeupPreferences {
    // Accepted for API compatibility; scoring does not use them yet.
    pub skin_tone: Option<String>,
    pub occasion: Option<String>,
    pub style: Option<String>,
    pub budget_range: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct PersonalizedFilters {
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default)]
    pub brands: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<ScoredRecommendation>,
    pub saved_id: i64,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub trending_recommendations: Vec<ScoredRecommendation>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Create a new reminder
pub async fn create_reminder(
    State(state): State<AppState>,
    Json(request): Json<CreateReminderRequest>,
) -> (StatusCode, Json<Reminder>) {
    let mut inner = state.inner.write().await;
    let id = inner.allocate_reminder_id();
    let reminder = Reminder {
        id,
        user_id: request.user_id,
        product_id: request.product_id,
        title: request.title,
        description: request.description,
        reminder_type: request.reminder_type,
        reminder_time: request.reminder_time,
        frequency: request.frequency,
        is_active: request.is_active.unwrap_or(true),
        created_at: Utc::now(),
    };
    inner.reminders.insert(id, reminder.clone());

    (StatusCode::CREATED, Json(reminder))
}

/// List all reminders, newest first, with skip/limit paging
pub async fn list_reminders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Reminder>> {
    let inner = state.inner.read().await;
    let mut reminders: Vec<Reminder> = inner.reminders.values().cloned().collect();
    reminders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

    let page = reminders
        .into_iter()
        .skip(query.skip)
        .take(query.limit.unwrap_or(100))
        .collect();
    Json(page)
}

/// Get a user's reminders, newest first
pub async fn get_user_reminders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<Vec<Reminder>> {
    let inner = state.inner.read().await;
    let mut reminders: Vec<Reminder> = inner
        .reminders
        .values()
        .filter(|r| r.user_id == user_id)
        .cloned()
        .collect();
    reminders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Json(reminders)
}

/// Update a reminder; absent fields keep their current value
pub async fn update_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<i64>,
    Json(request): Json<UpdateReminderRequest>,
) -> AppResult<Json<Reminder>> {
    let mut inner = state.inner.write().await;
    let reminder = inner
        .reminders
        .get_mut(&reminder_id)
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    if let Some(title) = request.title {
        reminder.title = title;
    }
    if let Some(description) = request.description {
        reminder.description = Some(description);
    }
    if let Some(reminder_type) = request.reminder_type {
        reminder.reminder_type = Some(reminder_type);
    }
    if let Some(reminder_time) = request.reminder_time {
        reminder.reminder_time = Some(reminder_time);
    }
    if let Some(frequency) = request.frequency {
        reminder.frequency = Some(frequency);
    }
    if let Some(is_active) = request.is_active {
        reminder.is_active = is_active;
    }

    Ok(Json(reminder.clone()))
}

/// Delete a reminder
pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let mut inner = state.inner.write().await;
    inner
        .reminders
        .remove(&reminder_id)
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    Ok(Json(json!({ "detail": "Reminder deleted successfully" })))
}

/// Mark a reminder complete, deactivating it
pub async fn complete_reminder(
    State(state): State<AppState>,
    Path(reminder_id): Path<i64>,
) -> AppResult<Json<Reminder>> {
    let mut inner = state.inner.write().await;
    let reminder = inner
        .reminders
        .get_mut(&reminder_id)
        .ok_or_else(|| AppError::NotFound("Reminder not found".to_string()))?;

    reminder.is_active = false;
    Ok(Json(reminder.clone()))
}

/// Upcoming occurrences for a user's active reminders within a look-ahead window
pub async fn upcoming_reminders(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<UpcomingQuery>,
) -> Json<Vec<ScheduledOccurrence>> {
    let inner = state.inner.read().await;
    let days = query.days.unwrap_or(inner.reminder_window_days).max(0);
    let reminders: Vec<Reminder> = inner.reminders.values().cloned().collect();

    let now = Local::now().naive_local();
    Json(schedule::upcoming_occurrences(&reminders, user_id, now, days))
}

/// Add a product to the catalog
pub async fn create_product(
    State(state): State<AppState>,
    Json(request): Json<CreateProductRequest>,
) -> (StatusCode, Json<Product>) {
    let mut inner = state.inner.write().await;
    let id = inner.allocate_product_id();
    let product = Product {
        id,
        name: request.name,
        brand: request.brand,
        category: request.category,
        price: request.price,
        image_url: request.image_url,
    };
    inner.products.push(product.clone());

    (StatusCode::CREATED, Json(product))
}

/// List the catalog in order
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    let inner = state.inner.read().await;
    Json(inner.products.clone())
}

/// Get a single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> AppResult<Json<Product>> {
    let inner = state.inner.read().await;
    inner
        .products
        .iter()
        .find(|p| p.id == product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

/// Baseline recommendations (trending slice), persisted to history
pub async fn recommend_products(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<RecommendResponse>> {
    let mut inner = state.inner.write().await;
    let recommendations = recommender::popular_products(&inner.products, TRENDING_LIMIT);
    if recommendations.is_empty() {
        return Err(AppError::NotFound("No recommendations found".to_string()));
    }

    let saved_id = inner.save_recommendations(user_id, "products", recommendations.clone());
    Ok(Json(RecommendResponse {
        recommendations,
        saved_id,
    }))
}

/// Skincare recommendations from brand preferences and a budget ceiling
pub async fn recommend_skincare(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<SkincarePreferences>,
) -> Json<RecommendResponse> {
    let criteria = FilterCriteria {
        preferred_brands: request.preferred_brands,
        max_price: recommender::parse_budget(request.budget_range.as_deref()),
        min_price: None,
        category: Some("skincare".to_string()),
    };

    let mut inner = state.inner.write().await;
    let recommendations = recommender::score_and_filter(&inner.products, &criteria);
    let saved_id = inner.save_recommendations(user_id, "skincare", recommendations.clone());
    Json(RecommendResponse {
        recommendations,
        saved_id,
    })
}

/// Makeup recommendations constrained by budget
pub async fn recommend_makeup(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<MakeupPreferences>,
) -> Json<RecommendResponse> {
    let criteria = FilterCriteria {
        preferred_brands: Vec::new(),
        max_price: recommender::parse_budget(request.budget_range.as_deref()),
        min_price: None,
        category: Some("makeup".to_string()),
    };

    let mut inner = state.inner.write().await;
    let recommendations = recommender::score_and_filter(&inner.products, &criteria);
    let saved_id = inner.save_recommendations(user_id, "makeup", recommendations.clone());
    Json(RecommendResponse {
        recommendations,
        saved_id,
    })
}

/// Personalized recommendations from explicit filter criteria
pub async fn recommend_personalized(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(request): Json<PersonalizedFilters>,
) -> Json<RecommendResponse> {
    let criteria = FilterCriteria {
        preferred_brands: request.brands,
        max_price: request.max_price,
        min_price: request.min_price,
        category: request.category,
    };

    let mut inner = state.inner.write().await;
    let recommendations = recommender::score_and_filter(&inner.products, &criteria);
    let saved_id = inner.save_recommendations(user_id, "personalized", recommendations.clone());
    Json(RecommendResponse {
        recommendations,
        saved_id,
    })
}

/// Trending products for a user (not persisted)
pub async fn trending_recommendations(
    State(state): State<AppState>,
    Path(_user_id): Path<i64>,
) -> Json<TrendingResponse> {
    let inner = state.inner.read().await;
    Json(TrendingResponse {
        trending_recommendations: recommender::popular_products(&inner.products, TRENDING_LIMIT),
    })
}

/// A user's saved recommendation history, newest first
pub async fn recommendation_history(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<Vec<SavedRecommendationSet>> {
    let inner = state.inner.read().await;
    let mut sets: Vec<SavedRecommendationSet> = inner
        .saved_recommendations
        .iter()
        .filter(|s| s.user_id == user_id)
        .cloned()
        .collect();
    sets.sort_by(|a, b| b.id.cmp(&a.id));
    Json(sets)
}
