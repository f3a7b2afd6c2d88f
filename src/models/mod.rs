use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A routine reminder owned by a user, optionally linked to a catalog product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reminder {
    pub id: i64,
    pub user_id: i64,
    pub product_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    /// Free-text grouping such as "morning_routine" or "evening_routine"
    pub reminder_type: Option<String>,
    /// Time of day the reminder should fire; legacy rows may have none
    pub reminder_time: Option<NaiveTime>,
    /// daily | weekly | monthly (free text, case-insensitive)
    pub frequency: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// How often a reminder repeats
///
/// Parsed leniently from the free-text frequency tag stored on the reminder:
/// unrecognized or missing tags behave as daily.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn parse(tag: Option<&str>) -> Self {
        match tag.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("weekly") => Frequency::Weekly,
            Some("monthly") => Frequency::Monthly,
            _ => Frequency::Daily,
        }
    }
}

/// A computed future firing of a reminder
///
/// Built fresh on every upcoming-reminders query and never persisted. The
/// timestamp uses the same clock as the `now` the calculation ran with and
/// always lands inside the requested look-ahead window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduledOccurrence {
    pub id: i64,
    pub user_id: i64,
    pub product_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub reminder_type: Option<String>,
    pub frequency: Option<String>,
    pub next_occurrence: NaiveDateTime,
}

/// A catalog product as supplied by the persistence layer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

/// A product shaped for a recommendation response
///
/// Score is deterministic for identical inputs and stays within [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredRecommendation {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    pub category: String,
    pub price: Option<f64>,
    pub score: f64,
    pub reasons: Vec<String>,
    pub image_url: Option<String>,
}

/// User- or request-supplied constraints narrowing the product candidate set
///
/// Absent fields mean "no constraint"; there is no way to make these fail.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive substrings matched against the brand name
    #[serde(default)]
    pub preferred_brands: Vec<String>,
    pub max_price: Option<f64>,
    /// Applied as a post-filter after shaping (null prices always pass)
    pub min_price: Option<f64>,
    /// Exact, case-sensitive category match
    pub category: Option<String>,
}
