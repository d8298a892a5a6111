use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One stored reading. Immutable after creation except for the display
/// name and the per-language translation cache.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReadingRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: Option<String>,
    pub birth_date: NaiveDate,
    /// 24-hour `HH:MM`, as validated at intake.
    pub birth_time: String,
    pub birth_place: String,
    pub foundational_overview: Option<String>,
    pub career_and_wealth: Option<String>,
    pub health_and_vitality: Option<String>,
    pub love_and_relationships: Option<String>,
    pub personality_and_inner_growth: Option<String>,
    pub life_path_and_timeline: Option<String>,
    pub guidance_and_remedies: Option<String>,
    /// Cache of translated sections keyed by target language.
    pub translations: Option<Value>,
    pub created_at: DateTime<Utc>,
}
