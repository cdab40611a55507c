use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// A submitted answer set for one job's assessment: a free-form map of
/// question id to answer value, stored wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Option<Uuid>,
    pub responses: Json<Map<String, JsonValue>>,
    pub submitted_at: DateTime<Utc>,
}
