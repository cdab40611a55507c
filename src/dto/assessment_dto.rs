use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;
use validator::Validate;

use crate::models::assessment::Section;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveAssessmentPayload {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponsePayload {
    pub candidate_id: Option<Uuid>,
    #[serde(default)]
    pub responses: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseResult {
    pub id: Uuid,
}
