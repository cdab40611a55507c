use crate::dto::assessment_dto::SubmitResponsePayload;
use crate::error::{Error, Result};
use crate::models::assessment::{Assessment, Question, QuestionType, Section};
use crate::models::response::AssessmentResponse;
use crate::utils::time;
use serde_json::{Map, Value as JsonValue};
use sqlx::types::Json;
use sqlx::SqlitePool;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct AssessmentService {
    pool: SqlitePool,
}

impl AssessmentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_job(&self, job_id: Uuid) -> Result<Assessment> {
        sqlx::query_as::<_, Assessment>("SELECT * FROM assessments WHERE job_id = ?")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Assessment not found".to_string()))
    }

    /// Replace-all save: the stored tree is overwritten wholesale, sections
    /// and questions are never persisted incrementally.
    pub async fn save(&self, job_id: Uuid, sections: Vec<Section>) -> Result<Assessment> {
        self.ensure_job_exists(job_id).await?;

        let assessment = Assessment {
            job_id,
            sections: Json(sections),
            updated_at: Some(time::now()),
        };

        sqlx::query(
            r#"
            INSERT INTO assessments (job_id, sections, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (job_id) DO UPDATE SET
                sections = excluded.sections,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(assessment.job_id)
        .bind(&assessment.sections)
        .bind(assessment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(assessment)
    }

    /// Validates a submission against the stored tree and persists it
    /// wholesale. Any validation error blocks the whole submission.
    pub async fn submit(
        &self,
        job_id: Uuid,
        payload: SubmitResponsePayload,
    ) -> Result<AssessmentResponse> {
        let assessment = self.get_by_job(job_id).await?;

        let errors = validate_responses(&assessment.sections.0, &payload.responses);
        if !errors.is_empty() {
            return Err(Error::ResponseValidation(errors));
        }

        let response = AssessmentResponse {
            id: Uuid::new_v4(),
            job_id,
            candidate_id: payload.candidate_id,
            responses: Json(payload.responses),
            submitted_at: time::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO assessment_responses (id, job_id, candidate_id, responses, submitted_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(response.id)
        .bind(response.job_id)
        .bind(response.candidate_id)
        .bind(&response.responses)
        .bind(response.submitted_at)
        .execute(&self.pool)
        .await?;

        Ok(response)
    }

    async fn ensure_job_exists(&self, job_id: Uuid) -> Result<()> {
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM jobs WHERE id = ?")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }
}

/// Walks every question and collects the first failing message per question
/// id. An empty map means the submission is acceptable.
pub fn validate_responses(
    sections: &[Section],
    responses: &Map<String, JsonValue>,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for section in sections {
        for question in &section.questions {
            if let Some(message) = check_question(question, responses.get(&question.id)) {
                errors.insert(question.id.clone(), message);
            }
        }
    }
    errors
}

fn check_question(question: &Question, value: Option<&JsonValue>) -> Option<String> {
    // Null, empty string and empty array all count as unanswered; the number
    // zero does not.
    let answered = match value {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::String(s)) => !s.is_empty(),
        Some(JsonValue::Array(a)) => !a.is_empty(),
        Some(_) => true,
    };

    if question.required {
        if question.question_type == QuestionType::Multi {
            let any_selected = matches!(value, Some(JsonValue::Array(a)) if !a.is_empty());
            if !any_selected {
                return Some("Please select at least one option.".to_string());
            }
        } else if !answered {
            return Some("This field is required.".to_string());
        }
    }

    if question.question_type == QuestionType::Numeric && answered {
        let parsed = match value {
            Some(JsonValue::Number(n)) => n.as_f64(),
            Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let Some(number) = parsed else {
            return Some("Must be a number.".to_string());
        };
        if let Some(min) = question.min {
            if number < min {
                return Some(format!("Minimum value is {}.", min));
            }
        }
        if let Some(max) = question.max {
            if number > max {
                return Some(format!("Maximum value is {}.", max));
            }
        }
    }

    if matches!(
        question.question_type,
        QuestionType::ShortText | QuestionType::LongText
    ) {
        if let (Some(limit), Some(JsonValue::String(s))) = (question.max_length, value) {
            if s.chars().count() > limit {
                return Some(format!("Maximum length is {} characters.", limit));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(id: &str, question_type: QuestionType) -> Question {
        Question {
            id: id.to_string(),
            question_type,
            question: format!("{} question", id),
            options: None,
            required: false,
            min: None,
            max: None,
            max_length: None,
        }
    }

    fn section(questions: Vec<Question>) -> Section {
        Section {
            id: "sec-0".to_string(),
            title: "Section 1".to_string(),
            questions,
        }
    }

    fn answers(pairs: &[(&str, JsonValue)]) -> Map<String, JsonValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn required_short_text_must_be_present_and_non_empty() {
        let mut q = question("q1", QuestionType::ShortText);
        q.required = true;
        let sections = vec![section(vec![q])];

        let errors = validate_responses(&sections, &answers(&[]));
        assert_eq!(errors["q1"], "This field is required.");

        let errors = validate_responses(&sections, &answers(&[("q1", json!(""))]));
        assert_eq!(errors["q1"], "This field is required.");

        let errors = validate_responses(&sections, &answers(&[("q1", json!("hi"))]));
        assert!(errors.is_empty());
    }

    #[test]
    fn required_multi_needs_at_least_one_selection() {
        let mut q = question("q1", QuestionType::Multi);
        q.required = true;
        q.options = Some(vec!["a".into(), "b".into()]);
        let sections = vec![section(vec![q])];

        let errors = validate_responses(&sections, &answers(&[("q1", json!([]))]));
        assert_eq!(errors["q1"], "Please select at least one option.");

        let errors = validate_responses(&sections, &answers(&[("q1", json!(["a"]))]));
        assert!(errors.is_empty());
    }

    #[test]
    fn numeric_bounds_produce_min_and_max_messages() {
        let mut q = question("q1", QuestionType::Numeric);
        q.required = true;
        q.min = Some(1.0);
        q.max = Some(5.0);
        let sections = vec![section(vec![q])];

        let errors = validate_responses(&sections, &answers(&[("q1", json!(6))]));
        assert_eq!(errors["q1"], "Maximum value is 5.");

        let errors = validate_responses(&sections, &answers(&[("q1", json!(0))]));
        assert_eq!(errors["q1"], "Minimum value is 1.");

        let errors = validate_responses(&sections, &answers(&[("q1", json!(3))]));
        assert!(errors.is_empty());
    }

    #[test]
    fn numeric_accepts_string_digits_and_rejects_garbage() {
        let q = question("q1", QuestionType::Numeric);
        let sections = vec![section(vec![q])];

        let errors = validate_responses(&sections, &answers(&[("q1", json!("4"))]));
        assert!(errors.is_empty());

        let errors = validate_responses(&sections, &answers(&[("q1", json!("four"))]));
        assert_eq!(errors["q1"], "Must be a number.");
    }

    #[test]
    fn zero_counts_as_an_answer() {
        let mut q = question("q1", QuestionType::Numeric);
        q.required = true;
        let sections = vec![section(vec![q])];

        let errors = validate_responses(&sections, &answers(&[("q1", json!(0))]));
        assert!(errors.is_empty());
    }

    #[test]
    fn text_length_limit_is_enforced() {
        let mut q = question("q1", QuestionType::LongText);
        q.max_length = Some(5);
        let sections = vec![section(vec![q])];

        let errors = validate_responses(&sections, &answers(&[("q1", json!("too long"))]));
        assert_eq!(errors["q1"], "Maximum length is 5 characters.");

        let errors = validate_responses(&sections, &answers(&[("q1", json!("fine"))]));
        assert!(errors.is_empty());
    }

    #[test]
    fn optional_unanswered_questions_pass() {
        let sections = vec![section(vec![
            question("q1", QuestionType::Numeric),
            question("q2", QuestionType::Single),
        ])];
        assert!(validate_responses(&sections, &answers(&[])).is_empty());
    }
}
