use crate::dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, Stage, TimelineItem};
use crate::services::paging::{clamp_page, clamp_page_size, paginate};
use crate::utils::time;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct CandidateService {
    pool: SqlitePool,
}

pub struct CandidateList {
    pub items: Vec<Candidate>,
    pub total: i64,
}

impl CandidateService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: CandidateListQuery) -> Result<CandidateList> {
        let candidates =
            sqlx::query_as::<_, Candidate>("SELECT * FROM candidates ORDER BY created_at ASC, id ASC")
                .fetch_all(&self.pool)
                .await?;

        let page = clamp_page(query.page);
        let page_size = clamp_page_size(query.page_size, 50);
        let (items, total) = paginate(filter_candidates(candidates, &query), page, page_size);
        Ok(CandidateList { items, total })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Candidate> {
        sqlx::query_as::<_, Candidate>("SELECT * FROM candidates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let exists = sqlx::query_scalar::<_, Uuid>("SELECT id FROM candidates WHERE email = ?")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(Error::BadRequest(
                "A candidate with this email address already exists.".to_string(),
            ));
        }
        if let Some(job_id) = payload.job_id {
            self.ensure_job_exists(job_id).await?;
        }

        let candidate = Candidate {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            job_id: payload.job_id,
            stage: payload.stage.unwrap_or(Stage::Applied),
            notes: Json(Vec::new()),
            created_at: time::now(),
            updated_at: None,
        };

        sqlx::query(
            r#"
            INSERT INTO candidates (id, name, email, job_id, stage, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(candidate.id)
        .bind(&candidate.name)
        .bind(&candidate.email)
        .bind(candidate.job_id)
        .bind(candidate.stage)
        .bind(&candidate.notes)
        .bind(candidate.created_at)
        .bind(candidate.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(candidate)
    }

    /// Partial update. Stage reassignment goes through here; there is no
    /// transition table, any stage may be assigned from any stage.
    pub async fn update(&self, id: Uuid, payload: UpdateCandidatePayload) -> Result<Candidate> {
        let current = self.get_by_id(id).await?;

        if let Some(ref email) = payload.email {
            if *email != current.email {
                let taken =
                    sqlx::query_scalar::<_, Uuid>("SELECT id FROM candidates WHERE email = ?")
                        .bind(email)
                        .fetch_optional(&self.pool)
                        .await?;
                if taken.is_some() {
                    return Err(Error::BadRequest(
                        "A candidate with this email address already exists.".to_string(),
                    ));
                }
            }
        }
        if let Some(job_id) = payload.job_id {
            self.ensure_job_exists(job_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE candidates SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                job_id = COALESCE(?, job_id),
                stage = COALESCE(?, stage),
                notes = COALESCE(?, notes),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(payload.job_id)
        .bind(payload.stage)
        .bind(payload.notes.map(Json))
        .bind(time::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Synthesized on read, never stored: creation plus the current stage,
    /// exactly two entries.
    pub async fn timeline(&self, id: Uuid) -> Result<Vec<TimelineItem>> {
        let candidate = self.get_by_id(id).await?;
        Ok(vec![
            TimelineItem {
                stage: Stage::Applied,
                date: candidate.created_at,
            },
            TimelineItem {
                stage: candidate.stage,
                date: candidate.updated_at.unwrap_or_else(time::now),
            },
        ])
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

fn filter_candidates(candidates: Vec<Candidate>, query: &CandidateListQuery) -> Vec<Candidate> {
    let search = query
        .search
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let stage = query.stage.as_deref().filter(|s| !s.is_empty());

    candidates
        .into_iter()
        .filter(|candidate| {
            let search_ok = search.is_empty()
                || candidate.name.to_lowercase().contains(&search)
                || candidate.email.to_lowercase().contains(&search);
            let stage_ok = stage.map_or(true, |s| candidate.stage.as_str() == s);
            let job_ok = query.job_id.map_or(true, |id| candidate.job_id == Some(id));
            search_ok && stage_ok && job_ok
        })
        .collect()
}
