use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};
use crate::services::paging::{clamp_page, clamp_page_size, paginate};
use crate::utils::slug::slugify;
use crate::utils::time;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Clone)]
pub struct JobService {
    pool: SqlitePool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
}

impl JobService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Filtered, rank-ordered page of jobs. The board is small by design, so
    /// filtering happens over the full rank-sorted table; tag search is a
    /// substring match against every tag, which SQL over the JSON column
    /// cannot express without changing semantics.
    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let jobs = sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY sort_order ASC")
            .fetch_all(&self.pool)
            .await?;

        let page = clamp_page(query.page);
        let page_size = clamp_page_size(query.page_size, 10);
        let (items, total) = paginate(filter_jobs(jobs, &query), page, page_size);
        Ok(JobList { items, total })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let slug = match payload.slug.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => slugify(&payload.title),
        };
        if slug.is_empty() {
            return Err(Error::BadRequest(
                "A slug could not be derived from the title.".to_string(),
            ));
        }
        self.ensure_slug_free(&slug, None).await?;

        let sort_order = match payload.order {
            Some(order) => order,
            None => self.next_sort_order().await?,
        };

        let job = Job {
            id: Uuid::new_v4(),
            title: payload.title,
            slug,
            status: payload.status.unwrap_or(JobStatus::Active),
            tags: Json(payload.tags),
            department: payload.department,
            location: payload.location,
            sort_order,
            created_at: time::now(),
            updated_at: None,
        };

        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, slug, status, tags, department, location, sort_order, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.slug)
        .bind(job.status)
        .bind(&job.tags)
        .bind(&job.department)
        .bind(&job.location)
        .bind(job.sort_order)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let current = self.get_by_id(id).await?;

        let slug = payload
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        if let Some(ref slug) = slug {
            if *slug != current.slug {
                self.ensure_slug_free(slug, Some(id)).await?;
            }
        }

        sqlx::query(
            r#"
            UPDATE jobs SET
                title = COALESCE(?, title),
                slug = COALESCE(?, slug),
                status = COALESCE(?, status),
                tags = COALESCE(?, tags),
                department = COALESCE(?, department),
                location = COALESCE(?, location),
                sort_order = COALESCE(?, sort_order),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&payload.title)
        .bind(slug)
        .bind(payload.status)
        .bind(payload.tags.map(Json))
        .bind(&payload.department)
        .bind(&payload.location)
        .bind(payload.order)
        .bind(time::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Applies a full display permutation: position index becomes the rank.
    /// Runs in one transaction; an unknown id aborts the whole permutation so
    /// a failed reorder never leaves a partially rewritten sequence.
    pub async fn reorder(&self, ids: &[Uuid]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for (index, id) in ids.iter().enumerate() {
            let result = sqlx::query("UPDATE jobs SET sort_order = ?, updated_at = ? WHERE id = ?")
                .bind(index as i64)
                .bind(time::now())
                .bind(id)
                .execute(&mut *tx)
                .await?;
            if result.rows_affected() == 0 {
                return Err(Error::NotFound(format!("Job {} not found", id)));
            }
        }
        tx.commit().await?;
        Ok(())
    }

    async fn ensure_slug_free(&self, slug: &str, exclude: Option<Uuid>) -> Result<()> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM jobs WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?;
        match existing {
            Some(id) if Some(id) != exclude => {
                Err(Error::BadRequest("Slug is already taken.".to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn next_sort_order(&self) -> Result<i64> {
        let max = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(sort_order) FROM jobs")
            .fetch_one(&self.pool)
            .await?;
        Ok(max.map_or(0, |m| m + 1))
    }
}

fn filter_jobs(jobs: Vec<Job>, query: &JobListQuery) -> Vec<Job> {
    let search = query
        .search
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let status = query.status.as_deref().filter(|s| !s.is_empty());

    jobs.into_iter()
        .filter(|job| {
            let search_ok = search.is_empty()
                || job.title.to_lowercase().contains(&search)
                || job.tags.0.iter().any(|t| t.to_lowercase().contains(&search));
            let status_ok = status.map_or(true, |s| job.status.as_str() == s);
            search_ok && status_ok
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, status: JobStatus, tags: &[&str], sort_order: i64) -> Job {
        Job {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: slugify(title),
            status,
            tags: Json(tags.iter().map(|t| t.to_string()).collect()),
            department: None,
            location: None,
            sort_order,
            created_at: time::now(),
            updated_at: None,
        }
    }

    #[test]
    fn search_matches_title_or_any_tag_case_insensitively() {
        let jobs = vec![
            job("Backend Engineer", JobStatus::Active, &["devops"], 0),
            job("Designer", JobStatus::Active, &["design"], 1),
            job("DevOps Lead", JobStatus::Active, &[], 2),
        ];
        let query = JobListQuery {
            search: Some("DEVOPS".to_string()),
            ..Default::default()
        };
        let matched = filter_jobs(jobs, &query);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].title, "Backend Engineer");
        assert_eq!(matched[1].title, "DevOps Lead");
    }

    #[test]
    fn status_filter_is_exact() {
        let jobs = vec![
            job("A", JobStatus::Active, &[], 0),
            job("B", JobStatus::Archived, &[], 1),
        ];
        let query = JobListQuery {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        let matched = filter_jobs(jobs, &query);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "B");
    }

    #[test]
    fn empty_filter_strings_match_everything() {
        let jobs = vec![
            job("A", JobStatus::Active, &[], 0),
            job("B", JobStatus::Archived, &[], 1),
        ];
        let query = JobListQuery {
            search: Some(String::new()),
            status: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(filter_jobs(jobs, &query).len(), 2);
    }
}
