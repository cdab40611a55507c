use crate::error::Result;
use crate::models::assessment::{Question, QuestionType, Section};
use crate::models::candidate::{Candidate, Stage};
use crate::models::job::{Job, JobStatus};
use crate::utils::slug::slugify;
use crate::utils::time;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

const JOB_COUNT: usize = 25;
const CANDIDATE_COUNT: usize = 1000;
const ASSESSMENT_COUNT: usize = 3;

const TAGS: &[&str] = &["frontend", "backend", "devops", "product", "design", "QA"];

const TITLE_ADJECTIVES: &[&str] = &["Senior", "Lead", "Staff", "Junior", "Principal", "Remote"];

const TITLE_ROLES: &[&str] = &[
    "Backend Engineer",
    "Frontend Engineer",
    "Product Designer",
    "QA Analyst",
    "DevOps Engineer",
    "Data Engineer",
    "Engineering Manager",
    "Product Manager",
];

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Grace", "Edsger", "Barbara", "Donald", "Margaret", "Dennis", "Radia", "Ken",
    "Frances", "John", "Kathleen", "Niklaus", "Adele", "Tony",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Hopper", "Dijkstra", "Liskov", "Knuth", "Hamilton", "Ritchie",
    "Perlman", "Thompson", "Allen", "Backus", "Booth", "Wirth", "Goldberg", "Hoare",
];

/// Populates an empty database with demo data: 25 jobs, 1000 candidates and
/// assessments for 3 jobs. A non-empty jobs table short-circuits, so restarts
/// never duplicate.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<()> {
    let jobs_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs")
        .fetch_one(pool)
        .await?;
    if jobs_count > 0 {
        return Ok(());
    }

    info!("Empty database, seeding demo data");

    let jobs = generate_jobs();
    let candidates = generate_candidates(&jobs);
    let assessments = generate_assessments(&jobs);

    let mut tx = pool.begin().await?;

    for job in &jobs {
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
        .execute(&mut *tx)
        .await?;
    }

    for candidate in &candidates {
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
        .execute(&mut *tx)
        .await?;
    }

    for (job_id, sections) in &assessments {
        sqlx::query("INSERT INTO assessments (job_id, sections, updated_at) VALUES (?, ?, ?)")
            .bind(job_id)
            .bind(Json(sections))
            .bind(time::now())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    info!(
        jobs = jobs.len(),
        candidates = candidates.len(),
        assessments = assessments.len(),
        "Seed complete"
    );
    Ok(())
}

fn generate_jobs() -> Vec<Job> {
    let mut rng = rand::thread_rng();
    (0..JOB_COUNT)
        .map(|i| {
            let adjective = TITLE_ADJECTIVES.choose(&mut rng).unwrap();
            let role = TITLE_ROLES.choose(&mut rng).unwrap();
            let title = format!("{} {} {}", adjective, role, i + 1);
            let tag_count = rng.gen_range(1..=3);
            let tags: Vec<String> = TAGS
                .choose_multiple(&mut rng, tag_count)
                .map(|t| t.to_string())
                .collect();
            let status = if rng.gen::<f64>() < 0.8 {
                JobStatus::Active
            } else {
                JobStatus::Archived
            };
            Job {
                id: Uuid::new_v4(),
                slug: slugify(&title),
                title,
                status,
                tags: Json(tags),
                department: None,
                location: None,
                sort_order: i as i64,
                created_at: time::now(),
                updated_at: None,
            }
        })
        .collect()
}

fn generate_candidates(jobs: &[Job]) -> Vec<Candidate> {
    let mut rng = rand::thread_rng();
    (0..CANDIDATE_COUNT)
        .map(|i| {
            let first = FIRST_NAMES.choose(&mut rng).unwrap();
            let last = LAST_NAMES.choose(&mut rng).unwrap();
            let job_id = if rng.gen::<f64>() < 0.9 {
                jobs.choose(&mut rng).map(|job| job.id)
            } else {
                None
            };
            Candidate {
                id: Uuid::new_v4(),
                name: format!("{} {}", first, last),
                email: format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    i
                ),
                job_id,
                stage: *Stage::ALL.choose(&mut rng).unwrap(),
                notes: Json(Vec::new()),
                created_at: time::now(),
                updated_at: None,
            }
        })
        .collect()
}

fn generate_assessments(jobs: &[Job]) -> Vec<(Uuid, Vec<Section>)> {
    let mut rng = rand::thread_rng();
    jobs.choose_multiple(&mut rng, ASSESSMENT_COUNT)
        .map(|job| {
            let sections = (0..3)
                .map(|s| Section {
                    id: format!("sec-{}", s),
                    title: format!("Section {}", s + 1),
                    questions: (0..4).map(|q| generate_question(&mut rng, s, q)).collect(),
                })
                .collect();
            (job.id, sections)
        })
        .collect()
}

fn generate_question(rng: &mut impl Rng, section: usize, index: usize) -> Question {
    let question_type = *[
        QuestionType::Single,
        QuestionType::Multi,
        QuestionType::ShortText,
        QuestionType::LongText,
        QuestionType::Numeric,
    ]
    .choose(rng)
    .unwrap();

    let options = match question_type {
        QuestionType::Single | QuestionType::Multi => Some(
            ["Option A", "Option B", "Option C", "Option D"]
                .iter()
                .map(|o| o.to_string())
                .collect(),
        ),
        _ => None,
    };
    let (min, max) = match question_type {
        QuestionType::Numeric => (Some(1.0), Some(5.0)),
        _ => (None, None),
    };
    let max_length = match question_type {
        QuestionType::LongText => Some(500),
        _ => None,
    };

    Question {
        id: format!("q-{}-{}", section, index),
        question_type,
        question: format!("Q{}.{} sample question", section + 1, index + 1),
        options,
        required: rng.gen::<f64>() < 0.6,
        min,
        max,
        max_length,
    }
}
