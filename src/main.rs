use axum::{
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use talentflow_backend::{
    config::{get_config, init_config},
    database::{pool::create_pool, seed},
    middleware::{chaos, cors},
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talentflow_backend=info,tower_http=info".into()),
        )
        .init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    if config.seed_on_startup {
        seed::seed_if_empty(&pool).await?;
    }

    let app_state = AppState::new(pool);

    let api = Router::new()
        .route(
            "/jobs",
            get(routes::job_routes::list_jobs).post(routes::job_routes::create_job),
        )
        .route("/jobs/reorder", patch(routes::job_routes::reorder_jobs))
        .route(
            "/jobs/:id",
            get(routes::job_routes::get_job).patch(routes::job_routes::update_job),
        )
        .route(
            "/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .patch(routes::candidate_routes::update_candidate),
        )
        .route(
            "/candidates/:id/timeline",
            get(routes::candidate_routes::get_timeline),
        )
        .route(
            "/assessments/:job_id",
            get(routes::assessment_routes::get_assessment)
                .post(routes::assessment_routes::save_assessment),
        )
        .route(
            "/assessments/:job_id/submit",
            post(routes::assessment_routes::submit_assessment),
        )
        .layer(axum::middleware::from_fn_with_state(
            chaos::new_chaos_state(config.write_failure_rate, config.write_latency_ms),
            chaos::chaos_middleware,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(api)
        .with_state(app_state)
        .layer(cors::permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
