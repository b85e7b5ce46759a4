use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use hr_agency_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, utils, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_cron_scheduler::{Job, JobScheduler};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    // Interview reminder sweep: one pass per cron firing, never self-looping.
    let scheduler = JobScheduler::new()
        .await
        .map_err(|e| anyhow::anyhow!("failed to create scheduler: {e:?}"))?;
    {
        let job_state = app_state.clone();
        let job = Job::new_async(config.reminder_cron.as_str(), move |_id, _scheduler| {
            let state = job_state.clone();
            Box::pin(async move {
                match state
                    .interview_service
                    .sweep_reminders(&state.notification_service, utils::time::now())
                    .await
                {
                    Ok(outcome) => info!(
                        selected = outcome.selected,
                        sent = outcome.notified.len(),
                        failed = outcome.failures.len(),
                        "interview reminder sweep finished"
                    ),
                    Err(e) => error!(error = ?e, "interview reminder sweep failed"),
                }
            })
        })
        .map_err(|e| anyhow::anyhow!("invalid reminder cron expression: {e:?}"))?;
        scheduler
            .add(job)
            .await
            .map_err(|e| anyhow::anyhow!("failed to register reminder job: {e:?}"))?;
        scheduler
            .start()
            .await
            .map_err(|e| anyhow::anyhow!("failed to start scheduler: {e:?}"))?;
    }

    let api = Router::new()
        .route(
            "/api/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/api/users/:username",
            axum::routing::patch(routes::users::update_user).delete(routes::users::delete_user),
        )
        .route("/api/admin/stats", get(routes::users::admin_stats))
        .route(
            "/api/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/export",
            get(routes::candidate_routes::export_candidates),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate)
                .patch(routes::candidate_routes::update_candidate)
                .delete(routes::candidate_routes::delete_candidate),
        )
        .route(
            "/api/candidates/:id/applications",
            get(routes::candidate_routes::list_candidate_applications)
                .post(routes::candidate_routes::attach_candidate),
        )
        .route(
            "/api/applications/:id/status",
            axum::routing::patch(routes::candidate_routes::update_application_status),
        )
        .route(
            "/api/vacancies",
            get(routes::vacancy::list_vacancies).post(routes::vacancy::create_vacancy),
        )
        .route(
            "/api/vacancies/:id",
            get(routes::vacancy::get_vacancy)
                .patch(routes::vacancy::update_vacancy)
                .delete(routes::vacancy::delete_vacancy),
        )
        .route(
            "/api/vacancies/:id/status",
            post(routes::vacancy::change_vacancy_status),
        )
        .route(
            "/api/interviews",
            get(routes::interview::list_interviews).post(routes::interview::schedule_interview),
        )
        .route(
            "/api/interviews/reminders/sweep",
            post(routes::interview::sweep_reminders),
        )
        .route("/api/interviews/:id", get(routes::interview::get_interview))
        .route(
            "/api/interviews/:id/status",
            axum::routing::patch(routes::interview::update_interview_status),
        )
        .route(
            "/api/personnel-forms",
            get(routes::personnel::list_forms).post(routes::personnel::create_form),
        )
        .route(
            "/api/personnel-forms/:id",
            get(routes::personnel::get_form),
        )
        .route(
            "/api/personnel-forms/:id/approve",
            post(routes::personnel::approve_form),
        )
        .layer(axum::middleware::from_fn(
            hr_agency_backend::middleware::auth::require_bearer_auth,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
