mod config;
mod error;
mod state;
mod telemetry;
pub mod routes {
    pub mod explain;
    pub mod health;
    pub mod jobs;
    pub mod solve;
    pub mod validate;
}

use axum::{
    routing::{get, post},
    Router,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            routes::health::health,
            routes::solve::solve,
            routes::jobs::status,
            routes::jobs::result,
            routes::validate::validate_handler,
            routes::explain::explain,
        ),
        components(schemas(
            types::RosterSpec, types::TeacherSpec, types::GridShape, types::EvolutionParams,
            types::SolveEnvelope, types::SolveResult, types::SolveStatus, types::TimetableRow,
            types::Clash, types::ClashKind,
            types::TeacherName, types::SubjectName, types::VenueName,
            jobs::JobId, jobs::JobStatus,
            routes::validate::ValidationReport,
            routes::solve::JobCreated,
            routes::explain::ExplainIn,
            routes::explain::ExplainOut,
        )),
        tags(
            (name = "timetable", description = "Evolutionary timetable API")
        )
    )]
struct ApiDoc;

fn app(state: state::AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/v1/health", get(routes::health::health))
        .route("/v1/solve", post(routes::solve::solve))
        .route("/v1/validate", post(routes::validate::validate_handler))
        .route("/v1/explain", post(routes::explain::explain))
        .route("/v1/jobs/:id", get(routes::jobs::status))
        .route("/v1/jobs/:id/result", get(routes::jobs::result))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(telemetry::stack(body_limit))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let cfg = config::ServerConfig::from_env()?;
    let app = app(state::AppState::new_default(), cfg.body_limit);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!(%addr, body_limit = cfg.body_limit, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;
    Ok(())
}
