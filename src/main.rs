use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use notes_api::bootstrap::app_context::{AppContext, AppServices};
use notes_api::bootstrap::config::Config;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        notes_api::presentation::http::auth::register,
        notes_api::presentation::http::auth::login,
        notes_api::presentation::http::notes::create_note,
        notes_api::presentation::http::notes::list_notes,
        notes_api::presentation::http::notes::get_note,
        notes_api::presentation::http::notes::update_note,
        notes_api::presentation::http::notes::delete_note,
        notes_api::presentation::http::notes::toggle_completed,
        notes_api::presentation::http::notes::bulk_complete,
        notes_api::presentation::http::notes::bulk_delete,
        notes_api::presentation::http::health::health,
    ),
    components(schemas(
        notes_api::presentation::http::auth::RegisterRequest,
        notes_api::presentation::http::auth::LoginRequest,
        notes_api::presentation::http::auth::TokenResponse,
        notes_api::presentation::http::notes::NoteResponse,
        notes_api::presentation::http::notes::NotePageResponse,
        notes_api::presentation::http::notes::CreateNoteRequest,
        notes_api::presentation::http::notes::UpdateNoteRequest,
        notes_api::presentation::http::notes::UpdateNoteData,
        notes_api::presentation::http::notes::ToggleNoteRequest,
        notes_api::presentation::http::notes::PaginationAndSorting,
        notes_api::presentation::http::notes::BulkNoteRequest,
        notes_api::presentation::http::error::ErrorBody,
        notes_api::presentation::http::health::HealthResp,
    )),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Notes", description = "Per-user notes"),
        (name = "Health", description = "System health checks")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "notes_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(port = cfg.api_port, "Starting notes backend");

    // Database
    let pool =
        notes_api::infrastructure::db::connect_pool(&cfg.database_url, cfg.statement_timeout_ms)
            .await?;
    notes_api::infrastructure::db::migrate(&pool).await?;

    let user_repo = Arc::new(
        notes_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
            pool.clone(),
        ),
    );
    let note_repo = Arc::new(
        notes_api::infrastructure::db::repositories::note_repository_sqlx::SqlxNoteRepository::new(
            pool.clone(),
        ),
    );
    let services = AppServices::new(user_repo, note_repo);
    let ctx = AppContext::new(cfg.clone(), services);

    // Build CORS
    let cors = match cfg
        .frontend_url
        .as_deref()
        .and_then(|origin| HeaderValue::from_str(origin).ok())
    {
        Some(origin) => CorsLayer::new().allow_origin(origin),
        None => CorsLayer::new().allow_origin(AllowOrigin::mirror_request()),
    }
    .allow_methods([
        http::Method::GET,
        http::Method::POST,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ])
    .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
    .allow_credentials(true);

    let app = Router::new()
        .nest(
            "/auth",
            notes_api::presentation::http::auth::routes(ctx.clone()),
        )
        .nest(
            "/notes",
            notes_api::presentation::http::notes::routes(ctx.clone()),
        )
        .merge(notes_api::presentation::http::health::routes(pool.clone()))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(DefaultBodyLimit::max(cfg.body_max_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
