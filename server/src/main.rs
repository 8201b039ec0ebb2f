use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use handscript_shared::ANNOTATE_PATH;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

mod backend;
mod error;
mod handlers;
mod logic;
mod state;

use crate::backend::{VisionBackend, DEFAULT_ENDPOINT};
use crate::error::StartupError;
use crate::handlers::{annotate_handler, ping_handler};
use crate::state::{AppState, DEFAULT_MAX_IMAGE_BYTES};

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    #[arg(long)]
    public_dir: Option<PathBuf>,
    #[arg(long, env = "VISION_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "VISION_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    #[arg(long, default_value_t = DEFAULT_MAX_IMAGE_BYTES)]
    max_image_bytes: usize,
    #[arg(long, default_value_t = 30)]
    request_timeout_secs: u64,
    #[arg(long, requires = "tls_key")]
    tls_cert: Option<PathBuf>,
    #[arg(long, requires = "tls_cert")]
    tls_key: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "handscript_server=info,tower_http=info".into()),
        )
        .init();

    match serve(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(args: Args) -> Result<(), StartupError> {
    let backend = VisionBackend::new(
        args.endpoint,
        args.api_key,
        Duration::from_secs(args.request_timeout_secs),
    )?;
    if !backend.is_configured() {
        warn!("No VISION_API_KEY set; annotate requests will answer 503");
    }
    let state = AppState::new(Arc::new(backend), args.max_image_bytes);

    let public_dir = args
        .public_dir
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../public"));

    let app = Router::new()
        .route(
            ANNOTATE_PATH,
            post(annotate_handler).layer(DefaultBodyLimit::max(state.body_limit())),
        )
        .route("/healthz", get(ping_handler))
        .fallback_service(ServeDir::new(public_dir).append_index_html_on_directories(true))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    match (args.tls_cert, args.tls_key) {
        (Some(cert), Some(key)) => {
            let config = RustlsConfig::from_pem_file(cert, key)
                .await
                .map_err(StartupError::Tls)?;
            info!("Handscript running at https://localhost:{}", args.port);
            axum_server::bind_rustls(addr, config)
                .serve(app.into_make_service())
                .await
                .map_err(StartupError::Serve)
        }
        _ => {
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .map_err(|source| StartupError::Bind { addr, source })?;
            info!("Handscript running at http://localhost:{}", args.port);
            axum::serve(listener, app)
                .await
                .map_err(StartupError::Serve)
        }
    }
}
