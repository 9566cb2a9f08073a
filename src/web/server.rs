use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tracing::{debug, info};

use crate::cli::ServeArgs;
use crate::core::address::PhaseData;
use crate::matching::engine::{MatchingConfig, MatchingEngine, DEFAULT_MIN_SCORE};
use crate::matching::selection::ScoredCandidate;
use crate::parsing::vendors::{load_vendor_dir, records_from_json_rows, VendorError};

/// Maximum accepted request body
pub const MAX_BODY_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Shared application state
pub struct AppState {
    /// Vendor CSV files used when a request carries no vendor rows
    pub vendors_dir: PathBuf,
}

/// Body of `POST /api/vendor-matching`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorMatchingRequest {
    pub phase1_data: Option<PhaseData>,
    /// Vendor rows; anything but a non-empty array falls back to the vendor directory
    pub csv_data: Option<serde_json::Value>,
    pub is_canadian: Option<bool>,
    pub min_score: Option<f64>,
}

#[derive(Serialize)]
pub struct VendorMatchingResponse {
    pub ok: bool,
    pub results: Vec<ScoredCandidate>,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        ok: false,
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(vendors_dir: PathBuf) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { vendors_dir });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = Router::new()
        .route("/api/vendor-matching", post(vendor_matching_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("strict-transport-security"),
                    HeaderValue::from_static("max-age=31536000; includeSubDomains"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(100))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router(args.vendors_dir.clone())?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting vendor-matcher web server at http://{addr}");
    info!("Default vendor directory: {}", args.vendors_dir.display());

    if args.open {
        let _ = open::that(format!("http://{addr}/health"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> &'static str {
    "OK"
}

/// Match the posted invoice against the posted (or default) vendor list
async fn vendor_matching_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let request: VendorMatchingRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            debug!("Rejected request body: {e}");
            return (
                StatusCode::BAD_REQUEST,
                Json(create_safe_error_response(
                    "invalid_json",
                    "Request body is not valid vendor matching JSON",
                    None,
                )),
            )
                .into_response();
        }
    };
    debug!("Received vendor matching request ({} bytes)", body.len());

    // Loading and scoring are synchronous and may touch the filesystem
    let vendors_dir = state.vendors_dir.clone();
    let outcome =
        tokio::task::spawn_blocking(move || match_request(request, &vendors_dir)).await;

    match outcome {
        Ok(Ok(results)) => Json(VendorMatchingResponse { ok: true, results }).into_response(),
        Ok(Err(reply)) => reply.into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "internal_error",
                "Vendor matching failed",
                Some(&e.to_string()),
            )),
        )
            .into_response(),
    }
}

fn match_request(
    request: VendorMatchingRequest,
    vendors_dir: &std::path::Path,
) -> Result<Vec<ScoredCandidate>, ErrorReply> {
    let phase = request.phase1_data.ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "missing_phase1_data",
                "phase1Data is required",
                None,
            )),
        )
    })?;

    let vendors = match request.csv_data {
        Some(serde_json::Value::Array(rows)) if !rows.is_empty() => {
            records_from_json_rows(&object_rows(rows)?)
        }
        _ => load_vendor_dir(vendors_dir),
    }
    .map_err(vendor_error_reply)?;

    let config = MatchingConfig {
        min_score: request.min_score.unwrap_or(DEFAULT_MIN_SCORE),
        is_canadian: request.is_canadian.unwrap_or(false),
        ..MatchingConfig::default()
    };
    let engine = MatchingEngine::with_config(&vendors, config);
    let result = engine.find_matches(&phase).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "invalid_vendor_data",
                &e.to_string(),
                None,
            )),
        )
    })?;

    debug!(
        "Returning {} candidate(s) from address {:?}",
        result.len(),
        result.address_index
    );
    Ok(result.candidates)
}

/// Posted vendor rows must each be a JSON object
fn object_rows(
    rows: Vec<serde_json::Value>,
) -> Result<Vec<serde_json::Map<String, serde_json::Value>>, ErrorReply> {
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| match row {
            serde_json::Value::Object(columns) => Ok(columns),
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(create_safe_error_response(
                    "invalid_vendor_data",
                    &format!("Vendor row {} is not an object", i + 1),
                    None,
                )),
            )),
        })
        .collect()
}

fn vendor_error_reply(error: VendorError) -> ErrorReply {
    match error {
        VendorError::Io(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(create_safe_error_response(
                "vendor_load_failed",
                "Unable to load vendor data",
                Some(&e.to_string()),
            )),
        ),
        VendorError::Csv(e) => (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "invalid_vendor_data",
                "Vendor data could not be parsed",
                Some(&e.to_string()),
            )),
        ),
        VendorError::NoVendorFiles(dir) => (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "no_vendor_data",
                "No vendor data was provided and no vendor files are available",
                Some(&format!("No CSV files in {}", dir.display())),
            )),
        ),
        other => (
            StatusCode::BAD_REQUEST,
            Json(create_safe_error_response(
                "invalid_vendor_data",
                &other.to_string(),
                None,
            )),
        ),
    }
}
