use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{any, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use hearth_api::Config;
use hearth_db::SqliteConnector;
use hearth_types::api::ErrorBody;
use hearth_types::invocation::{ApiRequest, ApiResponse};

#[derive(Clone)]
struct ServerState {
    config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "hearth=debug,hearth_api=debug,hearth_db=debug,tower_http=debug".into()
            }),
        )
        .init();

    // Config
    let config = Config::from_env();
    let host = std::env::var("HEARTH_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("HEARTH_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    match config.database_url.as_deref() {
        Some(url) => hearth_db::migrate(url)?,
        None => warn!("DATABASE_URL is not set; every request will answer 500"),
    }
    info!("Acting as user {}", config.principal);

    let state = ServerState {
        config: Arc::new(config),
    };

    // CORS headers come from the handler itself, so no CorsLayer here.
    let app = Router::new()
        .route("/", any(invoke_http))
        .route("/invoke", post(invoke_event))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Hearth server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Plain HTTP: method, query string and body become the request descriptor.
async fn invoke_http(
    State(state): State<ServerState>,
    method: Method,
    Query(params): Query<HashMap<String, String>>,
    body: String,
) -> Response {
    let request = ApiRequest {
        http_method: method.to_string(),
        query_string_parameters: Some(params),
        body: Some(body).filter(|b| !b.is_empty()),
    };
    into_http(run(state, request).await)
}

/// Cloud-function style: the descriptor itself is posted as JSON and the
/// response descriptor comes back as JSON.
async fn invoke_event(
    State(state): State<ServerState>,
    Json(request): Json<ApiRequest>,
) -> Json<ApiResponse> {
    Json(run(state, request).await)
}

async fn run(state: ServerState, request: ApiRequest) -> ApiResponse {
    // Run the blocking handler off the async runtime
    tokio::task::spawn_blocking(move || hearth_api::handle(&SqliteConnector, &state.config, &request))
        .await
        .unwrap_or_else(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiResponse::json(500, &ErrorBody::new("Internal server error"))
        })
}

fn into_http(resp: ApiResponse) -> Response {
    let status = StatusCode::from_u16(resp.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut response = (status, resp.body).into_response();

    let headers = response.headers_mut();
    headers.remove(header::CONTENT_TYPE);
    for (name, value) in &resp.headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!("Dropping invalid response header '{}'", name),
        }
    }

    response
}
