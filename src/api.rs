// 🌐 REST API - mock preview and generate-and-persist endpoints (Axum)
//
// Routes (nested under /api):
//   GET  /health
//   GET  /mocks/mockingpets?count=N   preview pets, nothing stored
//   GET  /mocks/mockingusers          preview accounts, nothing stored
//   POST /mocks/generateData          { users, pets } → persisted summary
//   GET  /users, GET /pets            stored records

use crate::config::Config;
use crate::db::SqliteStore;
use crate::entities::{Account, AccountPreview, Pet, PetPreview};
use crate::generator::{GenerateError, MockGenerator};
use crate::hashing::PasswordHasher;
use crate::reconciler::{generate_data, GenerateSummary, MockError};
use crate::request::{preview_count, GenerateCounts, GenerateRequest};
use crate::store::StoreError;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: SqliteStore, hasher: impl PasswordHasher + 'static, config: Config) -> Self {
        AppState {
            store: Arc::new(store),
            hasher: Arc::new(hasher),
            config: Arc::new(config),
        }
    }

    fn generator(&self) -> MockGenerator<StdRng> {
        MockGenerator::from_entropy().with_password(self.config.mock_password.clone())
    }

    /// Refuse a requested count above `config.max_batch`
    fn check_batch(&self, kind: &str, count: usize) -> Result<(), ApiError> {
        if count > self.config.max_batch {
            return Err(MockError::Validation(format!(
                "at most {} {} per request, got {}",
                self.config.max_batch, kind, count
            ))
            .into());
        }
        Ok(())
    }
}

// ============================================================================
// Response envelope
// ============================================================================

/// `{ status: "success", payload, message? }` or `{ status: "error", error }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            status: "success".to_string(),
            payload: Some(payload),
            message: None,
            error: None,
        }
    }

    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }
}

impl ApiResponse<()> {
    pub fn error(error: String) -> Self {
        Self {
            status: "error".to_string(),
            payload: None,
            message: None,
            error: Some(error),
        }
    }
}

/// Handler failure mapped to an HTTP status
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(ApiResponse::error(self.message))).into_response()
    }
}

impl From<MockError> for ApiError {
    fn from(err: MockError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl From<GenerateError> for ApiError {
    fn from(err: GenerateError) -> Self {
        MockError::from(err).into()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        MockError::from(err).into()
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    count: Option<String>,
}

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/mocks/mockingpets - Preview pets without storing them
async fn mocking_pets(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Vec<PetPreview>> {
    let count = preview_count(query.count.as_deref(), state.config.preview_pets);
    state.check_batch("pets", count)?;
    let pets = state.generator().generate_pets_preview(count);

    Ok(Json(ApiResponse::ok(pets)))
}

/// GET /api/mocks/mockingusers - Preview accounts without storing them
async fn mocking_users(State(state): State<AppState>) -> ApiResult<Vec<AccountPreview>> {
    let users = state
        .generator()
        .generate_accounts_preview(state.config.preview_users, state.hasher.as_ref())
        .await?;

    Ok(Json(ApiResponse::ok(users)))
}

/// POST /api/mocks/generateData - Generate and persist accounts and pets
async fn generate(
    State(state): State<AppState>,
    body: Option<Json<GenerateRequest>>,
) -> ApiResult<GenerateSummary> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let GenerateCounts { users, pets } = request.counts();
    state.check_batch("users", users)?;
    state.check_batch("pets", pets)?;

    let mut generator = state.generator();
    let summary = generate_data(
        &mut generator,
        state.hasher.as_ref(),
        state.store.as_ref(),
        GenerateCounts::new(users, pets),
    )
    .await?;

    let message = summary.message();
    Ok(Json(ApiResponse::ok(summary).with_message(message)))
}

/// GET /api/users - Stored accounts
async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<Account>> {
    Ok(Json(ApiResponse::ok(state.store.all_accounts()?)))
}

/// GET /api/pets - Stored pets
async fn list_pets(State(state): State<AppState>) -> ApiResult<Vec<Pet>> {
    Ok(Json(ApiResponse::ok(state.store.all_pets()?)))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let mock_routes = Router::new()
        .route("/mockingpets", get(mocking_pets))
        .route("/mockingusers", get(mocking_users))
        .route("/generateData", post(generate));

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/users", get(list_users))
        .route("/pets", get(list_pets))
        .nest("/mocks", mock_routes)
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
