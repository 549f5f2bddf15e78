//! HTTP request handlers for the inventory API
//!
//! Each handler validates its path and body first, then calls the inventory
//! service. Every failure becomes an `ApiError`, which renders as
//! `{"error": "..."}` with the status of its class:
//!
//! | Outcome | Status |
//! |---|---|
//! | validation failure, malformed body | 400 |
//! | product not found | 404 |
//! | duplicate product ID | 409 |
//! | storage failure | 500 |

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::constants::SERVICE_NAME;
use inventory_core::{
    core::AppState, log_debug, log_error, log_info, log_warn, storage::StorageImpl, validation,
    Error, Inventory, Product, Quantity, StorageError, ValidationError,
};

// Response types

/// Error body returned by every failing request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Body of successful mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human readable outcome
    pub message: String,
}

/// Body of a successful restock
#[derive(Debug, Serialize, Deserialize)]
pub struct StockResponse {
    /// Human readable outcome
    pub message: String,
    /// Stock after the addition
    #[serde(rename = "cantidad")]
    pub quantity: Quantity,
}

/// System health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Current system status
    pub status: String,
    /// Time since startup
    pub uptime: String,
    /// Service version
    pub version: String,
    /// Configured storage backend
    pub backend: String,
    /// Time of the check
    pub timestamp: String,
}

impl ErrorResponse {
    /// Create an error response
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Handler error carrying the inventory outcome to render
#[derive(Debug)]
pub struct ApiError(pub Error);

impl ApiError {
    /// Status code for this error's class
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::Validation(ValidationError::BodyTooLarge(_)) => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Storage(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(Error::Validation(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.is_server_error() {
            log_error!("Request failed: {}", self.0);
        } else {
            log_warn!("Request rejected ({}): {}", status.as_u16(), self.0);
        }
        (status, Json(ErrorResponse::new(self.0.to_string()))).into_response()
    }
}

/// Custom JSON extractor that returns proper JSON error responses
pub struct JsonRequest<T>(pub T);

impl<T, S> FromRequest<S> for JsonRequest<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonRequest(value)),
            Err(JsonRejection::BytesRejection(err)) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Err(ValidationError::BodyTooLarge(err.body_text()).into())
            }
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
                    JsonRejection::JsonSyntaxError(_) => "Malformed JSON".to_string(),
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing or invalid Content-Type header. Expected 'application/json'".to_string()
                    }
                    JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
                    _ => "Invalid JSON request".to_string(),
                };
                Err(ValidationError::MalformedBody(error_message).into())
            }
        }
    }
}

/// Run an inventory call on the blocking pool
///
/// Store operations do SQLite or file I/O and may wait on a busy database.
async fn with_inventory<S, T, F>(app_state: &AppState<S>, op: F) -> Result<T, ApiError>
where
    S: StorageImpl,
    T: Send + 'static,
    F: FnOnce(&Inventory<S>) -> inventory_core::Result<T> + Send + 'static,
{
    let inventory = app_state.inventory.clone();
    let outcome = tokio::task::spawn_blocking(move || op(&inventory))
        .await
        .map_err(|e| Error::Storage(StorageError::Worker(e.to_string())))?;
    Ok(outcome?)
}

// Product handlers

/// Fetch a product by ID
pub async fn get_product<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = validation::parse_id(&id)?;
    let product = with_inventory(&app_state, move |inventory| inventory.fetch(id)).await?;
    log_debug!("Fetched product {}", product.id);
    Ok(Json(product))
}

/// Create a product from `{id, nombre, cantidad}`
pub async fn create_product<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    JsonRequest(body): JsonRequest<Value>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let new_product = validation::parse_create_body(&body)?;
    let product =
        with_inventory(&app_state, move |inventory| inventory.create(new_product)).await?;
    log_info!("Created product {} ({})", product.id, product.name);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Product added successfully")),
    ))
}

/// Overwrite the stock of a product from `{cantidad}`
pub async fn update_stock<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonRequest(body): JsonRequest<Value>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = validation::parse_id(&id)?;
    let quantity = validation::parse_quantity_body(&body)?;
    with_inventory(&app_state, move |inventory| inventory.update_stock(id, quantity)).await?;
    log_info!("Set stock of product {} to {}", id, quantity);

    Ok(Json(MessageResponse::new("Stock updated successfully")))
}

/// Add units to the stock of a product from `{cantidad}`
pub async fn add_stock<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    JsonRequest(body): JsonRequest<Value>,
) -> Result<Json<StockResponse>, ApiError> {
    let id = validation::parse_id(&id)?;
    let amount = validation::parse_amount_body(&body)?;
    let quantity =
        with_inventory(&app_state, move |inventory| inventory.add_stock(id, amount)).await?;
    log_info!("Added {} units to product {}, stock now {}", amount, id, quantity);

    Ok(Json(StockResponse {
        message: format!("Stock updated successfully. New stock: {}", quantity),
        quantity,
    }))
}

// System handlers

/// Health check endpoint
pub async fn health_check<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime: format!("{}s", app_state.uptime().as_secs()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: app_state.inventory.backend_name().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Root API endpoint
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "endpoints": {
            "fetch": "GET /product/{id}",
            "create": "POST /product",
            "update_stock": "PUT /product/{id}",
            "add_stock": "POST /product/{id}/stock",
            "health": "GET /health"
        }
    }))
}

/// Fallback for unknown routes
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Route not found")))
}
