//! Scheme endpoint handlers
//!
//! Each handler parses its input, makes one store call and maps the result.
//! Nothing is kept between requests.
//!
//! Store calls take locks and fsync, so they run on tokio's blocking pool
//! and never on an async worker.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::errors::{ApiError, ApiResult};
use crate::scheme::{Scheme, SchemeDraft, SchemeId, SchemePatch};
use crate::store::{SchemeStore, SharedStore, StoreResult};

/// State shared by the scheme handlers: the injected store handle only
pub struct ApiState {
    store: SharedStore,
}

impl ApiState {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Run one store call on the blocking pool
    async fn with_store<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn SchemeStore) -> StoreResult<T> + Send + 'static,
    {
        let store = self.store.clone();
        let result = tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))?;
        Ok(result?)
    }
}

/// A malformed id cannot name a stored record
fn parse_id(raw: &str) -> ApiResult<SchemeId> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

pub(super) async fn create_scheme_handler(
    State(state): State<Arc<ApiState>>,
    body: Result<Json<SchemeDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Scheme>)> {
    let Json(draft) = body?;

    let scheme = state.with_store(move |store| store.create(draft)).await?;
    tracing::info!(id = %scheme.id, "scheme created");

    Ok((StatusCode::CREATED, Json(scheme)))
}

pub(super) async fn list_schemes_handler(
    State(state): State<Arc<ApiState>>,
) -> ApiResult<Json<Vec<Scheme>>> {
    let schemes = state.with_store(|store| store.list()).await?;
    Ok(Json(schemes))
}

pub(super) async fn get_scheme_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Scheme>> {
    let id = parse_id(&id)?;
    let scheme = state.with_store(move |store| store.get_by_id(&id)).await?;
    Ok(Json(scheme))
}

pub(super) async fn update_scheme_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
    body: Result<Json<SchemePatch>, JsonRejection>,
) -> ApiResult<Json<Scheme>> {
    let id = parse_id(&id)?;
    let Json(patch) = body?;
    let fields = patch.fields().len();

    let scheme = state
        .with_store(move |store| store.update_by_id(&id, &patch))
        .await?;
    tracing::info!(id = %scheme.id, fields, "scheme updated");

    Ok(Json(scheme))
}

pub(super) async fn delete_scheme_handler(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Scheme>> {
    let id = parse_id(&id)?;

    let scheme = state.with_store(move |store| store.delete_by_id(&id)).await?;
    tracing::info!(id = %scheme.id, "scheme deleted");

    Ok(Json(scheme))
}

pub(super) async fn unknown_route_handler() -> ApiError {
    ApiError::UnknownRoute
}

pub(super) async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
