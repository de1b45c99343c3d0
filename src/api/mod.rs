//! # Scheme API
//!
//! Stateless HTTP layer over the record store.
//!
//! # Endpoints
//!
//! - `POST /schemes` - create (201)
//! - `GET /schemes` - list all
//! - `GET /schemes/:id` - fetch one
//! - `PUT /schemes/:id` - partial update
//! - `DELETE /schemes/:id` - delete, returns the removed record
//!
//! The server nests these under `/api`. Unknown paths and unsupported
//! methods below it get JSON error bodies like every other failure.

mod errors;
mod handlers;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use handlers::ApiState;

use crate::store::SharedStore;
use handlers::{
    create_scheme_handler, delete_scheme_handler, get_scheme_handler, list_schemes_handler,
    method_not_allowed_handler, unknown_route_handler, update_scheme_handler,
};

/// Create the scheme routes
pub fn scheme_routes(store: SharedStore) -> Router {
    let state = Arc::new(ApiState::new(store));

    Router::new()
        .route(
            "/schemes",
            get(list_schemes_handler)
                .post(create_scheme_handler)
                .fallback(method_not_allowed_handler),
        )
        .route(
            "/schemes/:id",
            get(get_scheme_handler)
                .put(update_scheme_handler)
                .delete(delete_scheme_handler)
                .fallback(method_not_allowed_handler),
        )
        .fallback(unknown_route_handler)
        .with_state(state)
}
