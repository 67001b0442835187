// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::handlers;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use sqlx::SqlitePool;

/// Creates and configures the application router.
pub fn create_router(pool: SqlitePool) -> Router {
    Router::new()
        // Associates the `GET /api/jobs` route with the `list_jobs` handler
        .route("/api/jobs", get(handlers::list_jobs))
        // Associates the `POST /api/jobs` route with the `create_job` handler
        .route("/api/jobs", post(handlers::create_job))
        // The static `summary` segment takes precedence over `{id}` in the matcher
        .route("/api/jobs/summary", get(handlers::job_summary))
        // Associates the `GET /api/jobs/{id}` route with the `get_job` handler
        .route("/api/jobs/{id}", get(handlers::get_job))
        // Associates the `PATCH /api/jobs/{id}` route with the `update_job` handler
        .route("/api/jobs/{id}", patch(handlers::update_job))
        // Associates the `DELETE /api/jobs/{id}` route with the `delete_job` handler
        .route("/api/jobs/{id}", delete(handlers::delete_job))
        // Associates the `GET /api/jobs/{id}/progress` route with the `list_progress` handler
        .route("/api/jobs/{id}/progress", get(handlers::list_progress))
        // Associates the `POST /api/jobs/{id}/progress` route with the `upsert_progress` handler
        .route("/api/jobs/{id}/progress", post(handlers::upsert_progress))
        // Adds the database pool to the application state
        .with_state(pool)
}
