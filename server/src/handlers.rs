// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use crate::database;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{
    CreateJobPayload, DailyProgress, Job, JobSummary, UpdateJobPayload, UpsertProgressPayload,
};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

/// Handler for listing all jobs, newest first.
pub async fn list_jobs(
    State(pool): State<SqlitePool>, // State injection (DB pool)
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = database::get_all_jobs_from_db(&pool).await?;
    info!("Successfully retrieved {} jobs.", jobs.len());
    Ok(Json(jobs))
}

/// Handler for creating a new job.
#[allow(clippy::uninlined_format_args)]
pub async fn create_job(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateJobPayload>, // Extracting the request body as JSON
) -> Result<(StatusCode, Json<Job>), AppError> {
    debug!("Received request to create job: {:?}", payload);

    // Validate the payload: title and client_name must be present and
    // non-empty, amount must be present (zero is allowed).
    let title = payload.title.unwrap_or_default();
    let client_name = payload.client_name.unwrap_or_default();
    let description = payload.description.unwrap_or_default();

    let Some(amount) = payload.amount else {
        error!("Validation failed: Amount is missing.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Missing required fields: title, client_name, amount",
        ));
    };
    if title.is_empty() || client_name.is_empty() {
        error!("Validation failed: Title or client name is missing or empty.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Missing required fields: title, client_name, amount",
        ));
    }

    let new_job =
        database::create_job_in_db(&pool, title, description, client_name, amount).await?;

    info!("Job created successfully with ID: {}", new_job.id);

    // Return a 201 Created status with the new job as JSON.
    Ok((StatusCode::CREATED, Json(new_job)))
}

/// Handler for fetching a single job by ID.
#[allow(clippy::uninlined_format_args)]
pub async fn get_job(
    State(pool): State<SqlitePool>,
    Path(job_id): Path<i64>, // Extract job ID from the URL path
) -> Result<Json<Job>, AppError> {
    debug!("Received request to fetch job with ID: {}", job_id);

    match database::get_job_from_db(&pool, job_id).await? {
        Some(job) => Ok(Json(job)),
        None => {
            error!("Job with ID {} not found.", job_id);
            Err(AppError::new(StatusCode::NOT_FOUND, "Job not found"))
        }
    }
}

/// Handler for partially updating a job.
/// Fields absent from the body are left untouched.
#[allow(clippy::uninlined_format_args)]
pub async fn update_job(
    State(pool): State<SqlitePool>,
    Path(job_id): Path<i64>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<Json<Job>, AppError> {
    debug!(
        "Received request to update job with ID {}: {:?}",
        job_id, payload
    );

    match database::update_job_in_db(&pool, job_id, payload).await? {
        Some(job) => {
            info!("Job with ID {} updated successfully.", job_id);
            Ok(Json(job))
        }
        None => {
            error!("Job with ID {} not found for update.", job_id);
            Err(AppError::new(StatusCode::NOT_FOUND, "Job not found"))
        }
    }
}

/// Handler for deleting a job by ID.
#[allow(clippy::needless_return)]
#[allow(clippy::uninlined_format_args)]
pub async fn delete_job(
    State(pool): State<SqlitePool>,
    Path(job_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    debug!("Attempting to delete job with ID: {}", job_id);

    let deleted = database::delete_job_in_db(&pool, job_id).await?;

    if deleted {
        info!("Job with ID {} deleted successfully.", job_id);
        Ok(Json(
            serde_json::json!({ "message": "Job deleted successfully" }),
        ))
    } else {
        error!("Job with ID {} not found for deletion.", job_id);
        return Err(AppError::new(
            StatusCode::NOT_FOUND,
            &format!("Job with ID {} not found for deletion.", job_id),
        ));
    }
}

/// Handler for the aggregate totals over all jobs.
pub async fn job_summary(
    State(pool): State<SqlitePool>,
) -> Result<Json<JobSummary>, AppError> {
    let summary = database::get_job_summary_from_db(&pool).await?;
    Ok(Json(summary))
}

/// Handler for listing a job's progress entries, newest date first.
#[allow(clippy::uninlined_format_args)]
pub async fn list_progress(
    State(pool): State<SqlitePool>,
    Path(job_id): Path<i64>,
) -> Result<Json<Vec<DailyProgress>>, AppError> {
    let progress = database::get_progress_for_job_from_db(&pool, job_id).await?;
    info!(
        "Successfully retrieved {} progress entries for job {}.",
        progress.len(),
        job_id
    );
    Ok(Json(progress))
}

/// Handler for creating or updating a job's progress entry for one day.
#[allow(clippy::uninlined_format_args)]
pub async fn upsert_progress(
    State(pool): State<SqlitePool>,
    Path(job_id): Path<i64>,
    Json(payload): Json<UpsertProgressPayload>,
) -> Result<Json<DailyProgress>, AppError> {
    debug!(
        "Received progress upsert for job {}: {:?}",
        job_id, payload
    );

    // Validate the payload: the date must be present before any DB access.
    let Some(date) = payload.date else {
        error!("Validation failed: Date is missing.");
        return Err(AppError::new(StatusCode::BAD_REQUEST, "Date is required"));
    };

    let progress =
        database::upsert_progress_in_db(&pool, job_id, date, payload.completed, payload.notes)
            .await?;

    info!(
        "Progress for job {} on {} saved with ID: {}",
        job_id, date, progress.id
    );

    Ok(Json(progress))
}

// --- Custom Error Handling ---
// This is a good practice for transforming our internal errors
// (e.g., from the database) into appropriate HTTP responses.

/// Our custom error type for the application.
pub struct AppError {
    code: StatusCode,
    message: String,
}

impl AppError {
    fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_string(),
        }
    }
}

/// Allows converting an `anyhow::Error` (coming from `database.rs`)
/// into our `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Log the full error chain for debugging; the response carries only
        // the top-level message.
        tracing::error!("Internal server error: {:?}", err);
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

/// Allows Axum to convert our `AppError` into an HTTP `Response`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(
            "Responding with error: status_code={}, message={}",
            self.code.as_u16(),
            self.message
        );
        (
            self.code,
            Json(serde_json::json!({ "error": self.message })),
        )
            .into_response()
    }
}
