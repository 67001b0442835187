// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Represents a job (a billable piece of work) within the system.
///
/// Derivation attributes (derive):
/// - `Serialize`, `Deserialize`: Allows conversion to/from JSON.
/// - `Debug`: Enables displaying the structure for debugging (e.g., `println!("{:?}", job)`).
/// - `Clone`: Allows creating copies of the object.
/// - `sqlx::FromRow`: Allows `sqlx` to create a `Job` instance directly
///   from a database result row.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Job {
    #[sqlx(rename = "id")]
    pub id: i64,

    #[sqlx(rename = "title")]
    pub title: String,

    #[sqlx(rename = "description")]
    pub description: String,

    #[sqlx(rename = "client_name")]
    pub client_name: String,

    #[sqlx(rename = "amount")]
    pub amount: f64,

    #[sqlx(rename = "is_paid")]
    pub is_paid: bool,

    // We use NaiveDate because we are only interested in the day,
    // without a timezone. Only meaningful while `is_paid` is true.
    #[sqlx(rename = "payment_date")]
    pub payment_date: Option<NaiveDate>,

    #[sqlx(rename = "payment_reference")]
    pub payment_reference: Option<String>,

    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

/// A single day's progress entry for a job.
///
/// At most one row exists per `(job_id, date)` pair; the schema enforces
/// this with a uniqueness constraint.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct DailyProgress {
    #[sqlx(rename = "id")]
    pub id: i64,

    // A lookup key only; progress rows survive the deletion of their job.
    #[sqlx(rename = "job_id")]
    pub job_id: i64,

    #[sqlx(rename = "date")]
    pub date: NaiveDate,

    #[sqlx(rename = "completed")]
    pub completed: bool,

    #[sqlx(rename = "notes")]
    pub notes: Option<String>,

    #[sqlx(rename = "created_at")]
    pub created_at: DateTime<Utc>,
}

/// Structure used to receive job creation data from the API.
/// It's a good practice to separate database models (`Job`)
/// from API models (`CreateJobPayload`), as they may have different fields.
/// Required fields are `Option` here so that their absence is reported as a
/// 400 by the handler instead of a deserialization rejection.
#[derive(Deserialize, Debug)]
pub struct CreateJobPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub amount: Option<f64>,
}

/// Partial update for a job. Only the fields present in the request body are
/// applied; unknown keys are rejected outright.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateJobPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub client_name: Option<String>,
    pub amount: Option<f64>,
    pub is_paid: Option<bool>,
    pub payment_date: Option<NaiveDate>,
    pub payment_reference: Option<String>,
}

/// Structure used to create or update a progress entry for one day.
/// `date` is required; its absence fails before any database access.
#[derive(Deserialize, Debug)]
pub struct UpsertProgressPayload {
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    pub notes: Option<String>,
}

/// Aggregate figures over all jobs, computed in SQL.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct JobSummary {
    #[sqlx(rename = "total_jobs")]
    pub total_jobs: i64,

    #[sqlx(rename = "paid_jobs")]
    pub paid_jobs: i64,

    #[sqlx(rename = "pending_jobs")]
    pub pending_jobs: i64,

    #[sqlx(rename = "total_amount")]
    pub total_amount: f64,

    #[sqlx(rename = "paid_amount")]
    pub paid_amount: f64,

    #[sqlx(rename = "pending_amount")]
    pub pending_amount: f64,
}
