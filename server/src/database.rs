// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use common::{DailyProgress, Job, JobSummary, UpdateJobPayload};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool}; // Added MigrateDatabase for database_exists/create_database
use tracing::{debug, info};

/// Establishes the database connection pool.
/// If the database does not exist, it creates it.
/// It also ensures the `jobs` and `daily_progress` tables have the correct schema.
pub async fn establish_connection_pool(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .context("Failed to create database")?;
    } else {
        info!("Database already exists.");
    }

    let pool = SqlitePool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            client_name TEXT NOT NULL,
            amount REAL NOT NULL,
            is_paid BOOLEAN NOT NULL DEFAULT 0,
            payment_date DATE NULL,
            payment_reference TEXT NULL,
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        );
        "#,
    )
    .execute(&pool)
    .await
    .context("Failed to create 'jobs' table")?;

    // `job_id` is a plain lookup column: deleting a job leaves its progress
    // rows in place. The UNIQUE constraint is what makes the upsert atomic.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS daily_progress (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id INTEGER NOT NULL,
            date DATE NOT NULL,
            completed BOOLEAN NOT NULL DEFAULT 0,
            notes TEXT NULL,
            created_at TIMESTAMP NOT NULL,
            UNIQUE (job_id, date)
        );
        "#,
    )
    .execute(&pool)
    .await
    .context("Failed to create 'daily_progress' table")?;

    info!("'jobs' and 'daily_progress' tables are ready.");

    Ok(pool)
}

/// Retrieves all jobs, newest first.
pub async fn get_all_jobs_from_db(pool: &SqlitePool) -> Result<Vec<Job>> {
    let jobs = sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY created_at DESC, id DESC;")
        .fetch_all(pool)
        .await
        .context("Failed to retrieve jobs from DB")?;

    Ok(jobs)
}

/// Retrieves a single job by ID, or `None` if no such row exists.
#[allow(clippy::uninlined_format_args)]
pub async fn get_job_from_db(pool: &SqlitePool, job_id: i64) -> Result<Option<Job>> {
    let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = ?;")
        .bind(job_id)
        .fetch_optional(pool)
        .await
        .context(format!("Failed to retrieve job with ID: {}", job_id))?;

    Ok(job)
}

/// Inserts a new job into the database.
/// New jobs always start unpaid, with no payment details.
pub async fn create_job_in_db(
    pool: &SqlitePool,
    title: String,
    description: String,
    client_name: String,
    amount: f64,
) -> Result<Job> {
    let now = Utc::now();

    debug!(
        "Insert values: title={}, description={}, client_name={}, amount={}, created_at={}",
        title, description, client_name, amount, now
    );

    let id = sqlx::query(
        "INSERT INTO jobs (title, description, client_name, amount, is_paid, payment_date, payment_reference, created_at, updated_at) VALUES (?, ?, ?, ?, 0, NULL, NULL, ?, ?)"
    )
    .bind(&title)
    .bind(&description)
    .bind(&client_name)
    .bind(amount)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert job into DB")?
    .last_insert_rowid();

    let new_job = Job {
        id,
        title,
        description,
        client_name,
        amount,
        is_paid: false,
        payment_date: None,
        payment_reference: None,
        created_at: now,
        updated_at: now,
    };

    Ok(new_job)
}

/// Applies a partial update to a job and returns the updated row,
/// or `None` if no job with the given ID exists.
///
/// Only the fields present in the payload are changed. Marking a job unpaid
/// also clears `payment_date` and `payment_reference`.
#[allow(clippy::uninlined_format_args)]
pub async fn update_job_in_db(
    pool: &SqlitePool,
    job_id: i64,
    payload: UpdateJobPayload,
) -> Result<Option<Job>> {
    let Some(mut job) = get_job_from_db(pool, job_id).await? else {
        return Ok(None);
    };

    if let Some(title) = payload.title {
        job.title = title;
    }
    if let Some(description) = payload.description {
        job.description = description;
    }
    if let Some(client_name) = payload.client_name {
        job.client_name = client_name;
    }
    if let Some(amount) = payload.amount {
        job.amount = amount;
    }
    if let Some(is_paid) = payload.is_paid {
        job.is_paid = is_paid;
        if !is_paid {
            job.payment_date = None;
            job.payment_reference = None;
        }
    }
    if let Some(payment_date) = payload.payment_date {
        job.payment_date = Some(payment_date);
    }
    if let Some(payment_reference) = payload.payment_reference {
        job.payment_reference = Some(payment_reference);
    }
    job.updated_at = Utc::now();

    sqlx::query(
        "UPDATE jobs SET title = ?, description = ?, client_name = ?, amount = ?, is_paid = ?, payment_date = ?, payment_reference = ?, updated_at = ? WHERE id = ?"
    )
    .bind(&job.title)
    .bind(&job.description)
    .bind(&job.client_name)
    .bind(job.amount)
    .bind(job.is_paid)
    .bind(job.payment_date)
    .bind(&job.payment_reference)
    .bind(job.updated_at)
    .bind(job.id)
    .execute(pool)
    .await
    .context(format!("Failed to update job with ID: {}", job_id))?;

    info!("Updated job with ID: {}", job_id);

    Ok(Some(job))
}

/// Deletes a job from the database.
/// Returns true if a row was removed, false if no job with the given ID was found.
/// Progress rows for the job are deliberately left untouched.
#[allow(clippy::uninlined_format_args)]
pub async fn delete_job_in_db(pool: &SqlitePool, job_id: i64) -> Result<bool> {
    debug!("Attempting to delete job with ID: {}", job_id);
    let result = sqlx::query("DELETE FROM jobs WHERE id = ?")
        .bind(job_id)
        .execute(pool)
        .await
        .context(format!("Failed to delete job with ID: {}", job_id))?;

    let rows_affected = result.rows_affected();
    info!("Deleted {} rows for job ID: {}", rows_affected, job_id);

    Ok(rows_affected > 0)
}

/// Retrieves all progress entries for a job, newest date first.
#[allow(clippy::uninlined_format_args)]
pub async fn get_progress_for_job_from_db(
    pool: &SqlitePool,
    job_id: i64,
) -> Result<Vec<DailyProgress>> {
    let progress = sqlx::query_as::<_, DailyProgress>(
        "SELECT * FROM daily_progress WHERE job_id = ? ORDER BY date DESC;",
    )
    .bind(job_id)
    .fetch_all(pool)
    .await
    .context(format!(
        "Failed to retrieve progress for job with ID: {}",
        job_id
    ))?;

    Ok(progress)
}

/// Creates or updates the progress entry for `(job_id, date)` in a single
/// atomic statement, keyed on the schema's uniqueness constraint.
///
/// Uses `INSERT ... ON CONFLICT DO UPDATE` so that the update path rewrites
/// only `completed` and `notes`; `id` and `created_at` keep their original
/// values.
#[allow(clippy::uninlined_format_args)]
pub async fn upsert_progress_in_db(
    pool: &SqlitePool,
    job_id: i64,
    date: NaiveDate,
    completed: bool,
    notes: Option<String>,
) -> Result<DailyProgress> {
    let created_at = Utc::now();

    debug!(
        "Upsert values: job_id={}, date={}, completed={}, notes={:?}",
        job_id, date, completed, notes
    );

    let progress = sqlx::query_as::<_, DailyProgress>(
        r#"
        INSERT INTO daily_progress (job_id, date, completed, notes, created_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(job_id, date) DO UPDATE SET
            completed = excluded.completed,
            notes = excluded.notes
        RETURNING *;
        "#,
    )
    .bind(job_id)
    .bind(date)
    .bind(completed)
    .bind(&notes)
    .bind(created_at)
    .fetch_one(pool)
    .await
    .context(format!(
        "Failed to upsert progress for job {} on {}",
        job_id, date
    ))?;

    Ok(progress)
}

/// Computes aggregate totals over all jobs in one query.
pub async fn get_job_summary_from_db(pool: &SqlitePool) -> Result<JobSummary> {
    let summary = sqlx::query_as::<_, JobSummary>(
        r#"
        SELECT
            COUNT(*) AS total_jobs,
            COALESCE(SUM(CASE WHEN is_paid THEN 1 ELSE 0 END), 0) AS paid_jobs,
            COALESCE(SUM(CASE WHEN is_paid THEN 0 ELSE 1 END), 0) AS pending_jobs,
            COALESCE(SUM(amount), 0.0) AS total_amount,
            COALESCE(SUM(CASE WHEN is_paid THEN amount ELSE 0.0 END), 0.0) AS paid_amount,
            COALESCE(SUM(CASE WHEN is_paid THEN 0.0 ELSE amount END), 0.0) AS pending_amount
        FROM jobs;
        "#,
    )
    .fetch_one(pool)
    .await
    .context("Failed to compute job summary from DB")?;

    Ok(summary)
}
