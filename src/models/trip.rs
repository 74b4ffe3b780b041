use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

use super::now_timestamp;

#[derive(Debug, Clone, FromRow)]
pub struct Trip {
    pub id: i64,
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub created_at: String,
}

/// Validated trip fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripFields {
    pub title: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
}

impl Trip {
    pub async fn list(db: &SqlitePool) -> Result<Vec<Trip>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM trips ORDER BY created_at DESC, id DESC")
            .fetch_all(db)
            .await
    }

    pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<Trip>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM trips WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn insert(db: &SqlitePool, fields: &TripFields) -> Result<Trip, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO trips (title, destination, start_date, end_date, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.destination)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(&fields.description)
        .bind(now_timestamp())
        .fetch_one(db)
        .await
    }

    /// Overwrite every editable column. `created_at` is left alone.
    pub async fn update(
        db: &SqlitePool,
        id: i64,
        fields: &TripFields,
    ) -> Result<Option<Trip>, sqlx::Error> {
        sqlx::query_as(
            r#"
            UPDATE trips
            SET title = ?, destination = ?, start_date = ?, end_date = ?, description = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(&fields.title)
        .bind(&fields.destination)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(&fields.description)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Delete the trip together with its journal entries. Returns `false`
    /// when no trip had that id.
    pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = db.begin().await?;

        sqlx::query("DELETE FROM journal_entries WHERE trip_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM trips WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
