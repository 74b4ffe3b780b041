use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

use super::now_timestamp;

#[derive(Debug, Clone, FromRow)]
pub struct JournalEntry {
    pub id: i64,
    pub trip_id: i64,
    pub entry_date: NaiveDate,
    pub content: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntryFields {
    pub entry_date: NaiveDate,
    pub content: String,
}

impl JournalEntry {
    /// Entries of one trip, newest `entry_date` first.
    pub async fn list_for_trip(
        db: &SqlitePool,
        trip_id: i64,
    ) -> Result<Vec<JournalEntry>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT * FROM journal_entries
            WHERE trip_id = ?
            ORDER BY entry_date DESC, created_at DESC, id DESC
            "#,
        )
        .bind(trip_id)
        .fetch_all(db)
        .await
    }

    pub async fn find(db: &SqlitePool, id: i64) -> Result<Option<JournalEntry>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM journal_entries WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn insert(
        db: &SqlitePool,
        trip_id: i64,
        fields: &JournalEntryFields,
    ) -> Result<JournalEntry, sqlx::Error> {
        sqlx::query_as(
            r#"
            INSERT INTO journal_entries (trip_id, entry_date, content, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(trip_id)
        .bind(fields.entry_date)
        .bind(&fields.content)
        .bind(now_timestamp())
        .fetch_one(db)
        .await
    }

    /// Only date and content are writable; the owning trip never changes.
    pub async fn update(
        db: &SqlitePool,
        id: i64,
        fields: &JournalEntryFields,
    ) -> Result<Option<JournalEntry>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE journal_entries SET entry_date = ?, content = ? WHERE id = ? RETURNING *",
        )
        .bind(fields.entry_date)
        .bind(&fields.content)
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
