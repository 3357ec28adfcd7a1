//! Quote request persistence

use klussite_common::db::models::{QuoteRequest, QuoteStatus};
use klussite_common::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Fields supplied by the public form
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub description: String,
}

/// Insert a new quote request. Status is always pending; the submitted
/// date is assigned by the store.
pub async fn insert(pool: &SqlitePool, new: &NewQuote) -> Result<QuoteRequest> {
    let id = Uuid::new_v4().to_string();
    sqlx::query(
        r#"
        INSERT INTO quotes (id, name, email, phone, service, description, status)
        VALUES (?, ?, ?, ?, ?, ?, 'pending')
        "#,
    )
    .bind(&id)
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.phone)
    .bind(&new.service)
    .bind(&new.description)
    .execute(pool)
    .await?;

    get(pool, &id)
        .await?
        .ok_or_else(|| Error::Internal(format!("Quote {} vanished after insert", id)))
}

/// Load one quote by id
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<QuoteRequest>> {
    let row = sqlx::query(
        "SELECT id, name, email, phone, service, description, submitted_date, status
         FROM quotes WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(from_row).transpose()
}

/// List all quotes, newest first (store-native ordering)
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<QuoteRequest>> {
    let rows = sqlx::query(
        "SELECT id, name, email, phone, service, description, submitted_date, status
         FROM quotes ORDER BY submitted_date DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(from_row).collect()
}

/// Update the status of a quote
pub async fn update_status(pool: &SqlitePool, id: &str, status: QuoteStatus) -> Result<()> {
    let result = sqlx::query("UPDATE quotes SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Quote not found: {}", id)));
    }
    Ok(())
}

/// Delete a quote by id
pub async fn delete(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM quotes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("Quote not found: {}", id)));
    }
    Ok(())
}

fn from_row(row: sqlx::sqlite::SqliteRow) -> Result<QuoteRequest> {
    let status_str: String = row.get("status");
    let status = QuoteStatus::parse(&status_str)
        .ok_or_else(|| Error::Internal(format!("Unknown quote status: {}", status_str)))?;

    Ok(QuoteRequest {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        service: row.get("service"),
        description: row.get("description"),
        submitted_date: row.get("submitted_date"),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use klussite_common::db::create_all_tables;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        create_all_tables(&pool).await.unwrap();
        pool
    }

    fn sample() -> NewQuote {
        NewQuote {
            name: "Jan Jansen".to_string(),
            email: "jan@example.com".to_string(),
            phone: "0612345678".to_string(),
            service: "schilderwerk".to_string(),
            description: "Buitenmuur schilderen".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_forces_pending_status() {
        let pool = test_pool().await;
        let quote = insert(&pool, &sample()).await.unwrap();
        assert_eq!(quote.status, QuoteStatus::Pending);
        assert_eq!(quote.name, "Jan Jansen");
    }

    #[tokio::test]
    async fn test_update_status_any_transition() {
        let pool = test_pool().await;
        let quote = insert(&pool, &sample()).await.unwrap();

        // No enforced transition order
        update_status(&pool, &quote.id, QuoteStatus::Completed).await.unwrap();
        update_status(&pool, &quote.id, QuoteStatus::Pending).await.unwrap();
        update_status(&pool, &quote.id, QuoteStatus::Contacted).await.unwrap();

        let loaded = get(&pool, &quote.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, QuoteStatus::Contacted);
    }

    #[tokio::test]
    async fn test_update_missing_quote_is_not_found() {
        let pool = test_pool().await;
        let err = update_status(&pool, "missing", QuoteStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_quote() {
        let pool = test_pool().await;
        let quote = insert(&pool, &sample()).await.unwrap();
        delete(&pool, &quote.id).await.unwrap();
        assert!(get(&pool, &quote.id).await.unwrap().is_none());
        assert!(matches!(
            delete(&pool, &quote.id).await.unwrap_err(),
            Error::NotFound(_)
        ));
    }
}
