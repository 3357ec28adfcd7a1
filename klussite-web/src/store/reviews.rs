//! Review reads
//!
//! Reviews have no mutation path in this service; rows are seeded out of
//! band.

use klussite_common::db::models::Review;
use klussite_common::Result;
use sqlx::{Row, SqlitePool};

/// List all reviews, newest first (store-native ordering)
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Review>> {
    let rows = sqlx::query(
        "SELECT id, client_name, service, rating, comment, date, image_url
         FROM reviews ORDER BY date DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Review {
            id: row.get("id"),
            client_name: row.get("client_name"),
            service: row.get("service"),
            rating: row.get("rating"),
            comment: row.get("comment"),
            date: row.get("date"),
            image_url: row.get("image_url"),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use klussite_common::db::create_all_tables;

    #[tokio::test]
    async fn test_list_orders_by_date_desc() {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        create_all_tables(&pool).await.unwrap();

        sqlx::query(
            "INSERT INTO reviews (id, client_name, service, rating, comment, date)
             VALUES ('r1', 'A', 'tuinieren', 5, 'Prima', '2024-01-10 09:00:00'),
                    ('r2', 'B', 'schilderwerk', 4, 'Netjes', '2024-03-02 09:00:00')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let reviews = list_all(&pool).await.unwrap();
        assert_eq!(
            reviews.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec!["r2", "r1"]
        );
        assert_eq!(reviews[0].rating, 4);
    }
}
