use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use annalist_application::{ChangeLogRepository, EntryRange};

use super::PostgresChangeLogRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres change log tests: {error}");
    }

    Some(pool)
}

async fn insert_entry(pool: &PgPool, contenttype: &str, contentid: &str, title: &str) -> i64 {
    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO change_log_entries (title, contenttype, contentid, mutation)
        VALUES ($1, $2, $3, 'update')
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(contenttype)
    .bind(contentid)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(id) => id,
        Err(error) => panic!("failed to insert change log fixture: {error}"),
    }
}

#[tokio::test]
async fn listing_and_neighbours_follow_insertion_order() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresChangeLogRepository::new(pool.clone());
    let contenttype = "pg-test-pages";
    let first = insert_entry(&pool, contenttype, "42", "First").await;
    let second = insert_entry(&pool, contenttype, "42", "Second").await;

    let Ok(entries) = repository
        .list_entries_for_content_item(contenttype, "42", EntryRange::unbounded())
        .await
    else {
        panic!("expected listing");
    };
    assert_eq!(entries.first().map(|entry| entry.id), Some(second));

    let Ok(previous) = repository.find_previous_entry(contenttype, "42", second).await else {
        panic!("expected previous lookup");
    };
    assert_eq!(previous.map(|entry| entry.id), Some(first));

    let Ok(missing) = repository.find_entry(contenttype, "42", i64::MAX).await else {
        panic!("expected lookup");
    };
    assert!(missing.is_none());

    let cleanup = sqlx::query("DELETE FROM change_log_entries WHERE contenttype = $1")
        .bind(contenttype)
        .execute(&pool)
        .await;
    assert!(cleanup.is_ok());
}
