use anyhow::Result;
use sqlx::SqlitePool;

/// Create the collection table and its index if they do not exist yet.
///
/// `collection` must already be validated as a SQL identifier
/// (see [`Config::validate`](crate::config::Config::validate)).
pub async fn ensure_collection(pool: &SqlitePool, collection: &str) -> Result<()> {
    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {collection} (
            advisoryid INTEGER PRIMARY KEY,
            document TEXT NOT NULL,
            ingested_at INTEGER NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS idx_{collection}_ingested_at ON {collection}(ingested_at DESC)"
    ))
    .execute(pool)
    .await?;

    Ok(())
}
