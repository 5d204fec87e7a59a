use sqlx::PgPool;

/// Bring the two tables into existence on startup. Deliberately not a
/// migration system: the schema is two independent tables and `IF NOT EXISTS`
/// keeps restarts idempotent.
pub async fn ensure(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS movies (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            release_date TEXT
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS actors (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            gender TEXT,
            age INTEGER
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}
