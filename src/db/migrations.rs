use sqlx::SqlitePool;

use crate::errors::AppResult;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        username        TEXT NOT NULL UNIQUE,
        password_hash   TEXT NOT NULL,
        created_at      TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS quizzes (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        title           TEXT NOT NULL,
        description     TEXT NOT NULL,
        title_folded        TEXT NOT NULL,
        description_folded  TEXT NOT NULL,
        teacher_id      INTEGER NOT NULL REFERENCES users(id),
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_quizzes_teacher_created
        ON quizzes(teacher_id, created_at)",
];

pub async fn run(pool: &SqlitePool) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    log::info!("Database migrations complete");
    Ok(())
}
