use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    db::{timestamp, Database},
    errors::AppResult,
    models::domain::{Quiz, QuizChanges, QuizFilter},
};

/// Quiz persistence. Every operation is scoped to the owning teacher: a quiz
/// owned by someone else behaves exactly like a missing one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn create(&self, teacher_id: i64, title: &str, description: &str) -> AppResult<Quiz>;
    async fn find_by_id(&self, teacher_id: i64, id: i64) -> AppResult<Option<Quiz>>;
    async fn list(&self, teacher_id: i64, filter: &QuizFilter) -> AppResult<(Vec<Quiz>, i64)>;
    async fn update(&self, teacher_id: i64, id: i64, changes: &QuizChanges)
        -> AppResult<Option<Quiz>>;
    async fn delete(&self, teacher_id: i64, id: i64) -> AppResult<bool>;
}

pub struct SqliteQuizRepository {
    pool: SqlitePool,
}

impl SqliteQuizRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            pool: db.pool().clone(),
        }
    }
}

const QUIZ_COLUMNS: &str = "id, title, description, teacher_id, created_at, updated_at";

// SQLite's LIKE folds ASCII only; matching runs on lowercased copies.
const SEARCH_CLAUSE: &str =
    "teacher_id = ? AND (title_folded LIKE ? ESCAPE '\\' OR description_folded LIKE ? ESCAPE '\\')";

/// Case-folded form stored next to searchable text.
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// Turns free text into a LIKE pattern that matches it literally anywhere.
pub fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl QuizRepository for SqliteQuizRepository {
    async fn create(&self, teacher_id: i64, title: &str, description: &str) -> AppResult<Quiz> {
        let now = timestamp(Utc::now());
        let sql = format!(
            "INSERT INTO quizzes
                (title, description, title_folded, description_folded, teacher_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {QUIZ_COLUMNS}"
        );

        let quiz = sqlx::query_as::<_, Quiz>(&sql)
            .bind(title)
            .bind(description)
            .bind(fold_case(title))
            .bind(fold_case(description))
            .bind(teacher_id)
            .bind(&now)
            .bind(&now)
            .fetch_one(&self.pool)
            .await?;
        Ok(quiz)
    }

    async fn find_by_id(&self, teacher_id: i64, id: i64) -> AppResult<Option<Quiz>> {
        let sql = format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = ? AND teacher_id = ? LIMIT 1");

        let quiz = sqlx::query_as::<_, Quiz>(&sql)
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quiz)
    }

    async fn list(&self, teacher_id: i64, filter: &QuizFilter) -> AppResult<(Vec<Quiz>, i64)> {
        let pattern = contains_pattern(&fold_case(&filter.search));

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM quizzes WHERE {SEARCH_CLAUSE}"))
                .bind(teacher_id)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_one(&self.pool)
                .await?;

        let direction = filter.sort.as_sql();
        let sql = format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE {SEARCH_CLAUSE}
             ORDER BY created_at {direction}, id {direction}
             LIMIT ? OFFSET ?"
        );

        let items = sqlx::query_as::<_, Quiz>(&sql)
            .bind(teacher_id)
            .bind(&pattern)
            .bind(&pattern)
            .bind(filter.limit)
            .bind(filter.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }

    async fn update(
        &self,
        teacher_id: i64,
        id: i64,
        changes: &QuizChanges,
    ) -> AppResult<Option<Quiz>> {
        let sql = format!(
            "UPDATE quizzes
             SET title = COALESCE(?, title),
                 description = COALESCE(?, description),
                 title_folded = COALESCE(?, title_folded),
                 description_folded = COALESCE(?, description_folded),
                 updated_at = ?
             WHERE id = ? AND teacher_id = ?
             RETURNING {QUIZ_COLUMNS}"
        );

        let quiz = sqlx::query_as::<_, Quiz>(&sql)
            .bind(changes.title.as_deref())
            .bind(changes.description.as_deref())
            .bind(changes.title.as_deref().map(fold_case))
            .bind(changes.description.as_deref().map(fold_case))
            .bind(timestamp(Utc::now()))
            .bind(id)
            .bind(teacher_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quiz)
    }

    async fn delete(&self, teacher_id: i64, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = ? AND teacher_id = ?")
            .bind(id)
            .bind(teacher_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_wraps_search() {
        assert_eq!(contains_pattern(""), "%%");
        assert_eq!(contains_pattern("math"), "%math%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c:\\"), "%c:\\\\%");
    }

    #[test]
    fn test_fold_case_handles_non_ascii() {
        assert_eq!(fold_case("ÉCOLE Quiz"), "école quiz");
        assert_eq!(fold_case("ÜBUNG"), "übung");
    }
}
