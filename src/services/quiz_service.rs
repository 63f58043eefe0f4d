use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Quiz, QuizChanges, QuizFilter},
        dto::response::{PaginatedResponse, Pagination},
    },
    repositories::QuizRepository,
};

pub const QUIZ_NOT_FOUND: &str = "Quiz not found";

fn not_found() -> AppError {
    AppError::NotFound(QUIZ_NOT_FOUND.to_string())
}

pub struct QuizService {
    repository: Arc<dyn QuizRepository>,
}

impl QuizService {
    pub fn new(repository: Arc<dyn QuizRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_quiz(
        &self,
        teacher_id: i64,
        title: &str,
        description: &str,
    ) -> AppResult<Quiz> {
        let quiz = self.repository.create(teacher_id, title, description).await?;
        log::info!("Teacher {} created quiz {}", teacher_id, quiz.id);
        Ok(quiz)
    }

    pub async fn get_quiz(&self, teacher_id: i64, id: i64) -> AppResult<Quiz> {
        self.repository
            .find_by_id(teacher_id, id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn list_quizzes(
        &self,
        teacher_id: i64,
        filter: &QuizFilter,
    ) -> AppResult<PaginatedResponse<Quiz>> {
        let (data, total) = self.repository.list(teacher_id, filter).await?;

        Ok(PaginatedResponse {
            data,
            pagination: Pagination::new(total, filter.page, filter.limit),
        })
    }

    pub async fn update_quiz(
        &self,
        teacher_id: i64,
        id: i64,
        changes: QuizChanges,
    ) -> AppResult<Quiz> {
        self.repository
            .update(teacher_id, id, &changes)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete_quiz(&self, teacher_id: i64, id: i64) -> AppResult<()> {
        if !self.repository.delete(teacher_id, id).await? {
            return Err(not_found());
        }

        log::info!("Teacher {} deleted quiz {}", teacher_id, id);
        Ok(())
    }
}
