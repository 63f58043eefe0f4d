use std::collections::BTreeMap;

use super::{
    form::{QuizForm, SubmitGuard},
    ApiClient, Notice,
};
use crate::models::dto::request::UpdateQuizRequest;

pub const FETCH_QUIZ_FAILED: &str = "Failed to fetch quiz";
pub const SAVE_FAILED: &str = "Failed to save quiz";
pub const CREATED: &str = "Quiz created successfully";
pub const UPDATED: &str = "Quiz updated successfully";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved; the caller returns to the dashboard.
    Saved(Notice),
    /// Server or transport failure; the form stays open.
    Failed(Notice),
    /// Local validation failed; nothing was sent.
    Invalid(BTreeMap<String, String>),
    /// A submission from this editor is still in flight.
    Busy,
}

/// Create/edit screen for a single quiz.
pub struct QuizEditor {
    quiz_id: Option<i64>,
    pub form: QuizForm,
    submitting: SubmitGuard,
}

impl QuizEditor {
    pub fn create() -> Self {
        Self {
            quiz_id: None,
            form: QuizForm::default(),
            submitting: SubmitGuard::new(),
        }
    }

    /// Call [`QuizEditor::load`] before showing the form.
    pub fn edit(quiz_id: i64) -> Self {
        Self {
            quiz_id: Some(quiz_id),
            ..Self::create()
        }
    }

    /// Fills the form from the server. On error the caller returns to the
    /// dashboard with the notice.
    pub async fn load(&mut self, api: &ApiClient) -> Result<(), Notice> {
        let Some(id) = self.quiz_id else {
            return Ok(());
        };

        let quiz = api
            .get_quiz(id)
            .await
            .map_err(|e| Notice::error(e.user_message(FETCH_QUIZ_FAILED)))?;
        self.form = QuizForm::new(quiz.title, quiz.description);
        Ok(())
    }

    pub async fn submit(&mut self, api: &ApiClient) -> SubmitOutcome {
        let errors = self.form.field_errors();
        if !errors.is_empty() {
            return SubmitOutcome::Invalid(errors);
        }

        let Some(_ticket) = self.submitting.try_begin() else {
            return SubmitOutcome::Busy;
        };

        let result = match self.quiz_id {
            Some(id) => {
                let changes = UpdateQuizRequest {
                    title: Some(self.form.title.clone()),
                    description: Some(self.form.description.clone()),
                };
                api.update_quiz(id, &changes).await.map(|_| UPDATED)
            }
            None => api
                .create_quiz(&self.form.title, &self.form.description)
                .await
                .map(|_| CREATED),
        };

        match result {
            Ok(message) => SubmitOutcome::Saved(Notice::success(message)),
            Err(e) => {
                log::warn!("Quiz save failed: {}", e);
                SubmitOutcome::Failed(Notice::error(e.user_message(SAVE_FAILED)))
            }
        }
    }
}
