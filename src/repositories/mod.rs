pub mod quiz_repository;
pub mod user_repository;

pub use quiz_repository::{QuizRepository, SqliteQuizRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
