pub mod quiz;
pub mod user;
pub use quiz::{Quiz, QuizChanges, QuizFilter, SortOrder};
pub use user::User;
