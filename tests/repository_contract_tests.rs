use std::time::Duration;

use quizdesk_server::{
    config::Config,
    db::Database,
    errors::AppError,
    models::domain::{QuizChanges, QuizFilter, SortOrder},
    repositories::{QuizRepository, SqliteQuizRepository, SqliteUserRepository, UserRepository},
};

struct Fixture {
    users: SqliteUserRepository,
    quizzes: SqliteQuizRepository,
}

async fn fixture() -> Fixture {
    let db = Database::connect(&Config::test_config())
        .await
        .expect("in-memory database should open");
    Fixture {
        users: SqliteUserRepository::new(&db),
        quizzes: SqliteQuizRepository::new(&db),
    }
}

impl Fixture {
    async fn teacher(&self, username: &str) -> i64 {
        self.users.create(username, "hash").await.unwrap().id
    }

    async fn seed(&self, teacher_id: i64, count: usize) -> Vec<i64> {
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let quiz = self
                .quizzes
                .create(teacher_id, &format!("Quiz {}", i), "Practice set")
                .await
                .unwrap();
            ids.push(quiz.id);
        }
        ids
    }
}

fn filter(page: i64, limit: i64, sort: SortOrder) -> QuizFilter {
    QuizFilter {
        page,
        limit,
        sort,
        ..QuizFilter::default()
    }
}

#[tokio::test]
async fn user_repository_create_find_and_duplicates() {
    let fx = fixture().await;

    let created = fx.users.create("alice", "$argon2id$stub").await.unwrap();
    assert_eq!(created.username, "alice");
    assert!(created.id > 0);

    let found = fx.users.find_by_username("alice").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, "$argon2id$stub");

    assert!(fx.users.find_by_username("nobody").await.unwrap().is_none());

    let duplicate = fx.users.create("alice", "other").await;
    assert!(
        matches!(&duplicate, Err(AppError::AlreadyExists(msg)) if msg == "Username already exists"),
        "unexpected result: {:?}",
        duplicate
    );
}

#[tokio::test]
async fn quiz_repository_crud_round_trip() {
    let fx = fixture().await;
    let alice = fx.teacher("alice").await;

    let created = fx
        .quizzes
        .create(alice, "Math Basic Quiz", "Test arithmetic")
        .await
        .unwrap();
    assert_eq!(created.teacher_id, alice);
    assert_eq!(created.created_at, created.updated_at);

    let found = fx.quizzes.find_by_id(alice, created.id).await.unwrap();
    assert_eq!(found, Some(created.clone()));

    assert!(fx.quizzes.delete(alice, created.id).await.unwrap());
    assert!(fx.quizzes.find_by_id(alice, created.id).await.unwrap().is_none());
    assert!(!fx.quizzes.delete(alice, created.id).await.unwrap());
}

#[tokio::test]
async fn quiz_repository_is_scoped_to_owner() {
    let fx = fixture().await;
    let alice = fx.teacher("alice").await;
    let bob = fx.teacher("bob").await;

    let quiz = fx.quizzes.create(alice, "Owned", "By alice").await.unwrap();

    assert!(fx.quizzes.find_by_id(bob, quiz.id).await.unwrap().is_none());

    let changes = QuizChanges {
        title: Some("Hijacked".to_string()),
        description: None,
    };
    assert!(fx.quizzes.update(bob, quiz.id, &changes).await.unwrap().is_none());
    assert!(!fx.quizzes.delete(bob, quiz.id).await.unwrap());

    let (bob_page, bob_total) = fx.quizzes.list(bob, &QuizFilter::default()).await.unwrap();
    assert!(bob_page.is_empty());
    assert_eq!(bob_total, 0);

    let untouched = fx.quizzes.find_by_id(alice, quiz.id).await.unwrap().unwrap();
    assert_eq!(untouched.title, "Owned");
}

#[tokio::test]
async fn quiz_repository_pages_concatenate_to_full_listing() {
    let fx = fixture().await;
    let alice = fx.teacher("alice").await;
    let ids = fx.seed(alice, 12).await;

    for sort in [SortOrder::Asc, SortOrder::Desc] {
        let mut seen = Vec::new();
        for page in 1..=3 {
            let (items, total) = fx.quizzes.list(alice, &filter(page, 5, sort)).await.unwrap();
            assert_eq!(total, 12);
            seen.extend(items.into_iter().map(|q| q.id));
        }

        let mut expected = ids.clone();
        if sort == SortOrder::Desc {
            expected.reverse();
        }
        assert_eq!(seen, expected, "ordering for {:?}", sort);
    }

    let (past_end, total) = fx.quizzes.list(alice, &filter(4, 5, SortOrder::Desc)).await.unwrap();
    assert!(past_end.is_empty());
    assert_eq!(total, 12);
}

#[tokio::test]
async fn quiz_repository_search_is_case_insensitive_and_literal() {
    let fx = fixture().await;
    let alice = fx.teacher("alice").await;

    fx.quizzes.create(alice, "Math Basics", "Numbers").await.unwrap();
    fx.quizzes.create(alice, "History", "Ancient MATH texts").await.unwrap();
    fx.quizzes.create(alice, "Chemistry", "100% reactions").await.unwrap();
    fx.quizzes.create(alice, "Biology", "Cells").await.unwrap();

    let search = |text: &str| QuizFilter {
        search: text.to_string(),
        ..QuizFilter::default()
    };

    let (items, total) = fx.quizzes.list(alice, &search("math")).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);

    let (items, total) = fx.quizzes.list(alice, &search("%")).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].title, "Chemistry");

    let (_, total) = fx.quizzes.list(alice, &search("_")).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn quiz_repository_search_folds_non_ascii_case() {
    let fx = fixture().await;
    let alice = fx.teacher("alice").await;

    let quiz = fx.quizzes.create(alice, "ÉCOLE Quiz", "Grammaire").await.unwrap();
    fx.quizzes.create(alice, "Ecology", "Plants").await.unwrap();

    let search = |text: &str| QuizFilter {
        search: text.to_string(),
        ..QuizFilter::default()
    };

    let (items, total) = fx.quizzes.list(alice, &search("école")).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, quiz.id);

    let changes = QuizChanges {
        title: None,
        description: Some("ÜBUNGEN".to_string()),
    };
    fx.quizzes.update(alice, quiz.id, &changes).await.unwrap();

    let (_, total) = fx.quizzes.list(alice, &search("übung")).await.unwrap();
    assert_eq!(total, 1);
    let (_, total) = fx.quizzes.list(alice, &search("grammaire")).await.unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn quiz_repository_partial_update_advances_updated_at() {
    let fx = fixture().await;
    let alice = fx.teacher("alice").await;
    let quiz = fx.quizzes.create(alice, "Old", "Keep me").await.unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let changes = QuizChanges {
        title: Some("New".to_string()),
        description: None,
    };
    let updated = fx
        .quizzes
        .update(alice, quiz.id, &changes)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "New");
    assert_eq!(updated.description, "Keep me");
    assert_eq!(updated.created_at, quiz.created_at);
    assert!(updated.updated_at > quiz.updated_at);
}
