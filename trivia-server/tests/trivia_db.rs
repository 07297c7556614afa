//! Repository and endpoint tests against a real PostgreSQL database
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p trivia-server -- --ignored

use std::collections::HashSet;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use tokio::sync::Mutex;
use tower::ServiceExt;
use trivia_server::db::repos::{CategoryRepo, DbError, QuestionRepo, DEFAULT_CATEGORIES};
use trivia_server::migrations;
use trivia_server::models::NewQuestion;

// Tests share one database; run them one at a time
static DB_LOCK: Mutex<()> = Mutex::const_new(());

async fn empty_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = fsnd_core::db::create_pool(&url).await.expect("pool creation failed");
    // rebuild so constraint changes in the bootstrap reach existing databases
    sqlx::query("DROP TABLE IF EXISTS questions, categories")
        .execute(&pool)
        .await
        .expect("drop failed");
    migrations::run(&pool).await.expect("schema bootstrap failed");
    pool
}

/// Seeded categories plus a handful of questions spread over them.
async fn seeded_pool() -> PgPool {
    let pool = empty_pool().await;
    CategoryRepo::new(&pool).seed_defaults().await.unwrap();

    let questions = [
        ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
        ("What movie earned Tom Hanks his third straight Oscar nomination?", "Apollo 13", 5, 4),
        ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
        ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
        ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
        ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ];
    let repo = QuestionRepo::new(&pool);
    for (question, answer, category, difficulty) in questions {
        repo.create(&NewQuestion {
            question: question.into(),
            answer: answer.into(),
            category,
            difficulty,
        })
        .await
        .unwrap();
    }
    pool
}

async fn call(pool: &PgPool, request: Request<Body>) -> (StatusCode, Value) {
    let app = trivia_server::build_router(pool.clone(), 10);
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn seeding_is_idempotent() {
    let _guard = DB_LOCK.lock().await;
    let pool = empty_pool().await;
    let repo = CategoryRepo::new(&pool);

    assert_eq!(repo.seed_defaults().await.unwrap(), 6);
    assert_eq!(repo.seed_defaults().await.unwrap(), 0);

    let mapping = repo.mapping().await.unwrap();
    assert_eq!(mapping.len(), DEFAULT_CATEGORIES.len());
    assert_eq!(mapping[&1], "Science");
    assert_eq!(mapping[&6], "Sports");
}

#[tokio::test]
#[ignore = "requires database"]
async fn categories_empty_is_404() {
    let _guard = DB_LOCK.lock().await;
    let pool = empty_pool().await;

    let (status, body) = call(&pool, Request::get("/categories").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    CategoryRepo::new(&pool).seed_defaults().await.unwrap();
    let (status, body) = call(&pool, Request::get("/categories").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"]["3"], "Geography");
    assert_eq!(body["categories"].as_object().unwrap().len(), 6);
}

#[tokio::test]
#[ignore = "requires database"]
async fn quiz_never_repeats_and_then_runs_dry() {
    let _guard = DB_LOCK.lock().await;
    let pool = seeded_pool().await;
    let repo = QuestionRepo::new(&pool);

    // Geography has two questions
    let mut asked = Vec::new();
    while let Some(q) = repo.random_excluding(Some(3), &asked).await.unwrap() {
        assert_eq!(q.category, 3);
        assert!(!asked.contains(&q.id));
        asked.push(q.id);
    }
    assert_eq!(asked.len(), 2);

    let mut all = Vec::new();
    while let Some(q) = repo.random_excluding(None, &all).await.unwrap() {
        all.push(q.id);
    }
    let unique: HashSet<_> = all.iter().collect();
    assert_eq!(unique.len(), 6);
}

#[tokio::test]
#[ignore = "requires database"]
async fn quiz_endpoint_appends_and_exhausts() {
    let _guard = DB_LOCK.lock().await;
    let pool = seeded_pool().await;

    let mut previous: Vec<i64> = Vec::new();
    for _ in 0..2 {
        let (status, body) = call(
            &pool,
            post_json(
                "/quizzes",
                json!({"quiz_category": {"type": "History", "id": "4"}, "previous_questions": previous}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["question"]["id"].as_i64().unwrap();
        assert!(!previous.contains(&id));
        previous = serde_json::from_value(body["previous_questions"].clone()).unwrap();
        assert_eq!(previous.last(), Some(&id));
    }

    let (status, body) = call(
        &pool,
        post_json(
            "/quizzes",
            json!({"quiz_category": {"type": "History", "id": 4}, "previous_questions": previous}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["question"].is_null());
    assert_eq!(body["previous_questions"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires database"]
async fn search_is_case_insensitive() {
    let _guard = DB_LOCK.lock().await;
    let pool = seeded_pool().await;
    let repo = QuestionRepo::new(&pool);

    let hits = repo.search("WHAT IS").await.unwrap();
    assert_eq!(hits.len(), 2);
    assert!(repo.search("title").await.unwrap().is_empty());

    let (status, body) = call(&pool, post_json("/questions", json!({"searchTerm": "what"}))).await;
    assert_eq!(status, StatusCode::OK);
    // four of the six stored questions match
    assert_eq!(body["total_questions"], 4);
    assert!(body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .all(|q| q["question"].as_str().unwrap().to_lowercase().contains("what")));

    let (status, _) = call(&pool, post_json("/questions/search", json!({"searchTerm": "zebra"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_and_delete_round_trip() {
    let _guard = DB_LOCK.lock().await;
    let pool = seeded_pool().await;

    let (status, body) = call(
        &pool,
        post_json(
            "/questions",
            json!({"question": "Heres a new question string", "answer": "Heres a new answer string", "category": "1", "difficulty": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_questions"], 7);
    let created = body["created"].as_i64().unwrap();

    let delete = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/questions/{created}"))
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(&pool, delete).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], created);
    assert_eq!(body["total_questions"], 6);

    assert!(matches!(
        QuestionRepo::new(&pool).delete(created as i32).await,
        Err(DbError::NotFound { .. })
    ));

    let again = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/questions/{created}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(&pool, again).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn unknown_category_is_unprocessable() {
    let _guard = DB_LOCK.lock().await;
    let pool = seeded_pool().await;

    let (status, body) = call(
        &pool,
        post_json(
            "/questions",
            json!({"question": "Q?", "answer": "A", "category": 99, "difficulty": 2}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], 422);
    assert_eq!(QuestionRepo::new(&pool).list_all().await.unwrap().len(), 6);
}

#[tokio::test]
#[ignore = "requires database"]
async fn listing_paginates_and_filters() {
    let _guard = DB_LOCK.lock().await;
    let pool = seeded_pool().await;

    let (status, body) = call(&pool, Request::get("/questions?page=1").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalQuestions"], 6);
    assert_eq!(body["questions"].as_array().unwrap().len(), 6);

    let (status, body) = call(&pool, Request::get("/questions?page=2").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["questions"].as_array().unwrap().is_empty());

    let (status, body) = call(
        &pool,
        Request::get("/categories/4/questions").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentCategory"], 4);
    assert_eq!(body["totalQuestions"], 2);

    let (status, _) = call(
        &pool,
        Request::get("/categories/6/questions").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn category_with_questions_cannot_be_deleted() {
    let _guard = DB_LOCK.lock().await;
    let pool = seeded_pool().await;
    let before = QuestionRepo::new(&pool).list_all().await.unwrap().len();

    // Science still owns the liver question
    let result = sqlx::query("DELETE FROM categories WHERE id = 1").execute(&pool).await;
    assert!(result.is_err());

    assert_eq!(QuestionRepo::new(&pool).list_all().await.unwrap().len(), before);
    assert_eq!(CategoryRepo::new(&pool).list().await.unwrap().len(), 6);
}
