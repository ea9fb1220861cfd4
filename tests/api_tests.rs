// tests/api_tests.rs

use quizroom::{
    config::Config,
    routes,
    state::AppState,
    storage::{SqliteStore, Store},
};
use serde_json::{Value, json};

/// Helper function to spawn the app on a random port for testing.
/// Each app gets its own in-memory SQLite store.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let sqlite = SqliteStore::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory store");

    let config = Config {
        rust_log: "error".to_string(),
        ..Config::default()
    };

    let app = routes::create_router(AppState::new(Store::new(sqlite), config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn post_json(client: &reqwest::Client, url: String, body: Value) -> reqwest::Response {
    client
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

fn question(text: &str, correct_index: usize) -> Value {
    json!({
        "text": text,
        "options": ["A", "B", "C", "D"],
        "correctIndex": correct_index,
        "explanation": ""
    })
}

#[tokio::test]
async fn unknown_path_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn landing_section_follows_logins() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let session: Value = client
        .get(format!("{}/api/session", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(session["section"], "home");

    post_json(
        &client,
        format!("{}/api/teachers/login", address),
        json!({"teacherId": "T1", "name": "Alice"}),
    )
    .await;
    let session: Value = client
        .get(format!("{}/api/session", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(session["section"], "teacher-dashboard");
    assert_eq!(session["teacher"]["teacherId"], "T1");
}

#[tokio::test]
async fn login_rejects_blank_fields() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = post_json(
        &client,
        format!("{}/api/students/login", address),
        json!({"regNo": "   ", "name": "Bob"}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Please enter registration number and name.");

    // Missing field counts as blank.
    let response = post_json(
        &client,
        format!("{}/api/teachers/login", address),
        json!({"teacherId": "T1"}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let me = client
        .get(format!("{}/api/students/me", address))
        .send()
        .await
        .unwrap();
    assert_eq!(me.status().as_u16(), 401);
}

#[tokio::test]
async fn repeat_login_renames_and_keeps_quizzes() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let teacher_id = format!("T_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    post_json(
        &client,
        format!("{}/api/teachers/login", address),
        json!({"teacherId": teacher_id, "name": "Alice"}),
    )
    .await;
    post_json(&client, format!("{}/api/authoring/questions", address), question("Q1", 1)).await;
    let saved = post_json(
        &client,
        format!("{}/api/authoring/quizzes", address),
        json!({"title": "Basics", "topic": "Math"}),
    )
    .await;
    assert_eq!(saved.status().as_u16(), 201);

    let relogin: Value = post_json(
        &client,
        format!("{}/api/teachers/login", address),
        json!({"teacherId": format!("  {}  ", teacher_id), "name": "Alicia"}),
    )
    .await
    .json()
    .await
    .unwrap();
    assert_eq!(relogin["account"]["teacherId"], teacher_id.as_str());
    assert_eq!(relogin["account"]["name"], "Alicia");
    assert_eq!(relogin["section"], "teacher-dashboard");

    let dashboard: Value = client
        .get(format!("{}/api/dashboard/teacher", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard["title"], "Teacher Dashboard - Alicia");
    assert_eq!(dashboard["quizzes"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["quizzes"][0]["badge"], "Draft");
    assert_eq!(dashboard["quizzes"][0]["durationMinutes"], 17);
}

#[tokio::test]
async fn authoring_validates_and_assigns_increasing_ids() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Saving requires a teacher session.
    let response = post_json(
        &client,
        format!("{}/api/authoring/quizzes", address),
        json!({"title": "Nope"}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 401);

    post_json(
        &client,
        format!("{}/api/teachers/login", address),
        json!({"teacherId": "T1", "name": "Alice"}),
    )
    .await;

    let mut blank = question("Q", 0);
    blank["options"][3] = json!(" ");
    let response = post_json(&client, format!("{}/api/authoring/questions", address), blank).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Please fill question and all four options.");

    let response = post_json(
        &client,
        format!("{}/api/authoring/questions", address),
        question("Q", 7),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);

    let response = post_json(
        &client,
        format!("{}/api/authoring/quizzes", address),
        json!({"title": "Empty"}),
    )
    .await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Please add at least one question.");

    let mut ids = Vec::new();
    for i in 0..3 {
        let draft: Value = post_json(
            &client,
            format!("{}/api/authoring/questions", address),
            question(&format!("Q{}", i), 2),
        )
        .await
        .json()
        .await
        .unwrap();
        assert_eq!(draft[0]["correct"], "C");

        let saved: Value = post_json(
            &client,
            format!("{}/api/authoring/quizzes", address),
            json!({"title": format!("Quiz {}", i), "durationMinutes": 5}),
        )
        .await
        .json()
        .await
        .unwrap();
        assert_eq!(saved["quiz"]["isLive"], false);
        ids.push(saved["quiz"]["id"].as_u64().unwrap());
    }
    assert_eq!(ids, vec![1, 2, 3]);

    let draft: Vec<Value> = client
        .get(format!("{}/api/authoring/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(draft.is_empty());
}

#[tokio::test]
async fn clearing_the_draft_discards_questions() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    post_json(&client, format!("{}/api/authoring/questions", address), question("Q1", 0)).await;
    post_json(&client, format!("{}/api/authoring/questions", address), question("Q2", 1)).await;

    let response = client
        .delete(format!("{}/api/authoring/questions", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let draft: Vec<Value> = client
        .get(format!("{}/api/authoring/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(draft.is_empty());
}

#[tokio::test]
async fn toggle_is_owner_only() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    post_json(
        &client,
        format!("{}/api/teachers/login", address),
        json!({"teacherId": "T1", "name": "Alice"}),
    )
    .await;
    post_json(&client, format!("{}/api/authoring/questions", address), question("Q", 0)).await;
    post_json(
        &client,
        format!("{}/api/authoring/quizzes", address),
        json!({"title": "Basics"}),
    )
    .await;

    let live: Value = client
        .post(format!("{}/api/quizzes/1/toggle", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(live["isLive"], true);

    post_json(
        &client,
        format!("{}/api/teachers/login", address),
        json!({"teacherId": "T2", "name": "Mallory"}),
    )
    .await;
    let response = client
        .post(format!("{}/api/quizzes/1/toggle", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 403);

    let response = client
        .post(format!("{}/api/quizzes/99/toggle", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
