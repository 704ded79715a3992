#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, RawQuery, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value as JsonValue};

#[derive(Debug, Clone, Copy)]
pub enum Health {
    Up,
    Down,
    Slow(Duration),
}

/// In-process stand-in for the question API.
#[derive(Debug)]
pub struct FakeApi {
    pub health: Health,
    pub status: StatusCode,
    /// Raw body for `question/questions`; `None` serves `questions`.
    pub questions_body: Option<String>,
    /// Raw body for `question/filter`; `None` serves a filtered envelope.
    pub filter_body: Option<String>,
    pub questions: Vec<JsonValue>,
    pub seen_queries: Mutex<Vec<Option<String>>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            health: Health::Up,
            status: StatusCode::OK,
            questions_body: None,
            filter_body: None,
            questions: sample_questions(),
            seen_queries: Mutex::new(Vec::new()),
        }
    }
}

/// PascalCase like the .NET backend emits.
pub fn sample_questions() -> Vec<JsonValue> {
    vec![
        question_json("q1", "10", "Toán", "1 + 1 = ?", &["1", "2"], 1),
        question_json("q2", "10", "Toán", "2 * 3 = ?", &["6", "5"], 0),
        question_json("q3", "11", "Lý", "Đơn vị của lực?", &["Newton", "Joule"], 0),
    ]
}

pub fn question_json(
    id: &str,
    class: &str,
    subject: &str,
    text: &str,
    choices: &[&str],
    correct: usize,
) -> JsonValue {
    let choices: Vec<JsonValue> = choices
        .iter()
        .enumerate()
        .map(|(i, c)| json!({ "Text": c, "IsCorrect": i == correct }))
        .collect();
    json!({
        "QuestionId": id,
        "Subject": subject,
        "Class": class,
        "Difficulty": "easy",
        "QuestionText": text,
        "Choices": choices,
        "Explanation": format!("Explanation for {}", id),
        "Tags": ["sample"],
        "CreatedAt": "2024-09-01T08:00:00",
        "UpdatedAt": "2024-09-02T08:00:00Z"
    })
}

async fn health(State(api): State<Arc<FakeApi>>) -> StatusCode {
    match api.health {
        Health::Up => StatusCode::OK,
        Health::Down => StatusCode::SERVICE_UNAVAILABLE,
        Health::Slow(delay) => {
            tokio::time::sleep(delay).await;
            StatusCode::OK
        }
    }
}

async fn questions(State(api): State<Arc<FakeApi>>) -> (StatusCode, String) {
    let body = api
        .questions_body
        .clone()
        .unwrap_or_else(|| JsonValue::Array(api.questions.clone()).to_string());
    (api.status, body)
}

async fn filter(
    State(api): State<Arc<FakeApi>>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    api.seen_queries.lock().unwrap().push(raw);
    if let Some(body) = &api.filter_body {
        return (api.status, body.clone());
    }

    let data: Vec<JsonValue> = api
        .questions
        .iter()
        .filter(|q| params.get("classId").map_or(true, |c| q["Class"] == *c))
        .filter(|q| params.get("subjectId").map_or(true, |s| q["Subject"] == *s))
        .cloned()
        .collect();
    (api.status, json!({ "success": true, "data": data }).to_string())
}

async fn subjects(State(api): State<Arc<FakeApi>>) -> (StatusCode, Json<JsonValue>) {
    (
        api.status,
        Json(json!([
            { "SubjectId": "s1", "SubjectName": "Toán", "IsActive": true, "CreateAt": "2024-01-01T00:00:00" },
            { "SubjectId": "s2", "SubjectName": "Lý", "IsActive": false }
        ])),
    )
}

async fn classes(State(api): State<Arc<FakeApi>>) -> (StatusCode, Json<JsonValue>) {
    (
        api.status,
        Json(json!([{ "classId": "c10", "className": "10", "isActive": true }])),
    )
}

/// Serves `api` on an ephemeral port; returns the base URL.
pub async fn spawn(api: FakeApi) -> (String, Arc<FakeApi>) {
    let api = Arc::new(api);
    let app = Router::new()
        .route("/api/Health", get(health))
        .route("/api/question/questions", get(questions))
        .route("/api/question/filter", get(filter))
        .route("/api/subject/subjects", get(subjects))
        .route("/api/class", get(classes))
        .with_state(api.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake api");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake api server");
    });

    (format!("http://{}/api/", addr), api)
}

/// Base URL on a port nobody listens on.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{}/api/", addr)
}

pub fn temp_data_folder() -> PathBuf {
    std::env::temp_dir().join(format!("quiz-app-test-{}", uuid::Uuid::new_v4()))
}
