use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// In-process stand-in for the audio CRUD backend
#[derive(Default)]
pub struct FakeAudioBackend {
    existing: Mutex<HashSet<String>>,
    failing: Mutex<HashMap<String, String>>,
    templates: Mutex<Vec<Value>>,
    polls_by_job: Mutex<HashMap<i64, u32>>,
    /// Status polls answered "in progress" before a job completes; None never completes
    completes_after: Mutex<Option<u32>>,
    latency: Mutex<Duration>,
    templates_unavailable: Mutex<bool>,
    next_id: AtomicI64,
    duplicate_checks: AtomicUsize,
    creates: AtomicUsize,
}

#[allow(dead_code)]
impl FakeAudioBackend {
    pub fn new() -> Arc<Self> {
        let backend = Self::default();
        *backend.completes_after.lock() = Some(1);
        Arc::new(backend)
    }

    pub fn add_existing(&self, text: &str) {
        self.existing.lock().insert(text.to_string());
    }

    /// Creation of this text answers 500 with the given FastAPI detail
    pub fn fail_text(&self, text: &str, detail: &str) {
        self.failing
            .lock()
            .insert(text.to_string(), detail.to_string());
    }

    pub fn add_template(&self, id: i64, english_text: &str, marathi_text: Option<&str>, is_active: bool) {
        self.templates.lock().push(json!({
            "id": id,
            "category": "arrival",
            "title": format!("Template {}", id),
            "english_text": english_text,
            "marathi_text": marathi_text,
            "hindi_text": null,
            "gujarati_text": null,
            "is_active": is_active
        }));
    }

    pub fn never_complete(&self) {
        *self.completes_after.lock() = None;
    }

    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = latency;
    }

    pub fn make_templates_unavailable(&self) {
        *self.templates_unavailable.lock() = true;
    }

    pub fn duplicate_checks(&self) -> usize {
        self.duplicate_checks.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn stored_texts(&self) -> usize {
        self.existing.lock().len()
    }

    /// Serve on an ephemeral port and return its base URL
    pub async fn serve(self: &Arc<Self>) -> String {
        let app = Router::new()
            .route("/audio-files/check-duplicate", post(check_duplicate))
            .route("/audio-files/", post(create_audio))
            .route("/audio-files/:id/status", get(get_status))
            .route("/audio-files/:id", get(get_record))
            .route("/templates", get(list_templates))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

#[derive(Deserialize)]
struct TextBody {
    english_text: String,
}

async fn check_duplicate(
    State(backend): State<Arc<FakeAudioBackend>>,
    Json(body): Json<TextBody>,
) -> Json<Value> {
    backend.duplicate_checks.fetch_add(1, Ordering::SeqCst);
    let text = body.english_text.trim().to_string();
    let has_duplicates = backend.existing.lock().contains(&text);
    Json(json!({
        "text": text,
        "has_duplicates": has_duplicates,
        "duplicates": { "audio_files": [] }
    }))
}

async fn create_audio(
    State(backend): State<Arc<FakeAudioBackend>>,
    Json(body): Json<TextBody>,
) -> Response {
    backend.creates.fetch_add(1, Ordering::SeqCst);
    let latency = *backend.latency.lock();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let text = body.english_text.trim().to_string();
    if let Some(detail) = backend.failing.lock().get(&text).cloned() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": detail })),
        )
            .into_response();
    }
    if !backend.existing.lock().insert(text.clone()) {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "detail": format!("Audio file with this English text already exists: {}", text)
            })),
        )
            .into_response();
    }

    let id = backend.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    Json(record(id, &text, false)).into_response()
}

async fn get_status(
    State(backend): State<Arc<FakeAudioBackend>>,
    Path(id): Path<i64>,
) -> Json<Value> {
    let completes_after = *backend.completes_after.lock();
    let mut polls = backend.polls_by_job.lock();
    let seen = polls.entry(id).or_insert(0);
    let completed = matches!(completes_after, Some(after) if *seen >= after);
    *seen += 1;

    Json(json!({
        "id": id,
        "completed": completed,
        "in_progress": !completed
    }))
}

async fn get_record(Path(id): Path<i64>) -> Json<Value> {
    Json(record(id, "generated", true))
}

#[derive(Deserialize)]
struct TemplateQuery {
    is_active: Option<bool>,
}

async fn list_templates(
    State(backend): State<Arc<FakeAudioBackend>>,
    Query(query): Query<TemplateQuery>,
) -> Response {
    if *backend.templates_unavailable.lock() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "detail": "database unavailable" })),
        )
            .into_response();
    }

    let templates: Vec<Value> = backend
        .templates
        .lock()
        .iter()
        .filter(|t| match query.is_active {
            Some(active) => t.get("is_active").and_then(Value::as_bool) == Some(active),
            None => true,
        })
        .cloned()
        .collect();
    Json(templates).into_response()
}

fn record(id: i64, text: &str, with_audio: bool) -> Value {
    let path = |lang: &str| {
        with_audio.then(|| format!("/audio_files/audio_{}_{}.mp3", lang, id))
    };
    json!({
        "id": id,
        "english_text": text,
        "created_at": "2024-01-01T10:00:00",
        "english_audio_path": path("english"),
        "marathi_audio_path": path("marathi"),
        "hindi_audio_path": path("hindi"),
        "gujarati_audio_path": path("gujarati"),
        "english_translation": text,
        "marathi_translation": null,
        "hindi_translation": null,
        "gujarati_translation": null,
        "is_active": true
    })
}
