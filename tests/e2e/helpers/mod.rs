use announce_audio::controllers::generation::GenerationController;
use announce_audio::domain::generation::{GenerationService, GenerationSettings};
use announce_audio::infrastructure::http::build_router;
use announce_audio::infrastructure::repositories::{
    AudioRepository, EntityRepository, HttpAudioRepository,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod fake_backend;
pub mod fixtures;

use api_client::TestClient;
use fake_backend::FakeAudioBackend;

/// Short pacing so runs finish quickly against the fake backend
pub fn test_settings() -> GenerationSettings {
    GenerationSettings {
        batch_size: 5,
        batch_delay: Duration::from_millis(50),
        poll_interval: Duration::from_millis(20),
        poll_max_attempts: 5,
    }
}

pub struct TestContext {
    pub client: TestClient,
    pub backend: Arc<FakeAudioBackend>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let backend = FakeAudioBackend::new();
            let backend_url = backend.serve().await;

            let http_repo = Arc::new(
                HttpAudioRepository::new(&backend_url, Duration::from_secs(5))
                    .expect("Failed to build backend client"),
            );
            let audio_repo: Arc<dyn AudioRepository> = http_repo.clone();
            let entity_repo: Arc<dyn EntityRepository> = http_repo;

            let generation_service = Arc::new(GenerationService::new(
                audio_repo,
                entity_repo.clone(),
                test_settings(),
            ));
            let generation_controller = Arc::new(GenerationController::new(generation_service));
            let app = build_router(entity_repo, generation_controller);

            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            // Wait for server to be ready
            tokio::time::sleep(Duration::from_millis(100)).await;

            Self {
                client: TestClient::new(&base_url),
                backend,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

impl TestContext {
    pub async fn progress(&self) -> Value {
        let response = self.client.get("/api/generation/progress").await.unwrap();
        response.body.expect("Missing progress body")
    }

    /// Poll progress until the predicate holds, or panic after five seconds
    pub async fn wait_for_progress<F>(&self, predicate: F) -> Value
    where
        F: Fn(&Value) -> bool,
    {
        for _ in 0..250 {
            let progress = self.progress().await;
            if predicate(&progress) {
                return progress;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Progress never reached the expected state");
    }

    pub async fn wait_until_idle(&self) -> Value {
        self.wait_for_progress(|p| {
            p.get("is_processing").and_then(Value::as_bool) == Some(false)
                && p.get("last_summary").is_some()
        })
        .await
    }
}
