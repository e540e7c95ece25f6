use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::domain::entity::Entity;
use crate::domain::generation::{
    GenerationService, GenerationServiceApi, ProgressResponse, ProgressState,
    SingleGenerationRequest, SingleOutcome, StartRunRequest, StartRunResponse,
};
use crate::error::AppResult;

pub struct GenerationController {
    generation_service: Arc<GenerationService>,
}

impl GenerationController {
    pub fn new(generation_service: Arc<GenerationService>) -> Self {
        Self { generation_service }
    }

    /// POST /api/generation/runs - Start a bulk run in the background
    pub async fn start_run(
        State(controller): State<Arc<GenerationController>>,
        Json(request): Json<StartRunRequest>,
    ) -> AppResult<(StatusCode, Json<StartRunResponse>)> {
        let total = controller
            .generation_service
            .start_run(request.kind, request.entities)
            .await?;
        Ok((StatusCode::ACCEPTED, Json(StartRunResponse { total })))
    }

    /// POST /api/generation/pause - Stop the active run after its current batch
    pub async fn pause(
        State(controller): State<Arc<GenerationController>>,
    ) -> AppResult<StatusCode> {
        controller.generation_service.pause().await?;
        Ok(StatusCode::ACCEPTED)
    }

    /// POST /api/generation/resume - Continue a paused run
    pub async fn resume(
        State(controller): State<Arc<GenerationController>>,
    ) -> AppResult<(StatusCode, Json<ProgressState>)> {
        let progress = controller.generation_service.resume().await?;
        Ok((StatusCode::ACCEPTED, Json(progress)))
    }

    /// DELETE /api/generation/runs - Drop a paused run
    pub async fn abandon(
        State(controller): State<Arc<GenerationController>>,
    ) -> AppResult<StatusCode> {
        controller.generation_service.abandon().await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/generation/progress
    pub async fn progress(
        State(controller): State<Arc<GenerationController>>,
    ) -> Json<ProgressResponse> {
        Json(controller.generation_service.progress().await)
    }

    /// POST /api/generation/single - Generate one entity and wait for the audio
    pub async fn generate_single(
        State(controller): State<Arc<GenerationController>>,
        Json(request): Json<SingleGenerationRequest>,
    ) -> AppResult<Json<SingleOutcome>> {
        let outcome = controller
            .generation_service
            .generate_one(Entity::from(request))
            .await?;
        Ok(Json(outcome))
    }
}
