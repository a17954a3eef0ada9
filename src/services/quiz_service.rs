use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{GenerateQuizRequest, GenerateQuizResponse},
    services::pipeline::QuizPipeline,
};

pub struct QuizService {
    pipeline: QuizPipeline,
}

impl QuizService {
    pub fn new(pipeline: QuizPipeline) -> Self {
        Self { pipeline }
    }

    /// Validates the request, asks the model once, then lets the pipeline
    /// recover whatever it can. A failed model call still reaches synthesis.
    pub async fn generate_quiz(
        &self,
        request: GenerateQuizRequest,
    ) -> AppResult<GenerateQuizResponse> {
        request.validate()?;
        if !request.has_enough_content() {
            return Err(AppError::ValidationError(
                "Content too short; please provide more text.".to_string(),
            ));
        }

        let params = request.to_params();
        log::info!(
            "generating {} {} questions from {} chars of {:?} content",
            params.num_questions,
            params.difficulty,
            params.content.chars().count(),
            request.source_type
        );

        let generation = self.pipeline.generation_request(&params);
        let raw = match self.pipeline.gateway().generate(&generation).await {
            Ok(raw) => Some(raw),
            Err(err) => {
                log::warn!(
                    "{} generation call failed ({}): {}",
                    self.pipeline.gateway().name(),
                    err.code(),
                    err
                );
                None
            }
        };

        let questions = self.pipeline.generate(raw.as_deref(), &params).await?;

        Ok(GenerateQuizResponse::new(
            request.source_type,
            request.source_label,
            params.difficulty,
            questions,
        ))
    }
}
