use std::sync::Arc;

use crate::{
    config::Config,
    services::{model_gateway::build_gateway, pipeline::QuizPipeline, quiz_service::QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let gateway = build_gateway(&config);
        log::info!("using {} model gateway", gateway.name());

        let pipeline = QuizPipeline::new(gateway, config.pipeline_settings());
        let quiz_service = Arc::new(QuizService::new(pipeline));

        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}
