use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use quiz_forge::{
    app_state::AppState,
    config::Config,
    errors::PipelineError,
    handlers,
    services::{
        model_gateway::{GenerationRequest, ModelGateway},
        pipeline::{PipelineSettings, QuizPipeline},
        quiz_service::QuizService,
    },
};

const CONTENT: &str = "The Roman aqueducts carried fresh water into cities from distant springs and rivers. \
    Engineers relied on a very gentle downhill gradient so gravity alone could move the water. \
    Many aqueduct channels were built underground to protect the supply from contamination and attack. \
    The Pont du Gard in southern France is one of the best preserved aqueduct bridges today. \
    Public fountains and bathhouses received a large share of the water delivered to Rome. \
    Lead pipes distributed water inside the city, although most flowed through stone channels.";

/// Replays canned gateway replies in order and records every prompt it saw.
struct ScriptedGateway {
    replies: Mutex<VecDeque<Result<String, PipelineError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGateway {
    fn new(replies: Vec<Result<String, PipelineError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelGateway for ScriptedGateway {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, PipelineError> {
        self.prompts.lock().unwrap().push(request.prompt.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(PipelineError::GatewayError("no scripted reply left".into())))
    }
}

fn state_with(gateway: Arc<ScriptedGateway>) -> AppState {
    let pipeline = QuizPipeline::new(gateway, PipelineSettings::default());
    AppState {
        quiz_service: Arc::new(QuizService::new(pipeline)),
        config: Arc::new(Config::from_env()),
    }
}

fn model_reply(count: usize) -> String {
    let questions: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "question": format!("Which fact number {} is true?", i),
                "options": {"A": "first", "B": "second", "C": "third", "D": "fourth"},
                "answer": "third",
            })
        })
        .collect();
    format!("```json\n{}\n```", json!({ "questions": questions }))
}

#[actix_web::test]
async fn test_generate_quiz_returns_model_questions() {
    let gateway = ScriptedGateway::new(vec![Ok(model_reply(5))]);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(gateway.clone())))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate-quiz")
        .set_json(json!({ "content": CONTENT, "num_questions": 5, "difficulty": "HARD" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["num_questions"], 5);
    assert_eq!(body["difficulty"], "hard");
    assert_eq!(body["questions"][0]["options"], json!(["first", "second", "third", "fourth"]));
    assert_eq!(body["questions"][0]["correct_answer"], "C");
    assert_eq!(gateway.calls(), 1);
}

#[actix_web::test]
async fn test_generate_quiz_falls_back_to_synthesis() {
    let gateway = ScriptedGateway::new(vec![
        Ok("I'm sorry, I can only chat about the weather.".to_string()),
        Err(PipelineError::GatewayUnreachable("connection reset".into())),
    ]);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(gateway.clone())))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate-quiz")
        .set_json(json!({ "content": CONTENT, "num_questions": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 5);
    for q in questions {
        assert_eq!(q["options"].as_array().unwrap().len(), 4);
        assert!(["A", "B", "C", "D"].contains(&q["correct_answer"].as_str().unwrap()));
    }
    assert_eq!(gateway.calls(), 2);
}

#[actix_web::test]
async fn test_generate_quiz_rejects_short_content() {
    let gateway = ScriptedGateway::new(vec![]);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(gateway.clone())))
            .configure(handlers::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/generate-quiz")
        .set_json(json!({ "content": "Too short.", "num_questions": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(gateway.calls(), 0);
}

#[actix_web::test]
async fn test_generate_quiz_reports_total_failure() {
    let gateway = ScriptedGateway::new(vec![
        Err(PipelineError::GatewayUnreachable("down".into())),
    ]);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(gateway)))
            .configure(handlers::configure),
    )
    .await;

    let thin = "no sentence boundaries here just a long run of words ".repeat(3);
    let req = test::TestRequest::post()
        .uri("/generate-quiz")
        .set_json(json!({ "content": thin, "num_questions": 5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], "GENERATION_FAILED");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("unable to generate quiz from provided content"));
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(App::new().configure(handlers::configure)).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "status": "ok" }));
}
