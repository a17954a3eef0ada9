pub mod payload;
pub mod request;
pub mod response;

pub use payload::{PayloadQuestion, QuizPayload};
pub use request::{GenerateQuizRequest, SourceKind};
pub use response::{GenerateQuizResponse, HealthResponse};
