pub mod difficulty;
pub mod mcq;

pub use difficulty::{Difficulty, QuizRequestParams};
pub use mcq::{public_questions, AnswerLetter, Mcq, PublicQuestion, OPTION_COUNT};
