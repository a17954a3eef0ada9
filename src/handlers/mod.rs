pub mod quiz_handler;

pub use quiz_handler::{configure, generate_quiz, health_check};
