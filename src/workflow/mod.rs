pub mod presentation;
pub mod quiz_session;
pub mod scoring;

pub use presentation::ShuffledPresentation;
pub use quiz_session::{
    AnswerState, QuizSession, QuizSnapshot, SessionError, SessionOutcome, SessionPhase,
};
pub use scoring::{percentage, Encouragement};
