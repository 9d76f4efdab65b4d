pub mod catalog;
pub mod progress;
pub mod quiz;
pub mod storage;

// Re-export commonly used types for convenience.
pub use catalog::{Catalog, Element, ElementLookup, Schedule};
pub use progress::{Achievement, DayCompletion, QuizStats, UserProgress};
pub use quiz::{
    Difficulty, Question, QuestionKind, QuizMode, QuizPlan, QuizResults, QuizSession,
    SubmitOutcome, SubmittedAnswer,
};
pub use storage::{AppConfig, HistoryStore, Persistence, Workspace};
