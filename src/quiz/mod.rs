pub mod clock;
pub mod daily_sets;
pub mod distractors;
pub mod evaluator;
pub mod generator;
pub mod observer;
pub mod question;
pub mod results;
pub mod session;
pub mod templates;

pub use clock::{Clock, ManualClock, SystemClock};
pub use daily_sets::{builtin_daily_sets, generate_daily_set, DailyQuestionSpec, DailySet};
pub use evaluator::{evaluate, fill_blank_matches, is_close_match};
pub use generator::{
    generate_daily_quiz, generate_final_quiz, generate_quick_quiz, generate_quiz,
    standard_question_count, QuestionGenerator, QuizMode, QuizPlan, FINAL_DISTRIBUTION,
};
pub use observer::{NoopObserver, QuizObserver};
pub use question::{
    Difficulty, MatchItem, Question, QuestionKind, QuestionType, SortCategory, SortItem,
    SubmittedAnswer,
};
pub use results::{percentage, AnswerRecord, QuizResults, ScoringMode};
pub use session::{QuizSession, SessionState, SubmitOutcome};
pub use templates::{BlankTemplate, ChoiceTemplate, MatchTemplate, SortTheme};
