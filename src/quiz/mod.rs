pub mod countdown;
pub mod engine;
pub mod filter;

pub use countdown::{
    Countdown,
    CountdownEvent,
};
pub use engine::{
    grade,
    Grade,
    Outcome,
    Phase,
    Question,
    QuestionStart,
    QuizEngine,
    SlotView,
    DEFAULT_COUNTDOWN_SECS,
    EMPTY_POOL_MESSAGE,
};
pub use filter::{
    derive_pool,
    LevelFilter,
};
