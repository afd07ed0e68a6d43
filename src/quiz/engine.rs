use std::time::Instant;

use rand::Rng;

use super::countdown::{
    Countdown,
    CountdownEvent,
};
use crate::core::{
    normalize_form,
    FormSlot,
    Verb,
};

pub const EMPTY_POOL_MESSAGE: &str = "No verbs for the selected CEFR levels.";
pub const DEFAULT_COUNTDOWN_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong,
    Expired,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Correct => "Correct",
            Outcome::Wrong => "Wrong",
            Outcome::Expired => "Time's up!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No question because the pool is empty (also the state before the first question).
    Empty,
    Awaiting,
    Graded(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub verb: Verb,
    pub masked: FormSlot,
}

/// Result of grading the two typed slots against the verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub outcome: Outcome,
    /// Per slot, whether a typed answer was wrong. Always false for the prompt slot.
    pub mismatched: [bool; 3],
}

/// Compare normalized answers for every slot except the prompt.
pub fn grade(question: &Question, answers: &[String; 3]) -> Grade {
    let mut mismatched = [false; 3];
    for slot in FormSlot::ALL {
        if slot == question.masked {
            continue;
        }
        mismatched[slot.index()] = normalize_form(&answers[slot.index()]) != question.verb.form(slot);
    }

    let outcome = if mismatched.iter().any(|m| *m) { Outcome::Wrong } else { Outcome::Correct };
    Grade { outcome, mismatched }
}

/// How a slot should be drawn for the current phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotView {
    /// The shown form of the question.
    Prompt(String),
    /// A typed answer box. `editable` is false once the question is over.
    Input { placeholder: &'static str, editable: bool },
    /// A wrong answer replaced by the expected form.
    Revealed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStart {
    Started,
    EmptyPool,
}

pub struct QuizEngine {
    question: Option<Question>,
    phase: Phase,
    answers: [String; 3],
    mismatched: [bool; 3],
    countdown: Countdown,
    countdown_secs: u32,
}

impl QuizEngine {
    pub fn new(countdown_secs: u32) -> Self {
        let countdown_secs = countdown_secs.max(1);
        let mut countdown = Countdown::new();
        countdown.reset(countdown_secs);
        Self {
            question: None,
            phase: Phase::Empty,
            answers: Default::default(),
            mismatched: [false; 3],
            countdown,
            countdown_secs,
        }
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn countdown_secs(&self) -> u32 {
        self.countdown_secs
    }

    /// Takes effect from the next question.
    pub fn set_countdown_secs(&mut self, secs: u32) {
        self.countdown_secs = secs.max(1);
        if !self.countdown.is_running() && self.phase != Phase::Awaiting {
            self.countdown.reset(self.countdown_secs);
        }
    }

    /// Typed text for `slot`, only writable while an answer is awaited.
    pub fn answer_mut(&mut self, slot: FormSlot) -> Option<&mut String> {
        match self.phase {
            Phase::Awaiting if self.question.as_ref().is_some_and(|q| q.masked != slot) => {
                Some(&mut self.answers[slot.index()])
            }
            _ => None,
        }
    }

    pub fn answer(&self, slot: FormSlot) -> &str {
        &self.answers[slot.index()]
    }

    /// Draw a random verb and masked slot from `pool`.
    pub fn next_question<R: Rng + ?Sized>(
        &mut self,
        pool: &[Verb],
        rng: &mut R,
        now: Instant,
    ) -> QuestionStart {
        if pool.is_empty() {
            self.clear();
            return QuestionStart::EmptyPool;
        }

        let verb = pool[rng.random_range(0..pool.len())].clone();
        self.start_with(verb, rng, now);
        QuestionStart::Started
    }

    /// Ask about a specific verb, e.g. one picked from the bookmarks.
    pub fn start_with<R: Rng + ?Sized>(&mut self, verb: Verb, rng: &mut R, now: Instant) {
        let masked = FormSlot::ALL[rng.random_range(0..FormSlot::ALL.len())];
        self.question = Some(Question { verb, masked });
        self.phase = Phase::Awaiting;
        self.answers = Default::default();
        self.mismatched = [false; 3];
        self.countdown.start(self.countdown_secs, now);
    }

    /// Grade the typed answers. Returns `None` if no question is awaiting an answer.
    pub fn submit(&mut self) -> Option<Outcome> {
        if self.phase != Phase::Awaiting {
            return None;
        }
        self.countdown.stop();

        let question = self.question.as_ref()?;
        let result = grade(question, &self.answers);
        self.mismatched = result.mismatched;
        self.phase = Phase::Graded(result.outcome);
        Some(result.outcome)
    }

    /// Advance the countdown. Returns `Some(Outcome::Expired)` the one time it runs out.
    pub fn tick(&mut self, now: Instant) -> Option<Outcome> {
        if self.phase != Phase::Awaiting {
            return None;
        }
        match self.countdown.advance(now) {
            CountdownEvent::Expired => {
                self.phase = Phase::Graded(Outcome::Expired);
                Some(Outcome::Expired)
            }
            CountdownEvent::Idle | CountdownEvent::Ticked(_) => None,
        }
    }

    pub fn slot_view(&self, slot: FormSlot) -> Option<SlotView> {
        let question = self.question.as_ref()?;
        if slot == question.masked {
            return Some(SlotView::Prompt(question.verb.form(slot).to_string()));
        }

        let view = match self.phase {
            Phase::Graded(Outcome::Wrong) if self.mismatched[slot.index()] => {
                SlotView::Revealed(question.verb.form(slot).to_string())
            }
            Phase::Awaiting => SlotView::Input { placeholder: slot.label(), editable: true },
            _ => SlotView::Input { placeholder: slot.label(), editable: false },
        };
        Some(view)
    }

    pub fn feedback(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Empty => Some(EMPTY_POOL_MESSAGE),
            Phase::Awaiting => None,
            Phase::Graded(outcome) => Some(outcome.message()),
        }
    }

    fn clear(&mut self) {
        self.question = None;
        self.phase = Phase::Empty;
        self.answers = Default::default();
        self.mismatched = [false; 3];
        self.countdown.stop();
        self.countdown.reset(self.countdown_secs);
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECS)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    fn go() -> Verb {
        Verb::new("go", "went", "gone", &["A1"])
    }

    fn question(masked: FormSlot) -> Question {
        Question { verb: go(), masked }
    }

    fn answers(values: [&str; 3]) -> [String; 3] {
        values.map(String::from)
    }

    #[test]
    fn test_grading_ignores_case_and_whitespace() {
        let result = grade(&question(FormSlot::Infinitive), &answers(["", " Went ", "GONE"]));
        assert_eq!(result.outcome, Outcome::Correct);
        assert_eq!(result.mismatched, [false; 3]);
    }

    #[test]
    fn test_grading_flags_each_wrong_slot() {
        let result = grade(&question(FormSlot::PastSimple), &answers(["go", "anything", "goed"]));
        assert_eq!(result.outcome, Outcome::Wrong);
        assert_eq!(result.mismatched, [false, false, true]);
    }

    #[test]
    fn test_next_question_on_empty_pool() {
        let mut engine = QuizEngine::new(10);
        let mut rng = StdRng::seed_from_u64(1);
        let start = engine.next_question(&[], &mut rng, Instant::now());

        assert_eq!(start, QuestionStart::EmptyPool);
        assert_eq!(engine.phase(), Phase::Empty);
        assert!(engine.question().is_none());
        assert!(!engine.countdown().is_running());
        assert_eq!(engine.feedback(), Some(EMPTY_POOL_MESSAGE));
    }

    #[test]
    fn test_next_question_masks_one_slot() {
        let pool = vec![go(), Verb::new("write", "wrote", "written", &["B1"])];
        let mut engine = QuizEngine::new(10);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            engine.next_question(&pool, &mut rng, Instant::now());
            let question = engine.question().unwrap().clone();
            assert!(pool.contains(&question.verb));
            assert_eq!(engine.phase(), Phase::Awaiting);
            assert!(engine.countdown().is_running());

            for slot in FormSlot::ALL {
                let view = engine.slot_view(slot).unwrap();
                if slot == question.masked {
                    assert_eq!(view, SlotView::Prompt(question.verb.form(slot).to_string()));
                } else {
                    assert_eq!(view, SlotView::Input { placeholder: slot.label(), editable: true });
                    assert!(engine.answer(slot).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_wrong_answer_reveals_only_mismatches() {
        let mut engine = QuizEngine::new(10);
        let mut rng = StdRng::seed_from_u64(3);
        engine.start_with(go(), &mut rng, Instant::now());
        let masked = engine.question().unwrap().masked;

        let open: Vec<FormSlot> = FormSlot::ALL.into_iter().filter(|s| *s != masked).collect();
        let (right, wrong) = (open[0], open[1]);
        *engine.answer_mut(right).unwrap() = format!(" {} ", go().form(right).to_uppercase());
        *engine.answer_mut(wrong).unwrap() = "nope".to_string();
        assert!(engine.answer_mut(masked).is_none());

        assert_eq!(engine.submit(), Some(Outcome::Wrong));
        assert_eq!(
            engine.slot_view(right),
            Some(SlotView::Input { placeholder: right.label(), editable: false })
        );
        assert_eq!(engine.slot_view(wrong), Some(SlotView::Revealed(go().form(wrong).to_string())));
        assert!(!engine.countdown().is_running());

        // Graded questions stay graded until the next one.
        assert_eq!(engine.submit(), None);
        assert!(engine.answer_mut(right).is_none());
    }

    #[test]
    fn test_typed_answers_are_normalized() {
        let mut engine = QuizEngine::new(10);
        let mut rng = StdRng::seed_from_u64(9);
        engine.start_with(go(), &mut rng, Instant::now());

        for (slot, typed) in FormSlot::ALL.into_iter().zip(["GO", "went ", " gone"]) {
            if let Some(answer) = engine.answer_mut(slot) {
                *answer = typed.to_string();
            }
        }
        assert_eq!(engine.submit(), Some(Outcome::Correct));
        assert_eq!(engine.feedback(), Some("Correct"));
    }

    #[test]
    fn test_countdown_expiry_is_terminal() {
        let start = Instant::now();
        let mut engine = QuizEngine::new(2);
        let mut rng = StdRng::seed_from_u64(5);
        engine.start_with(go(), &mut rng, start);

        assert_eq!(engine.tick(start + Duration::from_secs(1)), None);
        assert_eq!(engine.remaining_secs(), 1);
        assert_eq!(engine.tick(start + Duration::from_secs(2)), Some(Outcome::Expired));
        assert_eq!(engine.phase(), Phase::Graded(Outcome::Expired));
        assert_eq!(engine.feedback(), Some("Time's up!"));

        assert_eq!(engine.tick(start + Duration::from_secs(5)), None);
        assert_eq!(engine.submit(), None);
    }

    #[test]
    fn test_grading_before_expiry_cancels_countdown() {
        let start = Instant::now();
        let mut engine = QuizEngine::new(3);
        let mut rng = StdRng::seed_from_u64(11);
        engine.start_with(go(), &mut rng, start);

        engine.tick(start + Duration::from_secs(1));
        engine.submit();
        let remaining = engine.remaining_secs();

        assert_eq!(engine.tick(start + Duration::from_secs(10)), None);
        assert_eq!(engine.remaining_secs(), remaining);
        assert_eq!(engine.phase(), Phase::Graded(Outcome::Wrong));
    }

    #[test]
    fn test_restarting_same_verb_resets_state() {
        let start = Instant::now();
        let mut engine = QuizEngine::new(4);
        let mut rng = StdRng::seed_from_u64(21);
        engine.start_with(go(), &mut rng, start);
        engine.submit();

        engine.start_with(go(), &mut rng, start + Duration::from_secs(1));
        assert_eq!(engine.phase(), Phase::Awaiting);
        assert_eq!(engine.remaining_secs(), 4);
        assert_eq!(engine.feedback(), None);
        assert!(FormSlot::ALL.iter().all(|s| engine.answer(*s).is_empty()));
    }
}
