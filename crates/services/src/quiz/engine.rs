use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use quiz_core::model::{AnswerEvent, Difficulty, Question, QuizSettings, SessionResult};
use quiz_core::{Clock, Countdown};
use storage::QuestionBank;
use tracing::{debug, info, warn};

use super::hint::HintAllowance;
use super::progress::QuizProgress;
use super::shuffle::RoundShuffler;
use super::view::{FeedbackView, OptionSlot, QuestionView, QuizEvent};

//
// ─── PHASE ─────────────────────────────────────────────────────────────────────
//

/// State of the quiz state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A question is on screen and its timer is running.
    AwaitingAnswer,
    /// Correctness (and explanation) is on screen until the feedback deadline.
    ShowingFeedback,
    /// Every tier has been played; the session result was emitted.
    Complete,
    /// Torn down by the host before completion. No result is emitted.
    Abandoned,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Complete | Phase::Abandoned)
    }
}

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

/// The tier currently being played: its shuffled questions and a cursor.
#[derive(Debug, Clone)]
struct Round {
    difficulty: Difficulty,
    questions: Vec<Question>,
    index: usize,
}

impl Round {
    fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Tiered quiz state machine.
///
/// The engine is clock-agnostic: question timers and feedback deadlines only
/// move when the host calls [`QuizEngine::tick`]. Every stimulus returns the
/// events it produced, in order. Stimuli that are not legal in the current
/// phase (late clicks, hints with none left) are ignored and return no events.
pub struct QuizEngine {
    bank: Arc<dyn QuestionBank>,
    settings: QuizSettings,
    clock: Clock,
    shuffler: RoundShuffler,
    hints: HintAllowance,
    timer: Countdown,
    next_tier: usize,
    round: Option<Round>,
    options: Vec<OptionSlot>,
    phase: Phase,
    feedback_remaining: Duration,
    total_questions_seen: u32,
    correct_count: u32,
    started_at: DateTime<Utc>,
    result: Option<SessionResult>,
}

impl QuizEngine {
    /// Start a session: load the first non-empty tier and show its first question.
    ///
    /// When every tier is empty the engine goes straight to `Complete` with an
    /// empty result. The returned events describe the initial state.
    pub fn start(
        bank: Arc<dyn QuestionBank>,
        settings: QuizSettings,
        clock: Clock,
        shuffler: RoundShuffler,
    ) -> (Self, Vec<QuizEvent>) {
        let hints = HintAllowance::new(settings.hints_per_session());
        let mut engine = Self {
            bank,
            settings,
            clock,
            shuffler,
            hints,
            timer: Countdown::new(),
            next_tier: 0,
            round: None,
            options: Vec::new(),
            phase: Phase::AwaitingAnswer,
            feedback_remaining: Duration::ZERO,
            total_questions_seen: 0,
            correct_count: 0,
            started_at: clock.now(),
            result: None,
        };

        let mut events = Vec::new();
        engine.load_next_difficulty(&mut events);
        (engine, events)
    }

    //
    // ─── STIMULI ────────────────────────────────────────────────────────────
    //

    /// Answer the active question.
    ///
    /// Ignored outside `AwaitingAnswer`, and ignored when the chosen label is
    /// not one of the currently visible options.
    pub fn submit_answer(&mut self, answer: AnswerEvent) -> Vec<QuizEvent> {
        if self.phase != Phase::AwaitingAnswer {
            debug!(phase = ?self.phase, "answer ignored outside AwaitingAnswer");
            return Vec::new();
        }
        if let AnswerEvent::Chosen(label) = &answer {
            if !self.options.iter().any(|o| o.visible && o.label == *label) {
                debug!(label = %label, "answer ignored: not a visible option");
                return Vec::new();
            }
        }

        let mut events = Vec::new();
        self.evaluate(&answer, &mut events);
        events
    }

    /// Spend a hint on the active question, hiding up to two distractors.
    pub fn use_hint(&mut self) -> Vec<QuizEvent> {
        if self.phase != Phase::AwaitingAnswer {
            debug!(phase = ?self.phase, "hint ignored outside AwaitingAnswer");
            return Vec::new();
        }
        if !self.hints.is_available() {
            debug!("hint ignored: none remaining");
            return Vec::new();
        }
        let Some(correct) = self.current_question().map(|q| q.correct_option().to_owned()) else {
            return Vec::new();
        };

        let targets =
            HintAllowance::pick_hint_targets(&self.options, &correct, self.shuffler.rng_mut());
        self.hints.consume();

        let mut hidden = Vec::with_capacity(targets.len());
        for index in targets {
            if let Some(slot) = self.options.get_mut(index) {
                slot.visible = false;
                hidden.push(index);
            }
        }
        info!(hidden = hidden.len(), remaining = self.hints.remaining(), "hint used");

        vec![QuizEvent::HintApplied {
            hidden,
            options: self.options.clone(),
            hints_remaining: self.hints.remaining(),
        }]
    }

    /// Advance the clock of the current phase by `delta`.
    ///
    /// While answering this drives the question timer (expiry counts as a
    /// timed-out answer); while showing feedback it drives the feedback
    /// deadline. Time left over after a phase ends is not carried into the next.
    pub fn tick(&mut self, delta: Duration) -> Vec<QuizEvent> {
        let mut events = Vec::new();
        match self.phase {
            Phase::AwaitingAnswer => {
                if self.timer.tick(delta).expired {
                    info!("time's up");
                    self.evaluate(&AnswerEvent::TimedOut, &mut events);
                }
            }
            Phase::ShowingFeedback => {
                self.feedback_remaining = self.feedback_remaining.saturating_sub(delta);
                if self.feedback_remaining.is_zero() {
                    self.advance(&mut events);
                }
            }
            Phase::Complete | Phase::Abandoned => {}
        }
        events
    }

    /// Tear the session down without producing a result.
    ///
    /// Honored in any non-terminal phase, including during feedback.
    pub fn abandon(&mut self) -> Vec<QuizEvent> {
        if self.phase.is_terminal() {
            return Vec::new();
        }
        self.timer.cancel();
        self.feedback_remaining = Duration::ZERO;
        self.phase = Phase::Abandoned;
        info!(
            answered = self.total_questions_seen,
            correct = self.correct_count,
            "quiz abandoned"
        );
        vec![QuizEvent::Abandoned]
    }

    //
    // ─── TRANSITIONS ────────────────────────────────────────────────────────
    //

    /// Move to the next tier that has questions, or complete the session.
    fn load_next_difficulty(&mut self, events: &mut Vec<QuizEvent>) {
        while let Some(tier) = self.settings.tiers().get(self.next_tier).cloned() {
            self.next_tier += 1;

            let questions = self.bank.get_questions(&tier);
            if questions.is_empty() {
                debug!(tier = %tier, "no questions, moving to next difficulty");
                events.push(QuizEvent::TierSkipped(tier));
                continue;
            }

            let questions = self.shuffler.shuffle_questions(questions);
            info!(tier = %tier, count = questions.len(), "tier started");
            events.push(QuizEvent::TierStarted {
                tier: tier.clone(),
                questions: questions.len(),
            });
            self.round = Some(Round {
                difficulty: tier,
                questions,
                index: 0,
            });
            self.start_question(events);
            return;
        }

        self.round = None;
        self.options.clear();
        self.complete(events);
    }

    /// Entry action of `AwaitingAnswer`.
    fn start_question(&mut self, events: &mut Vec<QuizEvent>) {
        let Some(question) = self.round.as_ref().and_then(Round::current) else {
            return;
        };
        self.options = self
            .shuffler
            .shuffle_options(question)
            .into_iter()
            .map(OptionSlot::visible)
            .collect();

        self.timer.start(self.settings.time_per_question());
        self.feedback_remaining = Duration::ZERO;
        self.phase = Phase::AwaitingAnswer;

        if let Some(view) = self.question_view() {
            events.push(QuizEvent::QuestionShown(view));
        }
    }

    /// Score the active question and enter `ShowingFeedback`.
    fn evaluate(&mut self, answer: &AnswerEvent, events: &mut Vec<QuizEvent>) {
        self.timer.cancel();
        let Some(question) = self.round.as_ref().and_then(Round::current) else {
            return;
        };

        let integrity_fault = !question.has_matching_option();
        if integrity_fault {
            warn!(
                question = question.text(),
                correct = question.correct_option(),
                "correct option matches none of the options; scoring as incorrect"
            );
        }

        let chosen_is_correct = answer
            .chosen_value()
            .is_some_and(|label| question.is_correct(label));
        let explanation_text = question.explanation().map(str::to_owned);
        let hold = self.settings.feedback_hold(explanation_text.is_some());

        let view = FeedbackView {
            chosen: answer.chosen_value().map(str::to_owned),
            chosen_is_correct,
            timed_out: answer.via_timeout(),
            correct_option_label: question.correct_option().to_owned(),
            explanation_text,
            integrity_fault,
            hold,
        };

        self.total_questions_seen = self.total_questions_seen.saturating_add(1);
        if chosen_is_correct {
            self.correct_count = self.correct_count.saturating_add(1);
        }
        debug!(
            correct = chosen_is_correct,
            timed_out = view.timed_out,
            score = self.correct_count,
            seen = self.total_questions_seen,
            "answer evaluated"
        );

        self.feedback_remaining = hold;
        self.phase = Phase::ShowingFeedback;
        events.push(QuizEvent::FeedbackShown(view));
    }

    /// Exit action of `ShowingFeedback`.
    fn advance(&mut self, events: &mut Vec<QuizEvent>) {
        if let Some(round) = self.round.as_mut() {
            round.index += 1;
            if round.index < round.questions.len() {
                self.start_question(events);
                return;
            }
        }
        self.load_next_difficulty(events);
    }

    fn complete(&mut self, events: &mut Vec<QuizEvent>) {
        self.timer.cancel();
        self.phase = Phase::Complete;
        if self.result.is_some() {
            return;
        }

        let completed_at = self.clock.now().max(self.started_at);
        match SessionResult::new(
            self.correct_count,
            self.total_questions_seen,
            self.started_at,
            completed_at,
        ) {
            Ok(result) => {
                info!(%result, "quiz completed");
                self.result = Some(result.clone());
                events.push(QuizEvent::Completed(result));
            }
            Err(err) => warn!(error = %err, "could not build session result"),
        }
    }

    //
    // ─── QUERIES ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// The question being answered or just answered.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.phase.is_terminal() {
            return None;
        }
        self.round.as_ref().and_then(Round::current)
    }

    /// Options of the current question in display order.
    #[must_use]
    pub fn options(&self) -> &[OptionSlot] {
        &self.options
    }

    /// Snapshot for rendering; only available while answering.
    #[must_use]
    pub fn question_view(&self) -> Option<QuestionView> {
        if self.phase != Phase::AwaitingAnswer {
            return None;
        }
        let round = self.round.as_ref()?;
        let question = round.current()?;
        Some(QuestionView {
            tier: round.difficulty.clone(),
            position: round.index + 1,
            tier_len: round.questions.len(),
            question_text: question.text().to_owned(),
            options: self.options.clone(),
            time_remaining: self.timer.remaining(),
            seconds_left: self.timer.whole_seconds_left(),
            hint_available: self.hints.is_available(),
            hints_remaining: self.hints.remaining(),
        })
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let round = self.round.as_ref().filter(|_| !self.phase.is_terminal());
        QuizProgress {
            phase: self.phase,
            tier: round.map(|r| r.difficulty.clone()),
            tier_position: round.map_or(0, |r| r.index + 1),
            tier_len: round.map_or(0, |r| r.questions.len()),
            answered: self.total_questions_seen,
            correct: self.correct_count,
            hints_remaining: self.hints.remaining(),
        }
    }

    /// Index into `QuizSettings::tiers` of the tier being played.
    #[must_use]
    pub fn difficulty_index(&self) -> Option<usize> {
        self.round.as_ref().map(|_| self.next_tier - 1)
    }

    #[must_use]
    pub fn time_remaining(&self) -> Duration {
        self.timer.remaining()
    }

    /// Time left on the feedback deadline while in `ShowingFeedback`.
    #[must_use]
    pub fn feedback_remaining(&self) -> Option<Duration> {
        (self.phase == Phase::ShowingFeedback).then_some(self.feedback_remaining)
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u32 {
        self.hints.remaining()
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_questions_seen(&self) -> u32 {
        self.total_questions_seen
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The session result, once `Complete`.
    #[must_use]
    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }
}

impl fmt::Debug for QuizEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizEngine")
            .field("phase", &self.phase)
            .field("next_tier", &self.next_tier)
            .field("round", &self.round.as_ref().map(|r| (&r.difficulty, r.index)))
            .field("total_questions_seen", &self.total_questions_seen)
            .field("correct_count", &self.correct_count)
            .field("hints_remaining", &self.hints.remaining())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
