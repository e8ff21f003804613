use std::time::Duration;

use quiz_core::model::{AnswerEvent, SessionResult};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use super::engine::QuizEngine;
use super::view::QuizEvent;
use crate::error::QuizError;

const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// User actions forwarded to a running quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizCommand {
    Answer(String),
    UseHint,
    Abandon,
}

/// Cloneable sender side of a running quiz.
#[derive(Debug, Clone)]
pub struct QuizHandle {
    tx: mpsc::UnboundedSender<QuizCommand>,
}

impl QuizHandle {
    /// # Errors
    ///
    /// Returns `QuizError::DriverClosed` once the session has ended.
    pub fn answer(&self, label: impl Into<String>) -> Result<(), QuizError> {
        self.send(QuizCommand::Answer(label.into()))
    }

    /// # Errors
    ///
    /// Returns `QuizError::DriverClosed` once the session has ended.
    pub fn use_hint(&self) -> Result<(), QuizError> {
        self.send(QuizCommand::UseHint)
    }

    /// # Errors
    ///
    /// Returns `QuizError::DriverClosed` once the session has ended.
    pub fn abandon(&self) -> Result<(), QuizError> {
        self.send(QuizCommand::Abandon)
    }

    fn send(&self, command: QuizCommand) -> Result<(), QuizError> {
        self.tx.send(command).map_err(|_| QuizError::DriverClosed)
    }
}

/// A quiz running on its own task.
#[derive(Debug)]
pub struct RunningQuiz {
    pub commands: QuizHandle,
    pub events: mpsc::UnboundedReceiver<QuizEvent>,
    /// Resolves to the session result, or `None` if the quiz was abandoned.
    pub task: JoinHandle<Option<SessionResult>>,
}

/// Runs a `QuizEngine` as a single-task actor.
///
/// Commands and clock ticks are handled one at a time on the same task, so
/// no two transitions ever overlap. Dropping every `QuizHandle` abandons the
/// session.
#[derive(Debug)]
pub struct QuizDriver {
    engine: QuizEngine,
    tick_interval: Duration,
}

impl QuizDriver {
    #[must_use]
    pub fn new(engine: QuizEngine) -> Self {
        Self {
            engine,
            tick_interval: DEFAULT_TICK,
        }
    }

    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        if !tick_interval.is_zero() {
            self.tick_interval = tick_interval;
        }
        self
    }

    /// Spawn the actor on the current tokio runtime.
    ///
    /// `initial` events (from starting the session) are delivered first.
    #[must_use]
    pub fn spawn(self, initial: Vec<QuizEvent>) -> RunningQuiz {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        for event in initial {
            let _ = event_tx.send(event);
        }

        let task = tokio::spawn(self.run(cmd_rx, event_tx));
        RunningQuiz {
            commands: QuizHandle { tx: cmd_tx },
            events: event_rx,
            task,
        }
    }

    async fn run(
        mut self,
        mut cmd_rx: mpsc::UnboundedReceiver<QuizCommand>,
        event_tx: mpsc::UnboundedSender<QuizEvent>,
    ) -> Option<SessionResult> {
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();

        while !self.engine.is_finished() {
            let events = tokio::select! {
                command = cmd_rx.recv() => match command {
                    Some(QuizCommand::Answer(label)) => {
                        self.engine.submit_answer(AnswerEvent::Chosen(label))
                    }
                    Some(QuizCommand::UseHint) => self.engine.use_hint(),
                    Some(QuizCommand::Abandon) => self.engine.abandon(),
                    None => {
                        debug!("all quiz handles dropped");
                        self.engine.abandon()
                    }
                },
                now = ticker.tick() => {
                    let delta = now.saturating_duration_since(last);
                    last = now;
                    self.engine.tick(delta)
                }
            };

            for event in events {
                let _ = event_tx.send(event);
            }
        }

        self.engine.result().cloned()
    }
}
