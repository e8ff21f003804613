use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{Difficulty, Question, QuizSettings};
use quiz_core::time::fixed_clock;
use services::{QuizDriver, QuizEvent, QuizService};
use storage::InMemoryQuestionBank;

fn service(easy: usize, hard: usize) -> QuizService {
    let tier = |prefix: &str, n: usize| {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("{prefix} {i}"),
                    vec!["right".into(), "wrong1".into(), "wrong2".into()],
                    "right",
                    "",
                )
                .unwrap()
            })
            .collect::<Vec<_>>()
    };
    let bank = InMemoryQuestionBank::new()
        .with_tier(Difficulty::easy(), tier("easy", easy))
        .with_tier(Difficulty::hard(), tier("hard", hard));
    let settings = QuizSettings::default()
        .with_time_per_question(Duration::from_secs(1))
        .unwrap();
    QuizService::new(fixed_clock(), Arc::new(bank), settings).with_seed(Some(9))
}

#[tokio::test(start_paused = true)]
async fn unanswered_quiz_times_out_to_completion() {
    let (engine, initial) = service(2, 1).start_session();
    let mut running = QuizDriver::new(engine)
        .with_tick_interval(Duration::from_millis(50))
        .spawn(initial);

    let result = (&mut running.task).await.unwrap().expect("quiz completes");
    assert_eq!(result.total_questions_seen(), 3);
    assert_eq!(result.correct_count(), 0);

    let mut timeouts = 0;
    let mut completed = 0;
    while let Ok(event) = running.events.try_recv() {
        match event {
            QuizEvent::FeedbackShown(view) if view.timed_out => timeouts += 1,
            QuizEvent::Completed(_) => completed += 1,
            _ => {}
        }
    }
    assert_eq!(timeouts, 3);
    assert_eq!(completed, 1);
    assert!(running.commands.use_hint().is_err());
}

#[tokio::test(start_paused = true)]
async fn answering_through_the_handle_scores() {
    let (engine, initial) = service(2, 0).start_session();
    let mut running = QuizDriver::new(engine).spawn(initial);

    let mut answered = 0;
    while let Some(event) = running.events.recv().await {
        match event {
            QuizEvent::QuestionShown(_) => {
                running.commands.answer("right").unwrap();
                answered += 1;
            }
            QuizEvent::Completed(result) => {
                assert_eq!(result.correct_count(), 2);
                break;
            }
            _ => {}
        }
    }
    assert_eq!(answered, 2);
    let result = running.task.await.unwrap().unwrap();
    assert_eq!(result.to_string(), "Quiz Score: 2/2");
}

#[tokio::test(start_paused = true)]
async fn abandon_during_feedback_stops_without_result() {
    let (engine, initial) = service(3, 0).start_session();
    let mut running = QuizDriver::new(engine).spawn(initial);

    while let Some(event) = running.events.recv().await {
        match event {
            QuizEvent::QuestionShown(_) => running.commands.answer("wrong1").unwrap(),
            QuizEvent::FeedbackShown(view) => {
                assert!(!view.chosen_is_correct);
                running.commands.abandon().unwrap();
            }
            QuizEvent::Abandoned => break,
            QuizEvent::TierStarted { .. } => {}
            other => panic!("unexpected event {other:?}"),
        }
    }

    assert!(running.task.await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_abandons() {
    let (engine, initial) = service(1, 0).start_session();
    let running = QuizDriver::new(engine).spawn(initial);
    let services::RunningQuiz {
        commands,
        mut events,
        task,
    } = running;
    drop(commands);

    assert!(task.await.unwrap().is_none());
    let mut saw_abandon = false;
    while let Ok(event) = events.try_recv() {
        saw_abandon |= matches!(event, QuizEvent::Abandoned);
    }
    assert!(saw_abandon);
}

#[tokio::test(start_paused = true)]
async fn empty_bank_completes_immediately() {
    let (engine, initial) = service(0, 0).start_session();
    assert!(matches!(initial.last(), Some(QuizEvent::Completed(_))));

    let running = QuizDriver::new(engine).spawn(initial);
    let result = running.task.await.unwrap().unwrap();
    assert!(result.is_empty());
}
