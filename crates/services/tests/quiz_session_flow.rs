use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{AnswerEvent, Difficulty, QuizSettings};
use quiz_core::time::fixed_clock;
use services::{Phase, QuizEvent, QuizService};
use storage::JsonQuestionBank;

const BANK: &str = r#"{
    "questions": {
        "easy": [
            { "question": "2 + 2?", "options": ["4", "3", "5", "22"], "answer": "4",
              "explanation": "Two pairs make four." },
            { "question": "Opposite of up?", "options": ["down", "left", "right", "in"], "answer": "down" }
        ],
        "medium": [],
        "hard": [
            { "question": "Square root of 144?", "options": ["12", "14", "16", "11"], "answer": "12" }
        ]
    }
}"#;

fn service(seed: u64) -> QuizService {
    let bank = JsonQuestionBank::from_json_str(BANK).unwrap();
    QuizService::new(fixed_clock(), Arc::new(bank), QuizSettings::default()).with_seed(Some(seed))
}

#[test]
fn skips_empty_medium_tier_and_counts_three_questions() {
    let (mut engine, mut events) = service(1).start_session();
    let mut tiers_started = Vec::new();

    loop {
        for event in events.drain(..) {
            if let QuizEvent::TierStarted { tier, .. } = event {
                tiers_started.push(tier);
            }
        }
        if engine.is_finished() {
            break;
        }
        events = match engine.phase() {
            Phase::AwaitingAnswer => {
                let correct = engine.current_question().unwrap().correct_option().to_owned();
                engine.submit_answer(AnswerEvent::Chosen(correct))
            }
            _ => engine.tick(Duration::from_millis(250)),
        };
    }

    assert_eq!(tiers_started, vec![Difficulty::easy(), Difficulty::hard()]);
    let result = engine.result().unwrap();
    assert_eq!(result.total_questions_seen(), 3);
    assert_eq!(result.correct_count(), 3);
}

#[test]
fn score_never_exceeds_questions_seen() {
    for seed in 0..20 {
        let (mut engine, _) = service(seed).start_session();
        let mut step = 0_u64;
        while !engine.is_finished() {
            match (engine.phase(), step % 4) {
                (Phase::AwaitingAnswer, 0) => {
                    let label = engine
                        .question_view()
                        .unwrap()
                        .visible_labels()
                        .next()
                        .unwrap()
                        .to_owned();
                    engine.submit_answer(AnswerEvent::Chosen(label));
                }
                (Phase::AwaitingAnswer, 1) => {
                    engine.use_hint();
                }
                _ => {
                    engine.tick(Duration::from_millis(700));
                }
            }
            assert!(engine.correct_count() <= engine.total_questions_seen());
            step += 1;
        }
        let result = engine.result().unwrap();
        assert_eq!(result.total_questions_seen(), 3);
        assert!(result.correct_count() <= 3);
    }
}

#[test]
fn correct_answer_with_explanation_holds_longer() {
    let settings = QuizSettings::default()
        .with_explanation_duration(Duration::from_secs(3))
        .unwrap();
    let bank = JsonQuestionBank::from_json_str(BANK).unwrap();
    let svc = QuizService::new(fixed_clock(), Arc::new(bank), settings).with_seed(Some(5));
    let (mut engine, _) = svc.start_session();

    let mut holds = Vec::new();
    while engine.phase() != Phase::Complete {
        let question = engine.current_question().unwrap().clone();
        let events = engine.submit_answer(AnswerEvent::chosen(question.correct_option()));
        for event in events {
            if let QuizEvent::FeedbackShown(view) = event {
                assert!(view.chosen_is_correct);
                holds.push((question.explanation().is_some(), view.hold));
            }
        }
        let hold = engine.feedback_remaining().unwrap();
        engine.tick(hold);
    }

    assert!(holds.contains(&(true, Duration::from_secs(3))));
    assert!(
        holds
            .iter()
            .filter(|(has_explanation, _)| !has_explanation)
            .all(|(_, hold)| *hold == Duration::from_millis(500))
    );
}

#[test]
fn timeout_is_scored_incorrect() {
    let (mut engine, _) = service(3).start_session();
    let events = engine.tick(Duration::from_secs(11));
    let [QuizEvent::FeedbackShown(view)] = events.as_slice() else {
        panic!("expected feedback, got {events:?}");
    };
    assert!(view.timed_out);
    assert!(!view.chosen_is_correct);
    assert_eq!(engine.correct_count(), 0);
    assert_eq!(engine.total_questions_seen(), 1);
}
