use services::{FeedbackView, QuestionView, QuizEvent};

/// A line of player input, already resolved against the question on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Answer(String),
    Hint,
    Quit,
}

/// Plain-text renderer for quiz events.
///
/// Keeps the last question on screen so numbered input can be mapped back
/// to option labels.
#[derive(Debug, Default)]
pub struct Renderer {
    current: Option<QuestionView>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, event: &QuizEvent) {
        match event {
            QuizEvent::TierStarted { tier, questions } => {
                println!();
                println!("=== {} ({questions} questions) ===", tier.as_str().to_uppercase());
            }
            QuizEvent::TierSkipped(tier) => {
                println!("(no {tier} questions, moving on)");
            }
            QuizEvent::QuestionShown(view) => {
                self.current = Some(view.clone());
                self.print_question();
            }
            QuizEvent::HintApplied {
                hidden,
                options,
                hints_remaining,
            } => {
                let removed = hidden
                    .iter()
                    .filter_map(|&index| options.get(index))
                    .map(|slot| slot.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                if let Some(view) = self.current.as_mut() {
                    view.options.clone_from(options);
                    view.hints_remaining = *hints_remaining;
                    view.hint_available = *hints_remaining > 0;
                }
                println!("Hint used: removed {removed}. Hints left: {hints_remaining}");
                self.print_question();
            }
            QuizEvent::FeedbackShown(view) => {
                self.current = None;
                print_feedback(view);
            }
            QuizEvent::Completed(result) => {
                println!();
                println!("{result} ({:.0}%)", result.score_ratio() * 100.0);
            }
            QuizEvent::Abandoned => println!("Quiz abandoned."),
        }
    }

    /// Resolve a line of input. Numbers pick among visible options; anything
    /// else is taken as a literal label.
    pub fn interpret(&self, line: &str) -> Option<Input> {
        let trimmed = line.trim();
        match trimmed {
            "" => None,
            "h" | "hint" => Some(Input::Hint),
            "q" | "quit" => Some(Input::Quit),
            _ => {
                let view = self.current.as_ref()?;
                if let Ok(n) = trimmed.parse::<usize>() {
                    return view
                        .visible_labels()
                        .nth(n.checked_sub(1)?)
                        .map(|label| Input::Answer(label.to_owned()));
                }
                Some(Input::Answer(trimmed.to_owned()))
            }
        }
    }

    fn print_question(&self) {
        let Some(view) = self.current.as_ref() else {
            return;
        };
        println!();
        println!(
            "[{} {}/{}] {}",
            view.tier, view.position, view.tier_len, view.question_text
        );
        for (index, label) in view.visible_labels().enumerate() {
            println!("  {}. {label}", index + 1);
        }
        let hint = if view.hint_available { "  [h] hint" } else { "" };
        println!("{}s to answer{hint}  [q] quit", view.seconds_left);
    }
}

fn print_feedback(view: &FeedbackView) {
    if view.timed_out {
        println!("Time's up! The answer was: {}", view.correct_option_label);
    } else if view.chosen_is_correct {
        println!("Correct!");
    } else {
        println!("Incorrect. The answer was: {}", view.correct_option_label);
    }
    if let Some(explanation) = view.explanation_text.as_deref() {
        println!("  {explanation}");
    }
}
