/// Input to answer evaluation.
///
/// A timeout never carries a chosen label, so "timed out but picked X" cannot
/// be expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerEvent {
    /// The player picked the option with this label.
    Chosen(String),
    /// The question timer ran out.
    TimedOut,
}

impl AnswerEvent {
    #[must_use]
    pub fn chosen(label: impl Into<String>) -> Self {
        Self::Chosen(label.into())
    }

    #[must_use]
    pub fn chosen_value(&self) -> Option<&str> {
        match self {
            Self::Chosen(label) => Some(label),
            Self::TimedOut => None,
        }
    }

    #[must_use]
    pub fn via_timeout(&self) -> bool {
        matches!(self, Self::TimedOut)
    }
}
