#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{BankError, JsonQuestionBank, QuestionRecord};
pub use repository::{InMemoryQuestionBank, QuestionBank};
