pub mod class;
pub mod envelope;
pub mod question;
pub mod question_set;
pub mod subject;

pub use class::Class;
pub use envelope::Envelope;
pub use question::{Choice, Question};
pub use question_set::QuestionSet;
pub use subject::Subject;
