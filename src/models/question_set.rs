use super::Question;

/// Questions sharing one (class, subject) pair. Derived in memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionSet {
    pub class: String,
    pub subject: String,
    pub questions: Vec<Question>,
}

impl QuestionSet {
    pub fn key(&self) -> (&str, &str) {
        (&self.class, &self.subject)
    }

    /// Card caption: subject, class and question count.
    pub fn title(&self) -> String {
        format!(
            "{} - Class {} ({} questions)",
            self.subject,
            self.class,
            self.questions.len()
        )
    }
}
