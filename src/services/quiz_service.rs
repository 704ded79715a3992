use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::QuizError;
use crate::models::{Question, QuestionSet};
use crate::services::catalog;

/// Chosen choice text per question index.
pub type UserAnswerMap = BTreeMap<usize, String>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedAnswer {
    pub index: usize,
    pub question_text: String,
    pub candidate_answer: String,
    pub correct_answer: Option<String>,
    pub explanation: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    pub graded: Vec<GradedAnswer>,
}

impl ScoreReport {
    /// "correct/total", e.g. "1/2".
    pub fn summary(&self) -> String {
        format!("{}/{}", self.correct, self.total)
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.total as f64
        }
    }
}

/// One run through a question set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: UserAnswerMap,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self {
            questions,
            current: 0,
            answers: UserAnswerMap::new(),
        })
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &UserAnswerMap {
        &self.answers
    }

    /// "Question 2/5"
    pub fn progress(&self) -> String {
        format!("Question {}/{}", self.current + 1, self.questions.len())
    }

    /// Records the choice at `choice_index` for the current question,
    /// replacing any earlier pick.
    pub fn record_answer(&mut self, choice_index: usize) -> Result<(), QuizError> {
        let choice = self
            .current_question()
            .choices
            .get(choice_index)
            .ok_or(QuizError::ChoiceOutOfRange(choice_index))?;
        let text = choice.text.clone();
        debug!(index = self.current, choice = %text, "Answer recorded");
        self.answers.insert(self.current, text);
        Ok(())
    }

    /// Choice to pre-select when the current question is shown again. When
    /// several choices share the recorded text the first one wins.
    pub fn selected_choice(&self) -> Option<usize> {
        let text = self.answers.get(&self.current)?;
        self.current_question().choice_index(text)
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    pub fn unanswered(&self) -> usize {
        (0..self.questions.len())
            .filter(|i| !self.answers.contains_key(i))
            .count()
    }

    /// Advances one question. The current one must be answered first.
    pub fn next(&mut self) -> Result<(), QuizError> {
        if !self.is_answered(self.current) {
            return Err(QuizError::Unanswered {
                index: self.current,
            });
        }
        if !self.is_last() {
            self.current += 1;
        }
        Ok(())
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn submit(&self) -> Result<ScoreReport, QuizError> {
        let unanswered = self.unanswered();
        if unanswered > 0 {
            return Err(QuizError::Incomplete { unanswered });
        }
        Ok(self.score())
    }

    fn score(&self) -> ScoreReport {
        let graded: Vec<GradedAnswer> = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, q)| {
                let candidate_answer = self.answers.get(&index).cloned().unwrap_or_default();
                let correct_answer = q.correct_choice().map(|c| c.text.clone());
                let is_correct = correct_answer.as_deref() == Some(candidate_answer.as_str());
                GradedAnswer {
                    index,
                    question_text: q.question_text.clone(),
                    candidate_answer,
                    correct_answer,
                    explanation: q.explanation.clone(),
                    is_correct,
                }
            })
            .collect();

        ScoreReport {
            correct: graded.iter().filter(|g| g.is_correct).count(),
            total: self.questions.len(),
            graded,
        }
    }
}

/// Question sets on offer plus the current class/subject narrowing.
#[derive(Debug, Clone)]
pub struct SetBrowser {
    sets: Vec<QuestionSet>,
    visible: Vec<usize>,
    selected: Option<usize>,
}

impl SetBrowser {
    fn new(questions: &[Question]) -> Self {
        let sets = catalog::group_into_sets(questions);
        let visible = (0..sets.len()).collect();
        Self {
            sets,
            visible,
            selected: None,
        }
    }

    pub fn sets(&self) -> &[QuestionSet] {
        &self.sets
    }

    pub fn visible_sets(&self) -> impl Iterator<Item = (usize, &QuestionSet)> {
        self.visible.iter().map(move |&i| (i, &self.sets[i]))
    }

    pub fn selected(&self) -> Option<&QuestionSet> {
        self.selected.map(|i| &self.sets[i])
    }

    pub fn class_options(&self) -> Vec<String> {
        catalog::set_class_options(&self.sets)
    }

    pub fn subject_options(&self) -> Vec<String> {
        catalog::set_subject_options(&self.sets)
    }
}

#[derive(Debug, Clone)]
pub enum QuizState {
    SelectingMode,
    BrowsingSets(SetBrowser),
    AnsweringQuestion {
        browser: SetBrowser,
        session: QuizSession,
    },
    Submitted {
        browser: SetBrowser,
        report: ScoreReport,
    },
}

impl QuizState {
    pub fn name(&self) -> &'static str {
        match self {
            QuizState::SelectingMode => "selecting a mode",
            QuizState::BrowsingSets(_) => "browsing question sets",
            QuizState::AnsweringQuestion { .. } => "answering questions",
            QuizState::Submitted { .. } => "viewing results",
        }
    }
}

/// Drives the quiz from source selection to the score screen. Rejected
/// transitions return an error and leave the state untouched.
#[derive(Debug, Clone)]
pub struct QuizWorkflow {
    state: QuizState,
}

impl Default for QuizWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizWorkflow {
    pub fn new() -> Self {
        Self {
            state: QuizState::SelectingMode,
        }
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> QuizError {
        QuizError::InvalidState {
            action,
            state: self.state.name(),
        }
    }

    /// Hands a freshly searched question list to the workflow. Allowed from
    /// mode selection and from the set list (a new search replaces the sets).
    pub fn load_questions(&mut self, questions: &[Question]) -> Result<(), QuizError> {
        match self.state {
            QuizState::SelectingMode | QuizState::BrowsingSets(_) => {}
            _ => return Err(self.invalid("load questions")),
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        let browser = SetBrowser::new(questions);
        info!(sets = browser.sets.len(), questions = questions.len(), "Question sets ready");
        self.state = QuizState::BrowsingSets(browser);
        Ok(())
    }

    pub fn browser(&self) -> Option<&SetBrowser> {
        match &self.state {
            QuizState::BrowsingSets(b) => Some(b),
            QuizState::AnsweringQuestion { browser, .. } | QuizState::Submitted { browser, .. } => {
                Some(browser)
            }
            QuizState::SelectingMode => None,
        }
    }

    fn browser_mut(&mut self, action: &'static str) -> Result<&mut SetBrowser, QuizError> {
        let state = self.state.name();
        match &mut self.state {
            QuizState::BrowsingSets(b) => Ok(b),
            _ => Err(QuizError::InvalidState { action, state }),
        }
    }

    pub fn select_set(&mut self, index: usize) -> Result<&QuestionSet, QuizError> {
        let browser = self.browser_mut("select a set")?;
        if index >= browser.sets.len() {
            return Err(QuizError::SetOutOfRange(index));
        }
        browser.selected = Some(index);
        Ok(&browser.sets[index])
    }

    /// Narrows the visible sets; blank values mean "any".
    pub fn filter_sets(&mut self, class: Option<&str>, subject: Option<&str>) -> Result<usize, QuizError> {
        let browser = self.browser_mut("filter sets")?;
        browser.visible = catalog::filter_sets(&browser.sets, class, subject);
        Ok(browser.visible.len())
    }

    pub fn reset_filters(&mut self) -> Result<(), QuizError> {
        let browser = self.browser_mut("reset filters")?;
        browser.visible = (0..browser.sets.len()).collect();
        browser.selected = None;
        Ok(())
    }

    pub fn start(&mut self) -> Result<&QuizSession, QuizError> {
        let browser = match &self.state {
            QuizState::BrowsingSets(b) => b.clone(),
            _ => return Err(self.invalid("start a quiz")),
        };
        let set = browser.selected().ok_or(QuizError::NoSetSelected)?;
        let session = QuizSession::new(set.questions.clone())?;
        info!(class = %set.class, subject = %set.subject, questions = session.questions().len(), "Quiz started");
        self.state = QuizState::AnsweringQuestion { browser, session };
        self.session().ok_or_else(|| self.invalid("start a quiz"))
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            QuizState::AnsweringQuestion { session, .. } => Some(session),
            _ => None,
        }
    }

    fn session_mut(&mut self, action: &'static str) -> Result<&mut QuizSession, QuizError> {
        let state = self.state.name();
        match &mut self.state {
            QuizState::AnsweringQuestion { session, .. } => Ok(session),
            _ => Err(QuizError::InvalidState { action, state }),
        }
    }

    pub fn record_answer(&mut self, choice_index: usize) -> Result<(), QuizError> {
        self.session_mut("record an answer")?.record_answer(choice_index)
    }

    pub fn next(&mut self) -> Result<(), QuizError> {
        self.session_mut("go to the next question")?.next()
    }

    pub fn previous(&mut self) -> Result<(), QuizError> {
        self.session_mut("go to the previous question")?.previous();
        Ok(())
    }

    pub fn submit(&mut self) -> Result<&ScoreReport, QuizError> {
        let (browser, report) = match &self.state {
            QuizState::AnsweringQuestion { browser, session } => (browser.clone(), session.submit()?),
            _ => return Err(self.invalid("submit")),
        };
        info!(score = %report.summary(), "Quiz submitted");

        self.state = QuizState::Submitted { browser, report };
        match &self.state {
            QuizState::Submitted { report, .. } => Ok(report),
            _ => Err(self.invalid("submit")),
        }
    }

    /// Returns to the set list, dropping the session and its answers.
    pub fn back_to_sets(&mut self) -> Result<(), QuizError> {
        let browser = match &self.state {
            QuizState::AnsweringQuestion { browser, .. } | QuizState::Submitted { browser, .. } => {
                browser.clone()
            }
            _ => return Err(self.invalid("return to the set list")),
        };
        self.state = QuizState::BrowsingSets(browser);
        Ok(())
    }

    /// Back to the start screen, e.g. after switching data source.
    pub fn reset(&mut self) {
        self.state = QuizState::SelectingMode;
    }
}
