use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Remote service returned status {status}")]
    RemoteRequest { status: StatusCode },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Quiz(#[from] QuizError),
}

/// Rejected workflow transitions. State is never modified when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("No questions found")]
    NoQuestions,

    #[error("No question set selected")]
    NoSetSelected,

    #[error("Question set {0} does not exist")]
    SetOutOfRange(usize),

    #[error("Please choose an answer for question {} before continuing", .index + 1)]
    Unanswered { index: usize },

    #[error("You have not answered all questions ({unanswered} remaining)")]
    Incomplete { unanswered: usize },

    #[error("Choice {0} does not exist for this question")]
    ChoiceOutOfRange(usize),

    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },
}

impl Error {
    /// Status line shown to the user at the boundary of a user action.
    pub fn user_message(&self) -> String {
        match self {
            Error::Transport(err) if err.is_timeout() => {
                "Failed to load questions: the server did not respond in time".to_string()
            }
            Error::Transport(_) => {
                "Failed to load questions: could not reach the server".to_string()
            }
            Error::RemoteRequest { status } => format!("API error: {}", status),
            Error::Json(err) => format!("Failed to read question data: {}", err),
            Error::Io(err) => format!("Failed to access local data: {}", err),
            Error::Quiz(err) => err.to_string(),
            Error::Config(_) | Error::Validation(_) | Error::Url(_) => {
                format!("Invalid configuration: {}", self)
            }
        }
    }

    /// Rejected quiz actions, shown as warnings rather than failures.
    pub fn is_quiz_warning(&self) -> bool {
        matches!(self, Error::Quiz(_))
    }
}
