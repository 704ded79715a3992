use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::error::Result;
use crate::models::Question;
use crate::services::catalog;
use crate::services::local_cache::LocalQuestionCache;
use crate::services::remote_source::RemoteQuestionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Online,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeStatus {
    pub mode: Mode,
    pub api_available: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated { count: usize },
    NoNewData,
    Unavailable,
}

impl RefreshOutcome {
    pub fn message(&self) -> String {
        match self {
            RefreshOutcome::Updated { count } => {
                format!("Updated {} questions from the server", count)
            }
            RefreshOutcome::NoNewData => "No new data from the server".to_string(),
            RefreshOutcome::Unavailable => "Refresh is only available in online mode".to_string(),
        }
    }
}

/// Chooses between the remote service and the local snapshot and keeps the
/// offline question pool.
#[derive(Clone)]
pub struct QuestionService {
    remote: RemoteQuestionSource,
    cache: LocalQuestionCache,
    health_timeout: Duration,
    question_file: String,
    subject_file: String,
    class_file: String,
    mode: Mode,
    questions: Vec<Question>,
}

impl QuestionService {
    pub fn new(config: &Config, remote: RemoteQuestionSource, cache: LocalQuestionCache) -> Self {
        Self {
            remote,
            cache,
            health_timeout: config.health_timeout(),
            question_file: config.question_file.clone(),
            subject_file: config.subject_file.clone(),
            class_file: config.class_file.clone(),
            mode: Mode::Offline,
            questions: Vec::new(),
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn class_options(&self) -> Vec<String> {
        catalog::class_options(&self.questions)
    }

    pub fn subject_options(&self) -> Vec<String> {
        catalog::subject_options(&self.questions)
    }

    /// Health probe bounded by the configured timeout. The probe runs as its
    /// own task; on timeout it is left to finish and its result is dropped.
    #[instrument(skip(self))]
    pub async fn probe(&self) -> bool {
        let remote = self.remote.clone();
        let probe = tokio::spawn(async move { remote.check_health().await });

        match tokio::time::timeout(self.health_timeout, probe).await {
            Ok(Ok(available)) => available,
            Ok(Err(e)) => {
                error!(error = ?e, "Health probe task failed");
                false
            }
            Err(_) => {
                warn!(timeout = ?self.health_timeout, "Health probe timed out");
                false
            }
        }
    }

    /// Startup: probe the server, pick a mode, then load the local snapshot
    /// regardless of the outcome.
    pub async fn initialize(&mut self) -> ModeStatus {
        info!("Checking connection to the question server...");
        let api_available = self.probe().await;

        let status = if api_available {
            self.mode = Mode::Online;
            ModeStatus {
                mode: Mode::Online,
                api_available,
                message: "Connected to the API. Online mode is available.".to_string(),
            }
        } else {
            self.mode = Mode::Offline;
            ModeStatus {
                mode: Mode::Offline,
                api_available,
                message: "Cannot reach the server. Using offline data only.".to_string(),
            }
        };
        info!(mode = ?status.mode, "{}", status.message);

        if let Err(e) = self.load_offline().await {
            error!(error = %e, "Failed to load offline questions");
        }
        status
    }

    /// Replaces the pool with the local snapshot. A snapshot that cannot be
    /// read leaves the pool empty.
    pub async fn load_offline(&mut self) -> Result<usize> {
        match self.cache.load(&self.question_file).await {
            Ok(questions) => {
                self.questions = questions;
                info!(count = self.questions.len(), "Offline questions loaded");
                Ok(self.questions.len())
            }
            Err(e) => {
                self.questions.clear();
                Err(e)
            }
        }
    }

    /// Switching online re-checks the server and falls back to offline when
    /// it cannot be reached.
    pub async fn set_mode(&mut self, mode: Mode) -> ModeStatus {
        match mode {
            Mode::Online => {
                if self.probe().await {
                    self.mode = Mode::Online;
                    ModeStatus {
                        mode: Mode::Online,
                        api_available: true,
                        message: "Online mode: data is fetched directly from the server."
                            .to_string(),
                    }
                } else {
                    self.mode = Mode::Offline;
                    ModeStatus {
                        mode: Mode::Offline,
                        api_available: false,
                        message: "Cannot connect to the server. Switched back to offline mode."
                            .to_string(),
                    }
                }
            }
            Mode::Offline => {
                self.mode = Mode::Offline;
                ModeStatus {
                    mode: Mode::Offline,
                    api_available: false,
                    message: "Offline mode: using downloaded data.".to_string(),
                }
            }
        }
    }

    /// Downloads every question and replaces the local snapshot. An empty
    /// download leaves the snapshot alone.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<RefreshOutcome> {
        if self.mode != Mode::Online {
            return Ok(RefreshOutcome::Unavailable);
        }

        info!("Downloading questions from the server...");
        let questions = self.remote.fetch_all_questions().await?;
        if questions.is_empty() {
            warn!("Server returned no questions; keeping the current snapshot");
            return Ok(RefreshOutcome::NoNewData);
        }

        self.cache.save(&self.question_file, &questions).await?;
        let count = questions.len();
        self.questions = questions;
        info!(count, "Question snapshot replaced");
        Ok(RefreshOutcome::Updated { count })
    }

    /// Snapshots the subject and class lists. Returns (subjects, classes).
    pub async fn sync_reference_data(&self) -> Result<(usize, usize)> {
        let subjects = self.remote.fetch_subjects().await?;
        self.cache.save(&self.subject_file, &subjects).await?;

        let classes = self.remote.fetch_classes().await?;
        self.cache.save(&self.class_file, &classes).await?;

        info!(subjects = subjects.len(), classes = classes.len(), "Reference data saved");
        Ok((subjects.len(), classes.len()))
    }

    /// Online asks the server; offline filters the local pool. Blank values
    /// mean "any".
    #[instrument(skip(self))]
    pub async fn search(&self, class: Option<&str>, subject: Option<&str>) -> Result<Vec<Question>> {
        let questions = match self.mode {
            Mode::Online => self.remote.fetch_filtered(class, subject).await?,
            Mode::Offline => catalog::filter_questions(&self.questions, class, subject),
        };
        info!(count = questions.len(), mode = ?self.mode, "Search finished");
        Ok(questions)
    }
}
