pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::Result;
use crate::services::{
    local_cache::LocalQuestionCache, question_service::QuestionService,
    quiz_service::QuizWorkflow, remote_source::RemoteQuestionSource,
};
use crate::utils::text::SearchInput;

/// Everything one quiz window needs, built from an explicit configuration.
pub struct AppState {
    pub config: Config,
    pub question_service: QuestionService,
    pub workflow: QuizWorkflow,
    pub class_input: SearchInput,
    pub subject_input: SearchInput,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let remote = RemoteQuestionSource::new(&config)?;
        let cache = LocalQuestionCache::new(config.data_folder.clone());
        let question_service = QuestionService::new(&config, remote, cache);

        Ok(Self {
            config,
            question_service,
            workflow: QuizWorkflow::new(),
            class_input: SearchInput::default(),
            subject_input: SearchInput::default(),
        })
    }

    /// Refills the class/subject suggestion boxes from the offline pool.
    pub fn update_dropdowns(&mut self) {
        if self.question_service.questions().is_empty() {
            return;
        }
        self.class_input
            .set_candidates(self.question_service.class_options());
        self.subject_input
            .set_candidates(self.question_service.subject_options());
    }
}
