use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{Class, Envelope, Question, Subject};
use crate::utils::json::{from_str_relaxed, list_from_str};

const HEALTH_ENDPOINT: &str = "Health";
const QUESTIONS_ENDPOINT: &str = "question/questions";
const SUBJECTS_ENDPOINT: &str = "subject/subjects";
const CLASSES_ENDPOINT: &str = "class";
const FILTER_ENDPOINT: &str = "question/filter";

/// REST client for the question service.
#[derive(Clone)]
pub struct RemoteQuestionSource {
    client: Client,
    base_url: Url,
}

impl RemoteQuestionSource {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout()).build()?;
        Self::with_client(client, &config.api_base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url.trim())?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// True only for a 2xx answer; every failure reads as "unavailable".
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn check_health(&self) -> bool {
        let url = match self.endpoint(HEALTH_ENDPOINT) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "Could not build health URL");
                return false;
            }
        };

        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Health probe succeeded");
                true
            }
            Ok(response) => {
                warn!(status = %response.status(), "Health probe returned non-success status");
                false
            }
            Err(e) => {
                warn!(error = %e, "Health probe failed");
                false
            }
        }
    }

    pub async fn fetch_all_questions(&self) -> Result<Vec<Question>> {
        self.fetch_list(QUESTIONS_ENDPOINT).await
    }

    pub async fn fetch_subjects(&self) -> Result<Vec<Subject>> {
        self.fetch_list(SUBJECTS_ENDPOINT).await
    }

    pub async fn fetch_classes(&self) -> Result<Vec<Class>> {
        self.fetch_list(CLASSES_ENDPOINT).await
    }

    /// Questions matching the given class and/or subject. Blank identifiers
    /// are left out of the query rather than sent empty.
    #[instrument(skip(self))]
    pub async fn fetch_filtered(
        &self,
        class_id: Option<&str>,
        subject_id: Option<&str>,
    ) -> Result<Vec<Question>> {
        let url = self.filter_url(class_id, subject_id)?;
        info!("Fetching filtered questions from: {}", url);

        let body = self.get_text(url).await?;
        let envelope: Option<Envelope<Vec<Question>>> = from_str_relaxed(&body)?;
        Ok(envelope.and_then(|e| e.data).unwrap_or_default())
    }

    pub(crate) fn filter_url(&self, class_id: Option<&str>, subject_id: Option<&str>) -> Result<Url> {
        let mut url = self.endpoint(FILTER_ENDPOINT)?;
        let params: Vec<(&str, &str)> = [("classId", class_id), ("subjectId", subject_id)]
            .into_iter()
            .filter_map(|(name, value)| {
                value
                    .filter(|v| !v.trim().is_empty())
                    .map(|v| (name, v))
            })
            .collect();

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.endpoint(path)?;
        info!("Fetching list from: {}", url);

        let body = self.get_text(url).await?;
        let items = list_from_str(&body)?;
        debug!(count = items.len(), "Decoded list response");
        Ok(items)
    }

    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Remote request failed");
            return Err(Error::RemoteRequest { status });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(base: &str) -> RemoteQuestionSource {
        RemoteQuestionSource::with_client(Client::new(), base).unwrap()
    }

    #[test]
    fn endpoints_join_under_base_path() {
        let src = source("http://localhost:5000/api");
        assert_eq!(src.base_url().as_str(), "http://localhost:5000/api/");
        assert_eq!(
            src.endpoint(QUESTIONS_ENDPOINT).unwrap().as_str(),
            "http://localhost:5000/api/question/questions"
        );
    }

    #[test]
    fn filter_url_omits_absent_parameters() {
        let src = source("http://localhost:5000/api/");
        assert_eq!(
            src.filter_url(None, None).unwrap().as_str(),
            "http://localhost:5000/api/question/filter"
        );
        assert_eq!(
            src.filter_url(Some("10"), Some("")).unwrap().as_str(),
            "http://localhost:5000/api/question/filter?classId=10"
        );
        assert_eq!(
            src.filter_url(None, Some("math")).unwrap().as_str(),
            "http://localhost:5000/api/question/filter?subjectId=math"
        );
        assert_eq!(
            src.filter_url(Some("10"), Some("Toán")).unwrap().as_str(),
            "http://localhost:5000/api/question/filter?classId=10&subjectId=To%C3%A1n"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        assert!(RemoteQuestionSource::with_client(Client::new(), "::nope").is_err());
    }
}
