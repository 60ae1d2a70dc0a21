use std::time::Duration;

use tracing::{debug, error, info};

use crate::{
    config::ExtractorConfig,
    error::{AppError, AppResult},
    export::OutputPaths,
    models::NormalizedRecord,
    omdb::OmdbClient,
};

/// Fetches every configured title in order and exports the batch.
pub struct Extractor {
    omdb: OmdbClient,
    titles: Vec<String>,
    output: OutputPaths,
}

impl Extractor {
    pub fn new(
        config: ExtractorConfig,
        output: OutputPaths,
        http: reqwest::Client,
    ) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::config("API_KEY is not set"));
        }
        if config.base_url.trim().is_empty() {
            return Err(AppError::config("BASE_URL is not set"));
        }

        let omdb = OmdbClient::new(http, config.api_key, config.base_url);
        Ok(Self { omdb, titles: config.titles, output })
    }

    /// Overrides the per-request timeout of the metadata client.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.omdb = self.omdb.with_timeout(timeout);
        self
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Runs one extraction pass. Failed titles are logged and left out; only
    /// writing the export files can fail the run.
    pub async fn run(&self) -> AppResult<Vec<NormalizedRecord>> {
        info!(titles = self.titles.len(), "starting extraction");

        let mut records = Vec::with_capacity(self.titles.len());
        for title in &self.titles {
            if let Some(record) = self.extract_one(title.trim()).await {
                records.push(record);
            }
        }

        let failed = self.titles.len() - records.len();
        info!(succeeded = records.len(), failed = failed, "extraction finished");

        self.output.write_all(&records)?;
        Ok(records)
    }

    async fn extract_one(&self, title: &str) -> Option<NormalizedRecord> {
        debug!(title = %title, "requesting title");
        match self.omdb.lookup(title).await {
            Ok(record) => {
                info!(title = %title, "extracted title");
                Some(record)
            },
            Err(err) => {
                error!(title = %title, error = %err, "failed to extract title");
                None
            },
        }
    }
}
