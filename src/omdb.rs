use std::time::Duration;

use jiff::Timestamp;
use serde::Deserialize;

use crate::{
    error::{ExtractionFailure, TitleFailure},
    models::NormalizedRecord,
};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self { client, api_key, base_url, timeout: REQUEST_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// One GET for one title. No retries.
    pub async fn fetch_title(&self, title: &str) -> Result<String, ExtractionFailure> {
        let body = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    pub async fn lookup(&self, title: &str) -> Result<NormalizedRecord, TitleFailure> {
        let body = self.fetch_title(title).await?;
        let resp = parse_response(&body)?;
        normalize_response(resp, Timestamp::now())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OmdbResponse {
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "Genre")]
    pub genre: Option<String>,
    #[serde(rename = "Director")]
    pub director: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
    #[serde(rename = "Runtime")]
    pub runtime: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "Language")]
    pub language: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "BoxOffice")]
    pub box_office: Option<String>,
}

impl OmdbResponse {
    pub fn is_failure(&self) -> bool {
        self.response.as_deref().is_some_and(|r| r.trim().eq_ignore_ascii_case("false"))
    }
}

pub fn parse_response(body: &str) -> Result<OmdbResponse, TitleFailure> {
    let resp: OmdbResponse =
        serde_json::from_str(body).map_err(|e| TitleFailure::Normalization(e.to_string()))?;

    if resp.is_failure() {
        let msg = resp.error.unwrap_or_else(|| "unknown error".to_string());
        return Err(ExtractionFailure::NotFound(msg).into());
    }

    Ok(resp)
}

pub fn normalize_response(
    resp: OmdbResponse,
    extracted_at: Timestamp,
) -> Result<NormalizedRecord, TitleFailure> {
    let title = resp
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| TitleFailure::Normalization("response has no Title".to_string()))?;

    Ok(NormalizedRecord {
        title,
        year: present(resp.year),
        genre: present(resp.genre),
        director: present(resp.director),
        actors: present(resp.actors),
        duration: present(resp.runtime),
        imdb_rating: present(resp.imdb_rating),
        imdb_votes: present(resp.imdb_votes),
        language: present(resp.language),
        country: present(resp.country),
        box_office: present(resp.box_office),
        extraction_timestamp: extracted_at,
    })
}

/// Blank fields count as absent so the JSON and CSV exports read back alike.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
