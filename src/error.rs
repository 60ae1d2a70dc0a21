use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Errors that end a run or a request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Time(#[from] jiff::Error),
}

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Why a single title was dropped from a run. Never fatal.
#[derive(Debug, thiserror::Error)]
pub enum TitleFailure {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionFailure),

    #[error("normalization failed: {0}")]
    Normalization(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionFailure {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("api reported: {0}")]
    NotFound(String),
}
