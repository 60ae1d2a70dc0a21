use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use jiff::{Span, Timestamp, Zoned, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    config::parse_titles,
    error::{AppError, AppResult},
    models::{HistoryFilter, Kpis, Overview, RecordView},
};

const DEFAULT_LATEST: u64 = 20;
const MAX_LATEST: u64 = 500;
const DEFAULT_HISTORY_DAYS: i64 = 30;

pub async fn overview(State(state): State<Arc<AppState>>) -> AppResult<Json<Overview>> {
    Ok(Json(state.store.overview().await?))
}

pub async fn movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<String>>> {
    Ok(Json(state.store.movie_titles().await?))
}

#[derive(Debug, Deserialize)]
pub struct LatestQuery {
    limit: Option<u64>,
}

pub async fn latest(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LatestQuery>,
) -> AppResult<Json<Vec<RecordView>>> {
    let limit = q.limit.unwrap_or(DEFAULT_LATEST).clamp(1, MAX_LATEST);
    Ok(Json(state.store.latest_records(limit).await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    from: Option<Date>,
    to: Option<Date>,
    titles: Option<String>,
    min_rating: Option<f64>,
    max_rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub records: Vec<RecordView>,
    pub kpis: Kpis,
}

pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(q): Query<HistoryQuery>,
) -> AppResult<Json<HistoryResponse>> {
    let today = Zoned::now().with_time_zone(TimeZone::UTC).date();
    let filter = history_filter(q, today)?;
    let records = state.store.history(&filter).await?;
    let kpis = Kpis::from_records(&records);
    Ok(Json(HistoryResponse { records, kpis }))
}

/// Both ends are whole UTC days, inclusive.
fn history_filter(q: HistoryQuery, today: Date) -> AppResult<HistoryFilter> {
    let to = q.to.unwrap_or(today);
    let from = match q.from {
        Some(from) => from,
        None => to.checked_sub(Span::new().days(DEFAULT_HISTORY_DAYS)).unwrap_or(Date::MIN),
    };
    if from > to {
        return Err(AppError::BadRequest(format!("from ({from}) is after to ({to})")));
    }
    if let (Some(min), Some(max)) = (q.min_rating, q.max_rating) {
        if min > max {
            return Err(AppError::BadRequest("min_rating is above max_rating".to_string()));
        }
    }

    let start = day_start(from);
    let end = match to.tomorrow() {
        Ok(next) => {
            day_start(next).checked_sub(Span::new().microseconds(1)).unwrap_or(Timestamp::MIN)
        },
        Err(_) => Timestamp::MAX,
    };

    Ok(HistoryFilter {
        from: Some(start),
        to: Some(end),
        titles: q.titles.as_deref().map(parse_titles).unwrap_or_default(),
        min_rating: q.min_rating,
        max_rating: q.max_rating,
    })
}

/// Midnight UTC, saturating at the ends of the timestamp range.
fn day_start(date: Date) -> Timestamp {
    match date.to_zoned(TimeZone::UTC) {
        Ok(zoned) => zoned.timestamp(),
        Err(_) if date.year() < 0 => Timestamp::MIN,
        Err(_) => Timestamp::MAX,
    }
}
