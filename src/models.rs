use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::normalize;

/// One successful API response, renamed and timestamped. Values stay as the
/// raw strings the API sent; coercion happens in [`NormalizedRecord::coerce`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub title: String,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub duration: Option<String>,
    pub imdb_rating: Option<String>,
    pub imdb_votes: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub box_office: Option<String>,
    pub extraction_timestamp: Timestamp,
}

impl NormalizedRecord {
    pub const COLUMNS: [&'static str; 12] = [
        "title",
        "year",
        "genre",
        "director",
        "actors",
        "duration",
        "imdb_rating",
        "imdb_votes",
        "language",
        "country",
        "box_office",
        "extraction_timestamp",
    ];

    pub fn coerce(&self) -> RecordView {
        RecordView {
            title: self.title.clone(),
            year: normalize::opt(self.year.as_deref(), normalize::year),
            genre: self.genre.clone(),
            director: self.director.clone(),
            imdb_rating: normalize::opt(self.imdb_rating.as_deref(), normalize::rating),
            duration_minutes: normalize::opt(self.duration.as_deref(), normalize::duration_minutes),
            revenue: normalize::opt(self.box_office.as_deref(), normalize::money),
            extracted_at: self.extraction_timestamp,
        }
    }
}

/// A snapshot with numeric fields coerced, joined with its movie title.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordView {
    pub title: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub imdb_rating: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub revenue: Option<f64>,
    pub extracted_at: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overview {
    pub movie_count: u64,
    pub record_count: u64,
    pub last_extracted_at: Option<Timestamp>,
}

#[derive(Clone, Debug, Default)]
pub struct HistoryFilter {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    /// Empty means every title.
    pub titles: Vec<String>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub rating_max: Option<f64>,
    pub rating_min: Option<f64>,
    pub rating_mean: Option<f64>,
    pub duration_mean: Option<f64>,
    pub revenue_total: f64,
}

impl Kpis {
    pub fn from_records(records: &[RecordView]) -> Self {
        let ratings: Vec<f64> = records.iter().filter_map(|r| r.imdb_rating).collect();
        let durations: Vec<f64> =
            records.iter().filter_map(|r| r.duration_minutes).map(f64::from).collect();

        Self {
            rating_max: ratings.iter().copied().reduce(f64::max),
            rating_min: ratings.iter().copied().reduce(f64::min),
            rating_mean: mean(&ratings),
            duration_mean: mean(&durations),
            revenue_total: records.iter().filter_map(|r| r.revenue).sum(),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
