use std::path::Path;

use tracing::{info, warn};

use crate::{
    error::AppResult,
    export,
    extractor::Extractor,
    models::{Kpis, NormalizedRecord, RecordView},
    store::MovieStore,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: usize,
    pub extracted: usize,
    pub movies_created: usize,
    pub records_appended: usize,
}

/// One extraction run: fetch, export, then append every record to the store.
pub async fn run(extractor: &Extractor, store: &MovieStore) -> AppResult<RunSummary> {
    let records = extractor.run().await?;
    let loaded = load(store, &records).await?;

    let summary = RunSummary {
        requested: extractor.titles().len(),
        extracted: records.len(),
        movies_created: loaded.movies_created,
        records_appended: loaded.records_appended,
    };

    for view in records.iter().map(NormalizedRecord::coerce) {
        log_row(&view);
    }
    info!(
        requested = summary.requested,
        extracted = summary.extracted,
        movies_created = summary.movies_created,
        records_appended = summary.records_appended,
        "run complete"
    );

    Ok(summary)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub movies_created: usize,
    pub records_appended: usize,
}

pub async fn load(store: &MovieStore, records: &[NormalizedRecord]) -> AppResult<LoadStats> {
    let mut stats = LoadStats::default();
    for record in records {
        let appended = store.append_snapshot(record).await?;
        if appended.movie_created {
            stats.movies_created += 1;
        }
        stats.records_appended += 1;
    }
    Ok(stats)
}

/// Reads the tabular export back, coercing its numeric columns.
pub fn summarize_export(csv_path: &Path) -> AppResult<(Vec<RecordView>, Kpis)> {
    let views: Vec<RecordView> =
        export::read_csv(csv_path)?.iter().map(NormalizedRecord::coerce).collect();

    if views.is_empty() {
        warn!(path = %csv_path.display(), "export holds no records");
    }
    for view in &views {
        log_row(view);
    }

    let kpis = Kpis::from_records(&views);
    info!(
        rating_max = ?kpis.rating_max,
        rating_min = ?kpis.rating_min,
        rating_mean = ?kpis.rating_mean,
        duration_mean = ?kpis.duration_mean,
        revenue_total = kpis.revenue_total,
        "export summary"
    );

    Ok((views, kpis))
}

fn log_row(view: &RecordView) {
    info!(
        title = %view.title,
        year = ?view.year,
        imdb_rating = ?view.imdb_rating,
        duration_minutes = ?view.duration_minutes,
        "record"
    );
}
