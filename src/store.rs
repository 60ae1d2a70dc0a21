use jiff::Timestamp;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use crate::{
    entities::{extraction_record, movie},
    error::AppResult,
    models::{HistoryFilter, NormalizedRecord, Overview, RecordView},
};

/// Outcome of appending one snapshot.
#[derive(Clone, Debug)]
pub struct Appended {
    pub movie: movie::Model,
    pub record: extraction_record::Model,
    pub movie_created: bool,
}

/// Query and append access to the movie store.
#[derive(Clone)]
pub struct MovieStore {
    db: DatabaseConnection,
}

impl MovieStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Opens a session. Dropping it without `commit` rolls it back.
    pub async fn session(&self) -> AppResult<DatabaseTransaction> {
        Ok(self.db.begin().await?)
    }

    /// Appends one snapshot in its own session, creating the movie on first
    /// sight of its title. Existing rows are never touched.
    pub async fn append_snapshot(&self, record: &NormalizedRecord) -> AppResult<Appended> {
        let txn = self.session().await?;
        let (movie, movie_created) = find_or_create_movie(&txn, &record.title).await?;

        let view = record.coerce();
        let row = extraction_record::ActiveModel {
            id: Default::default(),
            movie_id: Set(movie.id),
            year: Set(view.year),
            genre: Set(view.genre),
            director: Set(view.director),
            imdb_rating: Set(view.imdb_rating),
            duration_minutes: Set(view.duration_minutes),
            revenue: Set(view.revenue),
            extracted_at: Set(view.extracted_at.as_microsecond()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        debug!(title = %movie.title, movie_id = movie.id, record_id = row.id, "appended snapshot");

        Ok(Appended { movie, record: row, movie_created })
    }

    pub async fn overview(&self) -> AppResult<Overview> {
        let movie_count = movie::Entity::find().count(&self.db).await?;
        let record_count = extraction_record::Entity::find().count(&self.db).await?;
        let last = extraction_record::Entity::find()
            .order_by_desc(extraction_record::Column::ExtractedAt)
            .one(&self.db)
            .await?;

        let last_extracted_at =
            last.map(|r| Timestamp::from_microsecond(r.extracted_at)).transpose()?;

        Ok(Overview { movie_count, record_count, last_extracted_at })
    }

    pub async fn movie_titles(&self) -> AppResult<Vec<String>> {
        let movies =
            movie::Entity::find().order_by_asc(movie::Column::Title).all(&self.db).await?;
        Ok(movies.into_iter().map(|m| m.title).collect())
    }

    /// Newest snapshots first.
    pub async fn latest_records(&self, limit: u64) -> AppResult<Vec<RecordView>> {
        let rows = extraction_record::Entity::find()
            .find_also_related(movie::Entity)
            .order_by_desc(extraction_record::Column::ExtractedAt)
            .order_by_desc(extraction_record::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        rows.into_iter().map(|(record, movie)| to_view(record, movie)).collect()
    }

    /// Snapshots matching `filter`, oldest first. A rating bound drops
    /// snapshots without a rating.
    pub async fn history(&self, filter: &HistoryFilter) -> AppResult<Vec<RecordView>> {
        let mut query = extraction_record::Entity::find().find_also_related(movie::Entity);

        if let Some(from) = filter.from {
            query = query.filter(extraction_record::Column::ExtractedAt.gte(from.as_microsecond()));
        }
        if let Some(to) = filter.to {
            query = query.filter(extraction_record::Column::ExtractedAt.lte(to.as_microsecond()));
        }
        if !filter.titles.is_empty() {
            query = query.filter(movie::Column::Title.is_in(filter.titles.iter().cloned()));
        }
        if let Some(min) = filter.min_rating {
            query = query.filter(extraction_record::Column::ImdbRating.gte(min));
        }
        if let Some(max) = filter.max_rating {
            query = query.filter(extraction_record::Column::ImdbRating.lte(max));
        }

        let rows = query
            .order_by_asc(extraction_record::Column::ExtractedAt)
            .order_by_asc(extraction_record::Column::Id)
            .all(&self.db)
            .await?;

        rows.into_iter().map(|(record, movie)| to_view(record, movie)).collect()
    }

    pub async fn records_for_movie(&self, title: &str) -> AppResult<Vec<extraction_record::Model>> {
        let Some(movie) =
            movie::Entity::find().filter(movie::Column::Title.eq(title)).one(&self.db).await?
        else {
            return Ok(Vec::new());
        };

        Ok(extraction_record::Entity::find()
            .filter(extraction_record::Column::MovieId.eq(movie.id))
            .order_by_asc(extraction_record::Column::Id)
            .all(&self.db)
            .await?)
    }
}

async fn find_or_create_movie<C: ConnectionTrait>(
    conn: &C,
    title: &str,
) -> AppResult<(movie::Model, bool)> {
    if let Some(existing) =
        movie::Entity::find().filter(movie::Column::Title.eq(title)).one(conn).await?
    {
        return Ok((existing, false));
    }

    let created =
        movie::ActiveModel { id: Default::default(), title: Set(title.to_string()) }
            .insert(conn)
            .await?;
    Ok((created, true))
}

fn to_view(
    record: extraction_record::Model,
    movie: Option<movie::Model>,
) -> AppResult<RecordView> {
    Ok(RecordView {
        title: movie.map(|m| m.title).unwrap_or_default(),
        year: record.year,
        genre: record.genre,
        director: record.director,
        imdb_rating: record.imdb_rating,
        duration_minutes: record.duration_minutes,
        revenue: record.revenue,
        extracted_at: Timestamp::from_microsecond(record.extracted_at)?,
    })
}
