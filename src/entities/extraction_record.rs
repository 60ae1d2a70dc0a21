use sea_orm::entity::prelude::*;

/// One metadata snapshot of a movie. Rows are append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "extraction_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub movie_id: i32,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub imdb_rating: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub revenue: Option<f64>,
    /// UTC microseconds since the Unix epoch.
    pub extracted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id"
    )]
    Movie,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
