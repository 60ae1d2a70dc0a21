use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string(Movies::Title))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_movies_title")
                    .table(Movies::Table)
                    .col(Movies::Title)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExtractionRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(ExtractionRecords::Id))
                    .col(integer(ExtractionRecords::MovieId))
                    .col(integer_null(ExtractionRecords::Year))
                    .col(string_null(ExtractionRecords::Genre))
                    .col(string_null(ExtractionRecords::Director))
                    .col(double_null(ExtractionRecords::ImdbRating))
                    .col(integer_null(ExtractionRecords::DurationMinutes))
                    .col(double_null(ExtractionRecords::Revenue))
                    .col(big_integer(ExtractionRecords::ExtractedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_extraction_records_movie")
                            .from(ExtractionRecords::Table, ExtractionRecords::MovieId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_extraction_records_movie_extracted_at")
                    .table(ExtractionRecords::Table)
                    .col(ExtractionRecords::MovieId)
                    .col(ExtractionRecords::ExtractedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_extraction_records_extracted_at")
                    .table(ExtractionRecords::Table)
                    .col(ExtractionRecords::ExtractedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ExtractionRecords::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
}

#[derive(DeriveIden)]
enum ExtractionRecords {
    Table,
    Id,
    MovieId,
    Year,
    Genre,
    Director,
    ImdbRating,
    DurationMinutes,
    Revenue,
    ExtractedAt,
}
