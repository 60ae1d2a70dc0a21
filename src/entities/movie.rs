use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub title: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::extraction_record::Entity")]
    ExtractionRecord,
}

impl Related<super::extraction_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExtractionRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
