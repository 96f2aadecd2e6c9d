use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "document_type")]
    pub document_type: String,
    #[sea_orm(column_name = "document_owner")]
    pub document_owner: String,
    #[sea_orm(column_name = "document_number")]
    pub document_number: String,
    #[sea_orm(column_name = "expiry_date")]
    pub expiry_date: Date,
    #[sea_orm(column_name = "action_due_date")]
    pub action_due_date: Date,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
