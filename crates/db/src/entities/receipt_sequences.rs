//! `SeaORM` Entity for the receipt_sequences table.
//!
//! One row per fiscal year, created lazily on first issuance. The
//! `last_sequence` column is only ever moved by the atomic
//! upsert-increment in `repositories::receipt`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "receipt_sequences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub fiscal_year: String,
    pub last_sequence: i64,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
