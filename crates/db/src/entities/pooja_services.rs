//! `SeaORM` Entity for the pooja_services catalog table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pooja_services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration_minutes: Option<i32>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pooja_bookings::Entity")]
    PoojaBookings,
}

impl Related<super::pooja_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PoojaBookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
