//! `SeaORM` Entity for the users table.
//!
//! Users are donors/devotees identified by phone number and upserted at
//! payment-verification time. Aggregate fields mirror the sum and count
//! of the user's SUCCESS donations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub total_donations: Decimal,
    pub donation_count: i32,
    pub first_donation_at: Option<DateTimeWithTimeZone>,
    pub last_donation_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donations::Entity")]
    Donations,
    #[sea_orm(has_many = "super::pooja_bookings::Entity")]
    PoojaBookings,
}

impl Related<super::donations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl Related<super::pooja_bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PoojaBookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
