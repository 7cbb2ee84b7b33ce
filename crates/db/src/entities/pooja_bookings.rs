//! `SeaORM` Entity for the pooja_bookings table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{BookingStatus, PaymentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pooja_bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub booking_number: String,
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub pooja_service_id: Option<i32>,
    pub pooja_name: String,
    pub pooja_price: Decimal,
    pub preferred_date: Date,
    pub preferred_time: String,
    pub user_name: String,
    pub user_phone: String,
    pub user_email: Option<String>,
    pub nakshatra: Option<String>,
    pub gothra: Option<String>,
    pub special_instructions: Option<String>,
    pub booking_status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub cancellation_reason: Option<String>,
    pub confirmed_at: Option<DateTimeWithTimeZone>,
    pub completed_at: Option<DateTimeWithTimeZone>,
    pub cancelled_at: Option<DateTimeWithTimeZone>,
    pub razorpay_payment_id: Option<String>,
    pub user_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::pooja_services::Entity",
        from = "Column::PoojaServiceId",
        to = "super::pooja_services::Column::Id"
    )]
    PoojaServices,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::pooja_services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PoojaServices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
