//! Pooja booking repository for database operations.
//!
//! Bookings get a permanent `PB/...` receipt number at creation time,
//! issued from the same per-fiscal-year counter as donations. Status
//! changes go through the guarded state machine in
//! `devasthana_core::booking`; each applied transition is a single-row
//! update with no cascading side effects.

use chrono::{Datelike, NaiveDate, Utc};
use chrono_tz::Asia::Kolkata;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use devasthana_core::booking::{
    AdminAction, BookingError, DEFAULT_CANCELLATION_REASON, apply_action,
};
use devasthana_core::fiscal;
use devasthana_shared::types::pagination::PageRequest;
use devasthana_shared::types::receipt::{ReceiptKind, format_receipt_number};

use crate::entities::{
    pooja_bookings,
    sea_orm_active_enums::{BookingStatus, PaymentStatus},
};

/// Error types for booking operations.
#[derive(Debug, thiserror::Error)]
pub enum BookingRepositoryError {
    /// Booking not found by id.
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    /// Booking not found by receipt number.
    #[error("Booking not found for receipt: {0}")]
    ReceiptNotFound(String),

    /// Action rejected by the state machine; no row was mutated.
    #[error(transparent)]
    Transition(#[from] BookingError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    /// Catalog service id, when the pooja comes from the catalog.
    pub pooja_service_id: Option<i32>,
    /// Pooja name.
    pub pooja_name: String,
    /// Price in rupees.
    pub pooja_price: Decimal,
    /// Preferred date.
    pub preferred_date: NaiveDate,
    /// Preferred time slot.
    pub preferred_time: String,
    /// Devotee name.
    pub user_name: String,
    /// Devotee phone in E.164 form.
    pub user_phone: String,
    /// Devotee email, when provided.
    pub user_email: Option<String>,
    /// Birth star, free text.
    pub nakshatra: Option<String>,
    /// Lineage, free text.
    pub gothra: Option<String>,
    /// Special instructions, when provided.
    pub special_instructions: Option<String>,
    /// Gateway payment id when the booking was paid online.
    pub razorpay_payment_id: Option<String>,
}

/// Filter options for listing bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Filter by booking status.
    pub status: Option<BookingStatus>,
    /// Free-text search across devotee and booking fields.
    pub search: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct StatusCountRow {
    booking_status: BookingStatus,
    count: i64,
}

/// Booking repository.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    db: DatabaseConnection,
}

impl BookingRepository {
    /// Creates a new booking repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a PENDING booking with a permanent receipt number.
    ///
    /// Receipt issuance and the insert share one transaction, so a
    /// failed insert leaves a sequence gap rather than a duplicate
    /// number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        &self,
        input: CreateBookingInput,
    ) -> Result<pooja_bookings::Model, BookingRepositoryError> {
        let txn = self.db.begin().await?;

        let fiscal_year = fiscal::current_fiscal_year();
        let sequence = super::receipt::issue_next(&txn, &fiscal_year).await?;
        let receipt_number =
            format_receipt_number(ReceiptKind::PoojaBooking, &fiscal_year, sequence);

        let id = Uuid::new_v4();
        let now = Utc::now();
        let paid_online = input.razorpay_payment_id.is_some();

        let booking = pooja_bookings::ActiveModel {
            id: Set(id),
            booking_number: Set(generate_booking_number(id)),
            receipt_number: Set(receipt_number),
            pooja_service_id: Set(input.pooja_service_id),
            pooja_name: Set(input.pooja_name),
            pooja_price: Set(input.pooja_price),
            preferred_date: Set(input.preferred_date),
            preferred_time: Set(input.preferred_time),
            user_name: Set(input.user_name),
            user_phone: Set(input.user_phone),
            user_email: Set(input.user_email),
            nakshatra: Set(input.nakshatra),
            gothra: Set(input.gothra),
            special_instructions: Set(input.special_instructions),
            booking_status: Set(BookingStatus::Pending),
            payment_status: Set(if paid_online {
                PaymentStatus::Success
            } else {
                PaymentStatus::Pending
            }),
            cancellation_reason: Set(None),
            confirmed_at: Set(None),
            completed_at: Set(None),
            cancelled_at: Set(None),
            razorpay_payment_id: Set(input.razorpay_payment_id),
            user_id: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = booking.insert(&txn).await?;
        txn.commit().await?;

        Ok(inserted)
    }

    /// Finds a booking by receipt number.
    ///
    /// # Errors
    ///
    /// Returns `BookingRepositoryError::ReceiptNotFound` when no
    /// booking carries the receipt number.
    pub async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> Result<pooja_bookings::Model, BookingRepositoryError> {
        pooja_bookings::Entity::find()
            .filter(pooja_bookings::Column::ReceiptNumber.eq(receipt_number))
            .one(&self.db)
            .await?
            .ok_or_else(|| BookingRepositoryError::ReceiptNotFound(receipt_number.to_string()))
    }

    /// Applies an admin action to a booking.
    ///
    /// The state machine is consulted before any write: a repeated or
    /// out-of-order action is rejected and the row is untouched, so
    /// each transition timestamp is stamped exactly once. A cancel
    /// without a reason records the default.
    ///
    /// # Errors
    ///
    /// Returns `BookingRepositoryError::NotFound` for unknown ids and
    /// `BookingRepositoryError::Transition` for rejected actions.
    pub async fn apply_admin_action(
        &self,
        booking_id: Uuid,
        action: AdminAction,
        reason: Option<String>,
    ) -> Result<pooja_bookings::Model, BookingRepositoryError> {
        let booking = pooja_bookings::Entity::find_by_id(booking_id)
            .one(&self.db)
            .await?
            .ok_or(BookingRepositoryError::NotFound(booking_id))?;

        let current = (&booking.booking_status).into();
        let next = apply_action(current, action)?;

        let now = chrono::Utc::now().into();
        let mut active: pooja_bookings::ActiveModel = booking.into();
        active.booking_status = Set(next.into());
        active.updated_at = Set(now);

        match action {
            AdminAction::Confirm => active.confirmed_at = Set(Some(now)),
            AdminAction::Complete => active.completed_at = Set(Some(now)),
            AdminAction::Cancel => {
                active.cancelled_at = Set(Some(now));
                active.cancellation_reason =
                    Set(Some(reason.unwrap_or_else(|| {
                        DEFAULT_CANCELLATION_REASON.to_string()
                    })));
            }
        }

        Ok(active.update(&self.db).await?)
    }

    /// Lists bookings for the admin view.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &BookingFilter,
        page: &PageRequest,
    ) -> Result<(Vec<pooja_bookings::Model>, u64), BookingRepositoryError> {
        let mut condition = Condition::all();

        if let Some(status) = &filter.status {
            condition = condition.add(pooja_bookings::Column::BookingStatus.eq(status.clone()));
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(pooja_bookings::Column::UserName.contains(search))
                    .add(pooja_bookings::Column::UserPhone.contains(search))
                    .add(pooja_bookings::Column::UserEmail.contains(search))
                    .add(pooja_bookings::Column::PoojaName.contains(search))
                    .add(pooja_bookings::Column::BookingNumber.contains(search))
                    .add(pooja_bookings::Column::ReceiptNumber.contains(search))
                    .add(pooja_bookings::Column::Nakshatra.contains(search))
                    .add(pooja_bookings::Column::SpecialInstructions.contains(search))
                    .add(pooja_bookings::Column::PreferredTime.contains(search)),
            );
        }

        let total = pooja_bookings::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let rows = pooja_bookings::Entity::find()
            .filter(condition)
            .order_by_desc(pooja_bookings::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }

    /// Returns the number of bookings per status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn status_counts(&self) -> Result<Vec<(BookingStatus, u64)>, BookingRepositoryError> {
        let rows: Vec<StatusCountRow> = pooja_bookings::Entity::find()
            .select_only()
            .column(pooja_bookings::Column::BookingStatus)
            .column_as(pooja_bookings::Column::Id.count(), "count")
            .group_by(pooja_bookings::Column::BookingStatus)
            .into_model()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                #[allow(clippy::cast_sign_loss)]
                let count = row.count.max(0) as u64;
                (row.booking_status, count)
            })
            .collect())
    }
}

/// Generates a short booking reference, `BK-DDMMYY-XXXX`.
fn generate_booking_number(id: Uuid) -> String {
    let today = Utc::now().with_timezone(&Kolkata).date_naive();
    let suffix = &id.simple().to_string()[..4];
    format!(
        "BK-{:02}{:02}{:02}-{}",
        today.day(),
        today.month(),
        today.year() % 100,
        suffix.to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_number_shape() {
        let id = Uuid::new_v4();
        let number = generate_booking_number(id);
        assert!(number.starts_with("BK-"));
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 4);
    }
}
