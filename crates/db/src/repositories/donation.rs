//! Donation repository for database operations.
//!
//! Donations are created PENDING with a temporary receipt placeholder
//! when the gateway order is opened, and finalized to SUCCESS with a
//! permanent fiscal-year receipt number once the payment signature has
//! been verified. Rows are never deleted.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use devasthana_core::fiscal;
use devasthana_shared::types::pagination::PageRequest;
use devasthana_shared::types::receipt::{
    ReceiptKind, format_receipt_number, temporary_receipt_number,
};

use crate::entities::{donations, sea_orm_active_enums::PaymentStatus, users};

use super::{receipt, user};

/// Error types for donation operations.
#[derive(Debug, thiserror::Error)]
pub enum DonationError {
    /// Donation not found by id.
    #[error("Donation not found: {0}")]
    NotFound(Uuid),

    /// Donation not found by receipt number.
    #[error("Donation not found for receipt: {0}")]
    ReceiptNotFound(String),

    /// Donation amount must be positive.
    #[error("Donation amount must be greater than zero")]
    InvalidAmount,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a pending donation at order time.
#[derive(Debug, Clone)]
pub struct CreateDonationInput {
    /// Donation amount in rupees.
    pub amount: Decimal,
    /// Donation type label.
    pub donation_type: String,
    /// Optional purpose text.
    pub donation_purpose: Option<String>,
    /// Gateway order id the donation is tied to.
    pub razorpay_order_id: String,
}

/// Donor contact details supplied with payment verification.
#[derive(Debug, Clone)]
pub struct DonorContact {
    /// Donor display name.
    pub full_name: String,
    /// Phone in E.164 form (the upsert key).
    pub phone: String,
    /// Email, when provided.
    pub email: Option<String>,
    /// City, when provided.
    pub city: Option<String>,
    /// State, when provided.
    pub state: Option<String>,
    /// Postal code, when provided.
    pub pincode: Option<String>,
    /// Purpose text overriding the one captured at order time.
    pub donation_purpose: Option<String>,
}

/// Filter options for listing donations.
#[derive(Debug, Clone, Default)]
pub struct DonationFilter {
    /// Filter by payment status.
    pub status: Option<PaymentStatus>,
    /// Free-text search over receipt number, type, donor name/phone.
    pub search: Option<String>,
}

/// Donation repository.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    db: DatabaseConnection,
}

impl DonationRepository {
    /// Creates a new donation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a PENDING donation tied to a freshly created gateway
    /// order.
    ///
    /// The receipt column holds a `TEMP/...` placeholder until the
    /// payment is verified; no sequence value is consumed yet.
    ///
    /// # Errors
    ///
    /// Returns `DonationError::InvalidAmount` for non-positive amounts,
    /// or a database error.
    pub async fn create_pending(
        &self,
        input: CreateDonationInput,
    ) -> Result<donations::Model, DonationError> {
        if input.amount <= Decimal::ZERO {
            return Err(DonationError::InvalidAmount);
        }

        let now = chrono::Utc::now().into();
        let fiscal_year = fiscal::current_fiscal_year();

        let donation = donations::ActiveModel {
            id: Set(Uuid::new_v4()),
            receipt_number: Set(temporary_receipt_number(
                &fiscal_year,
                &input.razorpay_order_id,
            )),
            user_id: Set(None),
            amount: Set(input.amount),
            donation_type: Set(input.donation_type),
            donation_purpose: Set(input.donation_purpose),
            payment_status: Set(PaymentStatus::Pending),
            payment_method: Set("razorpay".to_string()),
            razorpay_order_id: Set(input.razorpay_order_id),
            razorpay_payment_id: Set(None),
            razorpay_signature: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(donation.insert(&self.db).await?)
    }

    /// Finds a donation by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<donations::Model>, DonationError> {
        Ok(donations::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Finds a donation with its linked user by receipt number.
    ///
    /// # Errors
    ///
    /// Returns `DonationError::ReceiptNotFound` when no donation
    /// carries the receipt number.
    pub async fn find_by_receipt_number(
        &self,
        receipt_number: &str,
    ) -> Result<(donations::Model, Option<users::Model>), DonationError> {
        donations::Entity::find()
            .filter(donations::Column::ReceiptNumber.eq(receipt_number))
            .find_also_related(users::Entity)
            .one(&self.db)
            .await?
            .ok_or_else(|| DonationError::ReceiptNotFound(receipt_number.to_string()))
    }

    /// Finalizes a verified payment.
    ///
    /// Caller contract: the payment signature has already passed the
    /// verification gate. One transaction covers sequence issuance, the
    /// donor upsert with aggregate increments, and the donation update;
    /// it commits or rolls back as a unit, so an abort after the
    /// increment leaves a gap in the sequence, never a half-finalized
    /// donation.
    ///
    /// Re-finalizing an already SUCCESS donation is a no-op returning
    /// the committed state, so gateway retries cannot issue a second
    /// receipt or double-count aggregates.
    ///
    /// # Errors
    ///
    /// Returns `DonationError::NotFound` if the donation id does not
    /// exist, or a database error (which aborts the whole group).
    pub async fn finalize_payment(
        &self,
        donation_id: Uuid,
        contact: &DonorContact,
        payment_id: &str,
        signature: &str,
    ) -> Result<(donations::Model, Option<users::Model>), DonationError> {
        let txn = self.db.begin().await?;

        let donation = donations::Entity::find_by_id(donation_id)
            .one(&txn)
            .await?
            .ok_or(DonationError::NotFound(donation_id))?;

        if donation.payment_status == PaymentStatus::Success {
            let linked_user = match donation.user_id {
                Some(user_id) => users::Entity::find_by_id(user_id).one(&txn).await?,
                None => None,
            };
            txn.commit().await?;
            return Ok((donation, linked_user));
        }

        let fiscal_year = fiscal::current_fiscal_year();
        let sequence = receipt::issue_next(&txn, &fiscal_year).await?;
        let receipt_number = format_receipt_number(ReceiptKind::Donation, &fiscal_year, sequence);

        let donor = user::upsert_donor(
            &txn,
            &contact.phone,
            &contact.full_name,
            contact.email.as_deref(),
            contact.city.as_deref(),
            contact.state.as_deref(),
            contact.pincode.as_deref(),
            donation.amount,
        )
        .await?;

        let now = chrono::Utc::now().into();
        let purpose = contact
            .donation_purpose
            .clone()
            .or_else(|| donation.donation_purpose.clone());

        let mut active: donations::ActiveModel = donation.into();
        active.receipt_number = Set(receipt_number);
        active.user_id = Set(Some(donor.id));
        active.payment_status = Set(PaymentStatus::Success);
        active.donation_purpose = Set(purpose);
        active.razorpay_payment_id = Set(Some(payment_id.to_string()));
        active.razorpay_signature = Set(Some(signature.to_string()));
        active.updated_at = Set(now);
        let finalized = active.update(&txn).await?;

        txn.commit().await?;

        Ok((finalized, Some(donor)))
    }

    /// Lists donations with their linked users for the admin view.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        filter: &DonationFilter,
        page: &PageRequest,
    ) -> Result<(Vec<(donations::Model, Option<users::Model>)>, u64), DonationError> {
        let mut condition = Condition::all();

        if let Some(status) = &filter.status {
            condition = condition.add(donations::Column::PaymentStatus.eq(status.clone()));
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            condition = condition.add(
                Condition::any()
                    .add(donations::Column::ReceiptNumber.contains(search))
                    .add(donations::Column::DonationType.contains(search))
                    .add(users::Column::Name.contains(search))
                    .add(users::Column::Phone.contains(search)),
            );
        }

        let total = donations::Entity::find()
            .join(JoinType::LeftJoin, donations::Relation::Users.def())
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let rows = donations::Entity::find()
            .find_also_related(users::Entity)
            .filter(condition)
            .order_by_desc(donations::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((rows, total))
    }
}
