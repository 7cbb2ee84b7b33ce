//! User repository for database operations.
//!
//! Users are donors/devotees keyed by phone number. The donor upsert
//! runs inside the payment-finalization transaction and folds the new
//! donation into the user's aggregates atomically.

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Statement,
};
use uuid::Uuid;

use crate::entities::users;

/// User repository for lookup operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by phone number (E.164 form).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_phone(&self, phone: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Phone.eq(phone))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }
}

/// Upserts a donor by phone number and folds one donation into the
/// aggregates.
///
/// A single atomic upsert: contact fields are refreshed, the donation
/// total and count are incremented, and the activity timestamps are
/// stamped, all in one statement so concurrent finalizations for the
/// same phone serialize on the row. An email already owned by a
/// different user is silently skipped rather than failing the payment.
///
/// # Errors
///
/// Returns an error if a database statement fails.
pub async fn upsert_donor<C: ConnectionTrait>(
    conn: &C,
    phone: &str,
    name: &str,
    email: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    pincode: Option<&str>,
    amount: Decimal,
) -> Result<users::Model, DbErr> {
    // Writing an email that another phone number already registered
    // would trip the unique constraint and abort the whole payment.
    let email = match email {
        Some(e) => {
            let taken = users::Entity::find()
                .filter(users::Column::Email.eq(e))
                .filter(users::Column::Phone.ne(phone))
                .one(conn)
                .await?
                .is_some();
            if taken { None } else { Some(e) }
        }
        None => None,
    };

    let stmt = Statement::from_sql_and_values(
        conn.get_database_backend(),
        r"INSERT INTO users (
              id, phone, name, email, city, state, pincode,
              total_donations, donation_count,
              first_donation_at, last_donation_at, created_at, updated_at
          )
          VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 1, NOW(), NOW(), NOW(), NOW())
          ON CONFLICT (phone)
          DO UPDATE SET
              name = EXCLUDED.name,
              email = COALESCE(EXCLUDED.email, users.email),
              city = COALESCE(EXCLUDED.city, users.city),
              state = COALESCE(EXCLUDED.state, users.state),
              pincode = COALESCE(EXCLUDED.pincode, users.pincode),
              total_donations = users.total_donations + EXCLUDED.total_donations,
              donation_count = users.donation_count + 1,
              first_donation_at = COALESCE(users.first_donation_at, EXCLUDED.first_donation_at),
              last_donation_at = EXCLUDED.last_donation_at,
              updated_at = EXCLUDED.updated_at
          RETURNING id",
        [
            Uuid::new_v4().into(),
            phone.into(),
            name.into(),
            email.map(ToString::to_string).into(),
            city.map(ToString::to_string).into(),
            state.map(ToString::to_string).into(),
            pincode.map(ToString::to_string).into(),
            amount.into(),
        ],
    );

    let row = conn
        .query_one(stmt)
        .await?
        .ok_or_else(|| DbErr::Custom("user upsert returned no row".to_string()))?;
    let id: Uuid = row.try_get("", "id")?;

    users::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| DbErr::Custom("upserted user not found".to_string()))
}
