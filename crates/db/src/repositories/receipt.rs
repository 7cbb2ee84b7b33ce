//! Receipt sequence issuance.
//!
//! Receipt sequences are per-fiscal-year counters backing the
//! human-readable receipt numbers. Issuance must happen inside the same
//! transaction that assigns the receipt number to its record: two
//! concurrent callers for the same fiscal year then never observe the
//! same value. If that transaction later aborts, the value is consumed
//! and not reused (a gap, never a duplicate).

use sea_orm::{ConnectionTrait, DbErr, Statement};

/// Issues the next sequence number for a fiscal year.
///
/// Runs a single atomic upsert-increment, so no application-level
/// locking is needed. Pass the caller's open transaction so the
/// increment commits or rolls back together with the dependent record
/// update.
///
/// # Errors
///
/// Returns an error if the database statement fails.
pub async fn issue_next<C: ConnectionTrait>(conn: &C, fiscal_year: &str) -> Result<i64, DbErr> {
    let stmt = Statement::from_sql_and_values(
        conn.get_database_backend(),
        r"INSERT INTO receipt_sequences (fiscal_year, last_sequence, updated_at)
          VALUES ($1, 1, NOW())
          ON CONFLICT (fiscal_year)
          DO UPDATE SET
              last_sequence = receipt_sequences.last_sequence + 1,
              updated_at = NOW()
          RETURNING last_sequence",
        [fiscal_year.into()],
    );

    let row = conn
        .query_one(stmt)
        .await?
        .ok_or_else(|| DbErr::Custom("receipt sequence upsert returned no row".to_string()))?;

    row.try_get("", "last_sequence")
}
