//! Initial database migration.
//!
//! Creates the enums, core tables, and indexes for donations, pooja
//! bookings, users, the receipt sequence counter, and the pooja service
//! catalog.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;

        // ============================================================
        // PART 3: RECEIPT SEQUENCES
        // ============================================================
        db.execute_unprepared(RECEIPT_SEQUENCES_SQL).await?;

        // ============================================================
        // PART 4: POOJA SERVICE CATALOG
        // ============================================================
        db.execute_unprepared(POOJA_SERVICES_SQL).await?;

        // ============================================================
        // PART 5: DONATIONS
        // ============================================================
        db.execute_unprepared(DONATIONS_SQL).await?;

        // ============================================================
        // PART 6: POOJA BOOKINGS
        // ============================================================
        db.execute_unprepared(POOJA_BOOKINGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Payment status for donations and bookings
CREATE TYPE payment_status AS ENUM (
    'PENDING',
    'SUCCESS',
    'FAILED'
);

-- Booking lifecycle status
CREATE TYPE booking_status AS ENUM (
    'PENDING',
    'CONFIRMED',
    'COMPLETED',
    'CANCELLED'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    phone VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    address TEXT,
    city VARCHAR(100),
    state VARCHAR(100),
    pincode VARCHAR(10),
    total_donations NUMERIC(14, 2) NOT NULL DEFAULT 0,
    donation_count INTEGER NOT NULL DEFAULT 0,
    first_donation_at TIMESTAMPTZ,
    last_donation_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT users_email_unique UNIQUE (email),
    CONSTRAINT users_total_donations_non_negative CHECK (total_donations >= 0),
    CONSTRAINT users_donation_count_non_negative CHECK (donation_count >= 0)
);

CREATE INDEX idx_users_phone ON users (phone);
";

const RECEIPT_SEQUENCES_SQL: &str = r"
-- One row per fiscal year; last_sequence moves only via the atomic
-- upsert-increment, inside the same transaction that assigns the
-- dependent receipt number.
CREATE TABLE receipt_sequences (
    fiscal_year VARCHAR(7) PRIMARY KEY,
    last_sequence BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT receipt_sequences_positive CHECK (last_sequence >= 0)
);
";

const POOJA_SERVICES_SQL: &str = r"
CREATE TABLE pooja_services (
    id INTEGER PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    price NUMERIC(14, 2) NOT NULL,
    duration_minutes INTEGER,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    display_order INTEGER NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT pooja_services_price_positive CHECK (price > 0)
);
";

const DONATIONS_SQL: &str = r"
-- Financial records: rows are never deleted.
CREATE TABLE donations (
    id UUID PRIMARY KEY,
    receipt_number VARCHAR(64) NOT NULL UNIQUE,
    user_id UUID REFERENCES users (id),
    amount NUMERIC(14, 2) NOT NULL,
    donation_type VARCHAR(255) NOT NULL,
    donation_purpose TEXT,
    payment_status payment_status NOT NULL DEFAULT 'PENDING',
    payment_method VARCHAR(50) NOT NULL DEFAULT 'razorpay',
    razorpay_order_id VARCHAR(64) NOT NULL,
    razorpay_payment_id VARCHAR(64),
    razorpay_signature VARCHAR(128),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT donations_amount_positive CHECK (amount > 0)
);

CREATE INDEX idx_donations_user ON donations (user_id);
CREATE INDEX idx_donations_order ON donations (razorpay_order_id);
CREATE INDEX idx_donations_status ON donations (payment_status);
";

const POOJA_BOOKINGS_SQL: &str = r"
CREATE TABLE pooja_bookings (
    id UUID PRIMARY KEY,
    booking_number VARCHAR(32) NOT NULL,
    receipt_number VARCHAR(64) NOT NULL UNIQUE,
    pooja_service_id INTEGER REFERENCES pooja_services (id),
    pooja_name VARCHAR(255) NOT NULL,
    pooja_price NUMERIC(14, 2) NOT NULL,
    preferred_date DATE NOT NULL,
    preferred_time VARCHAR(50) NOT NULL,
    user_name VARCHAR(255) NOT NULL,
    user_phone VARCHAR(20) NOT NULL,
    user_email VARCHAR(255),
    nakshatra VARCHAR(100),
    gothra VARCHAR(100),
    special_instructions TEXT,
    booking_status booking_status NOT NULL DEFAULT 'PENDING',
    payment_status payment_status NOT NULL DEFAULT 'PENDING',
    cancellation_reason TEXT,
    confirmed_at TIMESTAMPTZ,
    completed_at TIMESTAMPTZ,
    cancelled_at TIMESTAMPTZ,
    razorpay_payment_id VARCHAR(64),
    user_id UUID REFERENCES users (id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT pooja_bookings_price_positive CHECK (pooja_price > 0)
);

CREATE INDEX idx_pooja_bookings_status ON pooja_bookings (booking_status);
CREATE INDEX idx_pooja_bookings_phone ON pooja_bookings (user_phone);
CREATE INDEX idx_pooja_bookings_date ON pooja_bookings (preferred_date);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS pooja_bookings;
DROP TABLE IF EXISTS donations;
DROP TABLE IF EXISTS pooja_services;
DROP TABLE IF EXISTS receipt_sequences;
DROP TABLE IF EXISTS users;
DROP TYPE IF EXISTS booking_status;
DROP TYPE IF EXISTS payment_status;
";
