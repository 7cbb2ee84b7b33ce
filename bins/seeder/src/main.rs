//! Database seeder for Devasthana.
//!
//! Seeds the pooja service catalog for local development and fresh
//! deployments. Existing rows are left untouched.
//!
//! Usage: cargo run --bin seeder

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use devasthana_db::entities::pooja_services;

struct CatalogEntry {
    id: i32,
    name: &'static str,
    description: &'static str,
    price: i64,
    duration_minutes: i32,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        id: 1,
        name: "Sri Raghavendra Swamy Maha Aradhane",
        description: "Full aradhane seva with alankara and naivedya",
        price: 1101,
        duration_minutes: 120,
    },
    CatalogEntry {
        id: 2,
        name: "Sri Satyanarayana Swamy Vratha",
        description: "Vratha with katha and prasada vitarane",
        price: 801,
        duration_minutes: 180,
    },
    CatalogEntry {
        id: 3,
        name: "Sri Lakshmi Ganapathi Homa",
        description: "Homa for prosperity and removal of obstacles",
        price: 1251,
        duration_minutes: 150,
    },
    CatalogEntry {
        id: 4,
        name: "Sri Navagraha Shanti",
        description: "Shanti for the nine grahas",
        price: 2101,
        duration_minutes: 240,
    },
    CatalogEntry {
        id: 5,
        name: "Sri Mrityunjaya Homa",
        description: "Homa for health and longevity",
        price: 1601,
        duration_minutes: 180,
    },
    CatalogEntry {
        id: 6,
        name: "Sri Sudarshana Homa",
        description: "Homa for protection from negative influences",
        price: 1851,
        duration_minutes: 200,
    },
    CatalogEntry {
        id: 7,
        name: "Sri Saneeshwara Shanti",
        description: "Shanti for Shani dosha nivarane",
        price: 951,
        duration_minutes: 160,
    },
    CatalogEntry {
        id: 8,
        name: "Sri Mahalakshmi Kubera Homa",
        description: "Homa for wealth and abundance",
        price: 2501,
        duration_minutes: 210,
    },
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = devasthana_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding pooja service catalog...");
    seed_catalog(&db).await;

    println!("Seeding complete!");
}

/// Seeds the catalog, skipping services that already exist.
async fn seed_catalog(db: &DatabaseConnection) {
    for entry in CATALOG {
        let existing = pooja_services::Entity::find_by_id(entry.id)
            .one(db)
            .await
            .expect("Failed to query pooja service");

        if existing.is_some() {
            println!("  Service {} already exists, skipping...", entry.id);
            continue;
        }

        let now = chrono_now();
        let service = pooja_services::ActiveModel {
            id: Set(entry.id),
            name: Set(entry.name.to_string()),
            description: Set(Some(entry.description.to_string())),
            price: Set(Decimal::from(entry.price)),
            duration_minutes: Set(Some(entry.duration_minutes)),
            is_active: Set(true),
            display_order: Set(entry.id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        service
            .insert(db)
            .await
            .expect("Failed to insert pooja service");
        println!("  Seeded service {}: {}", entry.id, entry.name);
    }
}

fn chrono_now() -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::Utc::now().into()
}
