//! # Seed Data Generator
//!
//! Populates the database with a demo catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./store_dev.db
//! cargo run -p store-db --bin seed
//!
//! # Specify database path
//! cargo run -p store-db --bin seed -- --db ./data/store.db
//! ```
//!
//! ## Generated Data
//! - One product per catalog entry, a few of them out of stock or unavailable
//!   so backorders show up right away
//! - A handful of customers
//! - Two discounts: one active now, one that expired last month

use chrono::{Duration, Utc};
use std::env;
use store_core::{NewCustomer, NewDiscount, NewProduct};
use store_db::{Database, DbConfig};

/// (name, price in cents, stock, available)
const CATALOG: &[(&str, i64, i64, bool)] = &[
    ("Espresso Beans 1kg", 2499, 40, true),
    ("Oat Milk 1L", 349, 120, true),
    ("Ceramic Mug", 1299, 15, true),
    ("Pour-Over Kettle", 4999, 3, true),
    ("Paper Filters (100)", 599, 0, true),
    ("Burr Grinder", 12999, 2, true),
    ("Travel Tumbler", 2199, 25, false),
    ("Cold Brew Jar", 2899, 8, true),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Jordan Reyes", "+1-555-0101"),
    ("Sam Okafor", "+1-555-0102"),
    ("Priya Natarajan", "+1-555-0103"),
    ("Alex Kim", "+1-555-0104"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./store_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Store Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./store_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Store Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().list().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    for (name, price_cents, count, availability) in CATALOG {
        let product = NewProduct {
            name: name.to_string(),
            description: None,
            price_cents: *price_cents,
            count: *count,
            availability: *availability,
            expiry: None,
        }
        .into_product(now);

        if let Err(e) = db.products().insert(&product).await {
            eprintln!("Failed to insert {}: {}", name, e);
        }
    }
    println!("✓ {} products", CATALOG.len());

    for (full_name, phone) in CUSTOMERS {
        let customer = NewCustomer {
            full_name: full_name.to_string(),
            address: None,
            contact_number: Some(phone.to_string()),
        }
        .into_customer(now);
        db.customers().insert(&customer).await?;
    }
    println!("✓ {} customers", CUSTOMERS.len());

    let discounts = [
        NewDiscount {
            name: "Ten Percent Off".to_string(),
            description: Some("10% off orders of $50.00 or more".to_string()),
            value_bps: 1000,
            start_date_time: now - Duration::days(1),
            end_date_time: now + Duration::days(30),
            min_price_cents: 5000,
            coupon_code: Some("TENOFF".to_string()),
        },
        NewDiscount {
            name: "Spring Clearance".to_string(),
            description: None,
            value_bps: 2500,
            start_date_time: now - Duration::days(60),
            end_date_time: now - Duration::days(30),
            min_price_cents: 0,
            coupon_code: Some("SPRING".to_string()),
        },
    ];
    for discount in discounts {
        db.discounts().insert(&discount.into_discount()).await?;
    }

    let active = db.discounts().list_active(now).await?;
    println!("✓ 2 discounts ({} active)", active.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
