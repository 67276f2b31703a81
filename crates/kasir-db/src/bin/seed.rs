//! # Seed Data Generator
//!
//! Populates the database with the demo catalogue for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir.db
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! Nothing is inserted when the products table already has rows.

use std::env;
use tracing_subscriber::EnvFilter;

use kasir_core::NewProduct;
use kasir_db::{Database, DbConfig};

/// Demo catalogue: (name, price, stock)
const CATALOGUE: &[(&str, i64, i64)] = &[
    ("Indomie Goreng", 3500, 10),
    ("Vit 1000ml", 3000, 40),
    ("Kecap", 12_000, 20),
    ("Indomie Soto", 3500, 25),
    ("Teh Botol Sosro", 5000, 30),
    ("Aqua 600ml", 4000, 48),
    ("Gula Pasir 1kg", 17_500, 15),
    ("Minyak Goreng 2L", 36_000, 12),
    ("Beras 5kg", 75_000, 8),
    ("Kopi Kapal Api", 1500, 60),
    ("Sabun Lifebuoy", 4500, 24),
    ("Roti Tawar", 16_000, 6),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./kasir.db");

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
                println!("Kasir Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for (name, price, stock) in CATALOGUE {
        match db.products().insert(&NewProduct::new(*name, *price, *stock)).await {
            Ok(product) => {
                println!("  #{:<3} {:<20} {:>7} x {}", product.id, product.name, product.price, product.stock);
                generated += 1;
            }
            Err(e) => eprintln!("Failed to insert {}: {}", name, e),
        }
    }

    println!();
    println!("✓ Seeded {} products", generated);

    db.close().await;
    Ok(())
}
