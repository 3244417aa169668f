//! # Seed Data Generator
//!
//! Populates an empty database with a coffee and dessert menu plus a few
//! discount codes.
//!
//! ## Usage
//! ```bash
//! # Seed ./brew_dev.db
//! cargo run -p brew-db --bin seed
//!
//! # Specify database path
//! cargo run -p brew-db --bin seed -- --db ./data/brew.db
//!
//! # Give every product the same starting stock
//! cargo run -p brew-db --bin seed -- --stock 50
//! ```

use std::env;

use brew_core::{Category, DiscountCode, DiscountRate, Product};
use brew_db::{Database, DbConfig};

/// (name, price in cents, category)
const MENU: &[(&str, i64, Category)] = &[
    ("Espresso", 300, Category::Drink),
    ("Americano", 325, Category::Drink),
    ("Cappuccino", 400, Category::Drink),
    ("Latte", 425, Category::Drink),
    ("Flat White", 425, Category::Drink),
    ("Mocha", 450, Category::Drink),
    ("Chai Latte", 425, Category::Drink),
    ("Hot Chocolate", 375, Category::Drink),
    ("Matcha Latte", 475, Category::Drink),
    ("Muffin", 300, Category::Dessert),
    ("Croissant", 325, Category::Dessert),
    ("Brownie", 350, Category::Dessert),
    ("Cheesecake", 550, Category::Dessert),
    ("Cinnamon Roll", 375, Category::Dessert),
    ("Banana Bread", 325, Category::Dessert),
];

/// (code, fraction, active)
const CODES: &[(&str, f64, bool)] = &[
    ("WELCOME10", 0.10, true),
    ("LOYALTY15", 0.15, true),
    ("STAFF50", 0.50, true),
    ("SUMMER25", 0.25, false),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./brew_dev.db");
    let mut stock: i64 = 25;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--stock" | "-s" => {
                if i + 1 < args.len() {
                    stock = args[i + 1].parse().unwrap_or(25);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Brew Counter Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./brew_dev.db)");
                println!("  -s, --stock <N>    Starting stock per product (default: 25)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Brew Counter Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!("Stock:    {} per product", stock);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Adding menu...");
    let mut added = 0;
    for (name, price_cents, category) in MENU {
        // Desserts sell out faster; start them lower so the low-stock
        // report has something to show
        let start_stock = match category {
            Category::Drink => stock,
            Category::Dessert => (stock / 5).max(1),
        };
        let product = Product::new(*name, *price_cents, start_stock, *category);
        match db.products().insert(&product).await {
            Ok(_) => added += 1,
            Err(e) => eprintln!("Failed to insert {}: {}", name, e),
        }
    }
    println!("✓ Added {} products", added);

    if db.discount_codes().count().await? == 0 {
        for (code, fraction, active) in CODES {
            let mut discount = DiscountCode::new(*code, DiscountRate::from_fraction(*fraction));
            discount.active = *active;
            if let Err(e) = db.discount_codes().insert(&discount).await {
                eprintln!("Failed to insert code {}: {}", code, e);
            }
        }
        println!("✓ Added {} discount codes", CODES.len());
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
