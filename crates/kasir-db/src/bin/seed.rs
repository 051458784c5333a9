//! # Seed Data Generator
//!
//! Populates the database with a warung-style catalogue for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default catalogue into ./kasir_dev.db
//! cargo run -p kasir-db --bin seed
//!
//! # Also ring up some demo sales
//! cargo run -p kasir-db --bin seed -- --sales 50
//!
//! # Load products from a JSON file instead ([{"name", "unit_price", "stock_quantity"}])
//! cargo run -p kasir-db --bin seed -- --fixture ./products.json
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```

use std::env;

use kasir_core::{checkout, CartLine, NewCategory, NewProduct};
use kasir_db::{Database, DbConfig};

/// Default catalogue, prices in Rupiah.
const DEFAULT_PRODUCTS: &str = r#"[
    {"name": "Indomie Goreng",      "unit_price": 3500,  "stock_quantity": 120},
    {"name": "Indomie Soto",        "unit_price": 3500,  "stock_quantity": 80},
    {"name": "Kopi Susu Sachet",    "unit_price": 2000,  "stock_quantity": 200},
    {"name": "Teh Botol 450ml",     "unit_price": 7000,  "stock_quantity": 48},
    {"name": "Aqua 600ml",          "unit_price": 4000,  "stock_quantity": 96},
    {"name": "Beras 5kg",           "unit_price": 75000, "stock_quantity": 20},
    {"name": "Minyak Goreng 1L",    "unit_price": 18000, "stock_quantity": 30},
    {"name": "Gula Pasir 1kg",      "unit_price": 16000, "stock_quantity": 25},
    {"name": "Telur Ayam 1kg",      "unit_price": 28000, "stock_quantity": 15},
    {"name": "Sabun Mandi",         "unit_price": 5000,  "stock_quantity": 60},
    {"name": "Keripik Singkong",    "unit_price": 10000, "stock_quantity": 40},
    {"name": "Roti Tawar",          "unit_price": 15000, "stock_quantity": 12}
]"#;

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Makanan", "Makanan instan dan camilan"),
    ("Minuman", "Minuman kemasan"),
    ("Sembako", "Kebutuhan pokok"),
    ("Kebersihan", "Sabun dan perlengkapan mandi"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasir_dev.db");
    let mut fixture: Option<String> = None;
    let mut sales: usize = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--fixture" | "-f" => {
                if i + 1 < args.len() {
                    fixture = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sales = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (default: ./kasir_dev.db)");
                println!("  -f, --fixture <PATH>   JSON array of products to load");
                println!("  -s, --sales <N>        Demo checkouts to ring up (default: 0)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let products: Vec<NewProduct> = match &fixture {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => serde_json::from_str(DEFAULT_PRODUCTS)?,
    };

    println!("🌱 Kasir POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Products: {}", products.len());
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

    for (name, description) in DEFAULT_CATEGORIES {
        db.categories()
            .insert(&NewCategory {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
            .await?;
    }
    println!("✓ Inserted {} categories", DEFAULT_CATEGORIES.len());

    let mut ids = Vec::with_capacity(products.len());
    for product in &products {
        if let Err(e) = kasir_core::validation::validate_new_product(product) {
            eprintln!("Skipping {}: {}", product.name, e);
            continue;
        }
        match db.products().insert(product).await {
            Ok(inserted) => ids.push(inserted.id),
            Err(e) => eprintln!("Failed to insert {}: {}", product.name, e),
        }
    }
    println!("✓ Inserted {} products", ids.len());

    if sales > 0 && !ids.is_empty() {
        let store = db.store();
        let start = std::time::Instant::now();

        for n in 0..sales {
            // Deterministic carts of 1-3 lines spread over the catalogue.
            let lines = 1 + n % 3;
            let cart: Vec<CartLine> = (0..lines)
                .map(|k| CartLine::new(ids[(n * 7 + k * 3) % ids.len()], 1 + ((n + k) % 4) as i64))
                .collect();

            if let Err(e) = checkout(&store, &cart).await {
                eprintln!("Checkout {} failed: {}", n + 1, e);
            }
        }

        println!("✓ Rang up {} sales in {:?}", sales, start.elapsed());
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;
    Ok(())
}
