//! # Seed Data Generator
//!
//! Populates the store with test products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 500 products (default)
//! cargo run -p stockmate-pos --bin seed
//!
//! # Generate custom amount
//! cargo run -p stockmate-pos --bin seed -- --count 200
//!
//! # Specify data directory
//! cargo run -p stockmate-pos --bin seed -- --data-dir ./stockmate_data
//! ```
//!
//! ## Generated Products
//! Creates realistic product data across categories:
//! - Grocery (rice, dal, flour, oil)
//! - Beverages (tea, coffee, juice, soft drinks)
//! - Snacks (biscuits, namkeen, chips)
//! - Dairy (milk, paneer, curd, ghee)
//! - Personal Care (soap, shampoo, toothpaste)
//!
//! Each product has a barcode, deterministic pseudo-random prices
//! (purchase below selling), and a stock level between 0 and 100.

use std::env;
use std::path::PathBuf;

use stockmate_store::{NewProduct, Store, StoreConfig};

/// Product categories for realistic test data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Grocery",
        &[
            "Basmati Rice",
            "Sona Masoori Rice",
            "Toor Dal",
            "Moong Dal",
            "Chana Dal",
            "Wheat Atta",
            "Besan",
            "Sunflower Oil",
            "Mustard Oil",
            "Groundnut Oil",
            "Sugar",
            "Jaggery",
            "Iodised Salt",
            "Turmeric Powder",
            "Red Chilli Powder",
            "Coriander Powder",
            "Garam Masala",
            "Poha",
            "Sooji",
            "Maida",
        ],
    ),
    (
        "Beverages",
        &[
            "Assam Tea",
            "Darjeeling Tea",
            "Green Tea",
            "Filter Coffee",
            "Instant Coffee",
            "Mango Juice",
            "Orange Juice",
            "Mixed Fruit Juice",
            "Cola",
            "Lemon Soda",
            "Jeera Soda",
            "Packaged Water",
            "Coconut Water",
            "Buttermilk",
            "Lassi",
            "Energy Drink",
            "Rose Sharbat",
            "Badam Milk",
            "Iced Tea",
            "Nimbu Pani Mix",
        ],
    ),
    (
        "Snacks",
        &[
            "Glucose Biscuits",
            "Cream Biscuits",
            "Marie Biscuits",
            "Salted Chips",
            "Masala Chips",
            "Banana Chips",
            "Aloo Bhujia",
            "Moong Dal Namkeen",
            "Mixture",
            "Sev",
            "Khakhra",
            "Mathri",
            "Roasted Peanuts",
            "Chikki",
            "Soan Papdi",
            "Rusk",
            "Cheese Balls",
            "Popcorn",
            "Instant Noodles",
            "Pasta",
        ],
    ),
    (
        "Dairy",
        &[
            "Toned Milk",
            "Full Cream Milk",
            "Paneer",
            "Curd",
            "Ghee",
            "Butter",
            "Cheese Slices",
            "Cheese Cubes",
            "Fresh Cream",
            "Khoya",
            "Flavoured Yogurt",
            "Shrikhand",
            "Milk Powder",
            "Condensed Milk",
            "Ice Cream Vanilla",
            "Ice Cream Chocolate",
            "Kulfi",
            "Chaas",
            "Malai",
            "Dahi",
        ],
    ),
    (
        "Personal Care",
        &[
            "Bathing Soap",
            "Handwash",
            "Shampoo",
            "Hair Oil",
            "Toothpaste",
            "Toothbrush",
            "Face Wash",
            "Body Lotion",
            "Talcum Powder",
            "Shaving Cream",
            "Razor",
            "Detergent Powder",
            "Detergent Bar",
            "Dishwash Liquid",
            "Floor Cleaner",
            "Toilet Cleaner",
            "Phenyl",
            "Agarbatti",
            "Cotton Buds",
            "Sanitizer",
        ],
    ),
];

/// Pack size variants with a price addon in paise
const SIZES: &[(&str, i64)] = &[
    ("100g", 0),
    ("250g", 1500),
    ("500g", 3500),
    ("1kg", 6500),
    ("200ml", 0),
    ("500ml", 2000),
    ("1L", 4500),
    ("Pack of 4", 5500),
    ("Pack of 10", 12000),
    ("Family Pack", 9000),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 500;
    let mut data_dir = PathBuf::from("./stockmate_data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(500);
                    i += 1;
                }
            }
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("StockMate Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>        Number of products to generate (default: 500)");
                println!("  -d, --data-dir <PATH>  Data directory (default: ./stockmate_data)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 StockMate Seed Data Generator");
    println!("================================");
    println!("Data directory: {}", data_dir.display());
    println!("Products: {}", count);
    println!();

    // Open the store
    let store = Store::open(StoreConfig::new(&data_dir)).await?;
    println!("✓ Store opened");

    // Check existing products
    let existing = store.catalog().count().await;
    if existing > 0 {
        println!("⚠ Store already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data directory to regenerate.");
        return Ok(());
    }

    // Generate products
    println!();
    println!("Generating products...");

    let mut generated = 0;
    let start = std::time::Instant::now();

    'outer: for (category_idx, (category, names)) in CATEGORIES.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for (size_idx, (size, price_addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }

                let seed = category_idx * 1000 + name_idx * 20 + size_idx;
                let product = generate_product(category, name, size, *price_addon, seed);

                if let Err(e) = store.catalog().insert(product).await {
                    eprintln!("Failed to insert {} {}: {}", name, size, e);
                    continue;
                }

                generated += 1;

                if generated % 100 == 0 {
                    println!("  Generated {} products...", generated);
                }
            }
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", generated, elapsed);

    // Verify search
    println!();
    println!("Verifying search...");
    let results = store.catalog().search("rice").await;
    println!("  Search 'rice': {} results", results.len());
    let results = store.catalog().search("Dairy").await;
    println!("  Search 'Dairy': {} results", results.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product draft with deterministic pseudo-random data.
fn generate_product(
    category: &str,
    name: &str,
    size: &str,
    price_addon: i64,
    seed: usize,
) -> NewProduct {
    // Selling price: base ₹19.90-₹99.90 + size addon
    let base_price = 1990 + ((seed * 17) % 8000) as i64;
    let selling_price_paise = base_price + price_addon;

    // Purchase price: 60-80% of selling
    let cost_pct = 60 + (seed % 20) as i64;
    let purchase_price_paise = selling_price_paise * cost_pct / 100;

    // Stock 0-100
    let quantity = (seed % 101) as i64;

    // Barcode: 13 digits, India GS1 prefix
    let barcode = Some(format!("890{:010}", seed));

    NewProduct {
        name: format!("{} {}", name, size),
        category: category.to_string(),
        purchase_price_paise,
        selling_price_paise,
        quantity,
        barcode,
    }
}
