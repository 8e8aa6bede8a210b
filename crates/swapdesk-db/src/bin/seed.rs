//! # Seed Data Generator
//!
//! Populates the user store with sample users for development.
//!
//! ## Usage
//! ```bash
//! # Generate 50 users (default)
//! cargo run -p swapdesk-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p swapdesk-db --bin seed -- --count 500
//!
//! # Specify database path
//! cargo run -p swapdesk-db --bin seed -- --db ./db/users.sqlite
//! ```
//!
//! Each user gets a name built from the first/last name lists below and a
//! unique email `{first}.{last}.{index}@example.com`.

use std::env;
use swapdesk_core::NewUser;
use swapdesk_db::{Database, DbConfig};

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Frances", "Grace", "Ken", "Linus",
    "Margaret", "Niklaus", "Radia", "Tim", "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Turing", "Liskov", "Shannon", "Knuth", "Dijkstra", "Allen", "Hopper",
    "Thompson", "Torvalds", "Hamilton", "Wirth", "Perlman", "Berners-Lee", "Matsumoto",
];

const DEFAULT_COUNT: usize = 50;
const DEFAULT_DB: &str = "./db/users.sqlite";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut db_path = String::from(DEFAULT_DB);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(DEFAULT_COUNT);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("swapdesk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of users to generate (default: {})", DEFAULT_COUNT);
                println!("  -d, --db <PATH>    Database file path (default: {})", DEFAULT_DB);
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 swapdesk Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Users:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    println!();
    println!("Generating users...");

    let start = std::time::Instant::now();
    let mut generated = 0;

    for index in 0..count {
        let new_user = generate_user(index)?;

        if let Err(e) = db.users().insert(&new_user).await {
            eprintln!("Failed to insert {}: {}", new_user.email(), e);
            continue;
        }

        generated += 1;
        if generated % 100 == 0 {
            println!("  Generated {} users...", generated);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} users in {:?}", generated, elapsed);

    db.close().await;
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the `index`-th sample user.
fn generate_user(index: usize) -> Result<NewUser, swapdesk_core::ValidationError> {
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len() + index) % LAST_NAMES.len()];

    let name = format!("{} {}", first, last);
    let email = format!(
        "{}.{}.{}@example.com",
        first.to_lowercase(),
        last.to_lowercase(),
        index
    );

    NewUser::new(&name, &email)
}
