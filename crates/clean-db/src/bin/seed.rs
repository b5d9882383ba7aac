//! # Seed Data Generator
//!
//! Populates the database with users for development. Every user goes
//! through `AddUserUseCase`, the same path as a real registration.
//!
//! ## Usage
//! ```bash
//! # Generate 100 users (default)
//! cargo run -p clean-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p clean-db --bin seed -- --count 1000
//!
//! # Specify database path (overrides CLEAN_DB_PATH)
//! cargo run -p clean-db --bin seed -- --db ./data/users.db
//! ```

use std::env;
use std::sync::Arc;

use clean_core::{Collection, Request, Response, UseCase};
use clean_db::{init_tracing, Database, DbConfig, Location};
use clean_users::AddUserUseCase;
use tracing::{info, warn};

const DEFAULT_COUNT: usize = 100;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Barbara", "Margaret", "Frances", "Katherine", "Radia", "Hedy", "Joan", "Sophie",
];

const SURNAMES: &[&str] = &[
    "Lovelace", "Hopper", "Liskov", "Hamilton", "Allen", "Johnson", "Perlman", "Lamarr", "Clarke",
    "Wilson",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut count = DEFAULT_COUNT;
    let mut config = DbConfig::from_env()?;

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
                    config.location = Location::File(args[i + 1].clone().into());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Clean Use Cases Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of users to generate (default: {DEFAULT_COUNT})");
                println!("  -d, --db <PATH>    Database file path (default: $CLEAN_DB_PATH or ./clean_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(argument = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    info!(location = %config.location, count, "Seeding users");

    let db = Database::new(config).await?;
    let repository = Arc::new(db.users());

    let existing = repository.count().await?;
    if existing > 0 {
        warn!(existing, "Database already has users; skipping seed");
        return Ok(());
    }

    let add = AddUserUseCase::new(repository);
    let start = std::time::Instant::now();
    let mut generated = 0usize;

    for seed in 0..count {
        let mut response = Response::new();
        add.invoke(&Request::new(generate_user(seed)), &mut response).await;

        if !response.is_success() {
            warn!(seed, errors = ?response.errors(), "Failed to add user");
            continue;
        }

        generated += 1;
        if generated % 50 == 0 {
            info!(generated, "Progress");
        }
    }

    let elapsed = start.elapsed();
    info!(
        generated,
        elapsed_ms = elapsed.as_millis() as u64,
        rate = generated as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        "Seed complete"
    );

    db.close().await;
    Ok(())
}

/// Builds the raw input for user number `seed`.
fn generate_user(seed: usize) -> Collection {
    let name = FIRST_NAMES[seed % FIRST_NAMES.len()];
    let surname = SURNAMES[(seed / FIRST_NAMES.len()) % SURNAMES.len()];

    Collection::new()
        .with("name", name)
        .with("surname", surname)
        .with(
            "email",
            format!("{}.{}.{}@example.com", name.to_lowercase(), surname.to_lowercase(), seed),
        )
        .with("password", format!("seed-password-{seed:05}"))
}
