//! Parameterized prefix example.
//!
//! This example demonstrates schemas whose prefix carries a `${param}`
//! placeholder:
//! - A field binds when ANY concrete candidate path satisfies it
//! - An unsatisfiable field reports every candidate that was tried
//!
//! Run with: cargo run --example parameterized

use bindcheck::prelude::*;

/// Per-environment database settings, keyed as `db.<env>.<field>`.
#[allow(dead_code)]
#[derive(ConfigHolder)]
#[config(prefix = "db.${env}", params("env"))]
struct DatabaseConfig {
    url: String,
    pool_size: i64,
}

fn main() {
    // RUST_LOG=bindcheck=trace shows the per-candidate probe decisions.
    tracing_subscriber::fmt::init();

    println!("=== Parameterized Prefix Checks ===\n");

    println!("Example 1: One environment satisfies every field");
    example_satisfiable();

    println!("\nExample 2: No environment satisfies a field");
    example_unsatisfiable();
}

fn example_satisfiable() {
    // Keys exist for two environments. A field binds if any one of them
    // can satisfy it; which one does is not part of the verdict.
    let source = MapSource::new()
        .with_value("db.prod.url", "postgres://prod-db:5432/app")
        .with_value("db.prod.pool_size", "32")
        .with_value("db.staging.url", "postgres://staging-db:5432/app");

    match validate(&[DatabaseConfig::descriptor()], &source) {
        Ok(report) => {
            println!("{}", report);
            for field in report.reports() {
                println!("  {} -> {}", field.path, field.outcome);
            }
        }
        Err(error) => eprintln!("Schema declaration error: {}", error),
    }
}

fn example_unsatisfiable() {
    // pool_size exists under both environments but neither value is
    // numeric, so the verdict lists both rejected candidates.
    let source = MapSource::new()
        .with_value("db.prod.url", "postgres://prod-db:5432/app")
        .with_value("db.prod.pool_size", "many")
        .with_value("db.staging.url", "postgres://staging-db:5432/app")
        .with_value("db.staging.pool_size", "lots");

    match validate(&[DatabaseConfig::descriptor()], &source) {
        Ok(report) => {
            println!("{}", report);
            for failure in report.failures() {
                println!("  - {}", failure);
            }
        }
        Err(error) => eprintln!("Schema declaration error: {}", error),
    }
}
