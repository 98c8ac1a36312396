//! Basic bindability check example.
//!
//! This example demonstrates the simplest use case:
//! - Declaring a config schema with the `ConfigHolder` derive
//! - Checking it against an in-memory store before anything binds
//! - Reading the per-field verdicts from the report
//!
//! Run with: cargo run --example basic

use bindcheck::prelude::*;

/// Server configuration schema.
///
/// The `ConfigHolder` derive macro builds the schema descriptor from the
/// `#[config(...)]` attributes and the field types.
#[allow(dead_code)]
#[derive(ConfigHolder)]
#[config(prefix = "server")]
struct ServerConfig {
    /// Listen address
    host: String,

    /// Listen port
    port: i64,

    /// Serve TLS
    tls: bool,

    /// Upstream endpoints
    upstreams: Vec<String>,
}

fn main() {
    // String-backed stores coerce on probe: "8080" satisfies a numeric
    // field and "true" satisfies a boolean one.
    let source = MapSource::new()
        .with_value("server.host", "0.0.0.0")
        .with_value("server.port", "8080")
        .with_value("server.tls", "true")
        .with_value("server.upstreams", "alpha:9000,beta:9000");

    let result = validate(&[ServerConfig::descriptor()], &source);

    match result {
        Ok(report) if report.is_fully_bindable() => {
            println!("{}", report);
            for field in report.reports() {
                println!("  {} -> {}", field.path, field.outcome);
            }
        }
        Ok(report) => {
            // Every unbindable field is reported, not just the first one
            eprintln!("{}", report);
            for failure in report.failures() {
                eprintln!("  - {}", failure);
            }
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("Schema declaration error: {}", error);
            std::process::exit(1);
        }
    }
}
