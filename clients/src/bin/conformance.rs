//! `xsd2owl-conformance`: Validates serialized ontology artifacts.
//!
//! Reads `ontology.ttl`, `ontology.nt` and `ontology.json` from the artifacts
//! directory and checks them for RDF 1.1, Turtle 1.1, N-Triples and
//! JSON-LD 1.1 conformance.
//!
//! **Usage:**
//! ```text
//! xsd2owl-conformance [--artifacts <path>]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xsd2owl_conformance::validate_artifacts;

/// Run the xsd2owl conformance suite.
#[derive(Parser)]
#[command(
    name = "xsd2owl-conformance",
    about = "Validate xsd2owl ontology artifacts against RDF and JSON-LD standards"
)]
struct Args {
    /// Path to the artifacts directory (default: public/).
    #[arg(long, default_value = "public")]
    artifacts: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();

    let report = validate_artifacts(&args.artifacts, None)?;

    println!("xsd2owl Conformance Report");
    println!("==========================");
    println!();
    println!("{report}");

    if !report.all_passed() {
        eprintln!(
            "Conformance FAILED: {} check(s) did not pass.",
            report.failure_count()
        );
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
