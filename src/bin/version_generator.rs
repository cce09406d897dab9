//! CLI for generating the loadgen version definition source file

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use versiongen::build_info;

/// Build a long version string: "0.1.0 (git abc1234, built ..., rustc ...)"
fn long_version() -> &'static str {
    // Leaked once at startup so clap can hold a 'static str.
    let version = format!(
        "{} (git {}, built {}, {})",
        env!("CARGO_PKG_VERSION"),
        build_info::GIT_HASH,
        build_info::BUILD_TIME_UTC,
        build_info::RUSTC_VERSION,
    );
    Box::leak(version.into_boxed_str())
}

/// Entry point for the version_generator CLI
#[derive(Parser)]
#[command(name = "version_generator")]
#[command(about = "Generates the loadgen version definition source file")]
#[command(version, long_version = long_version())]
struct Cli {
    /// Path of the C++ source file to write
    out_file: PathBuf,

    /// Root of the loadgen sources to describe
    loadgen_root: PathBuf,
}

fn init_logging() {
    // Log to stderr so stdout stays clean for build tooling.
    let env_filter = tracing_subscriber::filter::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    versiongen::write_version_file(&cli.out_file, &cli.loadgen_root).with_context(|| {
        format!(
            "generating {} from {}",
            cli.out_file.display(),
            cli.loadgen_root.display()
        )
    })?;
    Ok(())
}
