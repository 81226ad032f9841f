//! Development automation tasks for the StressKit workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! intentionally used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::Context;
use serde::Deserialize;

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let task = args.next();

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("variants") => match args.next() {
            Some(matrix) => run_variants(Path::new(&matrix)),
            None => {
                eprintln!("Usage: cargo xtask variants <matrix.toml>");
                Err(anyhow::anyhow!("Missing matrix file"))
            }
        },
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("StressKit Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci        Run all CI checks (fmt, clippy, test)");
    println!("    fmt       Check Rust code formatting");
    println!("    clippy    Run Clippy lints");
    println!("    test      Run all tests");
    println!("    variants <matrix.toml>");
    println!("              Build one workload binary set per matrix entry");
    println!("    help      Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...\n");

    println!("==> Step 1/3: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/3: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/3: Running tests...");
    run_test()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

/// Check Rust code formatting
fn run_fmt() -> anyhow::Result<()> {
    let status = Command::new("cargo").args(["fmt", "--all", "--", "--check"]).status()?;

    if !status.success() {
        anyhow::bail!("Format check failed. Run 'cargo fmt --all' to fix.");
    }

    Ok(())
}

/// Run Clippy lints
fn run_clippy() -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"])
        .status()?;

    if !status.success() {
        anyhow::bail!("Clippy run failed. See output above.");
    }

    Ok(())
}

/// Run all workspace tests
fn run_test() -> anyhow::Result<()> {
    let status = Command::new("cargo").args(["test", "--workspace"]).status()?;

    if !status.success() {
        anyhow::bail!("Tests failed");
    }

    Ok(())
}

// -----------------------------------------------------------------------------
// Variant matrix builds
// -----------------------------------------------------------------------------

/// One entry of the variant matrix: a named binary plus the `STRESSKIT_*`
/// environment resolved into it at build time.
#[derive(Debug, Deserialize)]
struct Variant {
    name: String,
    bin: String,
    #[serde(default)]
    env: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct Matrix {
    #[serde(rename = "variant")]
    variants: Vec<Variant>,
}

/// Build every matrix entry as its own release binary under
/// `target/variants/<name>/`.
///
/// Each entry re-invokes cargo with the entry's environment; the resolver
/// build script picks the changes up through `rerun-if-env-changed`, so two
/// entries with different knobs never share a stale variant.
fn run_variants(matrix_path: &Path) -> anyhow::Result<()> {
    let raw = fs::read_to_string(matrix_path)
        .with_context(|| format!("reading {}", matrix_path.display()))?;
    let matrix: Matrix =
        toml::from_str(&raw).with_context(|| format!("parsing {}", matrix_path.display()))?;

    if matrix.variants.is_empty() {
        anyhow::bail!("{} defines no variants", matrix_path.display());
    }

    println!("==> Building {} variant(s) from {}\n", matrix.variants.len(), matrix_path.display());

    for variant in &matrix.variants {
        build_variant(variant)?;
    }

    println!("\n✓ All variants built under target/variants/");
    Ok(())
}

fn build_variant(variant: &Variant) -> anyhow::Result<()> {
    println!("==> Variant '{}' (bin '{}')", variant.name, variant.bin);
    for (key, value) in &variant.env {
        println!("    {key}={value}");
    }

    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--release", "-p", "stresskit-cli", "--bin", &variant.bin]);
    cmd.envs(&variant.env);
    let status = cmd.status().context("running cargo build")?;

    if !status.success() {
        anyhow::bail!("variant '{}' failed to build", variant.name);
    }

    let built = PathBuf::from("target/release").join(&variant.bin);
    let out_dir = PathBuf::from("target/variants").join(&variant.name);
    fs::create_dir_all(&out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let dest = out_dir.join(&variant.bin);
    fs::copy(&built, &dest)
        .with_context(|| format!("copying {} to {}", built.display(), dest.display()))?;

    println!("    -> {}", dest.display());
    Ok(())
}
