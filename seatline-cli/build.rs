//! Build script for seatline-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("seatline")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Drive and benchmark a concurrent rail seat inventory")
        .long_about(
            "Command-line driver for a concurrent seat inventory over multi-route rail lines",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Read configuration from this file instead of ~/.seatline/config.yaml")
                .value_name("PATH")
                .global(true)
                .env("SEATLINE_CONFIG"),
        )
        .subcommands(vec![
            Command::new("bench")
                .about("Run the multi-threaded load generator")
                .long_about("Drive a fresh system with seeded random buy, refund and inquiry calls"),
            Command::new("replay")
                .about("Execute a scripted sequence of operations")
                .long_about("Run a YAML list of buy, refund and inquiry steps on a fresh system"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a seatline configuration file for errors"),
            Command::new("show-config")
                .about("Print the effective configuration")
                .long_about("Print the merged configuration from files, environment and defaults"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() -> std::io::Result<()> {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var_os("OUT_DIR").unwrap_or_default());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;

    fs::write(man_dir.join("seatline.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
