pub mod graphql;
pub mod raml;

use crate::OutputOptions;
use anyhow::{Context, Result};
use colored::Colorize;
use postman_collection::{Conversion, Diagnostics};
use postman_config::{find_config, load_config, ConverterConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// The input file of a conversion does not exist.
#[derive(Debug, thiserror::Error)]
#[error("Input file not found: {}", .0.display())]
pub struct InputNotFound(pub PathBuf);

/// Loads the config named by `--config`, or the nearest one found from the
/// current directory. Without either, every value comes from the command
/// line or the built-in defaults.
pub fn load_converter_config(config_path: Option<PathBuf>) -> Result<ConverterConfig> {
    let config_path = if let Some(path) = config_path {
        Some(path)
    } else {
        let current_dir = std::env::current_dir()?;
        find_config(&current_dir).context("Failed to search for config")?
    };

    match config_path {
        Some(path) => load_config(&path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(ConverterConfig::default())
        }
    }
}

/// Reads a conversion input, distinguishing a missing file from other read
/// failures.
pub fn read_input(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(InputNotFound(path.to_path_buf()).into());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Writes the collection as two-space indented JSON.
pub fn write_collection(conversion: &Conversion, output: &Path) -> Result<()> {
    let json = conversion
        .collection
        .to_json_pretty()
        .context("Failed to serialize collection")?;
    fs::write(output, json).with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(path = %output.display(), "Collection written");
    Ok(())
}

pub fn print_diagnostics(diagnostics: &Diagnostics, output_opts: OutputOptions) {
    if !output_opts.show_info {
        return;
    }
    for diagnostic in diagnostics {
        eprintln!("{} {diagnostic}", "⚠".yellow().bold());
    }
}

pub fn print_summary(
    conversion: &Conversion,
    output: &Path,
    endpoint: Option<&str>,
    output_opts: OutputOptions,
) {
    if !output_opts.show_info {
        return;
    }
    let collection = &conversion.collection;
    println!(
        "{} Postman collection created: {}",
        "✓".green().bold(),
        output.display().to_string().bold()
    );
    println!("  {} {}", "Folders:".dimmed(), collection.item.len());
    println!("  {} {}", "Requests:".dimmed(), collection.request_count());
    if let Some(endpoint) = endpoint {
        println!("  {} {endpoint}", "Endpoint:".dimmed());
    }
    let warnings = conversion.diagnostics.warning_count();
    if warnings > 0 {
        println!("  {} {warnings}", "Warnings:".yellow());
    }
}
