//! `api2postman raml`: RAML API specification to Postman collection.

use super::{print_diagnostics, print_summary, read_input, write_collection};
use crate::{progress, OutputOptions};
use anyhow::Result;
use clap::Args;
use postman_config::ConverterConfig;
use postman_raml::{convert_raml, ConvertOptions};
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "100_apis.raml";
pub const DEFAULT_OUTPUT: &str = "postman_collection.json";

#[derive(Debug, Args)]
pub struct RamlArgs {
    /// RAML specification file [default: 100_apis.raml]
    #[arg(value_name = "RAML_FILE")]
    pub raml_file: Option<PathBuf>,

    /// Where to write the collection [default: postman_collection.json]
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Collection name, instead of the document's title and version
    #[arg(long)]
    pub name: Option<String>,
}

#[tracing::instrument(skip_all)]
pub fn run(args: &RamlArgs, config: &ConverterConfig, output_opts: OutputOptions) -> Result<()> {
    let settings = &config.raml;
    let input = args
        .raml_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = args
        .output_file
        .clone()
        .or_else(|| settings.output.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let options = ConvertOptions {
        collection_name: args.name.clone().or_else(|| settings.collection_name.clone()),
        base_uri: settings.base_uri.clone(),
    };
    tracing::debug!(input = %input.display(), output = %output.display(), "Resolved paths");

    let source = read_input(&input)?;

    let spinner = progress::start(output_opts, "Converting RAML specification...");
    let conversion = convert_raml(&source, &options);
    progress::finish(spinner);
    let conversion = conversion?;

    print_diagnostics(&conversion.diagnostics, output_opts);
    write_collection(&conversion, &output)?;
    print_summary(&conversion, &output, None, output_opts);
    Ok(())
}
