//! `api2postman graphql`: GraphQL SDL schema to Postman collection.

use super::{print_diagnostics, print_summary, read_input, write_collection};
use crate::{progress, OutputOptions};
use anyhow::Result;
use clap::Args;
use postman_config::ConverterConfig;
use postman_graphql::{convert_sdl, ConvertOptions, DEFAULT_COLLECTION_NAME, DEFAULT_ENDPOINT};
use std::path::PathBuf;

/// Output file used when neither the command line nor the config names one.
pub const DEFAULT_OUTPUT: &str = "graphql_collection.json";

#[derive(Debug, Args)]
pub struct GraphqlArgs {
    /// GraphQL SDL schema file
    #[arg(value_name = "SCHEMA_FILE")]
    pub schema_file: PathBuf,

    /// Where to write the collection [default: graphql_collection.json]
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,

    /// Endpoint stored in the `url` collection variable
    /// [default: https://api.example.com/graphql]
    #[arg(value_name = "ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Collection name
    #[arg(long)]
    pub name: Option<String>,
}

#[tracing::instrument(skip_all, fields(schema = %args.schema_file.display()))]
pub fn run(args: &GraphqlArgs, config: &ConverterConfig, output_opts: OutputOptions) -> Result<()> {
    let settings = &config.graphql;
    let output = args
        .output_file
        .clone()
        .or_else(|| settings.output.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    let options = ConvertOptions {
        collection_name: args
            .name
            .clone()
            .or_else(|| settings.collection_name.clone())
            .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string()),
        endpoint: args
            .endpoint_url
            .clone()
            .or_else(|| settings.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
    };

    let source = read_input(&args.schema_file)?;

    let spinner = progress::start(output_opts, "Converting GraphQL schema...");
    let conversion = convert_sdl(&source, &options);
    progress::finish(spinner);
    let conversion = conversion?;

    print_diagnostics(&conversion.diagnostics, output_opts);
    write_collection(&conversion, &output)?;
    print_summary(&conversion, &output, Some(options.endpoint.as_str()), output_opts);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::InputNotFound;
    use postman_config::GraphqlConfig;
    use std::fs;

    const QUIET: OutputOptions = OutputOptions {
        show_progress: false,
        show_info: false,
    };

    const SCHEMA: &str = r"
type Query {
  user(id: ID!): User
}

type Mutation {
  createUser(input: UserInput!): User
}

input UserInput {
  name: String!
}

type User {
  id: ID!
  name: String
}
";

    fn read_json(path: &std::path::Path) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_run_writes_collection() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema_file = temp_dir.path().join("schema.graphql");
        let output_file = temp_dir.path().join("out.json");
        fs::write(&schema_file, SCHEMA).unwrap();

        let args = GraphqlArgs {
            schema_file,
            output_file: Some(output_file.clone()),
            endpoint_url: Some("https://shop.test/graphql".to_string()),
            name: None,
        };
        run(&args, &ConverterConfig::default(), QUIET).unwrap();

        let json = read_json(&output_file);
        assert_eq!(json["info"]["name"], DEFAULT_COLLECTION_NAME);
        assert_eq!(json["variable"][0]["value"], "https://shop.test/graphql");
        let folders: Vec<_> = json["item"]
            .as_array()
            .unwrap()
            .iter()
            .map(|folder| folder["name"].as_str().unwrap())
            .collect();
        assert_eq!(folders, ["queries", "mutations"]);
    }

    #[test]
    fn test_config_fills_unset_arguments() {
        let temp_dir = tempfile::tempdir().unwrap();
        let schema_file = temp_dir.path().join("schema.graphql");
        let output_file = temp_dir.path().join("from-config.json");
        fs::write(&schema_file, SCHEMA).unwrap();

        let config = ConverterConfig {
            graphql: GraphqlConfig {
                endpoint: Some("https://config.test/graphql".to_string()),
                output: Some(output_file.display().to_string()),
                collection_name: Some("Shop".to_string()),
            },
            ..ConverterConfig::default()
        };
        let args = GraphqlArgs {
            schema_file,
            output_file: None,
            endpoint_url: None,
            name: Some("Shop (CLI)".to_string()),
        };
        run(&args, &config, QUIET).unwrap();

        let json = read_json(&output_file);
        assert_eq!(json["info"]["name"], "Shop (CLI)");
        assert_eq!(json["variable"][0]["value"], "https://config.test/graphql");
    }

    #[test]
    fn test_missing_schema_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let args = GraphqlArgs {
            schema_file: temp_dir.path().join("missing.graphql"),
            output_file: Some(temp_dir.path().join("out.json")),
            endpoint_url: None,
            name: None,
        };
        let err = run(&args, &ConverterConfig::default(), QUIET).unwrap_err();
        assert!(err.is::<InputNotFound>());
        assert!(!temp_dir.path().join("out.json").exists());
    }
}
