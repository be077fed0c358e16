mod commands;
mod exit_code;
mod progress;

pub use exit_code::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "api2postman")]
#[command(about = "Convert GraphQL schemas and RAML specifications into Postman collections", long_about = None)]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Path to converter config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long, global = true)]
    no_progress: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show progress indicators (spinners)
    pub show_progress: bool,
    /// Whether to show informational output (warnings, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a GraphQL SDL schema into a collection of GraphQL requests
    ///
    /// Every root Query, Mutation and Subscription field becomes one request
    /// with a generated operation document and example variables.
    Graphql(commands::graphql::GraphqlArgs),

    /// Convert a RAML API specification into a collection of HTTP requests
    ///
    /// Every method of every resource becomes one request, grouped into
    /// folders by the first segment of the resource path.
    Raml(commands::raml::RamlArgs),
}

fn main() {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_progress: !cli.quiet && !cli.no_progress,
        show_info: !cli.quiet,
    };

    let result = commands::load_converter_config(cli.config).and_then(|config| match cli.command {
        Commands::Graphql(args) => commands::graphql::run(&args, &config, output_opts),
        Commands::Raml(args) => commands::raml::run(&args, &config, output_opts),
    });

    if let Err(err) = result {
        let code = ExitCode::for_error(&err);
        tracing::debug!(%code, "Command failed");
        eprintln!("{} {err:#}", "✗".red().bold());
        code.exit();
    }
}

/// Initialize tracing from `RUST_LOG`, silent by default
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stdout is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn graphql_positionals() {
        let cli = Cli::try_parse_from([
            "api2postman",
            "graphql",
            "schema.graphql",
            "out.json",
            "https://shop.test/graphql",
            "--name",
            "Shop",
        ])
        .unwrap();
        let Commands::Graphql(args) = cli.command else {
            panic!("expected the graphql command");
        };
        assert_eq!(args.schema_file, PathBuf::from("schema.graphql"));
        assert_eq!(args.output_file, Some(PathBuf::from("out.json")));
        assert_eq!(args.endpoint_url.as_deref(), Some("https://shop.test/graphql"));
        assert_eq!(args.name.as_deref(), Some("Shop"));
    }

    #[test]
    fn graphql_requires_schema_file() {
        assert!(Cli::try_parse_from(["api2postman", "graphql"]).is_err());
    }

    #[test]
    fn raml_arguments_are_optional() {
        let cli = Cli::try_parse_from(["api2postman", "--quiet", "raml"]).unwrap();
        assert!(cli.quiet);
        let Commands::Raml(args) = cli.command else {
            panic!("expected the raml command");
        };
        assert_eq!(args.raml_file, None);
        assert_eq!(args.output_file, None);
    }

    #[test]
    fn color_flags_conflict() {
        assert!(Cli::try_parse_from(["api2postman", "--color", "--no-color", "raml"]).is_err());
    }
}
