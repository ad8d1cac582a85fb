use clap::{Parser, Subcommand, ValueEnum};
use paramstore::{ParameterStore, Result, StoreConfig};
use std::process;

mod display;
mod logging;

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Env,
}

#[derive(Parser)]
#[command(name = "paramstore")]
#[command(about = "Read and write AWS SSM Parameter Store values")]
#[command(version)]
struct Cli {
    #[arg(
        short = 'r',
        long,
        global = true,
        help = "AWS region (overrides PARAMSTORE_REGION and the AWS default chain)"
    )]
    region: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Entries requested per GetParametersByPath page (1-10)"
    )]
    page_size: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Print the value of a single parameter")]
    Get {
        #[arg(help = "Full parameter name, e.g. /my-service/dev/DB_HOST")]
        name: String,
        #[arg(long, help = "Return SecureString values still encrypted")]
        no_decrypt: bool,
    },

    #[command(about = "Print every parameter under a path")]
    Path {
        #[arg(help = "Parameter path prefix, e.g. /my-service/dev/")]
        path: String,
        #[arg(long, help = "Return SecureString values still encrypted")]
        no_decrypt: bool,
        #[arg(
            short = 'o',
            long = "format",
            value_enum,
            default_value = "table",
            help = "Output format: table, json or env"
        )]
        format: OutputFormat,
    },

    #[command(about = "Write a SecureString parameter")]
    Put {
        #[arg(help = "Full parameter name")]
        name: String,
        #[arg(help = "Parameter value")]
        value: String,
        #[arg(long, help = "Replace the parameter if it already exists")]
        overwrite: bool,
        #[arg(long, help = "KMS key id to encrypt with instead of the default key")]
        key_id: Option<String>,
    },
}

async fn run(cli: Cli) -> Result<()> {
    let config = StoreConfig {
        region: cli.region,
        page_size: cli.page_size,
    }
    .or(StoreConfig::from_env());
    let store = ParameterStore::connect(&config).await;

    match cli.command {
        Commands::Get { name, no_decrypt } => {
            let parameter = store.get_parameter(&name, !no_decrypt).await?;
            println!("{}", parameter.value());
        }
        Commands::Path {
            path,
            no_decrypt,
            format,
        } => {
            let parameters = store.get_all_parameters_by_path(&path, !no_decrypt).await?;
            print!("{}", display::render_parameters(&parameters, &format)?);
        }
        Commands::Put {
            name,
            value,
            overwrite,
            key_id,
        } => {
            let version = match key_id.as_deref() {
                Some(key_id) => {
                    store
                        .put_secure_parameter_with_cmk(&name, &value, overwrite, key_id)
                        .await?
                }
                None => store.put_secure_parameter(&name, &value, overwrite).await?,
            };
            display::print_success(&format!("Stored '{}' (version {})", name, version));
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    logging::init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_put_with_globals() {
        let cli = Cli::try_parse_from([
            "paramstore",
            "put",
            "/svc/dev/DB_PASS",
            "secret",
            "--overwrite",
            "--key-id",
            "alias/app",
            "--region",
            "eu-west-1",
        ])
        .unwrap();

        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        match cli.command {
            Commands::Put {
                name,
                value,
                overwrite,
                key_id,
            } => {
                assert_eq!(name, "/svc/dev/DB_PASS");
                assert_eq!(value, "secret");
                assert!(overwrite);
                assert_eq!(key_id.as_deref(), Some("alias/app"));
            }
            _ => panic!("expected put"),
        }
    }

    #[test]
    fn test_parse_path_format() {
        let cli = Cli::try_parse_from(["paramstore", "path", "/svc/dev/", "-o", "env"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Path {
                no_decrypt: false,
                format: OutputFormat::Env,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["paramstore", "path", "/svc/dev/"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Path {
                format: OutputFormat::Table,
                ..
            }
        ));
    }

    #[test]
    fn test_format_only_applies_to_path() {
        assert!(Cli::try_parse_from(["paramstore", "get", "/svc/dev/A", "-o", "json"]).is_err());
        assert!(Cli::try_parse_from(["paramstore", "-o", "json", "path", "/svc/dev/"]).is_err());
    }
}
