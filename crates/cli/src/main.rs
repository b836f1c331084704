use clap::{Parser, Subcommand};

mod commands;

use commands::{InspectArgs, ResolveArgs, ServeArgs, ValidateArgs};

#[derive(Parser)]
#[command(name = "dhan-agent")]
#[command(about = "Resolve NSE index option intents against the Dhan master script", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = "config/Config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one trade intent to a contract and print it as JSON
    Resolve(ResolveArgs),
    /// List the expiries of an underlying, or the strikes of one expiry
    Inspect(InspectArgs),
    /// Load the master script and report what it contains
    Validate(ValidateArgs),
    /// Start the web API server
    Serve(ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so JSON on stdout stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = dhan_agent_core::ConfigLoader::load_from(&cli.config)?;

    match cli.command {
        Commands::Resolve(args) => commands::run_resolve(&args, &config)?,
        Commands::Inspect(args) => commands::run_inspect(&args, &config)?,
        Commands::Validate(args) => commands::run_validate(&args, &config)?,
        Commands::Serve(args) => commands::run_serve(args, config).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhan_agent_instruments::{ExpiryKind, OptionType, Underlying};

    #[test]
    fn parses_resolve_command() {
        let cli = Cli::try_parse_from([
            "dhan-agent",
            "resolve",
            "--underlying",
            "banknifty",
            "--expiry-kind",
            "next_week",
            "--option-type",
            "PE",
            "--mode",
            "ITM",
            "--value",
            "2",
        ])
        .unwrap();

        assert_eq!(cli.config, "config/Config.toml");
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.underlying, Underlying::BankNifty);
                assert_eq!(args.expiry_kind, ExpiryKind::NextWeek);
                assert_eq!(args.option_type, OptionType::Pe);
                assert_eq!(args.mode, "ITM");
            }
            _ => panic!("expected resolve command"),
        }
    }

    #[test]
    fn rejects_unknown_underlying() {
        let res = Cli::try_parse_from([
            "dhan-agent",
            "resolve",
            "--underlying",
            "SENSEX",
            "--option-type",
            "CE",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["dhan-agent", "validate", "--config", "config/Config.prod.toml"])
            .unwrap();
        assert_eq!(cli.config, "config/Config.prod.toml");
    }
}
