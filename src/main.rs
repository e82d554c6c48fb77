use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use langchain_client::cli::{execute, Cli};
use langchain_client::LangChainClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    init_logging(cli.verbose)?;

    let config = cli.client_config();
    let Some(command) = cli.command else {
        println!("{}", Cli::command().render_help());
        return Ok(ExitCode::FAILURE);
    };

    let client = LangChainClient::new(config)?;
    debug!("Dispatching {:?}", command);

    let mut stdout = io::stdout().lock();
    let mut stdin = io::stdin().lock();
    execute(command, &client, &mut stdout, &mut stdin).await?;

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr; stdout is reserved for command output.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("langchain_client=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
