use clap::Parser;
use email_command::args::CLI;
use email_command::{run, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up a tracing subscriber
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = CLI::parse();
    let config = Config::from_env()?;
    run(cli.command, config).await
}
