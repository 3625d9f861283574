pub mod args;
pub mod auth_address;
pub mod chain_client;
pub mod command;
pub mod config;
pub mod emitter;
pub mod error;
pub mod poller;
pub mod relayer_client;
pub mod request;
pub mod template;
pub mod types;

pub use chain_client::*;
pub use command::*;
pub use config::*;
pub use emitter::*;
pub use error::{Error, Result};
pub use relayer_client::*;
pub use types::*;

#[cfg(feature = "ether")]
use args::Commands;
#[cfg(feature = "ether")]
use std::time::Duration;

#[cfg(feature = "ether")]
pub async fn run(command: Commands, config: Config) -> anyhow::Result<()> {
    let chain_client = EthersClient::construct(&config.private_key, &config.rpc_url, config.chain_id)?;
    tracing::info!(sender = ?chain_client.sender(), ?config, "chain client constructed");
    let relayer_client = HttpRelayerClient::new(&config.relayer_url);
    let emitter = CommandEmitter::new(chain_client, relayer_client, &config.chain_name)
        .with_poll_interval(config.poll_interval);

    match command {
        Commands::Emit {
            contract,
            account_code,
            email,
            owner,
            command_type,
            value,
            subject,
            body,
            timeout_ms,
        } => {
            let command = EmailCommand {
                contract_address: contract,
                account_code,
                email_address: email,
                owner_address: owner,
                command_type: command_type.parse()?,
                command_value: value,
                subject,
                body,
            };
            let tx_hash = emitter
                .emit(&command, Some(Duration::from_millis(timeout_ms)))
                .await?;
            println!("{tx_hash:?}");
        }
        Commands::Template { contract, index } => {
            let template =
                template::fetch_command_template(emitter.chain(), contract, index).await?;
            println!("{}\n{}", template.template, template.template_id);
        }
    }
    Ok(())
}
