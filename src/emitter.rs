use crate::chain_client::ChainClient;
use crate::command::{encode_command_params, CommandType};
use crate::error::{Error, Result};
use crate::poller::{StatusPoller, DEFAULT_POLL_INTERVAL};
use crate::relayer_client::RelayerClient;
use crate::request::build_relayer_input;
use crate::types::RelayerSubmitRequest;
use ethers_core::types::{Address, H256};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(120_000);

/// A command to be authorized by email and executed on `contract_address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailCommand {
    pub contract_address: Address,
    pub account_code: String,
    pub email_address: String,
    pub owner_address: Address,
    pub command_type: CommandType,
    pub command_value: String,
    pub subject: String,
    pub body: String,
}

/// Drives one command from relayer submission to the on-chain call.
#[derive(Debug)]
pub struct CommandEmitter<C, R> {
    chain: C,
    relayer: R,
    chain_name: String,
    poll_interval: Duration,
}

impl<C, R> CommandEmitter<C, R>
where
    C: ChainClient,
    R: RelayerClient,
{
    pub fn new(chain: C, relayer: R, chain_name: &str) -> Self {
        Self {
            chain,
            relayer,
            chain_name: chain_name.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Submits `command` to the relayer, waits up to `timeout` (two minutes
    /// when `None`) for the email proof and sends it to the contract.
    ///
    /// Returns the hash of the `emitEmailCommand` transaction.
    pub async fn emit(&self, command: &EmailCommand, timeout: Option<Duration>) -> Result<H256> {
        let command_params = encode_command_params(command.command_type, &command.command_value)?;
        let dkim_contract_address = self.chain.dkim_addr(command.contract_address).await?;
        let relayer_input = build_relayer_input(
            &self.chain,
            &self.relayer,
            &self.chain_name,
            dkim_contract_address,
            command,
            command_params,
        )
        .await?;
        info!(?relayer_input, "built relayer input");

        self.submit_and_execute(command, relayer_input, timeout.unwrap_or(DEFAULT_TIMEOUT))
            .await
            .map_err(|err| Error::CommandEmission(Box::new(err)))
    }

    async fn submit_and_execute(
        &self,
        command: &EmailCommand,
        relayer_input: RelayerSubmitRequest,
        timeout: Duration,
    ) -> Result<H256> {
        let id = self.relayer.submit(relayer_input).await?;
        info!(%id, "submitted relayer request");

        let email_auth_msg = StatusPoller::new(&self.relayer, self.poll_interval)
            .poll(&id, timeout)
            .await?;
        let tx_hash = self
            .chain
            .emit_email_command(
                command.contract_address,
                email_auth_msg,
                command.owner_address,
                command.command_type.template_idx(),
            )
            .await?;
        info!(?tx_hash, "sent emitEmailCommand transaction");
        Ok(tx_hash)
    }
}
