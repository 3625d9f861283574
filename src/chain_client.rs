#[cfg(feature = "ether")]
mod ethers_client;
use crate::error::Result;
use crate::types::{AccountSalt, EmailAuthMsg};
use async_trait::async_trait;
use ethers_core::types::{Address, Bytes, H256, U256};
#[cfg(feature = "ether")]
pub use ethers_client::*;
use mockall::automock;

/// Read/write surface of the email command contract.
#[automock]
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn dkim_addr(&self, contract: Address) -> Result<Address>;
    async fn command_templates(&self, contract: Address) -> Result<Vec<Vec<String>>>;
    async fn compute_template_id(&self, contract: Address, template_idx: usize) -> Result<U256>;
    async fn compute_email_auth_address(
        &self,
        contract: Address,
        owner: Address,
        salt: AccountSalt,
    ) -> Result<Address>;
    /// `None` when the chain reports no code at `address`.
    async fn get_code(&self, address: Address) -> Result<Option<Bytes>>;
    async fn emit_email_command(
        &self,
        contract: Address,
        email_auth_msg: EmailAuthMsg,
        owner: Address,
        template_idx: usize,
    ) -> Result<H256>; // return transaction hash
}
