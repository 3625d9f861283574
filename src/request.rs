use crate::auth_address::{code_exists_in_email, resolve_email_auth_address};
use crate::chain_client::ChainClient;
use crate::emitter::EmailCommand;
use crate::error::Result;
use crate::relayer_client::RelayerClient;
use crate::template::fetch_command_template;
use crate::types::RelayerSubmitRequest;
use ethers_core::types::Address;

/// Assembles the job submitted to the relayer for `command`.
///
/// `command_params` must already be encoded for `command.command_type`.
pub async fn build_relayer_input<C, R>(
    chain: &C,
    relayer: &R,
    chain_name: &str,
    dkim_contract_address: Address,
    command: &EmailCommand,
    command_params: Vec<String>,
) -> Result<RelayerSubmitRequest>
where
    C: ChainClient + ?Sized,
    R: RelayerClient + ?Sized,
{
    let email_auth_addr = resolve_email_auth_address(
        chain,
        relayer,
        command.contract_address,
        &command.account_code,
        &command.email_address,
        command.owner_address,
    )
    .await?;
    let code_exists_in_email = code_exists_in_email(chain, email_auth_addr).await?;
    let template = fetch_command_template(
        chain,
        command.contract_address,
        command.command_type.template_idx(),
    )
    .await?;

    Ok(RelayerSubmitRequest {
        dkim_contract_address,
        account_code: command.account_code.clone(),
        code_exists_in_email,
        command_template: template.template,
        command_params,
        template_id: template.template_id,
        email_address: command.email_address.clone(),
        subject: command.subject.clone(),
        body: command.body.clone(),
        chain: chain_name.to_string(),
    })
}
