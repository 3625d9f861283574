use crate::chain_client::ChainClient;
use crate::error::{Error, Result};
use crate::types::CommandTemplate;
use ethers_core::types::Address;

/// Reads the template at `template_idx` and the contract's identifier for it.
///
/// Always a fresh read; nothing is cached between calls.
pub async fn fetch_command_template<C: ChainClient + ?Sized>(
    chain: &C,
    contract: Address,
    template_idx: usize,
) -> Result<CommandTemplate> {
    let templates = chain.command_templates(contract).await?;
    let template = templates
        .get(template_idx)
        .ok_or(Error::IndexOutOfRange {
            idx: template_idx,
            len: templates.len(),
        })?
        .join(" ");
    let template_id = chain.compute_template_id(contract, template_idx).await?;
    Ok(CommandTemplate {
        template,
        template_id: format!("0x{template_id:x}"),
    })
}
