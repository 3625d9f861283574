use crate::chain_client::ChainClient;
use crate::error::{Error, Result};
use crate::types::{AccountSalt, EmailAuthMsg};
use async_trait::async_trait;
use ethers::prelude::*;
use ethers::providers::Provider;
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

mod bindings {
    ethers::prelude::abigen!(EmitEmailCommandContract, "abi/EmitEmailCommand.json");
}
use bindings::EmitEmailCommandContract;

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

#[derive(Debug, Clone)]
pub struct EthersClient {
    signer: Arc<SignerClient>,
}

#[async_trait]
impl ChainClient for EthersClient {
    async fn dkim_addr(&self, contract: Address) -> Result<Address> {
        self.contract(contract)
            .dkim_addr()
            .call()
            .await
            .map_err(|e| Error::chain_read("dkimAddr", e))
    }

    async fn command_templates(&self, contract: Address) -> Result<Vec<Vec<String>>> {
        self.contract(contract)
            .command_templates()
            .call()
            .await
            .map_err(|e| Error::chain_read("commandTemplates", e))
    }

    async fn compute_template_id(&self, contract: Address, template_idx: usize) -> Result<U256> {
        self.contract(contract)
            .compute_template_id(U256::from(template_idx))
            .call()
            .await
            .map_err(|e| Error::chain_read("computeTemplateId", e))
    }

    async fn compute_email_auth_address(
        &self,
        contract: Address,
        owner: Address,
        salt: AccountSalt,
    ) -> Result<Address> {
        let salt = salt_to_bytes32(&salt)?;
        self.contract(contract)
            .compute_email_auth_address(owner, salt)
            .call()
            .await
            .map_err(|e| Error::chain_read("computeEmailAuthAddress", e))
    }

    async fn get_code(&self, address: Address) -> Result<Option<Bytes>> {
        let code = self
            .signer
            .get_code(address, None)
            .await
            .map_err(|e| Error::chain_read("eth_getCode", e))?;
        Ok((!code.is_empty()).then_some(code))
    }

    async fn emit_email_command(
        &self,
        contract: Address,
        email_auth_msg: EmailAuthMsg,
        owner: Address,
        template_idx: usize,
    ) -> Result<H256> {
        let email_auth_msg = decode_email_auth_msg(email_auth_msg)?;
        let contract = self.contract(contract);
        let call = contract.emit_email_command(email_auth_msg, owner, U256::from(template_idx));
        let pending_tx = call
            .send()
            .await
            .map_err(|e| Error::chain_write("emitEmailCommand", e))?;
        Ok(pending_tx.tx_hash())
    }
}

impl EthersClient {
    pub fn construct(private_key_hex: &str, rpc_url: &str, chain_id: u64) -> anyhow::Result<Self> {
        let wallet = LocalWallet::from_str(private_key_hex)?;
        let provider = Provider::<Http>::try_from(rpc_url)?;
        let signer = SignerMiddleware::new(provider, wallet.with_chain_id(chain_id));
        Ok(Self {
            signer: Arc::new(signer),
        })
    }

    pub fn sender(&self) -> Address {
        self.signer.address()
    }

    fn contract(&self, address: Address) -> EmitEmailCommandContract<SignerClient> {
        EmitEmailCommandContract::new(address, self.signer.clone())
    }
}

/// Right-pads the relayer's hex salt to a `bytes32` word.
fn salt_to_bytes32(salt: &AccountSalt) -> Result<[u8; 32]> {
    let digits = salt.0.strip_prefix("0x").unwrap_or(&salt.0);
    if digits.len() > 64 {
        return Err(Error::chain_read(
            "computeEmailAuthAddress",
            format!("account salt {salt} is longer than 32 bytes"),
        ));
    }
    let mut word = [0u8; 32];
    hex::decode_to_slice(format!("{digits:0<64}"), &mut word)
        .map_err(|e| Error::chain_read("computeEmailAuthAddress", e))?;
    Ok(word)
}

fn decode_email_auth_msg(msg: EmailAuthMsg) -> Result<bindings::EmailAuthMsg> {
    let msg: EmailAuthMsgJson =
        serde_json::from_value(msg.0).map_err(|e| Error::chain_write("emitEmailCommand", e))?;
    Ok(bindings::EmailAuthMsg {
        template_id: msg.template_id,
        command_params: msg.command_params,
        skipped_command_prefix: msg.skipped_command_prefix,
        proof: bindings::EmailProof {
            domain_name: msg.proof.domain_name,
            public_key_hash: msg.proof.public_key_hash.0,
            timestamp: msg.proof.timestamp,
            masked_command: msg.proof.masked_command,
            email_nullifier: msg.proof.email_nullifier.0,
            account_salt: msg.proof.account_salt.0,
            is_code_exist: msg.proof.is_code_exist,
            proof: msg.proof.proof,
        },
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmailAuthMsgJson {
    #[serde(alias = "template_id", deserialize_with = "deserialize_u256")]
    template_id: U256,
    #[serde(alias = "command_params")]
    command_params: Vec<Bytes>,
    #[serde(alias = "skipped_command_prefix", deserialize_with = "deserialize_u256")]
    skipped_command_prefix: U256,
    proof: EmailProofJson,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmailProofJson {
    #[serde(alias = "domain_name")]
    domain_name: String,
    #[serde(alias = "public_key_hash")]
    public_key_hash: H256,
    #[serde(deserialize_with = "deserialize_u256")]
    timestamp: U256,
    #[serde(alias = "masked_command")]
    masked_command: String,
    #[serde(alias = "email_nullifier")]
    email_nullifier: H256,
    #[serde(alias = "account_salt")]
    account_salt: H256,
    #[serde(alias = "is_code_exist")]
    is_code_exist: bool,
    proof: Bytes,
}

// uint256 values arrive as JSON numbers, decimal strings or 0x-hex strings
fn deserialize_u256<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<U256, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => {
            U256::from_dec_str(&n.to_string()).map_err(|e| de::Error::custom(e.to_string()))
        }
        serde_json::Value::String(s) => match s.strip_prefix("0x") {
            Some(digits) => {
                U256::from_str_radix(digits, 16).map_err(|e| de::Error::custom(e.to_string()))
            }
            None => U256::from_dec_str(&s).map_err(|e| de::Error::custom(e.to_string())),
        },
        other => Err(de::Error::custom(format!("expected uint256, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proof_json() -> serde_json::Value {
        json!({
            "domainName": "gmail.com",
            "publicKeyHash": format!("0x{}", "11".repeat(32)),
            "timestamp": 1700000000,
            "maskedCommand": "Emit uint 42",
            "emailNullifier": format!("0x{}", "22".repeat(32)),
            "accountSalt": format!("0x{}", "33".repeat(32)),
            "isCodeExist": true,
            "proof": "0xdeadbeef"
        })
    }

    #[test]
    fn email_auth_msg_decodes_into_contract_struct() {
        let msg = EmailAuthMsg(json!({
            "templateId": "0x2a",
            "commandParams": ["0x01", "0x0203"],
            "skippedCommandPrefix": "0",
            "proof": proof_json()
        }));
        let decoded = decode_email_auth_msg(msg).unwrap();
        assert_eq!(decoded.template_id, U256::from(42));
        assert_eq!(decoded.command_params.len(), 2);
        assert_eq!(decoded.skipped_command_prefix, U256::zero());
        assert_eq!(decoded.proof.domain_name, "gmail.com");
        assert_eq!(decoded.proof.timestamp, U256::from(1_700_000_000u64));
        assert_eq!(decoded.proof.account_salt, [0x33; 32]);
        assert!(decoded.proof.is_code_exist);
        assert_eq!(decoded.proof.proof.to_vec(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn email_auth_msg_accepts_snake_case_keys() {
        let msg = EmailAuthMsg(json!({
            "template_id": 7,
            "command_params": [],
            "skipped_command_prefix": 0,
            "proof": proof_json()
        }));
        assert_eq!(decode_email_auth_msg(msg).unwrap().template_id, U256::from(7));
    }

    #[test]
    fn malformed_email_auth_msg_is_a_write_error() {
        let err = decode_email_auth_msg(EmailAuthMsg(json!({ "sig": "0xdead" }))).unwrap_err();
        assert!(matches!(err, Error::ChainWrite { .. }));
    }

    #[test]
    fn salt_is_right_padded_to_bytes32() {
        let word = salt_to_bytes32(&AccountSalt("0xabc".into())).unwrap();
        assert_eq!(word[0], 0xab);
        assert_eq!(word[1], 0xc0);
        assert!(word[2..].iter().all(|b| *b == 0));

        let full = format!("0x{}", "ff".repeat(32));
        assert_eq!(salt_to_bytes32(&AccountSalt(full)).unwrap(), [0xff; 32]);
    }

    #[test]
    fn oversized_or_non_hex_salt_is_rejected() {
        let long = format!("0x{}", "ff".repeat(33));
        assert!(matches!(
            salt_to_bytes32(&AccountSalt(long)),
            Err(Error::ChainRead { .. })
        ));
        assert!(matches!(
            salt_to_bytes32(&AccountSalt("0xzz".into())),
            Err(Error::ChainRead { .. })
        ));
    }
}
