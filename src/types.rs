use ethers_core::types::Address;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Status the relayer reports once the email has been verified and proved.
pub const FINISHED_STATUS: &str = "Finished";

/// A command template declared by the contract together with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub template: String,
    pub template_id: String,
}

/// Relayer-held secret combined with the owner address to derive the
/// email auth address. Kept in the textual form the relayer returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountSalt(pub String);

impl fmt::Display for AccountSalt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSaltRequest {
    pub account_code: String,
    pub email_address: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSaltResponse {
    pub account_salt: AccountSalt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayerSubmitRequest {
    pub dkim_contract_address: Address,
    pub account_code: String,
    pub code_exists_in_email: bool,
    pub command_template: String,
    pub command_params: Vec<String>,
    pub template_id: String,
    pub email_address: String,
    pub subject: String,
    pub body: String,
    pub chain: String,
}

/// Opaque identifier of a relayer job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelayerJobId(pub String);

impl fmt::Display for RelayerJobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RelayerJobId {
    fn from(id: &str) -> Self {
        RelayerJobId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RelayerJobId {
    // relayers disagree on whether ids are strings or numbers
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(id) => Ok(RelayerJobId(id)),
            serde_json::Value::Number(id) => Ok(RelayerJobId(id.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "unexpected relayer job id {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelayerSubmitResponse {
    pub id: RelayerJobId,
}

/// Proof object produced by the relayer, forwarded verbatim to the contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAuthMsg(pub serde_json::Value);

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelayerRequestStatus {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelayerStatusResponse {
    pub request: RelayerRequestStatus,
    #[serde(default)]
    pub response: EmailAuthMsg,
}

impl RelayerStatusResponse {
    pub fn is_finished(&self) -> bool {
        self.request.status == FINISHED_STATUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_id_accepts_strings_and_numbers() {
        let res: RelayerSubmitResponse = serde_json::from_value(json!({ "id": "job1" })).unwrap();
        assert_eq!(res.id, RelayerJobId::from("job1"));
        let res: RelayerSubmitResponse = serde_json::from_value(json!({ "id": 17 })).unwrap();
        assert_eq!(res.id, RelayerJobId::from("17"));
        assert!(serde_json::from_value::<RelayerSubmitResponse>(json!({ "id": null })).is_err());
    }

    #[test]
    fn status_response_without_proof_decodes() {
        let res: RelayerStatusResponse =
            serde_json::from_value(json!({ "request": { "status": "Processing" } })).unwrap();
        assert!(!res.is_finished());
        assert_eq!(res.response, EmailAuthMsg(serde_json::Value::Null));

        let res: RelayerStatusResponse = serde_json::from_value(json!({
            "request": { "status": "Finished" },
            "response": { "sig": "0xdead" }
        }))
        .unwrap();
        assert!(res.is_finished());
        assert_eq!(res.response, EmailAuthMsg(json!({ "sig": "0xdead" })));
    }

    #[test]
    fn submit_request_uses_relayer_field_names() {
        let req = RelayerSubmitRequest {
            dkim_contract_address: Address::zero(),
            account_code: "0x01".into(),
            code_exists_in_email: true,
            command_template: "Send {uint}".into(),
            command_params: vec!["42".into()],
            template_id: "0x2a".into(),
            email_address: "alice@example.com".into(),
            subject: "Emit".into(),
            body: "Emit 42".into(),
            chain: "baseSepolia".into(),
        };
        let value = serde_json::to_value(&req).unwrap();
        for key in [
            "dkimContractAddress",
            "accountCode",
            "codeExistsInEmail",
            "commandTemplate",
            "commandParams",
            "templateId",
            "emailAddress",
            "subject",
            "body",
            "chain",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["codeExistsInEmail"], json!(true));
        assert_eq!(value["commandParams"], json!(["42"]));
    }
}
