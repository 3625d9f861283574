use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid command parameter: {0}")]
    InvalidParameter(String),
    #[error("unsupported command type: {0}")]
    UnsupportedCommandType(String),
    #[error("template index {idx} is out of range ({len} templates)")]
    IndexOutOfRange { idx: usize, len: usize },
    #[error("relayer request to {endpoint} failed: {reason}")]
    RelayerRequest { endpoint: String, reason: String },
    #[error("failed to read {call} from chain: {reason}")]
    ChainRead { call: String, reason: String },
    #[error("failed to send {call} to chain: {reason}")]
    ChainWrite { call: String, reason: String },
    #[error("relayer job {id} did not finish within {timeout_ms} ms")]
    PollTimeout { id: String, timeout_ms: u128 },
    #[error("failed to emit command via email: {0}")]
    CommandEmission(#[source] Box<Error>),
}

impl Error {
    pub fn relayer(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Error::RelayerRequest {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn chain_read(call: impl Into<String>, reason: impl ToString) -> Self {
        Error::ChainRead {
            call: call.into(),
            reason: reason.to_string(),
        }
    }

    pub fn chain_write(call: impl Into<String>, reason: impl ToString) -> Self {
        Error::ChainWrite {
            call: call.into(),
            reason: reason.to_string(),
        }
    }
}
