mod http_client;
use crate::error::Result;
use crate::types::{
    AccountSalt, RelayerJobId, RelayerStatusResponse, RelayerSubmitRequest,
};
use async_trait::async_trait;
pub use http_client::*;
use mockall::automock;

/// Request/poll API of the email relayer.
#[automock]
#[async_trait]
pub trait RelayerClient: Send + Sync {
    /// `POST /accountSalt`
    async fn account_salt(&self, account_code: String, email_address: String)
        -> Result<AccountSalt>;
    /// `POST /submit`
    async fn submit(&self, request: RelayerSubmitRequest) -> Result<RelayerJobId>;
    /// `GET /status/{id}`
    async fn status(&self, id: RelayerJobId) -> Result<RelayerStatusResponse>;
}
