use crate::error::{Error, Result};
use crate::relayer_client::RelayerClient;
use crate::types::{
    AccountSalt, AccountSaltRequest, AccountSaltResponse, RelayerJobId, RelayerStatusResponse,
    RelayerSubmitRequest, RelayerSubmitResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpRelayerClient {
    relayer_url: String,
    client: Client,
}

#[async_trait]
impl RelayerClient for HttpRelayerClient {
    async fn account_salt(
        &self,
        account_code: String,
        email_address: String,
    ) -> Result<AccountSalt> {
        let url = self.endpoint("accountSalt");
        let request = AccountSaltRequest {
            account_code,
            email_address,
        };
        let response = self.client.post(&url).json(&request).send().await;
        let res: AccountSaltResponse = Self::decode(&url, response).await?;
        Ok(res.account_salt)
    }

    async fn submit(&self, request: RelayerSubmitRequest) -> Result<RelayerJobId> {
        let url = self.endpoint("submit");
        let response = self.client.post(&url).json(&request).send().await;
        let res: RelayerSubmitResponse = Self::decode(&url, response).await?;
        Ok(res.id)
    }

    async fn status(&self, id: RelayerJobId) -> Result<RelayerStatusResponse> {
        let url = self.endpoint(&format!("status/{id}"));
        let response = self.client.get(&url).send().await;
        Self::decode(&url, response).await
    }
}

impl HttpRelayerClient {
    pub fn new(relayer_url: &str) -> Self {
        Self::with_client(relayer_url, Client::new())
    }

    pub fn with_client(relayer_url: &str, client: Client) -> Self {
        Self {
            relayer_url: relayer_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.relayer_url, path)
    }

    async fn decode<T: DeserializeOwned>(
        url: &str,
        response: reqwest::Result<Response>,
    ) -> Result<T> {
        response
            .and_then(Response::error_for_status)
            .map_err(|e| Error::relayer(url, e))?
            .json::<T>()
            .await
            .map_err(|e| Error::relayer(url, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_ignore_trailing_slashes() {
        let client = HttpRelayerClient::new("http://relayer.example/api/");
        assert_eq!(
            client.endpoint("accountSalt"),
            "http://relayer.example/api/accountSalt"
        );
        assert_eq!(
            client.endpoint(&format!("status/{}", RelayerJobId::from("job1"))),
            "http://relayer.example/api/status/job1"
        );
    }
}
