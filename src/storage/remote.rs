use super::protocol::{ENDPOINT_KV, GetResponse, ListKeysResponse, PutRequest};
use super::store::{KvStore, StoreError};

use async_trait::async_trait;

/// Client for a key/value service exposed by another node at [`ENDPOINT_KV`].
///
/// Requests are issued once; a failed call surfaces as a [`StoreError`] and
/// retrying is left to whoever started the run.
pub struct RemoteStore {
    http_client: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    pub fn with_client(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn kv_url(&self) -> String {
        format!("{}{}", self.base_url, ENDPOINT_KV)
    }
}

#[async_trait]
impl KvStore for RemoteStore {
    async fn put(&self, key: &str, value: String) -> Result<(), StoreError> {
        let payload = PutRequest {
            key: key.to_string(),
            value_json: value,
        };
        let response = self
            .http_client
            .post(self.kv_url())
            .json(&payload)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            reqwest::StatusCode::CONFLICT => Err(StoreError::KeyExists(key.to_string())),
            status => Err(StoreError::Status(status.as_u16())),
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let url = format!("{}/{}", self.kv_url(), urlencoding::encode(key));
        let response = self.http_client.get(url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }

        let body: GetResponse = response.json().await?;
        Ok(body.value_json)
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let response = self.http_client.get(self.kv_url()).send().await?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }

        let body: ListKeysResponse = response.json().await?;
        Ok(body.keys)
    }
}
