// Copyright (c) Starcoin, Inc.
// SPDX-License-Identifier: Apache-2.0

//! A mock implementation of Ethereum JSON-RPC client, based on `MockProvider`
//! from ethers-rs, but keyed by (method, params) so tests can serve different
//! responses for different requests.

use async_trait::async_trait;
use ethers::providers::{JsonRpcClient, MockError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct EthMockProvider {
    responses: Arc<Mutex<HashMap<(String, String), Value>>>,
}

#[async_trait]
impl JsonRpcClient for EthMockProvider {
    type Error = MockError;

    /// Looks up the canned response for the (method, params) pair. Requests
    /// with no registered response fail with `MockError::EmptyResponses`.
    async fn request<T: Debug + Serialize + Send + Sync, R: DeserializeOwned + Send>(
        &self,
        method: &str,
        params: T,
    ) -> Result<R, MockError> {
        let params = serde_json::to_value(params)?;
        let element = self
            .responses
            .lock()
            .unwrap()
            .get(&(method.to_owned(), params.to_string()))
            .ok_or(MockError::EmptyResponses)?
            .clone();
        let res: R = serde_json::from_value(element)?;
        Ok(res)
    }
}

impl EthMockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_response<P: Serialize + Send + Sync, T: Serialize + Send + Sync, K: Borrow<T>>(
        &self,
        method: &str,
        params: P,
        data: K,
    ) -> Result<(), MockError> {
        let params = serde_json::to_value(params)?;
        let value = serde_json::to_value(data.borrow())?;
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_owned(), params.to_string()), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::Middleware;
    use ethers::providers::Provider;
    use ethers::types::U64;

    #[tokio::test]
    async fn test_returns_registered_response() {
        let mock = EthMockProvider::new();
        mock.add_response("eth_blockNumber", (), U64::from(12))
            .unwrap();

        let block: U64 = mock.request("eth_blockNumber", ()).await.unwrap();
        assert_eq!(block, U64::from(12));

        // Re-registering overwrites the previous response.
        mock.add_response("eth_blockNumber", (), U64::from(13))
            .unwrap();
        let provider = Provider::new(mock);
        assert_eq!(provider.get_block_number().await.unwrap(), U64::from(13));
    }

    #[tokio::test]
    async fn test_unregistered_request_errors() {
        let mock = EthMockProvider::new();
        let err = mock
            .request::<_, U64>("eth_blockNumber", ())
            .await
            .unwrap_err();
        assert!(matches!(err, MockError::EmptyResponses));
    }

    #[tokio::test]
    async fn test_responses_keyed_by_params() {
        let mock = EthMockProvider::new();
        mock.add_response::<_, String, String>("m", [1u64], "one".to_string())
            .unwrap();
        mock.add_response::<_, String, String>("m", [2u64], "two".to_string())
            .unwrap();

        let one: String = mock.request("m", [1u64]).await.unwrap();
        let two: String = mock.request("m", [2u64]).await.unwrap();
        assert_eq!(one, "one");
        assert_eq!(two, "two");
    }
}
