//! Wallet endpoints.

use crate::client::OverlayClient;
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::types::{OverlayResponse, Params};

pub struct WalletResource<'a> {
    client: &'a OverlayClient,
}

impl<'a> WalletResource<'a> {
    pub(crate) fn new(client: &'a OverlayClient) -> Self {
        Self { client }
    }

    /// Create a new wallet. This endpoint does not require authentication,
    /// so no credentials are sent even when configured.
    pub fn create(&self, params: Option<&Params>) -> ApiResult<OverlayResponse> {
        self.client.send(HttpMethod::Post, "/wallets", params, false)
    }
}
