//! Fungible token endpoints. All of them require authentication.

use crate::client::OverlayClient;
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::types::{OverlayResponse, Params};

pub struct TokenResource<'a> {
    client: &'a OverlayClient,
}

impl<'a> TokenResource<'a> {
    pub(crate) fn new(client: &'a OverlayClient) -> Self {
        Self { client }
    }

    /// Create a new token.
    pub fn create(&self, params: Option<&Params>) -> ApiResult<OverlayResponse> {
        self.client.send(HttpMethod::Post, "/tokens", params, true)
    }

    /// Mint additional supply of the token at `mint_address`.
    pub fn mint(&self, mint_address: &str, params: Option<&Params>) -> ApiResult<OverlayResponse> {
        self.client
            .send(HttpMethod::Post, &format!("/tokens/{mint_address}/mint"), params, true)
    }

    pub fn transfer(
        &self,
        mint_address: &str,
        params: Option<&Params>,
    ) -> ApiResult<OverlayResponse> {
        self.client
            .send(HttpMethod::Post, &format!("/tokens/{mint_address}/transfer"), params, true)
    }

    pub fn burn(&self, mint_address: &str, params: Option<&Params>) -> ApiResult<OverlayResponse> {
        self.client
            .send(HttpMethod::Post, &format!("/tokens/{mint_address}/burn"), params, true)
    }
}
