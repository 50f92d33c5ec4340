//! NFT endpoints. All of them require authentication.

use crate::client::OverlayClient;
use crate::error::ApiResult;
use crate::http::HttpMethod;
use crate::types::{OverlayResponse, Params};

pub struct NftResource<'a> {
    client: &'a OverlayClient,
}

impl<'a> NftResource<'a> {
    pub(crate) fn new(client: &'a OverlayClient) -> Self {
        Self { client }
    }

    pub fn create(&self, params: Option<&Params>) -> ApiResult<OverlayResponse> {
        self.client.send(HttpMethod::Post, "/nfts", params, true)
    }

    pub fn mint(&self, mint_address: &str, params: Option<&Params>) -> ApiResult<OverlayResponse> {
        self.client
            .send(HttpMethod::Post, &format!("/nfts/{mint_address}/mint"), params, true)
    }

    pub fn transfer(
        &self,
        mint_address: &str,
        params: Option<&Params>,
    ) -> ApiResult<OverlayResponse> {
        self.client
            .send(HttpMethod::Post, &format!("/nfts/{mint_address}/transfer"), params, true)
    }

    pub fn burn(&self, mint_address: &str, params: Option<&Params>) -> ApiResult<OverlayResponse> {
        self.client
            .send(HttpMethod::Post, &format!("/nfts/{mint_address}/burn"), params, true)
    }
}
