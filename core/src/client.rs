//! The Overlay API client and its request/response normalizer.
//!
//! # Design
//! Every API call goes through `OverlayClient::send`, which is split into
//! three stages: `build_request` turns a method, path and parameters into an
//! `HttpRequest`, the `Transport` executes it, and `parse_response` turns the
//! `HttpResponse` into a flattened `OverlayResponse`. Both ends are pure so
//! they can be exercised without a network. The client carries no mutable
//! state; clones share one transport and its connection pool.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::nft::NftResource;
use crate::token::TokenResource;
use crate::types::{Envelope, OverlayResponse};
use crate::wallet::WalletResource;

/// Client for the Overlay wallet, token and NFT API.
///
/// Calls block the current thread until the response has been read. The
/// client is `Send + Sync`; issue calls from several threads to run them
/// concurrently.
#[derive(Clone)]
pub struct OverlayClient {
    config: Config,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl OverlayClient {
    /// Create a client for the deployment selected by `config.environment`.
    pub fn new(config: Config) -> Self {
        let base_url = config.environment.base_url().to_string();
        Self::with_transport(config, &base_url, Arc::new(UreqTransport::new()))
    }

    /// Create a client bound to an explicit base URL instead of the
    /// environment's.
    pub fn with_base_url(config: Config, base_url: &str) -> Self {
        Self::with_transport(config, base_url, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(config: Config, base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn wallet(&self) -> WalletResource<'_> {
        WalletResource::new(self)
    }

    pub fn token(&self) -> TokenResource<'_> {
        TokenResource::new(self)
    }

    pub fn nft(&self) -> NftResource<'_> {
        NftResource::new(self)
    }

    /// Execute one API call and return its flattened response.
    ///
    /// `path` is appended to the base URL verbatim. When `with_auth` is set,
    /// the configured non-empty keys are attached as `api-key` and `auth-key`.
    pub fn send<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
        with_auth: bool,
    ) -> ApiResult<OverlayResponse>
    where
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, path, params, with_auth)?;
        debug!(
            method = method.as_str(),
            url = %request.url,
            with_auth,
            "sending overlay request"
        );
        let response = self.transport.execute(&request)?;
        debug!(status = response.status, url = %request.url, "received overlay response");
        parse_response(response)
    }

    pub fn build_request<P>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Option<&P>,
        with_auth: bool,
    ) -> ApiResult<HttpRequest>
    where
        P: Serialize + ?Sized,
    {
        let body = params
            .map(|p| serde_json::to_string(p))
            .transpose()
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;

        let mut headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), user_agent()),
        ];
        if with_auth {
            if !self.config.api_key.is_empty() {
                headers.push(("api-key".to_string(), self.config.api_key.clone()));
            }
            if !self.config.auth_key.is_empty() {
                headers.push(("auth-key".to_string(), self.config.auth_key.clone()));
            }
        }

        Ok(HttpRequest {
            method,
            url: format!("{}{}", self.base_url, path),
            headers,
            body,
        })
    }
}

/// Decode the envelope, reject error statuses, and flatten the payload.
///
/// The body is decoded before the status is checked, so an error status
/// with a non-JSON body surfaces as `DecodeError`.
pub fn parse_response(response: HttpResponse) -> ApiResult<OverlayResponse> {
    let envelope = match Envelope::decode(&response.body) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(status = response.status, error = %e, "undecodable overlay response");
            return Err(ApiError::DecodeError {
                message: e.to_string(),
                body: response.body,
            });
        }
    };

    if response.status >= 400 {
        let message = envelope.message.unwrap_or_default();
        warn!(status = response.status, server_message = %message, "overlay request failed");
        return Err(ApiError::HttpError {
            status: response.status,
            message,
        });
    }

    Ok(envelope.flatten())
}

/// `User-Agent` value identifying this crate and the host platform.
pub fn user_agent() -> String {
    format!(
        "overlay-rs/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
