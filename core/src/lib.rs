//! Blocking client for the Overlay wallet, token and NFT API.
//!
//! # Overview
//! `OverlayClient` resolves a base URL from its `Config`, attaches the
//! standard and authentication headers, and returns each JSON response as a
//! single flattened `OverlayResponse`. Resource groups (`wallet()`,
//! `token()`, `nft()`) only pick the verb, path and auth flag.
//!
//! # Design
//! - The client holds an immutable `Config` and one shared `Transport`;
//!   there is no other state, so it can be cloned and shared across threads.
//! - Request building and response parsing are pure functions around the
//!   transport call, so both halves are tested without a network.
//! - Every call is a single attempt. No retries, no caching.
//!
//! ```no_run
//! use overlay_core::{Config, OverlayClient, Params};
//!
//! let client = OverlayClient::new(Config::new().api_key("key").environment("mainnet"));
//! let mut params = Params::new();
//! params.insert("amount".to_string(), 5.into());
//! let result = client.token().mint("ABC123", Some(&params))?;
//! println!("signature: {:?}", result.get_str("signature"));
//! # Ok::<(), overlay_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod nft;
pub mod token;
pub mod types;
pub mod wallet;

pub use client::OverlayClient;
pub use config::{Config, Environment, DEVNET_URL, MAINNET_URL};
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use nft::NftResource;
pub use token::TokenResource;
pub use types::{Envelope, OverlayResponse, Params};
pub use wallet::WalletResource;
