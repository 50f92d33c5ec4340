//! In-memory emulation of the Overlay wallet, token and NFT API.
//!
//! Every response uses the `{"success", "message", "data"}` envelope. All
//! routes except `POST /wallets` require a non-empty `api-key` or `auth-key`
//! header. Each request is appended to `AppState::requests` before it is
//! handled so tests can inspect exactly what a client sent.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Path, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const DEFAULT_DECIMALS: u64 = 9;

/// A request as received by the server.
#[derive(Clone, Debug, Serialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lower-cased.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[derive(Clone, Debug)]
struct Token {
    name: String,
    symbol: String,
    decimals: u64,
    supply: u64,
}

#[derive(Clone, Debug)]
struct Collection {
    name: String,
    symbol: String,
    uri: String,
    items: Vec<u64>,
    next_id: u64,
}

#[derive(Default)]
struct Ledger {
    tokens: HashMap<String, Token>,
    collections: HashMap<String, Collection>,
}

#[derive(Clone, Default)]
pub struct AppState {
    pub requests: Arc<RwLock<Vec<RecordedRequest>>>,
    ledger: Arc<RwLock<Ledger>>,
}

type Reply = (StatusCode, Json<Value>);
type HandlerResult = Result<Reply, Reply>;

pub fn app() -> Router {
    app_with_state(AppState::default())
}

pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .route("/wallets", post(create_wallet))
        .route("/tokens", post(create_token))
        .route("/tokens/{id}/mint", post(mint_token))
        .route("/tokens/{id}/transfer", post(transfer_token))
        .route("/tokens/{id}/burn", post(burn_token))
        .route("/nfts", post(create_nft))
        .route("/nfts/{id}/mint", post(mint_nft))
        .route("/nfts/{id}/transfer", post(transfer_nft))
        .route("/nfts/{id}/burn", post(burn_nft))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, AppState::default()).await
}

pub async fn run_with_state(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn record(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %parts.uri.path(), error = %e, "unreadable request body");
            return fail(StatusCode::BAD_REQUEST, "invalid body").into_response();
        }
    };

    let headers = parts
        .headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
        })
        .collect();
    let recorded = RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    };
    tracing::info!(method = %recorded.method, path = %recorded.path, "request");
    state.requests.write().await.push(recorded);

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn ok(message: &str, data: Value) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": message, "data": data })),
    )
}

fn fail(status: StatusCode, message: &str) -> Reply {
    (
        status,
        Json(json!({ "success": false, "message": message })),
    )
}

fn require_auth(headers: &HeaderMap) -> Result<(), Reply> {
    let present = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| !v.is_empty())
    };
    if present("api-key") || present("auth-key") {
        Ok(())
    } else {
        Err(fail(StatusCode::UNAUTHORIZED, "unauthorized"))
    }
}

/// An empty body counts as an empty object.
fn parse_params(body: &Bytes) -> Result<Value, Reply> {
    if body.is_empty() {
        return Ok(json!({}));
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value) if value.is_object() => Ok(value),
        _ => Err(fail(StatusCode::BAD_REQUEST, "invalid json")),
    }
}

fn require_str(params: &Value, key: &str) -> Result<String, Reply> {
    params[key]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| fail(StatusCode::BAD_REQUEST, &format!("missing field: {key}")))
}

fn require_amount(params: &Value) -> Result<u64, Reply> {
    params["amount"]
        .as_u64()
        .filter(|amount| *amount > 0)
        .ok_or_else(|| fail(StatusCode::BAD_REQUEST, "amount must be a positive integer"))
}

fn address() -> String {
    Uuid::new_v4().simple().to_string()
}

fn not_found() -> Reply {
    fail(StatusCode::NOT_FOUND, "not found")
}

// --- wallets ---

async fn create_wallet(body: Bytes) -> HandlerResult {
    let params = parse_params(&body)?;
    let mut data = json!({ "publicKey": address(), "secretKey": address() });
    if let Some(label) = params.get("label") {
        data["label"] = label.clone();
    }
    Ok(ok("wallet created", data))
}

// --- tokens ---

async fn create_token(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> HandlerResult {
    require_auth(&headers)?;
    let params = parse_params(&body)?;
    let token = Token {
        name: require_str(&params, "name")?,
        symbol: require_str(&params, "symbol")?,
        decimals: params["decimals"].as_u64().unwrap_or(DEFAULT_DECIMALS),
        supply: params["supply"].as_u64().unwrap_or(0),
    };
    let mint_address = address();
    let data = json!({
        "mintAddress": mint_address,
        "name": token.name,
        "symbol": token.symbol,
        "decimals": token.decimals,
        "supply": token.supply,
    });
    state.ledger.write().await.tokens.insert(mint_address, token);
    Ok(ok("token created", data))
}

async fn mint_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> HandlerResult {
    require_auth(&headers)?;
    let params = parse_params(&body)?;
    let mut ledger = state.ledger.write().await;
    let token = ledger.tokens.get_mut(&id).ok_or_else(not_found)?;
    let amount = require_amount(&params)?;
    token.supply += amount;
    Ok(ok(
        "tokens minted",
        json!({ "mintAddress": id, "supply": token.supply, "signature": address() }),
    ))
}

async fn transfer_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> HandlerResult {
    require_auth(&headers)?;
    let params = parse_params(&body)?;
    let ledger = state.ledger.read().await;
    let token = ledger.tokens.get(&id).ok_or_else(not_found)?;
    let to = require_str(&params, "to")?;
    let amount = require_amount(&params)?;
    if amount > token.supply {
        return Err(fail(StatusCode::BAD_REQUEST, "insufficient balance"));
    }
    Ok(ok(
        "tokens transferred",
        json!({ "mintAddress": id, "to": to, "amount": amount, "signature": address() }),
    ))
}

async fn burn_token(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> HandlerResult {
    require_auth(&headers)?;
    let params = parse_params(&body)?;
    let mut ledger = state.ledger.write().await;
    let token = ledger.tokens.get_mut(&id).ok_or_else(not_found)?;
    let amount = require_amount(&params)?;
    if amount > token.supply {
        return Err(fail(StatusCode::BAD_REQUEST, "insufficient balance"));
    }
    token.supply -= amount;
    Ok(ok(
        "tokens burned",
        json!({ "mintAddress": id, "supply": token.supply, "signature": address() }),
    ))
}

// --- nfts ---

async fn create_nft(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> HandlerResult {
    require_auth(&headers)?;
    let params = parse_params(&body)?;
    let collection = Collection {
        name: require_str(&params, "name")?,
        symbol: require_str(&params, "symbol")?,
        uri: params["uri"].as_str().unwrap_or_default().to_string(),
        items: Vec::new(),
        next_id: 1,
    };
    let mint_address = address();
    let data = json!({
        "mintAddress": mint_address,
        "name": collection.name,
        "symbol": collection.symbol,
        "uri": collection.uri,
    });
    state
        .ledger
        .write()
        .await
        .collections
        .insert(mint_address, collection);
    Ok(ok("nft created", data))
}

async fn mint_nft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HandlerResult {
    require_auth(&headers)?;
    let mut ledger = state.ledger.write().await;
    let collection = ledger.collections.get_mut(&id).ok_or_else(not_found)?;
    let token_id = collection.next_id;
    collection.next_id += 1;
    collection.items.push(token_id);
    Ok(ok(
        "nft minted",
        json!({
            "mintAddress": id,
            "tokenId": token_id,
            "itemCount": collection.items.len(),
            "signature": address(),
        }),
    ))
}

async fn transfer_nft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> HandlerResult {
    require_auth(&headers)?;
    let params = parse_params(&body)?;
    let ledger = state.ledger.read().await;
    let collection = ledger.collections.get(&id).ok_or_else(not_found)?;
    let to = require_str(&params, "to")?;
    if collection.items.is_empty() {
        return Err(fail(StatusCode::BAD_REQUEST, "no items to transfer"));
    }
    Ok(ok(
        "nft transferred",
        json!({ "mintAddress": id, "to": to, "signature": address() }),
    ))
}

async fn burn_nft(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> HandlerResult {
    require_auth(&headers)?;
    let mut ledger = state.ledger.write().await;
    let collection = ledger.collections.get_mut(&id).ok_or_else(not_found)?;
    if collection.items.pop().is_none() {
        return Err(fail(StatusCode::BAD_REQUEST, "nothing to burn"));
    }
    Ok(ok(
        "nft burned",
        json!({
            "mintAddress": id,
            "itemCount": collection.items.len(),
            "signature": address(),
        }),
    ))
}
