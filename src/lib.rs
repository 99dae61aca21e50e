//! # Multicall Amounts
//!
//! Batched historical contract reads through on-chain multicall aggregators,
//! and balance snapshots of tracked escrow accounts built on top of them.
//!
//! ## Core Features
//!
//! - **Aggregated Reads**
//!   - Many independent `eth_call`s folded into few aggregate calls
//!   - Aggregator deployment selected by block height (protocol V1 or V2)
//!   - Per-call success flags, results returned in request order
//!   - Direct one-call-per-request fallback before any deployment exists
//!
//! - **Balance Snapshots**
//!   - ERC20 `balanceOf` queries
//!   - Native balances through the aggregator where supported, directly otherwise
//!
//! ## Features
//!
//! - `rustls-tls`: Uses rustls as the TLS implementation instead of native-tls (OpenSSL).
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use multicall_amounts::{
//!     ChainAmountService, MulticallClient, MulticallConfig,
//!     transport::AlloyTransport,
//!     types::{HeldAsset, TrackedAccount},
//! };
//! use alloy::primitives::address;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(AlloyTransport::connect("https://eth.llamarpc.com").await?);
//! let client = MulticallClient::new(Arc::clone(&transport), MulticallConfig::for_chain("ethereum")?);
//! let service = ChainAmountService::from_multicall(transport, client);
//!
//! let accounts = vec![TrackedAccount {
//!     id: 1,
//!     held_asset: HeldAsset::Token(address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")),
//!     escrow_address: address!("28C6c06298d514Db089934071355E5743bf21d60"),
//!     chain: "ethereum".to_string(),
//! }];
//!
//! for record in service.fetch_amounts(&accounts, 1_700_000_000, 18_600_000).await? {
//!     println!("account {}: {}", record.account_id, record.amount);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Structure
//!
//! - `multicall`: Aggregator codec, deployment config and batching client
//! - `amounts`: Balance snapshots for tracked accounts
//! - `transport`: alloy-backed node access
//! - `types`: Core data structures
//! - `traits`: The transport interface
//! - `errors`: Error types and handling
//! - `utils`: Balance query codecs

pub mod amounts;
pub mod errors;
pub mod multicall;
pub mod traits;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export only the essential types and functions
pub use amounts::ChainAmountService;
pub use multicall::{MulticallClient, MulticallConfig};
pub use traits::RpcTransport;
pub use types::{AmountRecord, CallRequest, CallResult, TrackedAccount};
