//! Batched contract reads through on-chain multicall aggregators
//!
//! This module turns many independent read requests into as few node
//! round-trips as possible:
//!
//! - [`codec`]: pure encoding/decoding of aggregate calls for protocol V1 and V2
//! - [`config`]: per-chain deployments and block-height based selection
//! - [`client`]: chunking, concurrent dispatch and order-preserving reassembly
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use multicall_amounts::{
//!     multicall::{MulticallClient, MulticallConfig},
//!     transport::AlloyTransport,
//!     utils::erc20_utils::{decode_erc20_balance, encode_erc20_balance},
//! };
//! use alloy::primitives::address;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(AlloyTransport::connect("https://eth.llamarpc.com").await?);
//! let client = MulticallClient::new(transport, MulticallConfig::for_chain("ethereum")?);
//!
//! let request = encode_erc20_balance(
//!     address!("28C6c06298d514Db089934071355E5743bf21d60"),
//!     address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
//! );
//! let results = client.multicall(&[request], 18_000_000).await?;
//! if results[0].success {
//!     println!("USDC balance: {}", decode_erc20_balance(&results[0].data)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod codec;
pub mod config;

pub use client::MulticallClient;
pub use config::MulticallConfig;
