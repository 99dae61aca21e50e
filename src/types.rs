//! Core types for batched reads and balance snapshots
//!
//! This module defines the data structures used throughout the crate:
//! - Aggregator deployments and protocol versions
//! - Call requests and their results, with optional caller metadata
//! - Tracked escrow accounts and the amount records produced for them

use std::fmt;

pub use alloy::primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

/// Wire protocol spoken by an aggregator deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    /// `aggregate((address,bytes)[])`, returning `(uint256, bytes[])`
    V1,
    /// `tryAggregate(bool,(address,bytes)[])`, returning `(bool,bytes)[]`
    V2,
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::V1 => f.write_str("v1"),
            ProtocolVersion::V2 => f.write_str("v2"),
        }
    }
}

/// One deployment of the aggregator contract on a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorDeployment {
    /// First block (inclusive) at which this deployment is used
    pub since_block: u64,
    /// Contract address
    pub address: Address,
    /// Encoding spoken by the contract
    #[serde(rename = "version")]
    pub protocol_version: ProtocolVersion,
    /// Maximum number of calls per aggregate call
    pub batch_size: usize,
    /// Whether the contract exposes `getEthBalance(address)`
    #[serde(default)]
    pub native_balance_supported: bool,
}

/// A single read request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Contract to call
    pub target: Address,
    /// ABI-encoded call data
    pub data: Bytes,
}

impl CallRequest {
    pub fn new(target: Address, data: impl Into<Bytes>) -> Self {
        Self { target, data: data.into() }
    }
}

/// Outcome of a single read request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    /// Whether the call produced usable return data
    pub success: bool,
    /// Raw return data, kept even when unsuccessful
    pub data: Bytes,
}

impl CallResult {
    /// Builds a result from what the node or aggregator reported.
    ///
    /// Empty return data is never a success: it carries nothing to decode.
    pub fn from_response(reported_success: bool, data: Bytes) -> Self {
        Self { success: reported_success && !data.is_empty(), data }
    }
}

/// A request paired with an opaque caller payload
#[derive(Debug, Clone)]
pub struct TaggedRequest<M> {
    pub request: CallRequest,
    pub metadata: M,
}

/// A result paired with the payload of the request that produced it
#[derive(Debug, Clone)]
pub struct TaggedResult<M> {
    pub result: CallResult,
    pub metadata: M,
}

/// Asset held by a tracked escrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeldAsset {
    /// The chain's native asset
    Native,
    /// An ERC20 token at the given address
    Token(Address),
}

impl HeldAsset {
    pub fn is_native(&self) -> bool {
        matches!(self, HeldAsset::Native)
    }
}

impl fmt::Display for HeldAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeldAsset::Native => f.write_str("native"),
            HeldAsset::Token(address) => write!(f, "{address}"),
        }
    }
}

/// An escrow account under observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedAccount {
    pub id: u64,
    pub held_asset: HeldAsset,
    /// Account whose balance is read
    pub escrow_address: Address,
    pub chain: String,
}

/// Balance of one tracked account at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountRecord {
    pub account_id: u64,
    /// Unix timestamp (seconds) the snapshot is attributed to
    pub timestamp: u64,
    pub amount: U256,
}
