//! Error types for batched reads and balance snapshots
//!
//! This module defines the error taxonomy shared by the crate:
//! - ABI decoding errors (aggregator responses, balance payloads)
//! - Transport errors surfaced by the node connection
//! - Configuration errors for aggregator deployments
//! - Error conversion and propagation between layers

use thiserror::Error;

use crate::types::ProtocolVersion;

/// Errors raised when a response cannot be parsed against its expected ABI shape
///
/// A decode error is fatal to the batch or call it belongs to. It is never
/// folded into a per-call `success = false`.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The aggregate response did not match the protocol's return shape
    ///
    /// # Fields
    /// * `version` - Aggregator protocol the response was decoded against
    /// * `reason` - Detailed error message
    #[error("Failed to decode {version} aggregate response: {reason}")]
    Aggregate {
        version: ProtocolVersion,
        reason: String,
    },

    /// The aggregate response carried a different number of entries than calls sent
    #[error("Aggregate response has {actual} entries, expected {expected}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// `balanceOf` return data could not be decoded as `uint256`
    #[error("Failed to decode ERC20 balance: {reason}")]
    Erc20Balance {
        reason: String,
    },

    /// Native balance return data could not be decoded
    #[error("Failed to decode native balance: {reason}")]
    NativeBalance {
        reason: String,
    },
}

/// Errors surfaced by the node transport
///
/// Any of these aborts the enclosing multicall or fetch. No retry is
/// attempted at this layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A read call against a contract failed at the node
    #[error("Call to {target} at block {block} failed: {reason}")]
    Call {
        target: String,
        block: u64,
        reason: String,
    },

    /// A native balance query failed at the node
    #[error("Balance query for {account} at block {block} failed: {reason}")]
    Balance {
        account: String,
        block: u64,
        reason: String,
    },

    /// Invalid or malformed RPC URL
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    /// Connection establishment errors
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// Aggregator configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A deployment declared a batch size of zero
    #[error("Deployment since block {since_block} has a zero batch size")]
    ZeroBatchSize {
        since_block: u64,
    },

    /// Two deployments claim the same activation block
    #[error("Multiple deployments active since block {0}")]
    DuplicateSinceBlock(u64),

    /// No built-in deployments exist for the chain
    #[error("No multicall deployments known for chain {0}")]
    UnknownChain(String),

    /// Deployment list could not be parsed
    #[error("Failed to parse multicall config: {0}")]
    Parse(String),
}

/// Errors returned by the multicall client
///
/// Per-call failures are not errors: they come back as
/// `CallResult { success: false, .. }`.
#[derive(Debug, Error)]
pub enum MulticallError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Top-level error type for balance snapshots
#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// A native-asset account was routed through the aggregator without a native encoder
    ///
    /// # Fields
    /// * `account_id` - Tracked account identifier
    /// * `chain` - Chain the account lives on
    #[error("No native balance encoding for chain {chain} (account {account_id})")]
    UnsupportedNativeQuery {
        account_id: u64,
        chain: String,
    },

    /// The aggregator reported the balance query for an account as unsuccessful
    ///
    /// # Fields
    /// * `account_id` - Tracked account identifier
    /// * `asset` - Held asset (`native` or the token address)
    #[error("Multicall failed for account {account_id} ({asset})")]
    CallFailed {
        account_id: u64,
        asset: String,
    },
}

impl From<MulticallError> for AmountError {
    fn from(err: MulticallError) -> Self {
        match err {
            MulticallError::Decode(e) => AmountError::Decode(e),
            MulticallError::Transport(e) => AmountError::Transport(e),
        }
    }
}
