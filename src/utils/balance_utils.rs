//! Native-asset balance queries routed through the aggregator
//!
//! Some aggregator deployments expose an opcode that returns the native
//! balance of an address (`getEthBalance(address)` on Multicall v1/v2/v3).
//! A [`NativeBalanceEncoder`] describes that capability for one chain.
//! Chains without it read native balances directly from the node.

use std::fmt;

use alloy::{
    primitives::{Address, Bytes, U256},
    sol_types::SolCall,
};

use crate::{errors::DecodeError, multicall::codec::getEthBalanceCall, types::CallRequest};

/// Encodes a native balance query for the given holder
pub type NativeEncodeFn = fn(Address) -> Bytes;

/// Decodes the return data of a native balance query
pub type NativeDecodeFn = fn(&[u8]) -> Result<U256, DecodeError>;

/// Per-chain capability to query native balances through the aggregator
#[derive(Clone, Copy)]
pub struct NativeBalanceEncoder {
    /// First block (inclusive) at which the opcode can be used
    pub since_block: u64,
    /// Contract exposing the opcode
    pub aggregator_address: Address,
    encode: NativeEncodeFn,
    decode: NativeDecodeFn,
}

impl NativeBalanceEncoder {
    pub fn new(
        since_block: u64,
        aggregator_address: Address,
        encode: NativeEncodeFn,
        decode: NativeDecodeFn,
    ) -> Self {
        Self { since_block, aggregator_address, encode, decode }
    }

    /// Encoder backed by the multicall `getEthBalance(address)` function
    pub fn eth_balance(since_block: u64, aggregator_address: Address) -> Self {
        Self::new(since_block, aggregator_address, encode_eth_balance, decode_eth_balance)
    }

    /// Whether the opcode may be used at `block`
    pub fn is_active_at(&self, block: u64) -> bool {
        self.since_block <= block
    }

    pub fn encode(&self, holder: Address) -> Bytes {
        (self.encode)(holder)
    }

    pub fn decode(&self, data: &[u8]) -> Result<U256, DecodeError> {
        (self.decode)(data)
    }

    /// Builds the request reading `holder`'s native balance
    pub fn request(&self, holder: Address) -> CallRequest {
        CallRequest::new(self.aggregator_address, self.encode(holder))
    }
}

impl fmt::Debug for NativeBalanceEncoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeBalanceEncoder")
            .field("since_block", &self.since_block)
            .field("aggregator_address", &self.aggregator_address)
            .finish_non_exhaustive()
    }
}

pub fn encode_eth_balance(holder: Address) -> Bytes {
    getEthBalanceCall { addr: holder }.abi_encode().into()
}

pub fn decode_eth_balance(data: &[u8]) -> Result<U256, DecodeError> {
    getEthBalanceCall::abi_decode_returns(data)
        .map_err(|e| DecodeError::NativeBalance { reason: e.to_string() })
}
