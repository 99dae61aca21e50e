//! ERC20 balance query codec
//!
//! Builds `balanceOf(address)` requests and decodes their `uint256` return
//! values. The requests are plain [`CallRequest`]s, so they can be sent
//! through the multicall client or directly through a transport.

use alloy::{
    primitives::{Address, U256},
    sol,
    sol_types::SolCall,
};

use crate::{errors::DecodeError, types::CallRequest};

sol! {
    function balanceOf(address owner) public returns (uint256);
}

/// Builds a `balanceOf(holder)` request against `token`
pub fn encode_erc20_balance(holder: Address, token: Address) -> CallRequest {
    CallRequest::new(token, balanceOfCall { owner: holder }.abi_encode())
}

/// Decodes `balanceOf` return data
///
/// # Returns
/// - `Ok(U256)`: Token balance in the token's smallest unit
/// - `Err(DecodeError::Erc20Balance)`: If `data` is not an ABI-encoded `uint256`
pub fn decode_erc20_balance(data: &[u8]) -> Result<U256, DecodeError> {
    balanceOfCall::abi_decode_returns(data)
        .map_err(|e| DecodeError::Erc20Balance { reason: e.to_string() })
}
