//! Transport trait consumed by the multicall client and the amount service
//!
//! The crate never talks to a node directly. Everything goes through
//! [`RpcTransport`], which performs one read at one historical block.
//! `transport::AlloyTransport` is the alloy-backed implementation; tests
//! substitute in-memory ones.

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, U256};
use async_trait::async_trait;

use crate::errors::TransportError;

/// Raw read access to a chain at a given block height
///
/// Implementations own timeouts and retries. Any error returned here aborts
/// the enclosing multicall or fetch.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Executes a read-only `eth_call` against `target` at `block`
    async fn call(&self, target: Address, data: Bytes, block: u64) -> Result<Bytes, TransportError>;

    /// Returns the native balance of `account` at `block`
    async fn get_balance(&self, account: Address, block: u64) -> Result<U256, TransportError>;
}

#[async_trait]
impl<T> RpcTransport for Arc<T>
where
    T: RpcTransport + ?Sized,
{
    async fn call(&self, target: Address, data: Bytes, block: u64) -> Result<Bytes, TransportError> {
        (**self).call(target, data, block).await
    }

    async fn get_balance(&self, account: Address, block: u64) -> Result<U256, TransportError> {
        (**self).get_balance(account, block).await
    }
}
