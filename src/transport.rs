//! alloy-backed implementation of [`RpcTransport`]
//!
//! Every read is pinned to an explicit block number, so results reflect
//! historical state. Reading old blocks requires an archive node; full nodes
//! typically serve only the most recent ~128 blocks.

use alloy::{
    eips::BlockId,
    primitives::{Address, Bytes, U256},
    providers::{DynProvider, Provider, ProviderBuilder, WsConnect},
    rpc::types::TransactionRequest,
};
use async_trait::async_trait;

use crate::{errors::TransportError, traits::RpcTransport};

/// Reads chain state through an alloy [`Provider`]
#[derive(Debug, Clone)]
pub struct AlloyTransport<P> {
    provider: P,
}

impl<P> AlloyTransport<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl AlloyTransport<DynProvider> {
    /// Connects over HTTP(S), or WebSocket for any other scheme
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// use multicall_amounts::transport::AlloyTransport;
    /// let transport = AlloyTransport::connect("https://eth.llamarpc.com").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(rpc_url: &str) -> Result<Self, TransportError> {
        let provider = if rpc_url.starts_with("http") {
            let url = rpc_url
                .parse()
                .map_err(|_| TransportError::InvalidRpcUrl(rpc_url.to_string()))?;
            ProviderBuilder::new().connect_http(url).erased()
        } else {
            ProviderBuilder::new()
                .connect_ws(WsConnect::new(rpc_url))
                .await
                .map_err(|e| TransportError::Connection(e.to_string()))?
                .erased()
        };
        Ok(Self::new(provider))
    }
}

#[async_trait]
impl<P> RpcTransport for AlloyTransport<P>
where
    P: Provider + Send + Sync,
{
    async fn call(&self, target: Address, data: Bytes, block: u64) -> Result<Bytes, TransportError> {
        let tx = TransactionRequest::default().to(target).input(data.into());
        self.provider
            .call(tx)
            .block(BlockId::number(block))
            .await
            .map_err(|e| TransportError::Call {
                target: target.to_string(),
                block,
                reason: e.to_string(),
            })
    }

    async fn get_balance(&self, account: Address, block: u64) -> Result<U256, TransportError> {
        self.provider
            .get_balance(account)
            .block_id(BlockId::number(block))
            .await
            .map_err(|e| TransportError::Balance {
                account: account.to_string(),
                block,
                reason: e.to_string(),
            })
    }
}
