//! Balance snapshots for tracked escrow accounts
//!
//! [`ChainAmountService`] reads the balance of every tracked account of one
//! chain at a historical block. Token balances and, where the chain's
//! aggregator supports it, native balances go through the multicall client.
//! Native balances on chains without that support are read directly.

use std::sync::Arc;

use alloy::primitives::U256;
use futures::future::try_join_all;
use log::{debug, warn};

use crate::{
    errors::AmountError,
    multicall::MulticallClient,
    traits::RpcTransport,
    types::{AmountRecord, CallResult, HeldAsset, TaggedRequest, TrackedAccount},
    utils::{
        balance_utils::NativeBalanceEncoder,
        erc20_utils::{decode_erc20_balance, encode_erc20_balance},
    },
};

/// Fetches balance snapshots of tracked accounts on a single chain
pub struct ChainAmountService<T> {
    transport: Arc<T>,
    multicall: MulticallClient<T>,
    native_encoder: Option<NativeBalanceEncoder>,
}

impl<T: RpcTransport> ChainAmountService<T> {
    pub fn new(
        transport: Arc<T>,
        multicall: MulticallClient<T>,
        native_encoder: Option<NativeBalanceEncoder>,
    ) -> Self {
        Self { transport, multicall, native_encoder }
    }

    /// Service whose native encoder is derived from the client's deployments
    pub fn from_multicall(transport: Arc<T>, multicall: MulticallClient<T>) -> Self {
        let native_encoder = multicall.config().native_balance_encoder();
        Self::new(transport, multicall, native_encoder)
    }

    /// Native encoder usable at `block`, if any
    pub fn native_encoder_at(&self, block: u64) -> Option<&NativeBalanceEncoder> {
        self.native_encoder.as_ref().filter(|encoder| encoder.is_active_at(block))
    }

    /// Reads one [`AmountRecord`] per account at `block`, stamped with `timestamp`
    ///
    /// Directly queried accounts come first, followed by the aggregated ones.
    /// Each group keeps its input order.
    ///
    /// # Errors
    /// The first failure of any account aborts the whole fetch; no default
    /// amount is substituted.
    pub async fn fetch_amounts(
        &self,
        accounts: &[TrackedAccount],
        timestamp: u64,
        block: u64,
    ) -> Result<Vec<AmountRecord>, AmountError> {
        let native_encoder = self.native_encoder_at(block);

        let (direct, via_multicall): (Vec<&TrackedAccount>, Vec<&TrackedAccount>) = accounts
            .iter()
            .partition(|account| account.held_asset.is_native() && native_encoder.is_none());

        debug!(
            "Fetching {} amounts at block {}: {} direct, {} via multicall",
            accounts.len(),
            block,
            direct.len(),
            via_multicall.len()
        );

        let (mut direct_amounts, multicall_amounts) = tokio::try_join!(
            self.fetch_direct(&direct, timestamp, block),
            self.fetch_via_multicall(&via_multicall, native_encoder, timestamp, block),
        )?;

        direct_amounts.extend(multicall_amounts);
        Ok(direct_amounts)
    }

    async fn fetch_direct(
        &self,
        accounts: &[&TrackedAccount],
        timestamp: u64,
        block: u64,
    ) -> Result<Vec<AmountRecord>, AmountError> {
        let queries = accounts.iter().map(|account| async move {
            let amount = self.transport.get_balance(account.escrow_address, block).await?;
            Ok::<_, AmountError>(AmountRecord { account_id: account.id, timestamp, amount })
        });
        try_join_all(queries).await
    }

    async fn fetch_via_multicall(
        &self,
        accounts: &[&TrackedAccount],
        native_encoder: Option<&NativeBalanceEncoder>,
        timestamp: u64,
        block: u64,
    ) -> Result<Vec<AmountRecord>, AmountError> {
        if accounts.is_empty() {
            return Ok(Vec::new());
        }

        let requests = accounts
            .iter()
            .map(|&account| {
                let request = match account.held_asset {
                    HeldAsset::Native => native_encoder_for(account, native_encoder)?
                        .request(account.escrow_address),
                    HeldAsset::Token(token) => encode_erc20_balance(account.escrow_address, token),
                };
                Ok(TaggedRequest { request, metadata: account })
            })
            .collect::<Result<Vec<_>, AmountError>>()?;

        let responses = self.multicall.multicall_with_metadata(requests, block).await?;

        responses
            .into_iter()
            .map(|tagged| {
                let account = tagged.metadata;
                let amount = decode_amount(&tagged.result, account, native_encoder)?;
                Ok(AmountRecord { account_id: account.id, timestamp, amount })
            })
            .collect()
    }
}

fn native_encoder_for<'a>(
    account: &TrackedAccount,
    native_encoder: Option<&'a NativeBalanceEncoder>,
) -> Result<&'a NativeBalanceEncoder, AmountError> {
    native_encoder.ok_or_else(|| AmountError::UnsupportedNativeQuery {
        account_id: account.id,
        chain: account.chain.clone(),
    })
}

fn decode_amount(
    result: &CallResult,
    account: &TrackedAccount,
    native_encoder: Option<&NativeBalanceEncoder>,
) -> Result<U256, AmountError> {
    if !result.success {
        warn!("Multicall balance query failed for account {} ({})", account.id, account.held_asset);
        return Err(AmountError::CallFailed {
            account_id: account.id,
            asset: account.held_asset.to_string(),
        });
    }

    let amount = match account.held_asset {
        HeldAsset::Native => native_encoder_for(account, native_encoder)?.decode(&result.data)?,
        HeldAsset::Token(_) => decode_erc20_balance(&result.data)?,
    };
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Address, Bytes};
    use async_trait::async_trait;

    use crate::{errors::TransportError, multicall::MulticallConfig};

    struct UnreachableTransport;

    #[async_trait]
    impl RpcTransport for UnreachableTransport {
        async fn call(&self, target: Address, _data: Bytes, block: u64) -> Result<Bytes, TransportError> {
            Err(TransportError::Call { target: target.to_string(), block, reason: "offline".into() })
        }

        async fn get_balance(&self, account: Address, block: u64) -> Result<U256, TransportError> {
            Err(TransportError::Balance { account: account.to_string(), block, reason: "offline".into() })
        }
    }

    fn service(encoder: Option<NativeBalanceEncoder>) -> ChainAmountService<UnreachableTransport> {
        let transport = Arc::new(UnreachableTransport);
        let client = MulticallClient::new(Arc::clone(&transport), MulticallConfig::default());
        ChainAmountService::new(transport, client, encoder)
    }

    fn native_account() -> TrackedAccount {
        TrackedAccount {
            id: 7,
            held_asset: HeldAsset::Native,
            escrow_address: Address::repeat_byte(0xee),
            chain: "ethereum".to_string(),
        }
    }

    #[test]
    fn test_native_encoder_gated_by_block() {
        let encoder = NativeBalanceEncoder::eth_balance(100, Address::repeat_byte(0x33));
        let gated = service(Some(encoder));
        assert!(gated.native_encoder_at(99).is_none());
        assert!(gated.native_encoder_at(100).is_some());
        assert!(service(None).native_encoder_at(u64::MAX).is_none());
    }

    #[test]
    fn test_native_account_without_encoder_is_rejected_for_multicall() {
        match native_encoder_for(&native_account(), None) {
            Err(AmountError::UnsupportedNativeQuery { account_id: 7, chain }) => assert_eq!(chain, "ethereum"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_unsuccessful_result_names_account() {
        let result = CallResult { success: false, data: Bytes::new() };
        match decode_amount(&result, &native_account(), None) {
            Err(AmountError::CallFailed { account_id: 7, asset }) => assert_eq!(asset, "native"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_account_list_makes_no_requests() {
        let records = service(None).fetch_amounts(&[], 1_700_000_000, 10).await.unwrap();
        assert!(records.is_empty());
    }
}
