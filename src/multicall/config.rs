//! Aggregator deployment configuration
//!
//! A [`MulticallConfig`] holds every known aggregator deployment of one chain,
//! ordered by activation block. It is built once and never mutated, so it can
//! be shared freely between concurrent calls.

use std::collections::HashMap;

use alloy::primitives::{address, Address};
use once_cell::sync::Lazy;

use crate::{
    errors::ConfigError,
    types::{AggregatorDeployment, ProtocolVersion},
    utils::balance_utils::NativeBalanceEncoder,
};

const DEFAULT_BATCH_SIZE: usize = 150;

const MULTICALL_V1: Address = address!("eefBa1e63905eF1D7ACbA5a8513c70307C1cE441");
const MULTICALL_V2: Address = address!("5BA1e12693Dc8F9c48aAD8770482f4739bEeD696");
const MULTICALL_V3: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

fn deployment(
    since_block: u64,
    address: Address,
    protocol_version: ProtocolVersion,
) -> AggregatorDeployment {
    AggregatorDeployment {
        since_block,
        address,
        protocol_version,
        batch_size: DEFAULT_BATCH_SIZE,
        native_balance_supported: true,
    }
}

/// Built-in deployments per chain name
///
/// Multicall2 and Multicall3 share the `tryAggregate` ABI and are both V2.
static KNOWN_DEPLOYMENTS: Lazy<HashMap<&'static str, Vec<AggregatorDeployment>>> =
    Lazy::new(|| {
        let mut chains = HashMap::new();
        chains.insert(
            "ethereum",
            vec![
                deployment(7_929_876, MULTICALL_V1, ProtocolVersion::V1),
                deployment(12_336_033, MULTICALL_V2, ProtocolVersion::V2),
                deployment(14_353_601, MULTICALL_V3, ProtocolVersion::V2),
            ],
        );
        chains.insert("arbitrum", vec![deployment(7_654_707, MULTICALL_V3, ProtocolVersion::V2)]);
        chains
    });

/// Immutable, validated set of aggregator deployments for one chain
#[derive(Debug, Clone, Default)]
pub struct MulticallConfig {
    /// Sorted ascending by `since_block`
    deployments: Vec<AggregatorDeployment>,
}

impl MulticallConfig {
    /// Validates and orders `deployments`
    ///
    /// # Errors
    /// * `ConfigError::ZeroBatchSize` - a deployment allows no calls per batch
    /// * `ConfigError::DuplicateSinceBlock` - two deployments start at the same block
    pub fn new(mut deployments: Vec<AggregatorDeployment>) -> Result<Self, ConfigError> {
        if let Some(bad) = deployments.iter().find(|d| d.batch_size == 0) {
            return Err(ConfigError::ZeroBatchSize { since_block: bad.since_block });
        }
        deployments.sort_by_key(|d| d.since_block);
        if let Some(pair) = deployments.windows(2).find(|w| w[0].since_block == w[1].since_block) {
            return Err(ConfigError::DuplicateSinceBlock(pair[0].since_block));
        }
        Ok(Self { deployments })
    }

    /// Loads a deployment list from JSON
    ///
    /// ```
    /// use multicall_amounts::multicall::MulticallConfig;
    ///
    /// let config = MulticallConfig::from_json(r#"[
    ///     {
    ///         "sinceBlock": 1111,
    ///         "address": "0x1111111111111111111111111111111111111111",
    ///         "version": "v1",
    ///         "batchSize": 3
    ///     }
    /// ]"#).unwrap();
    /// assert!(config.deployment_for(1110).is_none());
    /// assert!(config.deployment_for(1111).is_some());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let deployments: Vec<AggregatorDeployment> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Self::new(deployments)
    }

    /// Built-in deployments for a known chain (`"ethereum"`, `"arbitrum"`)
    pub fn for_chain(chain: &str) -> Result<Self, ConfigError> {
        let deployments = KNOWN_DEPLOYMENTS
            .get(chain)
            .ok_or_else(|| ConfigError::UnknownChain(chain.to_string()))?;
        Self::new(deployments.clone())
    }

    /// Deployment active at `block`: the one with the greatest `since_block <= block`
    pub fn deployment_for(&self, block: u64) -> Option<&AggregatorDeployment> {
        let idx = self.deployments.partition_point(|d| d.since_block <= block);
        idx.checked_sub(1).map(|i| &self.deployments[i])
    }

    /// Native balance encoder for this chain, if any deployment supports it
    ///
    /// Uses the earliest supporting deployment: the opcode is reachable at its
    /// address from its activation block onward.
    pub fn native_balance_encoder(&self) -> Option<NativeBalanceEncoder> {
        self.deployments
            .iter()
            .find(|d| d.native_balance_supported)
            .map(|d| NativeBalanceEncoder::eth_balance(d.since_block, d.address))
    }

    pub fn deployments(&self) -> &[AggregatorDeployment] {
        &self.deployments
    }
}
