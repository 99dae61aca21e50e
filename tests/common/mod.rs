//! Shared test fixtures: an in-memory transport that records every request

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::Mutex,
};

use alloy::primitives::{address, Address, Bytes, U256};
use async_trait::async_trait;
use multicall_amounts::{
    errors::TransportError,
    types::{AggregatorDeployment, ProtocolVersion},
    RpcTransport,
};

pub const ADDRESS_A: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
pub const ADDRESS_B: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
pub const ADDRESS_C: Address = address!("cccccccccccccccccccccccccccccccccccccccc");

pub const ADDRESS_V1: Address = address!("1111111111111111111111111111111111111111");
pub const ADDRESS_V2: Address = address!("2222222222222222222222222222222222222222");

pub const MULTICALL_V1_BLOCK: u64 = 1_111;
pub const MULTICALL_V2_BLOCK: u64 = 2_222;
pub const BATCH_SIZE: usize = 3;

pub fn test_deployments() -> Vec<AggregatorDeployment> {
    vec![
        AggregatorDeployment {
            since_block: MULTICALL_V2_BLOCK,
            address: ADDRESS_V2,
            protocol_version: ProtocolVersion::V2,
            batch_size: BATCH_SIZE,
            native_balance_supported: true,
        },
        AggregatorDeployment {
            since_block: MULTICALL_V1_BLOCK,
            address: ADDRESS_V1,
            protocol_version: ProtocolVersion::V1,
            batch_size: BATCH_SIZE,
            native_balance_supported: true,
        },
    ]
}

/// One `call` observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub to: Address,
    pub data: Bytes,
    pub block: u64,
}

type Responder = Box<dyn Fn(&RecordedCall) -> Result<Bytes, TransportError> + Send + Sync>;

pub struct MockTransport {
    responder: Responder,
    balances: HashMap<Address, U256>,
    calls: Mutex<Vec<RecordedCall>>,
    balance_queries: Mutex<Vec<(Address, u64)>>,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&RecordedCall) -> Result<Bytes, TransportError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            balances: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            balance_queries: Mutex::new(Vec::new()),
        }
    }

    /// Returns the call data back as the response
    pub fn echo() -> Self {
        Self::new(|call| Ok(call.data.clone()))
    }

    pub fn with_balance(mut self, account: Address, amount: U256) -> Self {
        self.balances.insert(account, amount);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn balance_queries(&self) -> Vec<(Address, u64)> {
        self.balance_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl RpcTransport for MockTransport {
    async fn call(&self, target: Address, data: Bytes, block: u64) -> Result<Bytes, TransportError> {
        let call = RecordedCall { to: target, data, block };
        self.calls.lock().unwrap().push(call.clone());
        (self.responder)(&call)
    }

    async fn get_balance(&self, account: Address, block: u64) -> Result<U256, TransportError> {
        self.balance_queries.lock().unwrap().push((account, block));
        self.balances.get(&account).copied().ok_or_else(|| TransportError::Balance {
            account: account.to_string(),
            block,
            reason: "unknown account".to_string(),
        })
    }
}
