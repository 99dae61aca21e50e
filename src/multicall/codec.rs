//! Wire codec for the aggregator contract
//!
//! Two incompatible protocols are supported:
//! - **V1** (`aggregate`): reverts as a whole if any sub-call fails, so every
//!   returned entry is taken as successful.
//! - **V2** (`tryAggregate(false, ..)`): returns an explicit `(success, data)`
//!   pair per call.
//!
//! In both cases an entry with empty return data is reported as unsuccessful.
//! All functions here are pure.

use alloy::{primitives::Bytes, sol_types::SolCall};

use crate::{
    errors::DecodeError,
    types::{CallRequest, CallResult, ProtocolVersion},
};

mod multicall {
    use alloy::sol;

    sol! {
        #[derive(Debug)]
        struct MulticallCall {
            address target;
            bytes callData;
        }

        #[derive(Debug)]
        struct MulticallResult {
            bool success;
            bytes returnData;
        }

        contract Multicall {
            function aggregate(MulticallCall[] calldata calls)
                public payable
                returns (uint256 blockNumber, bytes[] memory returnData);

            function tryAggregate(bool requireSuccess, MulticallCall[] calldata calls)
                public payable
                returns (MulticallResult[] memory returnData);

            function getEthBalance(address addr) public view returns (uint256 balance);
        }
    }
}

pub use multicall::{
    Multicall::{aggregateCall, aggregateReturn, getEthBalanceCall, tryAggregateCall},
    MulticallCall, MulticallResult,
};

fn to_multicall_calls(calls: &[CallRequest]) -> Vec<MulticallCall> {
    calls
        .iter()
        .map(|call| MulticallCall { target: call.target, callData: call.data.clone() })
        .collect()
}

/// Encodes a batch of calls as one aggregate call for `version`
pub fn encode_batch(calls: &[CallRequest], version: ProtocolVersion) -> Bytes {
    let calls = to_multicall_calls(calls);
    match version {
        ProtocolVersion::V1 => aggregateCall { calls }.abi_encode().into(),
        ProtocolVersion::V2 => tryAggregateCall { requireSuccess: false, calls }.abi_encode().into(),
    }
}

/// Decodes an aggregate response into exactly `count` per-call results
///
/// # Errors
/// * `DecodeError::Aggregate` - `raw` does not match the protocol's return shape
/// * `DecodeError::LengthMismatch` - the response holds a different number of entries
pub fn decode_batch(
    raw: &[u8],
    version: ProtocolVersion,
    count: usize,
) -> Result<Vec<CallResult>, DecodeError> {
    let results: Vec<CallResult> = match version {
        ProtocolVersion::V1 => {
            let decoded = aggregateCall::abi_decode_returns(raw)
                .map_err(|e| DecodeError::Aggregate { version, reason: e.to_string() })?;
            decoded
                .returnData
                .into_iter()
                .map(|data| CallResult::from_response(true, data))
                .collect()
        }
        ProtocolVersion::V2 => {
            let decoded = tryAggregateCall::abi_decode_returns(raw)
                .map_err(|e| DecodeError::Aggregate { version, reason: e.to_string() })?;
            decoded
                .into_iter()
                .map(|entry| CallResult::from_response(entry.success, entry.returnData))
                .collect()
        }
    };

    if results.len() != count {
        return Err(DecodeError::LengthMismatch { expected: count, actual: results.len() });
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, bytes, U256};

    fn sample_calls() -> Vec<CallRequest> {
        vec![
            CallRequest::new(address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"), bytes!("123456")),
            CallRequest::new(address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"), Bytes::new()),
            CallRequest::new(address!("cccccccccccccccccccccccccccccccccccccccc"), bytes!("deadbeef")),
        ]
    }

    #[test]
    fn test_encode_uses_protocol_selector() {
        let calls = sample_calls();

        let v1 = encode_batch(&calls, ProtocolVersion::V1);
        assert_eq!(&v1[..4], aggregateCall::SELECTOR.as_slice());
        let decoded = aggregateCall::abi_decode(&v1).unwrap();
        assert_eq!(decoded.calls.len(), 3);
        assert_eq!(decoded.calls[2].target, calls[2].target);
        assert_eq!(decoded.calls[2].callData, calls[2].data);

        let v2 = encode_batch(&calls, ProtocolVersion::V2);
        assert_eq!(&v2[..4], tryAggregateCall::SELECTOR.as_slice());
        let decoded = tryAggregateCall::abi_decode(&v2).unwrap();
        assert!(!decoded.requireSuccess);
        assert_eq!(decoded.calls.len(), 3);
        assert_eq!(decoded.calls[0].callData, calls[0].data);
    }

    #[test]
    fn test_decode_v1_marks_empty_entries_unsuccessful() {
        let raw = aggregateCall::abi_encode_returns(&aggregateReturn {
            blockNumber: U256::from(1112),
            returnData: vec![bytes!("12"), bytes!("0f00"), Bytes::new()],
        });

        let results = decode_batch(&raw, ProtocolVersion::V1, 3).unwrap();
        assert_eq!(
            results,
            vec![
                CallResult { success: true, data: bytes!("12") },
                CallResult { success: true, data: bytes!("0f00") },
                CallResult { success: false, data: Bytes::new() },
            ]
        );
    }

    #[test]
    fn test_decode_v2_keeps_reported_failures() {
        let raw = tryAggregateCall::abi_encode_returns(&vec![
            MulticallResult { success: true, returnData: bytes!("12") },
            MulticallResult { success: false, returnData: bytes!("0f00") },
            MulticallResult { success: true, returnData: Bytes::new() },
        ]);

        let results = decode_batch(&raw, ProtocolVersion::V2, 3).unwrap();
        assert_eq!(
            results,
            vec![
                CallResult { success: true, data: bytes!("12") },
                CallResult { success: false, data: bytes!("0f00") },
                CallResult { success: false, data: Bytes::new() },
            ]
        );
    }

    #[test]
    fn test_decode_rejects_wrong_entry_count() {
        let raw = tryAggregateCall::abi_encode_returns(&vec![MulticallResult {
            success: true,
            returnData: bytes!("01"),
        }]);

        match decode_batch(&raw, ProtocolVersion::V2, 2) {
            Err(DecodeError::LengthMismatch { expected: 2, actual: 1 }) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_decode_rejects_malformed_payload() {
        assert!(matches!(
            decode_batch(&[0x01, 0x02], ProtocolVersion::V1, 1),
            Err(DecodeError::Aggregate { version: ProtocolVersion::V1, .. })
        ));
        assert!(matches!(
            decode_batch(&[], ProtocolVersion::V2, 0),
            Err(DecodeError::Aggregate { version: ProtocolVersion::V2, .. })
        ));
    }
}
