//! Balance query codecs
//!
//! # Modules
//!
//! - [`erc20_utils`]: ERC20 `balanceOf` request encoding and return decoding
//! - [`balance_utils`]: Native-asset balance queries through the aggregator
//!
//! # Example
//!
//! ```
//! use multicall_amounts::utils::erc20_utils::{decode_erc20_balance, encode_erc20_balance};
//! use alloy::primitives::{address, U256};
//!
//! let request = encode_erc20_balance(
//!     address!("28C6c06298d514Db089934071355E5743bf21d60"),
//!     address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
//! );
//! assert_eq!(request.data.len(), 36);
//!
//! let balance = decode_erc20_balance(&U256::from(42u64).to_be_bytes::<32>()).unwrap();
//! assert_eq!(balance, U256::from(42u64));
//! ```

/// ERC20 balance query codec
pub mod erc20_utils;

/// Native balance query codec
pub mod balance_utils;
