//! Fetches a native and a token escrow balance on Ethereum at a historical block.
//!
//! ```sh
//! RUST_LOG=debug ETH_RPC_URL=https://eth.llamarpc.com cargo run --example fetch_amounts
//! ```

use std::sync::Arc;

use alloy::primitives::{address, utils::format_units};
use anyhow::Result;
use multicall_amounts::{
    transport::AlloyTransport,
    types::{HeldAsset, TrackedAccount},
    ChainAmountService, MulticallClient, MulticallConfig,
};

const BLOCK_NUMBER: u64 = 18_600_000;
const BLOCK_TIMESTAMP: u64 = 1_700_398_511;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let rpc_url = std::env::var("ETH_RPC_URL").unwrap_or_else(|_| "https://eth.llamarpc.com".to_string());
    let transport = Arc::new(AlloyTransport::connect(&rpc_url).await?);
    let client = MulticallClient::new(Arc::clone(&transport), MulticallConfig::for_chain("ethereum")?);
    let service = ChainAmountService::from_multicall(transport, client);

    // Arbitrum One bridge escrows
    let accounts = vec![
        TrackedAccount {
            id: 1,
            held_asset: HeldAsset::Native,
            escrow_address: address!("8315177aB297bA92A06054cE80a67Ed4DBd7ed3a"),
            chain: "ethereum".to_string(),
        },
        TrackedAccount {
            id: 2,
            held_asset: HeldAsset::Token(address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48")),
            escrow_address: address!("cEe284F754E854890e311e3280b767F80797180d"),
            chain: "ethereum".to_string(),
        },
    ];

    let records = service.fetch_amounts(&accounts, BLOCK_TIMESTAMP, BLOCK_NUMBER).await?;
    for record in records {
        let decimals: u8 = if record.account_id == 1 { 18 } else { 6 };
        println!(
            "account {} @ {}: {}",
            record.account_id,
            record.timestamp,
            format_units(record.amount, decimals)?
        );
    }
    Ok(())
}
