//! Immutable X SDK for Rust
//!
//! A client-side signing and transaction-orchestration layer for a
//! dual-layer (L1 Ethereum / L2 Stark) trading network. It pairs an
//! Ethereum signer with a Stark-curve signer behind one provider interface
//! and sequences the multi-step deposit, withdrawal, trade and transfer
//! protocols across the two layers.
//!
//! # Features
//!
//! - Deposit ETH / ERC20 / ERC721 assets from L1 into L2
//! - Prepare and complete withdrawals across both registration generations
//! - Create, cancel and fill orders; single, batch and exchange transfers
//! - Off-chain and on-chain account registration
//! - Wallet-connected L2 signing over an id-correlated message channel
//!
//! # Example
//!
//! ```rust,ignore
//! use imx_sdk::{ImxApiClient, ImxClient, LocalEthSigner, LocalStarkSigner,
//!     ProviderConfiguration, Token};
//! use alloy::primitives::U256;
//!
//! #[tokio::main]
//! async fn main() -> eyre::Result<()> {
//!     let config = ProviderConfiguration::sandbox();
//!     let eth_signer = LocalEthSigner::from_private_key("0x...", "https://rpc...").await?;
//!     let stark_signer = LocalStarkSigner::from_private_key("0x...")?;
//!     let api = ImxApiClient::new(config.api_base_url.clone());
//!     let client = ImxClient::new(api, eth_signer, stark_signer, config);
//!
//!     if !client.is_registered_offchain().await? {
//!         client.register_offchain().await?;
//!     }
//!
//!     // Deposit 1 ETH into L2
//!     let tx_hash = client.deposit_eth(U256::from(10u64).pow(U256::from(18u64))).await?;
//!     println!("deposit submitted: {tx_hash}");
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod channel;
pub mod client;
pub mod config;
pub mod constants;
pub mod contracts;
pub mod error;
pub mod provider;
pub mod signer;
pub mod types;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export main types for convenience
pub use api::{ApiError, ImxApi, ImxApiClient};
pub use channel::{ChannelError, WalletConnection};
pub use client::ImxClient;
pub use config::{Environment, ProviderConfiguration};
pub use error::{eyre, Context, ProviderError, Report, Result, WorkflowError};
pub use provider::WalletProvider;
pub use signer::{ChannelStarkSigner, EthSigner, LocalEthSigner, LocalStarkSigner, StarkSigner,
    TxRequest};
pub use types::{OrderParams, Token, TransferParams};
pub use workflows::balance::{WithdrawalBalance, WithdrawalRoute};
