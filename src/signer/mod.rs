//! Signer abstractions for the Immutable X SDK
//!
//! Every provider holds a pair of independent signers: an Ethereum (L1)
//! signer that produces personal-message signatures and submits
//! transactions, and a Stark-curve (L2) signer that signs payload hashes.
//! The L2 key may live in the same process ([`LocalStarkSigner`]) or behind
//! a wallet connection ([`ChannelStarkSigner`]).

mod local;
mod remote;
mod stark;

pub use local::LocalEthSigner;
pub use remote::ChannelStarkSigner;
pub use stark::LocalStarkSigner;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use eyre::Result;

/// Transaction request parameters
#[derive(Debug, Clone)]
pub struct TxRequest {
    /// Target contract address
    pub to: Address,
    /// Transaction value in wei
    pub value: U256,
    /// Encoded calldata
    pub data: Bytes,
    /// Optional gas limit override
    pub gas_limit: Option<u64>,
}

impl TxRequest {
    /// Create a new transaction request
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value: U256::ZERO,
            data: data.into(),
            gas_limit: None,
        }
    }

    /// Set transaction value
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Set gas limit
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }
}

/// Ethereum (L1) signing capability.
///
/// Besides signing, the trait carries the two provider reads the workflows
/// need: the connected chain id (validated against configuration before any
/// operation) and plain `eth_call` lookups.
pub trait EthSigner: Send + Sync {
    /// Returns the signer's EVM address
    fn address(&self) -> Address;

    /// Returns the chain id the signer's provider is connected to
    fn chain_id(&self) -> impl std::future::Future<Output = Result<u64>> + Send;

    /// Signs a personal (EIP-191) message, returning the 0x-prefixed
    /// 65-byte signature
    fn sign_message(
        &self,
        message: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Read-only contract call
    fn call(
        &self,
        to: Address,
        data: Bytes,
    ) -> impl std::future::Future<Output = Result<Bytes>> + Send;

    /// Signs and sends a transaction, returning the transaction hash
    /// without awaiting confirmation
    fn send_transaction(
        &self,
        tx: TxRequest,
    ) -> impl std::future::Future<Output = Result<TxHash>> + Send;
}

/// Stark-curve (L2) signing capability.
pub trait StarkSigner: Send + Sync {
    /// The Stark public key this signer controls, as a 0x-prefixed hex felt
    fn public_key(&self) -> &str;

    /// Signs a signable payload hash, returning the 0x-prefixed r‖s
    /// signature
    fn sign_message(
        &self,
        payload_hash: &str,
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
