//! Error types for the Immutable X SDK
//!
//! Uses `eyre` for ergonomic error handling with context, plus typed errors
//! for the failure modes callers are expected to branch on.

pub use eyre::{eyre, Context, Report, Result};

/// Workflow-level failures a caller can act on.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The signer is connected to a different chain than the configuration
    /// targets. Raised before any API or contract call is issued.
    #[error("signer chain id {actual} does not match configured chain id {expected}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// Both the v3 and v4 withdrawal balances resolved to zero.
    #[error("No balance to withdraw")]
    NoBalanceToWithdraw,
}

/// Connection-level failures surfaced by [`crate::provider::WalletProvider`].
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Failure while establishing the wallet connection.
    #[error("wallet connection failed: {0}")]
    WalletConnection(String),

    /// Failure on an already-connected provider (signing, disconnecting).
    #[error("provider connection failed: {0}")]
    ProviderConnection(String),
}
