//! User-facing types for the Immutable X SDK

mod token;

pub use token::Token;

use alloy::primitives::{Address, U256};

/// Parameters for a single L2 transfer
#[derive(Debug, Clone)]
pub struct TransferParams {
    /// Asset to transfer
    pub token: Token,
    /// Amount in the token's smallest unit (ignored for ERC721, which always
    /// moves a quantity of one)
    pub amount: U256,
    /// Receiving Ethereum address
    pub receiver: Address,
}

impl TransferParams {
    /// Create transfer params
    pub fn new(token: Token, amount: U256, receiver: Address) -> Self {
        Self {
            token,
            amount,
            receiver,
        }
    }

    pub(crate) fn signable_amount(&self) -> String {
        self.token.signable_amount(self.amount)
    }
}

/// Parameters for creating an order
#[derive(Debug, Clone)]
pub struct OrderParams {
    /// Asset offered
    pub token_sell: Token,
    /// Amount offered, in the sell token's smallest unit
    pub amount_sell: U256,
    /// Asset requested
    pub token_buy: Token,
    /// Amount requested, in the buy token's smallest unit
    pub amount_buy: U256,
    /// Optional order expiration (unix seconds); the network applies its
    /// default when omitted
    pub expiration_timestamp: Option<u64>,
}

impl OrderParams {
    /// Sell `amount_sell` of `token_sell` for `amount_buy` of `token_buy`
    pub fn new(token_sell: Token, amount_sell: U256, token_buy: Token, amount_buy: U256) -> Self {
        Self {
            token_sell,
            amount_sell,
            token_buy,
            amount_buy,
            expiration_timestamp: None,
        }
    }

    /// Set an explicit expiration timestamp
    pub fn with_expiration(mut self, expiration_timestamp: u64) -> Self {
        self.expiration_timestamp = Some(expiration_timestamp);
        self
    }
}
