//! Token sum type
//!
//! Every workflow dispatches on this type with an exhaustive match; there is
//! no string discriminator anywhere in the crate.

use crate::api::types::{EncodeAssetToken, MintableTokenResponse, SignableToken};
use crate::constants::{ETH_DECIMALS, NFT_AMOUNT};
use alloy::primitives::{Address, U256};

/// An asset on the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The native L1 currency
    Eth,
    /// A fungible ERC20 token
    Erc20 { token_address: Address },
    /// A single ERC721 token
    Erc721 {
        token_address: Address,
        /// Decimal token id
        token_id: String,
    },
}

impl Token {
    /// ERC20 constructor
    pub fn erc20(token_address: Address) -> Self {
        Self::Erc20 { token_address }
    }

    /// ERC721 constructor
    pub fn erc721(token_address: Address, token_id: impl Into<String>) -> Self {
        Self::Erc721 {
            token_address,
            token_id: token_id.into(),
        }
    }

    /// The canonical signable-token shape for this asset. ERC20 deposits
    /// carry the decimals resolved from the API; other flows omit them.
    pub(crate) fn to_signable(&self, erc20_decimals: Option<u8>) -> SignableToken {
        match self {
            Self::Eth => SignableToken::Eth {
                decimals: ETH_DECIMALS,
            },
            Self::Erc20 { token_address } => SignableToken::Erc20 {
                token_address: token_address.to_string(),
                decimals: erc20_decimals,
            },
            Self::Erc721 {
                token_address,
                token_id,
            } => SignableToken::Erc721 {
                token_id: token_id.clone(),
                token_address: token_address.to_string(),
            },
        }
    }

    /// The shape the asset-encoding endpoint expects. A mintable lookup
    /// result switches ERC721 tokens onto the mintable-asset path.
    pub(crate) fn to_encode(&self, mintable: Option<&MintableTokenResponse>) -> EncodeAssetToken {
        match self {
            Self::Eth => EncodeAssetToken::Eth,
            Self::Erc20 { token_address } => EncodeAssetToken::Erc20 {
                token_address: token_address.to_string(),
            },
            Self::Erc721 {
                token_address,
                token_id,
            } => match mintable {
                Some(mint) => EncodeAssetToken::MintableErc721 {
                    id: mint.client_token_id.clone(),
                    token_address: token_address.to_string(),
                    blueprint: mint.blueprint.clone(),
                },
                None => EncodeAssetToken::Erc721 {
                    token_id: token_id.clone(),
                    token_address: token_address.to_string(),
                },
            },
        }
    }

    /// The amount string sent in signable requests: NFTs always move one.
    pub(crate) fn signable_amount(&self, amount: U256) -> String {
        match self {
            Self::Erc721 { .. } => NFT_AMOUNT.to_string(),
            Self::Eth | Self::Erc20 { .. } => amount.to_string(),
        }
    }
}
