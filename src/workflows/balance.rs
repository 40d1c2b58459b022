//! Withdrawal balance resolution across registration generations
//!
//! Two contract generations hold withdrawable funds under different owner
//! keys: the legacy v3 generation keys balances by Stark public key, the
//! current v4 generation by Ethereum address. Both are always queried; the
//! routing policy lives on [`WithdrawalBalance`] so it can be tested apart
//! from the workflow code.

use crate::api::types::{EncodeAssetRequest, MintableTokenResponse};
use crate::api::ImxApi;
use crate::config::ProviderConfiguration;
use crate::constants::{address_to_u256, parse_stark_key, parse_u256};
use crate::contracts::ICore;
use crate::error::Result;
use crate::signer::EthSigner;
use crate::types::Token;
use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;

/// Pending withdrawal balances for one asset under both generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawalBalance {
    /// Balance keyed by Stark public key (legacy generation)
    pub v3: U256,
    /// Balance keyed by Ethereum address (current generation)
    pub v4: U256,
}

/// Which generation's withdrawal path to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithdrawalRoute {
    /// Funds sit under the Stark key; may require on-chain registration
    Legacy,
    /// Funds sit under the Ethereum address; no registration involved
    Current,
}

impl WithdrawalBalance {
    /// Route selection: the legacy balance wins whenever it is non-zero,
    /// `None` when there is nothing to withdraw under either key.
    pub fn route(&self) -> Option<WithdrawalRoute> {
        if !self.v3.is_zero() {
            Some(WithdrawalRoute::Legacy)
        } else if !self.v4.is_zero() {
            Some(WithdrawalRoute::Current)
        } else {
            None
        }
    }
}

/// Everything `complete_withdrawal` needs about one asset.
#[derive(Debug, Clone)]
pub struct ResolvedWithdrawal {
    pub balance: WithdrawalBalance,
    pub asset_type: U256,
    pub asset_id: U256,
    /// Present when the asset is a mintable token not yet minted on L1
    pub mintable: Option<MintableTokenResponse>,
}

/// Resolve the withdrawable state of one asset: mintability (ERC721 only),
/// the encoded asset pair, and the balances under both generations.
pub async fn resolve_withdrawal<A, E>(
    api: &A,
    signer: &E,
    config: &ProviderConfiguration,
    stark_public_key: &str,
    eth_address: Address,
    token: &Token,
) -> Result<ResolvedWithdrawal>
where
    A: ImxApi,
    E: EthSigner,
{
    let mintable = match token {
        Token::Erc721 {
            token_address,
            token_id,
        } => match api
            .get_mintable_token(&token_address.to_string(), token_id)
            .await
        {
            Ok(mint) => Some(mint),
            // 404 means a plain, already-minted ERC721.
            Err(err) if err.is_not_found() => None,
            Err(err) => return Err(err.into()),
        },
        Token::Eth | Token::Erc20 { .. } => None,
    };

    let encoded = api
        .encode_asset(EncodeAssetRequest {
            token: token.to_encode(mintable.as_ref()),
        })
        .await?;
    let asset_type = parse_u256(&encoded.asset_type)?;
    let asset_id = parse_u256(&encoded.asset_id)?;

    let v3 = withdrawal_balance_of(signer, config, parse_stark_key(stark_public_key)?, asset_id)
        .await?;
    let v4 = withdrawal_balance_of(signer, config, address_to_u256(eth_address), asset_id).await?;

    Ok(ResolvedWithdrawal {
        balance: WithdrawalBalance { v3, v4 },
        asset_type,
        asset_id,
        mintable,
    })
}

async fn withdrawal_balance_of<E: EthSigner>(
    signer: &E,
    config: &ProviderConfiguration,
    owner_key: U256,
    asset_id: U256,
) -> Result<U256> {
    let call = ICore::getWithdrawalBalanceCall {
        ownerKey: owner_key,
        assetId: asset_id,
    };
    let data = signer
        .call(config.core_contract_address, call.abi_encode().into())
        .await?;
    Ok(ICore::getWithdrawalBalanceCall::abi_decode_returns(&data)?)
}
