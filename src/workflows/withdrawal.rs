//! Withdrawal workflows: move L2-escrowed funds back to L1
//!
//! Prepare is purely off-chain: it submits the dual-signed withdrawal to
//! the network, which moves the funds into the on-chain pending area.
//! Complete then executes the L1 transaction that releases them, routed by
//! registration generation (v3 balances sit under the Stark key, v4 under
//! the Ethereum address) and, for ERC721, by mintability.

use crate::api::types::{CreateWithdrawalRequest, CreateWithdrawalResponse,
    GetSignableWithdrawalRequest};
use crate::api::ImxApi;
use crate::config::ProviderConfiguration;
use crate::constants::{address_to_u256, minting_blob, parse_hex_bytes, parse_stark_key,
    parse_u256};
use crate::contracts::{ICore, IRegistration};
use crate::error::{Result, WorkflowError};
use crate::signer::{EthSigner, StarkSigner, TxRequest};
use crate::types::Token;
use crate::workflows::balance::{self, ResolvedWithdrawal, WithdrawalRoute};
use crate::workflows::registration;
use alloy::primitives::{Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use tracing::info;

/// Request, dual-sign and submit a withdrawal, returning the network's
/// withdrawal record. No L1 transaction is involved.
pub async fn prepare_withdrawal<A, E, S>(
    api: &A,
    eth_signer: &E,
    stark_signer: &S,
    token: &Token,
    amount: U256,
) -> Result<CreateWithdrawalResponse>
where
    A: ImxApi,
    E: EthSigner,
    S: StarkSigner,
{
    let eth_address = eth_signer.address().to_string();
    let signable = api
        .get_signable_withdrawal(GetSignableWithdrawalRequest {
            user: eth_address.clone(),
            token: token.to_signable(None),
            amount: token.signable_amount(amount),
        })
        .await?;

    let stark_signature = stark_signer.sign_message(&signable.payload_hash).await?;
    let eth_signature = eth_signer
        .sign_message(signable.signable_message.as_bytes())
        .await?;

    let request = CreateWithdrawalRequest::from_signable(signable, stark_signature);
    let response = api
        .create_withdrawal(request, &eth_address, &eth_signature)
        .await?;
    info!(withdrawal_id = response.withdrawal_id, "prepared withdrawal");
    Ok(response)
}

/// Execute the on-chain side of a prepared withdrawal.
pub async fn complete_withdrawal<A, E>(
    api: &A,
    signer: &E,
    config: &ProviderConfiguration,
    stark_public_key: &str,
    token: &Token,
) -> Result<TxHash>
where
    A: ImxApi,
    E: EthSigner,
{
    let resolved =
        balance::resolve_withdrawal(api, signer, config, stark_public_key, signer.address(), token)
            .await?;

    let route = resolved
        .balance
        .route()
        .ok_or(WorkflowError::NoBalanceToWithdraw)?;

    let hash = match route {
        WithdrawalRoute::Legacy => {
            complete_legacy(api, signer, config, stark_public_key, token, &resolved).await?
        }
        WithdrawalRoute::Current => {
            let owner_key = address_to_u256(signer.address());
            let data = withdraw_calldata(owner_key, token, &resolved)?;
            signer
                .send_transaction(TxRequest::new(config.core_contract_address, data))
                .await?
        }
    };
    info!(%hash, ?route, "submitted withdrawal completion");
    Ok(hash)
}

/// v3 path: funds sit under the Stark key. A registered key withdraws
/// straight from the core contract; an unregistered one goes through the
/// combined register-and-withdraw entry point with the operator signature.
async fn complete_legacy<A, E>(
    api: &A,
    signer: &E,
    config: &ProviderConfiguration,
    stark_public_key: &str,
    token: &Token,
    resolved: &ResolvedWithdrawal,
) -> Result<TxHash>
where
    A: ImxApi,
    E: EthSigner,
{
    let registered = registration::is_registered_onchain(
        signer,
        config.registration_contract_address,
        stark_public_key,
    )
    .await?;
    let stark_key = parse_stark_key(stark_public_key)?;

    if registered {
        let data = withdraw_calldata(stark_key, token, resolved)?;
        return signer
            .send_transaction(TxRequest::new(config.core_contract_address, data))
            .await;
    }

    let eth_address = signer.address();
    let signature =
        parse_hex_bytes(&registration::operator_signature(api, eth_address, stark_public_key).await?)?;

    let data: Bytes = match (token, &resolved.mintable) {
        (Token::Eth | Token::Erc20 { .. }, _) => IRegistration::registerAndWithdrawCall {
            ethKey: eth_address,
            starkKey: stark_key,
            signature,
            assetType: resolved.asset_type,
        }
        .abi_encode()
        .into(),
        (Token::Erc721 { token_id, .. }, None) => IRegistration::registerAndWithdrawNftCall {
            ethKey: eth_address,
            starkKey: stark_key,
            signature,
            assetType: resolved.asset_type,
            tokenId: parse_u256(token_id)?,
        }
        .abi_encode()
        .into(),
        (Token::Erc721 { .. }, Some(mint)) => IRegistration::registerWithdrawAndMintCall {
            ethKey: eth_address,
            starkKey: stark_key,
            signature,
            assetType: resolved.asset_type,
            mintingBlob: minting_blob(
                &mint.client_token_id,
                mint.blueprint.as_deref().unwrap_or_default(),
            ),
        }
        .abi_encode()
        .into(),
    };

    signer
        .send_transaction(TxRequest::new(config.registration_contract_address, data))
        .await
}

/// Plain core-contract withdrawal calldata for a registered owner key.
fn withdraw_calldata(owner_key: U256, token: &Token, resolved: &ResolvedWithdrawal) -> Result<Bytes> {
    let data: Bytes = match (token, &resolved.mintable) {
        (Token::Eth | Token::Erc20 { .. }, _) => ICore::withdrawCall {
            ownerKey: owner_key,
            assetType: resolved.asset_type,
        }
        .abi_encode()
        .into(),
        (Token::Erc721 { token_id, .. }, None) => ICore::withdrawNftCall {
            ownerKey: owner_key,
            assetType: resolved.asset_type,
            tokenId: parse_u256(token_id)?,
        }
        .abi_encode()
        .into(),
        (Token::Erc721 { .. }, Some(mint)) => ICore::withdrawAndMintCall {
            ownerKey: owner_key,
            assetType: resolved.asset_type,
            mintingBlob: minting_blob(
                &mint.client_token_id,
                mint.blueprint.as_deref().unwrap_or_default(),
            ),
        }
        .abi_encode()
        .into(),
    };
    Ok(data)
}
