//! Registration state machine
//!
//! Two independent axes: the off-chain user record (REST) and the on-chain
//! key binding (registration contract). Both are derived on demand, never
//! cached.

use crate::api::types::{GetSignableRegistrationRequest, RegisterUserRequest, RegisterUserResponse};
use crate::api::ImxApi;
use crate::constants::parse_stark_key;
use crate::contracts::IRegistration;
use crate::error::Result;
use crate::signer::{EthSigner, StarkSigner};
use alloy::primitives::Address;
use alloy::sol_types::SolCall;
use tracing::info;

/// Whether the network holds a user record for this Ethereum address.
/// A 404 from the lookup is the normal "not registered" signal; any other
/// failure propagates unchanged.
pub async fn is_registered_offchain<A: ImxApi>(api: &A, eth_address: Address) -> Result<bool> {
    match api.get_user(&eth_address.to_string()).await {
        Ok(user) => Ok(!user.accounts.is_empty()),
        Err(err) if err.is_not_found() => Ok(false),
        Err(err) => Err(err.into()),
    }
}

/// Register the signer pair's account off-chain: fetch the signable
/// registration, sign its message with L1 and its payload hash with L2, and
/// submit both signatures.
pub async fn register_offchain<A, E, S>(
    api: &A,
    eth_signer: &E,
    stark_signer: &S,
) -> Result<RegisterUserResponse>
where
    A: ImxApi,
    E: EthSigner,
    S: StarkSigner,
{
    let ether_key = eth_signer.address().to_string();
    let stark_key = stark_signer.public_key().to_string();

    let signable = api
        .get_signable_registration_offchain(GetSignableRegistrationRequest {
            ether_key: ether_key.clone(),
            stark_key: stark_key.clone(),
        })
        .await?;

    let eth_signature = eth_signer
        .sign_message(signable.signable_message.as_bytes())
        .await?;
    let stark_signature = stark_signer.sign_message(&signable.payload_hash).await?;

    let response = api
        .register_user(RegisterUserRequest {
            ether_key,
            stark_key,
            eth_signature,
            stark_signature,
        })
        .await?;
    info!(tx_hash = %response.tx_hash, "registered user off-chain");
    Ok(response)
}

/// Whether a Stark key is registered on the given registration contract.
/// Some deployments revert with USER_UNREGISTERED instead of returning
/// false; that revert reason maps to `false`, anything else propagates.
pub async fn is_registered_onchain<E: EthSigner>(
    signer: &E,
    registration_contract: Address,
    stark_public_key: &str,
) -> Result<bool> {
    let call = IRegistration::isRegisteredCall {
        starkKey: parse_stark_key(stark_public_key)?,
    };
    match signer.call(registration_contract, call.abi_encode().into()).await {
        Ok(data) => Ok(IRegistration::isRegisteredCall::abi_decode_returns(&data)?),
        Err(err) if format!("{err:#}").contains("USER_UNREGISTERED") => Ok(false),
        Err(err) => Err(err),
    }
}

/// Fetch the operator co-signature over the (ether key, stark key) binding,
/// required by the combined register-and-withdraw contract entry points.
pub async fn operator_signature<A: ImxApi>(
    api: &A,
    eth_address: Address,
    stark_public_key: &str,
) -> Result<String> {
    let response = api
        .get_signable_registration_onchain(GetSignableRegistrationRequest {
            ether_key: eth_address.to_string(),
            stark_key: stark_public_key.to_string(),
        })
        .await?;
    Ok(response.operator_signature)
}
